use crate::domain::common::{FieldSpec, IdentityField, ResourceDescriptor};

/// Металлы: полный список без пагинации, ключ записи `metal_type`
pub const METALS: ResourceDescriptor = ResourceDescriptor {
    item_key: Some("metal"),
    identity: IdentityField::Natural("metal_type"),
    default_limit: 100,
    bulk_refetch_limit: 100,
    ..ResourceDescriptor::new("metals", "Metal", "/admin/metals")
};

pub fn form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("metal_type", "Metal Type (ID)").required(),
        FieldSpec::text("metal_code", "Metal Code").required(),
        FieldSpec::number("rate_per_gram", "Rate Per Gram ($)").required(),
        FieldSpec::number("price_multiplier", "Price Multiplier").default_value("1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::Record;

    #[test]
    fn identity_is_metal_type() {
        let record = Record::new()
            .with("_id", "65f0")
            .with("metal_type", "18k_white_gold");
        assert_eq!(METALS.identity_of(&record).as_deref(), Some("18k_white_gold"));
        assert_eq!(
            METALS.item_path("18k_white_gold"),
            "/admin/metals/18k_white_gold"
        );
    }
}
