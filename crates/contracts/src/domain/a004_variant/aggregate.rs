use crate::domain::common::{FieldSpec, ListRoute, ResourceDescriptor};

/// Варианты товара: список всегда в разрезе одного товара
pub const VARIANTS: ResourceDescriptor = ResourceDescriptor {
    list_route: ListRoute::Scoped("product"),
    item_key: Some("variant"),
    default_limit: 100,
    bulk_refetch_limit: 100,
    ..ResourceDescriptor::new("variants", "Variant", "/admin/variants")
};

pub fn form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("productSku", "Product SKU").required(),
        FieldSpec::text("variantSku", "Variant SKU").required(),
        FieldSpec::text("metalType", "Metal Type"),
        FieldSpec::text("metalCode", "Metal Code"),
        FieldSpec::text("shape_code", "Shape Code"),
        FieldSpec::number("centerStoneWeight", "Carat Weight"),
        FieldSpec::number("centerStonePrice", "Stone Price"),
        FieldSpec::number("metalPrice", "Metal Price").required(),
        FieldSpec::number("stock", "Stock Qty").default_value("0"),
        FieldSpec::checkbox("active", "Active").default_value("true"),
    ]
}

/// Price shown in the list: metal plus center stone.
pub fn variant_price(record: &crate::domain::common::Record) -> f64 {
    record.f64_field("price").unwrap_or_else(|| {
        record.f64_field("metalPrice").unwrap_or(0.0)
            + record.f64_field("centerStonePrice").unwrap_or(0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{ListQuery, Record};

    #[test]
    fn list_path_is_per_product() {
        assert_eq!(
            VARIANTS.list_path(&ListQuery::scoped("p 1")).as_deref(),
            Some("/admin/variants/product/p%201")
        );
    }

    #[test]
    fn price_falls_back_to_components() {
        let r = Record::new()
            .with("metalPrice", 400)
            .with("centerStonePrice", "1100.5");
        assert_eq!(variant_price(&r), 1500.5);
        assert_eq!(variant_price(&r.with("price", 999)), 999.0);
    }
}
