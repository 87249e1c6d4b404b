use crate::domain::common::{
    FieldKind, FieldSpec, ImportTemplate, ResourceDescriptor, StatusRoute, StatusToggle,
};

pub const PRODUCTS: ResourceDescriptor = ResourceDescriptor {
    list_key: "items",
    status: Some(StatusToggle {
        field: "active",
        route: StatusRoute::ActivateDeactivate,
        response_key: Some("product"),
        labelled: false,
    }),
    bulk_path: Some("bulk-upload"),
    ..ResourceDescriptor::new("products", "Product", "/admin/products")
};

pub const IMPORT_TEMPLATE: ImportTemplate = ImportTemplate {
    filename: "product_template.csv",
    columns: &[
        ("productSku", "RING-001"),
        ("productName", "Solitaire Ring"),
        ("defaultPrice", "1500"),
        ("active", "true"),
    ],
};

pub fn form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("productSku", "Product SKU").required(),
        FieldSpec::text("productName", "Product Name").required(),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
        FieldSpec::new("categories", "Category", FieldKind::List),
        FieldSpec::text("style", "Style"),
        FieldSpec::text("defaultShape", "Default Shape"),
        FieldSpec::new("availableMetalTypes", "Available Metals", FieldKind::List),
        FieldSpec::new("availableShapes", "Available Shapes", FieldKind::List),
        FieldSpec::number("defaultPrice", "Base Price ($)").required(),
        FieldSpec::number("discountPercent", "Discount (%)").default_value("0"),
        FieldSpec::number("defaultMetalWeight", "Metal Wt (g)"),
        FieldSpec::number("lead_days", "Lead Time (Days)"),
        FieldSpec::new("delivery_date", "Expected Delivery Date", FieldKind::Date),
        FieldSpec::text("imageUrl1", "Primary Image URL"),
        FieldSpec::text("imageUrl2", "Secondary Image URL"),
        FieldSpec::checkbox("active", "Active").default_value("true"),
        FieldSpec::checkbox("readyToShip", "Ready to Ship").default_value("false"),
        FieldSpec::checkbox("engravingAllowed", "Engraving Allowed").default_value("false"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{normalize_list, ListQuery};
    use serde_json::json;

    #[test]
    fn list_envelope_uses_items_key() {
        let body = json!({
            "items": [{"_id": "p1", "productSku": "RING-001"}],
            "pagination": {"page": 1, "limit": 50, "total": 1}
        });
        let page = normalize_list(body, PRODUCTS.list_key, &PRODUCTS.default_query()).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(PRODUCTS.refetch_query(), ListQuery::new(1, 50));
        assert_eq!(
            PRODUCTS.bulk_import_path().as_deref(),
            Some("/admin/products/bulk-upload")
        );
    }
}
