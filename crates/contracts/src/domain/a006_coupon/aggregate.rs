use crate::domain::common::{
    FieldKind, FieldOption, FieldSpec, Record, ResourceDescriptor, StatusRoute, StatusToggle,
    StatusValue,
};

pub const COUPONS: ResourceDescriptor = ResourceDescriptor {
    item_key: Some("coupon"),
    status: Some(StatusToggle {
        field: "status",
        route: StatusRoute::StatusBody,
        response_key: Some("coupon"),
        labelled: true,
    }),
    default_limit: 20,
    bulk_refetch_limit: 20,
    ..ResourceDescriptor::new("coupons", "Coupon", "/admin/coupons")
};

pub fn discount_type_options() -> Vec<FieldOption> {
    vec![
        FieldOption::labeled("percent", "Percentage (%)"),
        FieldOption::labeled("fixed", "Fixed Amount ($)"),
    ]
}

pub fn status_options() -> Vec<FieldOption> {
    vec![
        FieldOption::labeled(StatusValue::ACTIVE, "Active"),
        FieldOption::labeled(StatusValue::INACTIVE, "Inactive"),
    ]
}

pub fn form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("code", "Coupon Code").required(),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
        FieldSpec::select("discountType", "Discount Type", discount_type_options())
            .required()
            .default_value("percent"),
        FieldSpec::number("discountValue", "Value").required(),
        FieldSpec::number("minOrderAmount", "Min Order Amount"),
        FieldSpec::number("maxDiscountAmount", "Max Discount Amount"),
        FieldSpec::new("startDate", "Start Date", FieldKind::Date),
        FieldSpec::new("endDate", "End Date", FieldKind::Date),
        FieldSpec::number("maxGlobalUses", "Max Global Uses"),
        FieldSpec::number("maxUsesPerUser", "Max Uses Per User"),
        FieldSpec::select("status", "Status", status_options())
            .required()
            .default_value(StatusValue::ACTIVE),
    ]
}

/// `15% OFF` or `$20 OFF`.
pub fn discount_text(record: &Record) -> String {
    let value = record.display("discountValue");
    if record.str_field("discountType") == Some("percent") {
        format!("{value}% OFF")
    } else {
        format!("${value} OFF")
    }
}

/// `used / limit`, unlimited coupons show `∞`.
pub fn usage_text(record: &Record) -> String {
    let used = record.f64_field("usedCount").unwrap_or(0.0);
    let limit = record
        .f64_field("maxGlobalUses")
        .filter(|l| *l > 0.0)
        .map_or_else(|| "∞".to_string(), |l| l.to_string());
    format!("{used} / {limit}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn toggle_sends_labelled_status() {
        let toggle = COUPONS.status.unwrap();
        let coupon = Record::new().with("_id", "c1").with("status", "active");
        let target = toggle.current(&coupon).complement();
        assert_eq!(target, StatusValue::Label("inactive".into()));
        assert_eq!(
            COUPONS.status_path("c1", &target).as_deref(),
            Some("/admin/coupons/c1/status")
        );
        assert_eq!(toggle.request_body(&target), Some(json!({"status": "inactive"})));
    }

    #[test]
    fn cell_texts() {
        let coupon = Record::new()
            .with("discountType", "percent")
            .with("discountValue", 15)
            .with("usedCount", 3);
        assert_eq!(discount_text(&coupon), "15% OFF");
        assert_eq!(usage_text(&coupon), "3 / ∞");

        let fixed = coupon
            .with("discountType", "fixed")
            .with("maxGlobalUses", 100);
        assert_eq!(discount_text(&fixed), "$15 OFF");
        assert_eq!(usage_text(&fixed), "3 / 100");
    }
}
