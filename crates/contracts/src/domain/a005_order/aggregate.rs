use crate::domain::common::{FieldKind, FieldOption, FieldSpec, ResourceDescriptor};

/// Заказы: только просмотр и смена статуса через `PUT`
pub const ORDERS: ResourceDescriptor = ResourceDescriptor {
    item_key: Some("order"),
    default_limit: 20,
    bulk_refetch_limit: 20,
    ..ResourceDescriptor::new("orders", "Order", "/admin/orders")
};

pub const STATS_PATH: &str = "/admin/orders/stats";
pub const STATS_KEY: &str = "stats";

pub const ORDER_STATUSES: [&str; 6] = [
    "Pending",
    "Confirmed",
    "Processing",
    "Shipped",
    "Delivered",
    "Cancelled",
];

pub const PAYMENT_STATUSES: [&str; 4] = ["Pending", "Paid", "Failed", "Refunded"];

/// Order list filter key.
pub const STATUS_FILTER: &str = "status";

/// Fields editable from the order details panel.
pub fn status_form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::select(
            "status",
            "Order Status",
            FieldOption::plain_list(&ORDER_STATUSES),
        )
        .required()
        .default_value("Pending"),
        FieldSpec::select(
            "paymentStatus",
            "Payment Status",
            FieldOption::plain_list(&PAYMENT_STATUSES),
        )
        .default_value("Pending"),
        FieldSpec::text("trackingNumber", "Tracking Number"),
        FieldSpec::new("adminNotes", "Admin Notes", FieldKind::TextArea),
    ]
}

/// Visual group of an order status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Waiting,
    InProgress,
    Shipped,
    Done,
    Cancelled,
}

pub fn status_tone(status: &str) -> StatusTone {
    match status {
        "Confirmed" | "Processing" => StatusTone::InProgress,
        "Shipped" => StatusTone::Shipped,
        "Delivered" => StatusTone::Done,
        "Cancelled" => StatusTone::Cancelled,
        _ => StatusTone::Waiting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{form_values, normalize_item, normalize_list, ListQuery};
    use serde_json::json;

    #[test]
    fn flat_envelope_and_wrapped_item() {
        let body = json!({"orders": [{"_id": "o1"}], "page": 2, "pages": 3, "total": 45});
        let page = normalize_list(body, ORDERS.list_key, &ListQuery::new(2, 20)).unwrap();
        assert_eq!(page.pagination.map(|p| p.total_pages()), Some(3));

        let order = normalize_item(json!({"order": {"_id": "o1", "status": "Shipped"}}), ORDERS.item_key)
            .unwrap();
        assert_eq!(order.str_field("status"), Some("Shipped"));
    }

    #[test]
    fn status_form_defaults() {
        let values = form_values(&status_form_fields(), None);
        assert_eq!(values["status"], "Pending");
        assert_eq!(values["paymentStatus"], "Pending");
    }

    #[test]
    fn tones() {
        assert_eq!(status_tone("Processing"), StatusTone::InProgress);
        assert_eq!(status_tone("Pending"), StatusTone::Waiting);
        assert_eq!(status_tone("unknown"), StatusTone::Waiting);
    }
}
