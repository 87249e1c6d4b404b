//! Tab labels - единственный источник правды для заголовков табов.

/// Page opened when the URL names none.
pub const DEFAULT_PAGE: &str = "diamonds";

/// Возвращает читаемый заголовок таба для данного ключа. Fallback: "".
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        // ── Catalog ───────────────────────────────────────────────────────
        "diamonds" => "Diamonds",
        "metals" => "Metals",
        "products" => "Products",
        "variants" => "Variants",

        // ── Sales ─────────────────────────────────────────────────────────
        "orders" => "Orders",
        "coupons" => "Coupons",

        // ── Content / customers ──────────────────────────────────────────
        "media" => "Media Library",
        "contacts" => "Messages",

        _ => "",
    }
}

/// Every page key the registry renders.
pub const PAGE_KEYS: [&str; 8] = [
    "diamonds", "metals", "products", "variants", "orders", "coupons", "media", "contacts",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_has_a_label() {
        for key in PAGE_KEYS {
            assert!(!tab_label_for_key(key).is_empty(), "{key}");
        }
        assert!(PAGE_KEYS.contains(&DEFAULT_PAGE));
        assert_eq!(tab_label_for_key("unknown"), "");
    }
}
