//! Tab content registry - единственный источник правды для маппинга tab.key → View

use crate::domain::a001_diamond::ui::list::DiamondList;
use crate::domain::a002_metal::ui::list::MetalList;
use crate::domain::a003_product::ui::list::ProductList;
use crate::domain::a004_variant::ui::list::VariantList;
use crate::domain::a005_order::ui::list::OrderList;
use crate::domain::a006_coupon::ui::list::CouponList;
use crate::domain::a007_contact::ui::list::ContactList;
use crate::domain::a008_media::ui::library::MediaLibrary;
use crate::stores::AdminStores;
use leptos::prelude::*;

/// Рендерит контент таба по его ключу. Неизвестный ключ даёт заглушку.
pub fn render_tab_content(key: &str, stores: AdminStores) -> AnyView {
    match key {
        // Catalog
        "diamonds" => view! { <DiamondList store=stores.diamonds /> }.into_any(),
        "metals" => view! { <MetalList store=stores.metals /> }.into_any(),
        "products" => view! { <ProductList store=stores.products /> }.into_any(),
        "variants" => view! { <VariantList store=stores.variants /> }.into_any(),

        // Sales
        "orders" => view! { <OrderList store=stores.orders /> }.into_any(),
        "coupons" => view! { <CouponList store=stores.coupons /> }.into_any(),

        // Content
        "media" => view! { <MediaLibrary stores=stores.media /> }.into_any(),
        "contacts" => view! { <ContactList store=stores.contacts /> }.into_any(),

        _ => {
            log::warn!("unknown tab key: {}", key);
            let key = key.to_string();
            view! {
                <div class="placeholder">
                    {format!("Page '{}' does not exist", key)}
                </div>
            }
            .into_any()
        }
    }
}
