//! Application Shell - основной layout (Shell + Sidebar + Tabs)

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::Sidebar;
use crate::layout::tabs::{tab_label_for_key, TabPage, DEFAULT_PAGE};
use crate::layout::Shell;
use crate::stores::AdminStores;
use leptos::prelude::*;

/// Инициализирует синхронизацию табов с URL (?active=...) и открывает
/// страницу по умолчанию.
#[component]
pub fn MainLayout(stores: AdminStores) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    tabs_store.init_router_integration((DEFAULT_PAGE, tab_label_for_key(DEFAULT_PAGE)));

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            view! { <TabPage tab=tab tabs_store=tabs_store stores=stores /> }
                        }
                    />
                }
                .into_any()
            }
        />
    }
}
