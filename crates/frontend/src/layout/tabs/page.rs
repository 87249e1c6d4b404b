//! TabPage component - wrapper для отображения контента таба
//!
//! Контент создаётся один раз при открытии таба и скрывается CSS-классом,
//! пока таб не активен, поэтому страница сохраняет фильтры и позицию.

use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::stores::AdminStores;
use leptos::prelude::*;

#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext, stores: AdminStores) -> impl IntoView {
    let tab_key = tab.key.clone();
    let tab_key_for_active_check = tab_key.clone();

    let is_active = move || tabs_store.active.get().as_ref() == Some(&tab_key_for_active_check);

    log::debug!("tab page created: '{}'", tab_key);
    let tab_key_for_cleanup = tab_key.clone();
    on_cleanup(move || {
        log::debug!("tab page destroyed: '{}'", tab_key_for_cleanup);
    });

    let content = render_tab_content(&tab_key, stores);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab_key
        >
            {content}
        </div>
    }
}
