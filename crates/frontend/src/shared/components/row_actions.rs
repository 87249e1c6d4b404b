//! Row-level controls shared by the list pages: edit/delete buttons, the
//! status toggle and the confirm-then-run helpers behind them.

use crate::shared::export::download_import_template;
use crate::shared::icons::icon;
use crate::shared::list_utils::ServerList;
use crate::shared::notifications::NotificationService;
use crate::shared::resource_store::{InFlightSet, ResourceStore};
use contracts::domain::common::{ImportTemplate, Record};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

/// Browser confirm dialog; false when there is no window.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Asks, then deletes `record` from `store`. `label` names the record in
/// the question.
pub fn confirm_delete(store: ResourceStore, record: &Record, label: &str) {
    let Some(id) = store.id_of(record) else {
        log::warn!("{}: delete on a record without id", store.descriptor().name);
        return;
    };
    let noun = store.descriptor().noun.to_lowercase();
    if !confirm(&format!("Delete {} {}?", noun, label)) {
        return;
    }
    spawn_local(async move {
        // Failure is already reported by the store.
        let _ = store.delete(&id).await;
    });
}

/// Flips the status of `record`. A click on a row already in flight is
/// rejected by the store without a request.
pub fn toggle_record_status(store: ResourceStore, record: &Record, in_flight: InFlightSet) {
    let Some(toggle) = store.descriptor().status else {
        return;
    };
    let Some(id) = store.id_of(record) else {
        return;
    };
    let current = toggle.current(record);
    spawn_local(async move {
        let _ = store.toggle_status(&id, &current, in_flight).await;
    });
}

/// Asks, then uploads a bulk import file through the page's list.
pub fn confirm_bulk_import(list: ServerList, file: File) {
    if !confirm(&format!("Upload {}?", file.name())) {
        return;
    }
    list.bulk_import(file);
}

pub fn download_template(template: &ImportTemplate, notifications: NotificationService) {
    if let Err(err) = download_import_template(template) {
        log::error!("template download failed: {}", err);
        notifications.error(err);
    }
}

#[component]
pub fn RowActions(
    #[prop(optional)] on_edit: Option<Callback<()>>,
    #[prop(optional)] on_delete: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="row-actions" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
            {on_edit.map(|cb| view! {
                <button class="row-actions__btn" title="Edit" on:click=move |_| cb.run(())>
                    {icon("edit")}
                </button>
            })}
            {on_delete.map(|cb| view! {
                <button
                    class="row-actions__btn row-actions__btn--danger"
                    title="Delete"
                    on:click=move |_| cb.run(())
                >
                    {icon("trash")}
                </button>
            })}
        </div>
    }
}

/// Round status button: spinner while the row is in flight.
#[component]
pub fn StatusToggle(
    active: bool,
    #[prop(into)] busy: Signal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class="status-toggle"
            class:status-toggle--on=active
            class:status-toggle--busy=move || busy.get()
            title=if active { "Deactivate" } else { "Activate" }
            disabled=move || busy.get()
            on:click=move |ev: ev::MouseEvent| {
                ev.stop_propagation();
                on_toggle.run(());
            }
        >
            {move || {
                if busy.get() {
                    view! { <span class="spinner spinner--small"></span> }.into_any()
                } else if active {
                    icon("check-circle")
                } else {
                    icon("x-circle")
                }
            }}
        </button>
    }
}
