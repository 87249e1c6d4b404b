//! Product catalog: server-side pages, status toggle, bulk import.

use crate::shared::components::file_picker::FilePickerButton;
use crate::shared::components::resource_table::{expand_with, ColumnDef, ResourceTable};
use crate::shared::components::row_actions::{
    confirm_bulk_import, confirm_delete, download_template, toggle_record_status, RowActions,
    StatusToggle,
};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::ServerList;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::notifications::NotificationService;
use crate::shared::number_format::format_price_field;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::record_form::{open_record_form, RecordFormSpec, SaveTarget};
use crate::shared::resource_store::{InFlightSet, ResourceStore};
use contracts::domain::a003_product::{form_fields, IMPORT_TEMPLATE};
use contracts::domain::common::{display_value, Record};
use leptos::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use thaw::*;

/// Values of a list field. Arrays give their items, a string is split on
/// commas.
fn list_values(record: &Record, field: &str) -> Vec<String> {
    match record.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .map(display_value)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn chips(values: Vec<String>) -> impl IntoView {
    values
        .into_iter()
        .map(|v| view! { <span class="chip">{v}</span> })
        .collect_view()
}

fn product_details(row: &Record) -> AnyView {
    let description = row.display("description");
    let description = if description.is_empty() {
        "No description provided.".to_string()
    } else {
        description
    };
    let lead_days = row.display("lead_days");
    let delivery = row.display("delivery_date");
    let metals = list_values(row, "availableMetalTypes");
    let shapes = list_values(row, "availableShapes");
    let ready = row.bool_field("readyToShip").unwrap_or(false);
    let engraving = row.bool_field("engravingAllowed").unwrap_or(false);

    view! {
        <div class="details">
            <div class="details__section">
                <h4 class="details__title">"Description"</h4>
                <p>{description}</p>
            </div>
            <div class="details__section">
                <h4 class="details__title">"Logistics"</h4>
                <div>
                    {format!("Lead Time: {} days", if lead_days.is_empty() { "-".to_string() } else { lead_days })}
                </div>
                {(!delivery.is_empty()).then(|| view! {
                    <div>{format!("Delivery By: {}", format_date(&delivery))}</div>
                })}
            </div>
            <div class="details__section">
                <h4 class="details__title">"Settings"</h4>
                {ready.then(|| view! { <span class="tag tag--success">"RTS"</span> })}
                {engraving.then(|| view! { <span class="tag tag--info">"Engraving"</span> })}
            </div>
            {(!metals.is_empty()).then(|| view! {
                <div class="details__section">
                    <span class="details__label">"Allowed Metals:"</span>
                    {chips(metals)}
                </div>
            })}
            {(!shapes.is_empty()).then(|| view! {
                <div class="details__section">
                    <span class="details__label">"Allowed Shapes:"</span>
                    {chips(shapes)}
                </div>
            })}
        </div>
    }
    .into_any()
}

#[component]
pub fn ProductList(store: ResourceStore) -> impl IntoView {
    let modal = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not found in context");

    let list = ServerList::new(store);
    let in_flight = InFlightSet::new();

    let open_editor = move |record: Option<Record>| {
        let target = match record.as_ref().and_then(|r| store.id_of(r)) {
            Some(id) => SaveTarget::Update(store, id),
            None => SaveTarget::Create(store),
        };
        open_record_form(
            modal,
            RecordFormSpec {
                title: if record.is_some() { "Edit Product" } else { "Add Product" }.to_string(),
                fields: form_fields(),
                record,
                image: None,
                target,
            },
        );
    };

    let columns = vec![
        ColumnDef::new("Image", "imageUrl1")
            .class("cell--thumb")
            .render(|r, _| {
                let url = r.display("imageUrl1");
                if url.is_empty() {
                    view! { <div class="thumb thumb--empty">{icon("products")}</div> }.into_any()
                } else {
                    view! { <img class="thumb" src=url alt="" /> }.into_any()
                }
            }),
        ColumnDef::new("SKU", "productSku")
            .render(|r, _| view! { <strong>{r.display("productSku")}</strong> }.into_any()),
        ColumnDef::new("Name", "productName"),
        ColumnDef::new("Category", "categories")
            .render(|r, _| chips(list_values(r, "categories")).into_any()),
        ColumnDef::new("Price", "defaultPrice").class("cell--price").render(|r, _| {
            view! { <span class="price">{format_price_field(r, "defaultPrice")}</span> }.into_any()
        }),
        ColumnDef::new("Status", "active")
            .class("cell--center")
            .render(move |r, _| {
                let id = store.id_of(r).unwrap_or_default();
                let record = r.clone();
                view! {
                    <StatusToggle
                        active=r.bool_field("active").unwrap_or(false)
                        busy=Signal::derive(move || in_flight.contains(&id))
                        on_toggle=Callback::new(move |_| toggle_record_status(store, &record, in_flight))
                    />
                }
                .into_any()
            }),
        ColumnDef::new("Actions", "").class("cell--actions").render(move |r, _| {
            let for_edit = r.clone();
            let for_delete = r.clone();
            view! {
                <RowActions
                    on_edit=Callback::new(move |_| open_editor(Some(for_edit.clone())))
                    on_delete=Callback::new(move |_| {
                        confirm_delete(store, &for_delete, &for_delete.display("productSku"))
                    })
                />
            }
            .into_any()
        }),
    ];

    let actions: ChildrenFn = Arc::new(move || {
        view! {
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| download_template(&IMPORT_TEMPLATE, notifications)
            >
                {icon("download")}
                <span>"Template"</span>
            </Button>
            <FilePickerButton
                label="Bulk upload"
                accept=".xlsx,.xls,.csv"
                disabled=Signal::derive(move || store.loading())
                on_pick=Callback::new(move |file| confirm_bulk_import(list, file))
            />
            <Button appearance=ButtonAppearance::Primary on_click=move |_| open_editor(None)>
                {icon("plus")}
                <span>"Add Product"</span>
            </Button>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="a003_product--list" category=PAGE_CAT_LIST>
            <div class="page__content">
                <ResourceTable
                    title="Product Catalog"
                    columns=columns
                    data=Signal::derive(move || store.items())
                    loading=Signal::derive(move || store.loading())
                    pagination=Signal::derive(move || store.pagination())
                    on_page_change=list.on_page()
                    on_limit_change=list.on_limit()
                    on_search=list.on_search()
                    search_placeholder="Search SKU or name..."
                    expand=expand_with(product_details)
                    actions=actions
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_values_from_array_or_text() {
        let r = Record::new()
            .with("availableShapes", json!(["RD", "OV", ""]))
            .with("categories", "Rings, Bands ,");
        assert_eq!(list_values(&r, "availableShapes"), vec!["RD", "OV"]);
        assert_eq!(list_values(&r, "categories"), vec!["Rings", "Bands"]);
        assert!(list_values(&r, "missing").is_empty());
    }
}
