//! Diamond inventory: server-side pages, grading filters, bulk import.

mod cells;

use self::cells::{diamond_details, location_tag, or_dash};
use crate::shared::components::file_picker::FilePickerButton;
use crate::shared::components::resource_table::{expand_with, ColumnDef, ResourceTable};
use crate::shared::components::row_actions::{
    confirm_bulk_import, confirm_delete, download_template, toggle_record_status, RowActions,
    StatusToggle,
};
use crate::shared::http;
use crate::shared::icons::icon;
use crate::shared::list_utils::ServerList;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::notifications::NotificationService;
use crate::shared::number_format::format_price_field;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::record_form::{open_record_form, RecordFormSpec, SaveTarget};
use crate::shared::resource_store::{InFlightSet, ResourceStore};
use contracts::domain::a001_diamond::{
    filter_label, form_fields, shape_label, DiamondFilterOptions, FILTERS_PATH, FILTER_KEYS,
    IMPORT_TEMPLATE,
};
use contracts::domain::common::Record;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

async fn load_filters() -> Result<DiamondFilterOptions, String> {
    let body = http::get(FILTERS_PATH, None)
        .await
        .map_err(|e| e.message)?;
    DiamondFilterOptions::from_response(body).map_err(|e| format!("Invalid filters: {}", e))
}

#[component]
pub fn DiamondList(store: ResourceStore) -> impl IntoView {
    let modal = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not found in context");

    let list = ServerList::new(store);
    let in_flight = InFlightSet::new();
    let filters = RwSignal::new(DiamondFilterOptions::default());

    // Опции фильтров грузим один раз при открытии вкладки
    spawn_local(async move {
        match load_filters().await {
            Ok(options) => filters.set(options),
            Err(err) => {
                log::warn!("diamond filters: {}", err);
                notifications.error(err);
            }
        }
    });

    let open_editor = move |record: Option<Record>| {
        let target = match record.as_ref().and_then(|r| store.id_of(r)) {
            Some(id) => SaveTarget::Update(store, id),
            None => SaveTarget::Create(store),
        };
        let title = if record.is_some() { "Edit Diamond" } else { "Add Diamond" };
        open_record_form(
            modal,
            RecordFormSpec {
                title: title.to_string(),
                fields: filters.with_untracked(form_fields),
                record,
                image: None,
                target,
            },
        );
    };

    let columns = vec![
        ColumnDef::new("Image", "imageUrl")
            .class("cell--thumb")
            .render(|r, _| {
                let url = r.display("imageUrl");
                if url.is_empty() {
                    view! { <div class="thumb thumb--empty">{icon("diamond")}</div> }.into_any()
                } else {
                    view! { <img class="thumb" src=url alt=r.display("sku") /> }.into_any()
                }
            }),
        ColumnDef::new("SKU", "sku").render(|r, _| view! { <strong>{r.display("sku")}</strong> }.into_any()),
        ColumnDef::new("Loc", "location").render(|r, _| location_tag(r)),
        ColumnDef::new("Shape", "shape")
            .render(|r, _| view! { <span class="chip">{or_dash(shape_label(r))}</span> }.into_any()),
        ColumnDef::new("Carat", "carat"),
        ColumnDef::new("Color", "color").render(|r, _| or_dash(r.display("color")).into_any()),
        ColumnDef::new("Clarity", "purity").render(|r, _| or_dash(r.display("purity")).into_any()),
        ColumnDef::new("Cut", "cut").render(|r, _| or_dash(r.display("cut")).into_any()),
        ColumnDef::new("Lab", "lab").render(|r, _| or_dash(r.display("lab")).into_any()),
        ColumnDef::new("Price", "price").class("cell--price").render(|r, _| {
            view! { <span class="price">{format_price_field(r, "price")}</span> }.into_any()
        }),
        ColumnDef::new("Stk", "stock").class("cell--mono"),
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
                        confirm_delete(store, &for_delete, &for_delete.display("sku"))
                    })
                />
            }
            .into_any()
        }),
    ];

    let actions: ChildrenFn = Arc::new(move || {
        view! {
            <div class="filter-selects">
                {FILTER_KEYS
                    .into_iter()
                    .map(|key| {
                        let selected = list.filter(key);
                        view! {
                            <select
                                class="filter-select"
                                name=key
                                prop:value=move || selected.get()
                                on:change=move |ev| list.set_filter(key, event_target_value(&ev))
                            >
                                <option value="">{filter_label(key)}</option>
                                {move || {
                                    filters
                                        .with(|f| f.options_for(key))
                                        .into_iter()
                                        .map(|opt| {
                                            let value = opt.value().to_string();
                                            view! { <option value=value>{opt.label().to_string()}</option> }
                                        })
                                        .collect_view()
                                }}
                            </select>
                        }
                    })
                    .collect_view()}
            </div>
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
                <span>"Add Diamond"</span>
            </Button>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="a001_diamond--list" category=PAGE_CAT_LIST>
            <div class="page__content">
                <ResourceTable
                    title="Diamond Inventory"
                    columns=columns
                    data=Signal::derive(move || store.items())
                    loading=Signal::derive(move || store.loading())
                    pagination=Signal::derive(move || store.pagination())
                    on_page_change=list.on_page()
                    on_limit_change=list.on_limit()
                    on_search=list.on_search()
                    search_placeholder="Search SKU, cert number..."
                    expand=expand_with(diamond_details)
                    actions=actions
                />
            </div>
        </PageFrame>
    }
}
