//! Variants of one product. The product is picked on the page; the list is
//! emptied before another product's variants load.

use crate::shared::components::resource_table::{ColumnDef, ResourceTable};
use crate::shared::components::row_actions::{confirm_delete, RowActions};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::notifications::NotificationService;
use crate::shared::number_format::format_price;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::record_form::{open_record_form, RecordFormSpec, SaveTarget};
use crate::shared::resource_store::ResourceStore;
use crate::shared::rest_resource::RestResource;
use contracts::domain::a003_product::PRODUCTS;
use contracts::domain::a004_variant::{form_fields, variant_price};
use contracts::domain::common::{FieldOption, ListQuery, Record};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

/// Products offered in the picker.
const PRODUCT_PICKER_LIMIT: u32 = 100;

/// Picker entries: product id labelled `SKU · Name`.
fn product_options(products: &[Record]) -> Vec<FieldOption> {
    products
        .iter()
        .filter_map(|p| {
            let id = PRODUCTS.identity_of(p)?;
            let sku = p.display("productSku");
            let name = p.display("productName");
            let label = match (sku.is_empty(), name.is_empty()) {
                (false, false) => format!("{} · {}", sku, name),
                (false, true) => sku,
                (true, false) => name,
                (true, true) => id.clone(),
            };
            Some(FieldOption::labeled(id, label))
        })
        .collect()
}

fn specs_text(r: &Record) -> String {
    [r.display("metalCode"), r.display("shape_code")]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

#[component]
pub fn VariantList(store: ResourceStore) -> impl IntoView {
    let modal = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not found in context");

    let products = RwSignal::new(Vec::<Record>::new());
    let product_id = RwSignal::new(String::new());

    spawn_local(async move {
        match RestResource::new(PRODUCTS)
            .list(&ListQuery::new(1, PRODUCT_PICKER_LIMIT))
            .await
        {
            Ok(page) => products.set(page.items),
            Err(err) => {
                log::warn!("variant product picker: {}", err);
                notifications.error(err.message);
            }
        }
    });

    let select_product = move |id: String| {
        if product_id.get_untracked() == id {
            return;
        }
        leptos::logging::log!("variants: switching product to '{}'", id);
        product_id.set(id.clone());
        store.clear();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            let _ = store.fetch_list(ListQuery::scoped(id)).await;
        });
    };

    let selected_sku = move || {
        let id = product_id.get_untracked();
        products.with_untracked(|items| {
            items
                .iter()
                .find(|p| PRODUCTS.identity_of(p).as_deref() == Some(id.as_str()))
                .map(|p| p.display("productSku"))
                .unwrap_or_default()
        })
    };

    let open_editor = move |record: Option<Record>| {
        let target = match record.as_ref().and_then(|r| store.id_of(r)) {
            Some(id) => SaveTarget::Update(store, id),
            None => SaveTarget::Create(store),
        };
        let title = if record.is_some() { "Edit Variant" } else { "Add Variant" };
        // Новый вариант получает SKU выбранного товара
        let record = record.or_else(|| Some(Record::new().with("productSku", selected_sku())));
        open_record_form(
            modal,
            RecordFormSpec {
                title: title.to_string(),
                fields: form_fields(),
                record,
                image: None,
                target,
            },
        );
    };

    let columns = vec![
        ColumnDef::new("Variant SKU", "variantSku")
            .render(|r, _| view! { <strong>{r.display("variantSku")}</strong> }.into_any()),
        ColumnDef::new("Specs", "metalCode").render(|r, _| specs_text(r).into_any()),
        ColumnDef::new("Carat", "centerStoneWeight").render(|r, _| {
            match r.f64_field("centerStoneWeight").filter(|w| *w > 0.0) {
                Some(w) => view! { <span class="chip">{format!("{}ct", w)}</span> }.into_any(),
                None => "-".into_any(),
            }
        }),
        ColumnDef::new("Price", "metalPrice")
            .class("cell--price")
            .render(|r, _| view! { <span class="price">{format_price(variant_price(r))}</span> }.into_any()),
        ColumnDef::new("Stock", "stock").render(|r, _| {
            let out = r.f64_field("stock").unwrap_or(0.0) <= 0.0;
            view! { <span class:text--danger=out>{r.display("stock")}</span> }.into_any()
        }),
        ColumnDef::new("Actions", "").class("cell--actions").render(move |r, _| {
            let for_edit = r.clone();
            let for_delete = r.clone();
            view! {
                <RowActions
                    on_edit=Callback::new(move |_| open_editor(Some(for_edit.clone())))
                    on_delete=Callback::new(move |_| {
                        confirm_delete(store, &for_delete, &for_delete.display("variantSku"))
                    })
                />
            }
            .into_any()
        }),
    ];

    let actions: ChildrenFn = Arc::new(move || {
        view! {
            <select
                class="filter-select"
                prop:value=move || product_id.get()
                on:change=move |ev| select_product(event_target_value(&ev))
            >
                <option value="">"Select product..."</option>
                {move || {
                    products
                        .with(|items| product_options(items))
                        .into_iter()
                        .map(|opt| {
                            let value = opt.value().to_string();
                            view! { <option value=value>{opt.label().to_string()}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(move || product_id.get().is_empty())
                on_click=move |_| open_editor(None)
            >
                {icon("plus")}
                <span>"Add Variant"</span>
            </Button>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="a004_variant--list" category=PAGE_CAT_LIST>
            <div class="page__content">
                <ResourceTable
                    title="Product Variants"
                    columns=columns
                    data=Signal::derive(move || store.items())
                    loading=Signal::derive(move || store.loading())
                    search_placeholder="Search variants..."
                    empty_text="Select a product to see its variants"
                    actions=actions
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_labels() {
        let products = vec![
            Record::new()
                .with("_id", "p1")
                .with("productSku", "RING-001")
                .with("productName", "Solitaire"),
            Record::new().with("_id", "p2").with("productSku", "BAND-7"),
            Record::new().with("productSku", "no id"),
        ];
        assert_eq!(
            product_options(&products),
            vec![
                FieldOption::labeled("p1", "RING-001 · Solitaire"),
                FieldOption::labeled("p2", "BAND-7"),
            ]
        );
    }

    #[test]
    fn specs_join_present_parts() {
        let r = Record::new().with("metalCode", "18KW").with("shape_code", "RD");
        assert_eq!(specs_text(&r), "18KW • RD");
        assert_eq!(specs_text(&Record::new().with("metalCode", "PT")), "PT");
    }
}
