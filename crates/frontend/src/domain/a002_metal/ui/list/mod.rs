use crate::shared::components::resource_table::{ColumnDef, ResourceTable};
use crate::shared::components::row_actions::{confirm_delete, RowActions};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::number_format::format_price_field;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::record_form::{open_record_form, RecordFormSpec, SaveTarget};
use crate::shared::resource_store::ResourceStore;
use contracts::domain::a002_metal::form_fields;
use contracts::domain::common::{IdentityField, Record};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

/// `18k_white_gold` -> `18k white gold`
fn metal_title(metal_type: &str) -> String {
    metal_type.replace('_', " ")
}

/// Metal rates. The API returns the whole list; paging and search happen
/// in the table.
#[component]
pub fn MetalList(store: ResourceStore) -> impl IntoView {
    let modal = use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let load = move || {
        spawn_local(async move {
            let _ = store.fetch_list(store.descriptor().default_query()).await;
        });
    };
    load();

    // Ключ металла - metal_type; при переименовании запрос уходит по старому ключу
    let open_editor = move |record: Option<Record>| {
        let target = match record.as_ref().and_then(|r| store.id_of(r)) {
            Some(metal_type) => SaveTarget::Update(store, metal_type),
            None => SaveTarget::Create(store),
        };
        open_record_form(
            modal,
            RecordFormSpec {
                title: if record.is_some() { "Edit Metal" } else { "Add Metal" }.to_string(),
                fields: form_fields(),
                record,
                image: None,
                target,
            },
        );
    };

    let columns = vec![
        ColumnDef::new("Code", "metal_code")
            .render(|r, _| view! { <span class="chip chip--mono">{r.display("metal_code")}</span> }.into_any()),
        ColumnDef::new("Metal Type", "metal_type").render(|r, _| {
            view! {
                <span class="metal-type">
                    <span class="metal-type__icon">{icon("layers")}</span>
                    <strong>{metal_title(&r.display("metal_type"))}</strong>
                </span>
            }
            .into_any()
        }),
        ColumnDef::new("Rate / Gram", "rate_per_gram")
            .render(|r, _| view! { <span class="price">{format_price_field(r, "rate_per_gram")}</span> }.into_any()),
        ColumnDef::new("Multiplier", "price_multiplier")
            .render(|r, _| format!("x{}", r.display("price_multiplier")).into_any()),
        ColumnDef::new("Actions", "").class("cell--actions").render(move |r, _| {
            let for_edit = r.clone();
            let for_delete = r.clone();
            view! {
                <RowActions
                    on_edit=Callback::new(move |_| open_editor(Some(for_edit.clone())))
                    on_delete=Callback::new(move |_| {
                        confirm_delete(store, &for_delete, &for_delete.display("metal_type"))
                    })
                />
            }
            .into_any()
        }),
    ];

    let actions: ChildrenFn = Arc::new(move || {
        view! {
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                {icon("refresh")}
            </Button>
            <Button appearance=ButtonAppearance::Primary on_click=move |_| open_editor(None)>
                {icon("plus")}
                <span>"Add Metal"</span>
            </Button>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="a002_metal--list" category=PAGE_CAT_LIST>
            <div class="page__content">
                <ResourceTable
                    title="Metal Rates"
                    columns=columns
                    data=Signal::derive(move || store.items())
                    loading=Signal::derive(move || store.loading())
                    identity=IdentityField::Natural("metal_type")
                    search_placeholder="Search metals..."
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
    fn metal_type_is_humanized() {
        assert_eq!(metal_title("18k_white_gold"), "18k white gold");
        assert_eq!(metal_title("platinum"), "platinum");
    }
}
