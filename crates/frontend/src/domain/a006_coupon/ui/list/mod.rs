use crate::shared::components::resource_table::{ColumnDef, ResourceTable};
use crate::shared::components::row_actions::{
    confirm_delete, toggle_record_status, RowActions, StatusToggle,
};
use crate::shared::date_utils::{format_date, is_past, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::ServerList;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::record_form::{open_record_form, RecordFormSpec, SaveTarget};
use crate::shared::resource_store::{InFlightSet, ResourceStore};
use chrono::NaiveDate;
use contracts::domain::a006_coupon::{discount_text, form_fields, usage_text};
use contracts::domain::common::Record;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

/// Validity window of a coupon and whether it has already ended.
fn validity(record: &Record, today: NaiveDate) -> (String, bool) {
    let start = record.display("startDate");
    let end = record.display("endDate");
    if start.is_empty() && end.is_empty() {
        return ("Always Valid".to_string(), false);
    }
    let from = if start.is_empty() { "Now".to_string() } else { format_date(&start) };
    let to = if end.is_empty() { "Forever".to_string() } else { format_date(&end) };
    (format!("{} - {}", from, to), !end.is_empty() && is_past(&end, today))
}

#[component]
pub fn CouponList(store: ResourceStore) -> impl IntoView {
    let modal = use_context::<ModalStackService>().expect("ModalStackService not found in context");

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
                title: if record.is_some() { "Edit Coupon" } else { "Create Coupon" }.to_string(),
                fields: form_fields(),
                record,
                image: None,
                target,
            },
        );
    };

    let columns = vec![
        ColumnDef::new("Code", "code").render(|r, _| {
            view! {
                <span class="coupon-code">
                    {icon("tag")}
                    <span class="chip chip--mono">{r.display("code")}</span>
                </span>
            }
            .into_any()
        }),
        ColumnDef::new("Discount", "discountValue")
            .render(|r, _| view! { <strong class="text--success">{discount_text(r)}</strong> }.into_any()),
        ColumnDef::new("Validity", "endDate").render(|r, _| {
            let (text, expired) = validity(r, today());
            view! {
                <span class="text--small">{text}</span>
                {expired.then(|| view! { <span class="tag tag--expired">"Expired"</span> })}
            }
            .into_any()
        }),
        ColumnDef::new("Usage", "usedCount").render(|r, _| usage_text(r).into_any()),
        ColumnDef::new("Status", "status")
            .class("cell--center")
            .render(move |r, _| {
                let id = store.id_of(r).unwrap_or_default();
                let active = store
                    .descriptor()
                    .status
                    .is_some_and(|toggle| toggle.current(r).is_active());
                let record = r.clone();
                view! {
                    <StatusToggle
                        active=active
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
                        confirm_delete(store, &for_delete, &for_delete.display("code"))
                    })
                />
            }
            .into_any()
        }),
    ];

    let actions: ChildrenFn = Arc::new(move || {
        view! {
            <Button appearance=ButtonAppearance::Primary on_click=move |_| open_editor(None)>
                {icon("plus")}
                <span>"Create Coupon"</span>
            </Button>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="a006_coupon--list" category=PAGE_CAT_LIST>
            <div class="page__content">
                <ResourceTable
                    title="Coupon Management"
                    columns=columns
                    data=Signal::derive(move || store.items())
                    loading=Signal::derive(move || store.loading())
                    pagination=Signal::derive(move || store.pagination())
                    on_page_change=list.on_page()
                    on_limit_change=list.on_limit()
                    on_search=list.on_search()
                    search_placeholder="Search coupon code..."
                    actions=actions
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn open_ended_coupons() {
        assert_eq!(validity(&Record::new(), day("2025-01-01")), ("Always Valid".to_string(), false));
        let r = Record::new().with("startDate", "2025-02-01");
        assert_eq!(validity(&r, day("2025-03-01")), ("01.02.2025 - Forever".to_string(), false));
    }

    #[test]
    fn ended_coupon_is_expired() {
        let r = Record::new().with("endDate", "2025-02-01T00:00:00Z");
        let (text, expired) = validity(&r, day("2025-03-01"));
        assert_eq!(text, "Now - 01.02.2025");
        assert!(expired);
        assert!(!validity(&r, day("2025-01-15")).1);
    }
}
