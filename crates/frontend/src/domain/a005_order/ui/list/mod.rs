//! Orders: server-side pages, status filter, stats strip and the status
//! editor.

mod details;

use self::details::{order_details, stat_entries};
use crate::shared::components::badge::{Badge, BadgeVariant};
use crate::shared::components::resource_table::{expand_with, ColumnDef, ResourceTable};
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::format_date;
use crate::shared::http;
use crate::shared::icons::icon;
use crate::shared::list_utils::ServerList;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::number_format::format_price_field;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::record_form::{open_record_form, RecordFormSpec, SaveTarget};
use crate::shared::resource_store::ResourceStore;
use contracts::domain::a005_order::{
    status_form_fields, status_tone, StatusTone, ORDER_STATUSES, STATS_KEY, STATS_PATH,
    STATUS_FILTER,
};
use contracts::domain::common::Record;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

fn tone_badge(status: &str) -> (BadgeVariant, &'static str) {
    match status_tone(status) {
        StatusTone::Waiting => (BadgeVariant::Neutral, "clock"),
        StatusTone::InProgress => (BadgeVariant::Primary, "package"),
        StatusTone::Shipped => (BadgeVariant::Warning, "truck"),
        StatusTone::Done => (BadgeVariant::Success, "check-circle"),
        StatusTone::Cancelled => (BadgeVariant::Error, "x-circle"),
    }
}

/// Customer name of an order; guests have no populated user.
pub(crate) fn customer_name(record: &Record) -> String {
    record
        .get("userId")
        .and_then(|u| u.get("name"))
        .and_then(|n| n.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("Guest")
        .to_string()
}

#[component]
pub fn OrderList(store: ResourceStore) -> impl IntoView {
    let modal = use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let list = ServerList::new(store);
    let stats = RwSignal::new(None::<Vec<(String, String)>>);

    let load_stats = move || {
        spawn_local(async move {
            match http::get(STATS_PATH, None).await {
                Ok(body) => stats.set(Some(stat_entries(body.get(STATS_KEY)))),
                // Плашки статистики не критичны: без уведомления
                Err(err) => log::warn!("order stats: {}", err),
            }
        });
    };
    load_stats();

    // Свежая копия заказа перед редактированием статуса
    let manage = move |row: Record| {
        let Some(id) = store.id_of(&row) else {
            return;
        };
        spawn_local(async move {
            let Ok(order) = store.fetch_one(&id).await else {
                return;
            };
            open_record_form(
                modal,
                RecordFormSpec {
                    title: format!("Order #{}", order.display("orderId")),
                    fields: status_form_fields(),
                    record: Some(order),
                    image: None,
                    target: SaveTarget::Update(store, id),
                },
            );
        });
    };

    let columns = vec![
        ColumnDef::new("Order ID", "orderId")
            .class("cell--mono")
            .render(|r, _| view! { <strong>{r.display("orderId")}</strong> }.into_any()),
        ColumnDef::new("Customer", "contactEmail").render(|r, _| {
            view! {
                <div class="cell-stack">
                    <div>{customer_name(r)}</div>
                    <div class="text--muted">{r.display("contactEmail")}</div>
                </div>
            }
            .into_any()
        }),
        ColumnDef::new("Date", "createdAt").render(|r, _| format_date(&r.display("createdAt")).into_any()),
        ColumnDef::new("Total", "total").class("cell--price").render(|r, _| {
            view! { <span class="price">{format_price_field(r, "total")}</span> }.into_any()
        }),
        ColumnDef::new("Payment", "paymentStatus").render(|r, _| {
            let paid = r.str_field("paymentStatus") == Some("Paid");
            view! {
                <span class:text--success=paid class:text--warning=!paid>
                    {r.display("paymentStatus")}
                </span>
            }
            .into_any()
        }),
        ColumnDef::new("Status", "status").render(|r, _| {
            let status = r.display("status");
            let (variant, icon_name) = tone_badge(&status);
            view! {
                <Badge variant=variant>
                    {icon(icon_name)}
                    " "
                    {status}
                </Badge>
            }
            .into_any()
        }),
        ColumnDef::new("Actions", "").class("cell--actions").render(move |r, _| {
            let row = r.clone();
            view! {
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    attr:title="Manage order"
                    on_click=move |_| manage(row.clone())
                >
                    {icon("eye")}
                </Button>
            }
            .into_any()
        }),
    ];

    let selected_status = list.filter(STATUS_FILTER);
    let actions: ChildrenFn = Arc::new(move || {
        view! {
            <select
                class="filter-select"
                prop:value=move || selected_status.get()
                on:change=move |ev| list.set_filter(STATUS_FILTER, event_target_value(&ev))
            >
                <option value="">"All Statuses"</option>
                {ORDER_STATUSES
                    .into_iter()
                    .map(|s| view! { <option value=s>{s}</option> })
                    .collect_view()}
            </select>
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| {
                    list.reload();
                    load_stats();
                }
            >
                {icon("refresh")}
            </Button>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="a005_order--list" category=PAGE_CAT_LIST>
            <div class="page__content">
                <div class="stat-strip">
                    {move || {
                        stats
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|(label, value)| {
                                view! {
                                    <StatCard
                                        label=label
                                        icon_name="orders"
                                        value=Signal::derive(move || Some(value.clone()))
                                    />
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <ResourceTable
                    title="Orders Management"
                    columns=columns
                    data=Signal::derive(move || store.items())
                    loading=Signal::derive(move || store.loading())
                    pagination=Signal::derive(move || store.pagination())
                    on_page_change=list.on_page()
                    on_limit_change=list.on_limit()
                    on_search=list.on_search()
                    search_placeholder="Search order ID or email..."
                    expand=expand_with(order_details)
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
    fn guest_without_user() {
        assert_eq!(customer_name(&Record::new()), "Guest");
        let r = Record::new().with("userId", json!({"name": "Ann"}));
        assert_eq!(customer_name(&r), "Ann");
        let r = Record::new().with("userId", "5f1c");
        assert_eq!(customer_name(&r), "Guest");
    }

    #[test]
    fn badges_follow_tone() {
        assert_eq!(tone_badge("Delivered").0, BadgeVariant::Success);
        assert_eq!(tone_badge("Cancelled").0, BadgeVariant::Error);
        assert_eq!(tone_badge("Pending").0, BadgeVariant::Neutral);
    }
}
