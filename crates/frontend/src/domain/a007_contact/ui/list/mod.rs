//! Customer messages. Read only; the backend has no search, so the table
//! shows no search box.

use crate::shared::components::resource_table::{expand_with, ColumnDef, ResourceTable};
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::icons::icon;
use crate::shared::list_utils::ServerList;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::resource_store::ResourceStore;
use contracts::domain::a007_contact::message_preview;
use contracts::domain::common::Record;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

const PREVIEW_CHARS: usize = 60;

fn message_details(row: &Record) -> AnyView {
    let email = row.display("email");
    let phone = row.display("phone");
    let mailto = format!("mailto:{}", email);
    view! {
        <div class="details">
            <div class="details__section">
                <h4 class="details__title">"From"</h4>
                <div><strong>{row.display("name")}</strong></div>
                <div><a href=mailto>{email}</a></div>
                {(!phone.is_empty()).then(|| view! { <div>{phone}</div> })}
                <div class="text--muted">{format_datetime(&row.display("createdAt"))}</div>
            </div>
            <div class="details__section details__section--wide">
                <h4 class="details__title">"Message"</h4>
                <p class="details__message">{row.display("message")}</p>
            </div>
        </div>
    }
    .into_any()
}

#[component]
pub fn ContactList(store: ResourceStore) -> impl IntoView {
    let list = ServerList::new(store);

    let columns = vec![
        ColumnDef::new("Name", "name").render(|r, _| view! { <strong>{r.display("name")}</strong> }.into_any()),
        ColumnDef::new("Contact Info", "email").render(|r, _| {
            let phone = r.display("phone");
            view! {
                <div class="cell-stack">
                    <div>{icon("mail")} " " {r.display("email")}</div>
                    {(!phone.is_empty()).then(|| view! { <div class="text--muted">{phone}</div> })}
                </div>
            }
            .into_any()
        }),
        ColumnDef::new("Date", "createdAt").render(|r, _| format_date(&r.display("createdAt")).into_any()),
        ColumnDef::new("Message Preview", "message").render(|r, _| {
            view! { <em class="text--muted">{format!("\"{}\"", message_preview(r, PREVIEW_CHARS))}</em> }.into_any()
        }),
    ];

    let actions: ChildrenFn = Arc::new(move || {
        view! {
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                {icon("refresh")}
            </Button>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="a007_contact--list" category=PAGE_CAT_LIST>
            <div class="page__content">
                <ResourceTable
                    title="Support Messages"
                    columns=columns
                    data=Signal::derive(move || store.items())
                    loading=Signal::derive(move || store.loading())
                    pagination=Signal::derive(move || store.pagination())
                    on_page_change=list.on_page()
                    on_limit_change=list.on_limit()
                    searchable=false
                    expand=expand_with(message_details)
                    empty_text="No messages yet"
                    actions=actions
                />
            </div>
        </PageFrame>
    }
}
