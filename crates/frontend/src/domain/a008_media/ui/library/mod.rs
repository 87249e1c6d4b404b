//! Media library: one tab per section. List sections are small and held
//! whole; the engagement banner is a single record.

mod cells;

use self::cells::{details_view, thumbnail};
use crate::shared::components::resource_table::{ColumnDef, ResourceTable};
use crate::shared::components::row_actions::{confirm, confirm_delete, RowActions};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_CUSTOM;
use crate::shared::record_form::{open_record_form, ImageInput, RecordFormSpec, SaveTarget};
use crate::shared::resource_store::{ResourceStore, SingletonStore};
use crate::stores::MediaStores;
use contracts::domain::a008_media::MediaKind;
use contracts::domain::common::Record;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

const IMAGE: ImageInput = ImageInput::new("image_url");

fn tab_icon(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Banner | MediaKind::EngagementBanner => "image",
        MediaKind::Collection => "layers",
        MediaKind::Featured => "star",
        MediaKind::CustomerReview => "mail",
        MediaKind::DiamondType => "diamond",
    }
}

fn editor_title(kind: MediaKind, editing: bool) -> String {
    let noun = kind.descriptor().noun;
    if editing {
        format!("Edit {}", noun)
    } else {
        format!("Add {}", noun)
    }
}

#[component]
pub fn MediaLibrary(stores: MediaStores) -> impl IntoView {
    let active = RwSignal::new(MediaKind::Banner);

    // Все разделы грузятся сразу, переключение вкладок без запросов
    let load_all = move || {
        leptos::logging::log!("media: loading all sections");
        for kind in MediaKind::LISTS {
            if let Some(store) = stores.list(kind) {
                spawn_local(async move {
                    let _ = store.fetch_list(store.descriptor().default_query()).await;
                });
            }
        }
        let banner = stores.engagement_banner;
        spawn_local(async move {
            let _ = banner.fetch().await;
        });
    };
    load_all();

    let tabs = MediaKind::ALL
        .into_iter()
        .map(|kind| {
            view! {
                <button
                    class="media-tabs__tab"
                    class:media-tabs__tab--active=move || active.get() == kind
                    on:click=move |_| active.set(kind)
                >
                    {icon(tab_icon(kind))}
                    <span>{kind.title()}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <PageFrame page_id="a008_media--library" category=PAGE_CAT_CUSTOM>
            <div class="page__header">
                <div>
                    <h1 class="page__title">"Media Library"</h1>
                    <p class="text--muted">"Manage website banners, content, and reviews."</p>
                </div>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_all()>
                    {icon("refresh")}
                </Button>
            </div>
            <div class="media-tabs">{tabs}</div>
            <div class="page__content">
                {move || {
                    let kind = active.get();
                    match stores.list(kind) {
                        Some(store) => view! { <MediaSection kind=kind store=store /> }.into_any(),
                        None => view! { <EngagementBannerPanel store=stores.engagement_banner /> }.into_any(),
                    }
                }}
            </div>
        </PageFrame>
    }
}

#[component]
fn MediaSection(kind: MediaKind, store: ResourceStore) -> impl IntoView {
    let modal = use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let open_editor = move |record: Option<Record>| {
        let target = match record.as_ref().and_then(|r| store.id_of(r)) {
            Some(id) => SaveTarget::Update(store, id),
            None => SaveTarget::Create(store),
        };
        open_record_form(
            modal,
            RecordFormSpec {
                title: editor_title(kind, record.is_some()),
                fields: kind.form_fields(),
                record,
                image: Some(IMAGE),
                target,
            },
        );
    };

    let columns = vec![
        ColumnDef::new("Preview", "image_url")
            .class("cell--thumb")
            .render(|r, _| thumbnail(r)),
        ColumnDef::new("Details", kind.caption_field()).render(move |r, _| details_view(kind, r)),
        ColumnDef::new("Order", "sort_order")
            .class("cell--mono")
            .render(|r, _| {
                let order = r.display("sort_order");
                let text = if order.is_empty() { order } else { format!("#{}", order) };
                text.into_any()
            }),
        ColumnDef::new("Actions", "").class("cell--actions").render(move |r, _| {
            let for_edit = r.clone();
            let for_delete = r.clone();
            view! {
                <RowActions
                    on_edit=Callback::new(move |_| open_editor(Some(for_edit.clone())))
                    on_delete=Callback::new(move |_| {
                        let label = cells::item_title(kind, &for_delete);
                        confirm_delete(store, &for_delete, &label)
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
                <span>"Add New"</span>
            </Button>
        }
        .into_any()
    });

    view! {
        <ResourceTable
            title=kind.title()
            columns=columns
            data=Signal::derive(move || store.items())
            loading=Signal::derive(move || store.loading())
            search_placeholder="Search..."
            empty_text="No items in this section yet"
            actions=actions
        />
    }
}

#[component]
fn EngagementBannerPanel(store: SingletonStore) -> impl IntoView {
    let modal = use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let kind = MediaKind::EngagementBanner;

    let open_editor = move || {
        let record = store.record();
        open_record_form(
            modal,
            RecordFormSpec {
                title: editor_title(kind, record.is_some()),
                fields: kind.form_fields(),
                record,
                image: Some(IMAGE),
                target: SaveTarget::Singleton(store),
            },
        );
    };

    let remove = move || {
        if !confirm("Delete the engagement banner?") {
            return;
        }
        spawn_local(async move {
            let _ = store.delete().await;
        });
    };

    view! {
        <div class="singleton-panel">
            <div class="singleton-panel__header">
                <h2>{kind.title()}</h2>
                {move || {
                    if store.record().is_some() {
                        view! {
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| open_editor()>
                                {icon("edit")}
                                <span>"Edit"</span>
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| remove()>
                                {icon("trash")}
                                <span>"Delete"</span>
                            </Button>
                        }
                        .into_any()
                    } else {
                        view! {
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| open_editor()>
                                {icon("plus")}
                                <span>"Add Banner"</span>
                            </Button>
                        }
                        .into_any()
                    }
                }}
            </div>
            {move || {
                if store.loading() && !store.loaded() {
                    return view! { <Spinner /> }.into_any();
                }
                match store.record() {
                    Some(record) => view! {
                        <div class="singleton-panel__body">
                            {thumbnail(&record)}
                            {details_view(kind, &record)}
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <div class="singleton-panel__empty">"No engagement banner configured"</div>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_titles_use_noun() {
        assert_eq!(editor_title(MediaKind::CustomerReview, false), "Add Review");
        assert_eq!(editor_title(MediaKind::Collection, true), "Edit Collection");
    }
}
