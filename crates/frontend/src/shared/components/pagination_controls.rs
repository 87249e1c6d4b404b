use crate::shared::components::resource_table::pager::{page_strip, PageSlot};
use crate::shared::icons::icon;
use contracts::domain::common::LIMIT_OPTIONS;
use leptos::prelude::*;

/// PaginationControls component - page strip, prev/next and page size select
///
/// Pages are 1-indexed. Targets are passed as `i64` so the caller can reject
/// out-of-range requests itself.
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<u32>,

    /// Disables every control, e.g. while loading
    #[prop(optional, into)]
    disabled: Signal<bool>,

    /// Callback when page changes
    on_page_change: Callback<i64>,

    /// Callback when page size changes
    on_page_size_change: Callback<u32>,
) -> impl IntoView {
    let current = move || i64::from(current_page.get());

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current() - 1)
                disabled=move || disabled.get() || current_page.get() <= 1
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                page_strip(current_page.get(), total_pages.get())
                    .into_iter()
                    .map(|slot| match slot {
                        PageSlot::Page(p) => {
                            view! {
                                <button
                                    class=move || {
                                        if current_page.get() == p {
                                            "pagination-btn pagination-btn--active"
                                        } else {
                                            "pagination-btn"
                                        }
                                    }
                                    disabled=move || disabled.get()
                                    on:click=move |_| on_page_change.run(i64::from(p))
                                >
                                    {p.to_string()}
                                </button>
                            }
                                .into_any()
                        }
                        PageSlot::Gap => {
                            view! { <span class="pagination-gap">"…"</span> }.into_any()
                        }
                    })
                    .collect_view()
            }}
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current() + 1)
                disabled={move || disabled.get() || current_page.get() >= total_pages.get()}
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <select
                class="page-size-select"
                disabled=move || disabled.get()
                on:change=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(val);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {LIMIT_OPTIONS
                    .iter()
                    .map(|&size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {format!("{} / page", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
