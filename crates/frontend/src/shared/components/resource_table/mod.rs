//! Paginated resource table.
//!
//! Renders a record collection either in **server mode** (pagination
//! metadata and `on_page_change` given: the caller fetches pages) or in
//! **local mode** (the whole collection is in `data`; search, paging and page
//! size are applied here). The table never touches store state; it only
//! emits page, limit and search intents.

pub mod pager;

use self::pager::{
    filter_records, limit_intents, local_page, local_total_pages, page_intents, row_key,
    search_intents, TableIntent, TableMode,
};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use contracts::domain::common::{IdentityField, Pagination, Record};
use leptos::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use thaw::*;

/// Default page size in local mode.
pub const DEFAULT_LOCAL_LIMIT: u32 = 50;

pub type CellRenderer = Arc<dyn Fn(&Record, usize) -> AnyView + Send + Sync>;
pub type RowRenderer = Arc<dyn Fn(&Record) -> AnyView + Send + Sync>;

/// Column of the table. Without a renderer the accessor field is shown as
/// plain text.
#[derive(Clone)]
pub struct ColumnDef {
    pub header: String,
    pub accessor: &'static str,
    pub render: Option<CellRenderer>,
    pub class: Option<&'static str>,
}

impl ColumnDef {
    pub fn new(header: impl Into<String>, accessor: &'static str) -> Self {
        Self {
            header: header.into(),
            accessor,
            render: None,
            class: None,
        }
    }

    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Record, usize) -> AnyView + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    fn cell(&self, record: &Record, row_index: usize) -> AnyView {
        match &self.render {
            Some(render) => render(record, row_index),
            None => record.display(self.accessor).into_any(),
        }
    }
}

/// Builds an expansion renderer from a closure.
pub fn expand_with<F>(f: F) -> Option<RowRenderer>
where
    F: Fn(&Record) -> AnyView + Send + Sync + 'static,
{
    Some(Arc::new(f))
}

#[component]
pub fn ResourceTable(
    #[prop(into)] title: String,
    columns: Vec<ColumnDef>,
    /// Full collection (local mode) or the current page (server mode).
    #[prop(into)]
    data: Signal<Vec<Record>>,
    #[prop(optional, into)] loading: Signal<bool>,
    /// Server pagination metadata.
    #[prop(optional, into)]
    pagination: Signal<Option<Pagination>>,
    #[prop(optional)] on_page_change: Option<Callback<u32>>,
    #[prop(optional)] on_limit_change: Option<Callback<u32>>,
    /// Server-side search. Without it the search box filters locally.
    #[prop(optional)]
    on_search: Option<Callback<String>>,
    #[prop(optional, into)] search_placeholder: String,
    #[prop(default = true)] searchable: bool,
    /// Field identifying rows for expansion.
    #[prop(default = IdentityField::DocumentId)]
    identity: IdentityField,
    #[prop(default = None)] expand: Option<RowRenderer>,
    #[prop(optional, into)] empty_text: String,
    /// Buttons rendered in the header next to the search box.
    #[prop(optional)]
    actions: Option<ChildrenFn>,
) -> impl IntoView {
    let empty_text = if empty_text.is_empty() {
        "No records found".to_string()
    } else {
        empty_text
    };

    let local_page_no = RwSignal::new(1u32);
    let local_limit = RwSignal::new(DEFAULT_LOCAL_LIMIT);
    let search_text = RwSignal::new(String::new());
    let expanded = RwSignal::new(HashSet::<String>::new());

    let mode = move || TableMode::resolve(pagination.get().is_some(), on_page_change.is_some());
    let server_mode = move || mode() == TableMode::Server;

    // Rows eligible for display before paging.
    let filtered = Memo::new(move |_| {
        let items = data.get();
        if server_mode() {
            items
        } else {
            filter_records(&items, &search_text.get())
        }
    });

    let limit = Signal::derive(move || match pagination.get() {
        Some(p) if server_mode() => p.limit.max(1),
        _ => local_limit.get(),
    });
    let total = Signal::derive(move || match pagination.get() {
        Some(p) if server_mode() => p.total,
        _ => filtered.with(|f| f.len() as u64),
    });
    let total_pages = Signal::derive(move || match pagination.get() {
        Some(p) if server_mode() => p.total_pages(),
        _ => filtered.with(|f| local_total_pages(f.len(), local_limit.get())),
    });
    let current_page = Signal::derive(move || match pagination.get() {
        Some(p) if server_mode() => p.page.clamp(1, p.total_pages()),
        _ => local_page_no.get().clamp(1, total_pages.get()),
    });

    // (row offset, rows) actually rendered.
    let visible = Memo::new(move |_| {
        if server_mode() {
            (0usize, filtered.get())
        } else {
            filtered.with(|f| local_page(f, local_page_no.get(), local_limit.get()))
        }
    });

    let apply = move |intents: Vec<TableIntent>| {
        for intent in intents {
            match intent {
                TableIntent::LocalPage(page) => local_page_no.set(page),
                TableIntent::LocalLimit(limit) => local_limit.set(limit),
                TableIntent::LocalSearch(text) => search_text.set(text),
                TableIntent::RequestPage(page) => {
                    if let Some(cb) = on_page_change {
                        cb.run(page);
                    }
                }
                TableIntent::RequestLimit(limit) => {
                    if let Some(cb) = on_limit_change {
                        cb.run(limit);
                    }
                }
                TableIntent::RequestSearch(text) => {
                    if let Some(cb) = on_search {
                        cb.run(text);
                    }
                }
            }
        }
    };

    let go_to = Callback::new(move |target: i64| {
        apply(page_intents(
            mode(),
            current_page.get_untracked(),
            target,
            total_pages.get_untracked(),
            loading.get_untracked(),
        ));
    });

    let change_limit = Callback::new(move |new_limit: u32| {
        apply(limit_intents(mode(), new_limit, on_limit_change.is_some()));
    });

    let change_search = Callback::new(move |text: String| {
        apply(search_intents(text, on_search.is_some()));
    });

    let has_expand = expand.is_some();
    let col_span = columns.len() + usize::from(has_expand);
    let columns = StoredValue::new(columns);
    let expand = StoredValue::new(expand);

    let toggle_row = move |key: String| {
        expanded.update(|set| {
            if !set.remove(&key) {
                set.insert(key);
            }
        });
    };

    let render_rows = move || {
        let (offset, rows) = visible.get();
        if rows.is_empty() && !loading.get() {
            return view! {
                <tr class="resource-table__empty">
                    <td colspan=col_span.to_string()>{empty_text.clone()}</td>
                </tr>
            }
            .into_any();
        }
        rows.into_iter()
            .enumerate()
            .map(|(i, record)| {
                let row_index = offset + i;
                let key = row_key(record.identity(identity), row_index);
                let is_open = expanded.with(|set| set.contains(&key));
                let toggle_key = key.clone();
                let cells = columns.with_value(|cols| {
                    cols.iter()
                        .map(|col| {
                            let class = col.class.unwrap_or_default();
                            let cell = col.cell(&record, row_index);
                            view! {
                                <TableCell class=class>
                                    <TableCellLayout>{cell}</TableCellLayout>
                                </TableCell>
                            }
                        })
                        .collect_view()
                });
                let expander = has_expand.then(|| {
                    view! {
                        <TableCell class="resource-table__expander">
                            <button
                                class="resource-table__expand-btn"
                                title=if is_open { "Collapse" } else { "Expand" }
                                on:click=move |_| toggle_row(toggle_key.clone())
                            >
                                {if is_open { icon("chevron-down") } else { icon("chevron-right") }}
                            </button>
                        </TableCell>
                    }
                });
                let details = if is_open {
                    expand.with_value(|render| {
                        render.as_ref().map(|render| {
                            view! {
                                <tr class="resource-table__expansion">
                                    <td colspan=col_span.to_string()>{render(&record)}</td>
                                </tr>
                            }
                        })
                    })
                } else {
                    None
                };
                view! {
                    <TableRow>
                        {expander}
                        {cells}
                    </TableRow>
                    {details}
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="resource-table">
            <div class="resource-table__header">
                <div class="resource-table__title">
                    <h2>{title}</h2>
                    <span class="resource-table__count">
                        {move || format!("Found {} records", total.get())}
                    </span>
                </div>
                <div class="resource-table__tools">
                    {searchable.then(|| view! {
                        <SearchInput
                            value=Signal::derive(move || search_text.get())
                            on_change=change_search
                            placeholder=search_placeholder.clone()
                        />
                    })}
                    {actions.map(|actions| view! {
                        <div class="resource-table__actions">{actions()}</div>
                    })}
                </div>
            </div>

            <div class="table-wrapper resource-table__body">
                <Show when=move || loading.get()>
                    <div class="resource-table__overlay">
                        <Spinner />
                    </div>
                </Show>
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {has_expand.then(|| view! {
                                <TableHeaderCell class="resource-table__expander">""</TableHeaderCell>
                            })}
                            {columns.with_value(|cols| {
                                cols.iter()
                                    .map(|col| {
                                        let class = col.class.unwrap_or_default();
                                        let header = col.header.clone();
                                        view! {
                                            <TableHeaderCell class=class>{header}</TableHeaderCell>
                                        }
                                    })
                                    .collect_view()
                            })}
                        </TableRow>
                    </TableHeader>
                    <TableBody>{render_rows}</TableBody>
                </Table>
            </div>

            <div class="resource-table__footer">
                <span class="resource-table__page-info">
                    {move || format!("Page {} of {}", current_page.get(), total_pages.get())}
                </span>
                <PaginationControls
                    current_page=current_page
                    total_pages=total_pages
                    page_size=limit
                    disabled=loading
                    on_page_change=go_to
                    on_page_size_change=change_limit
                />
            </div>
        </div>
    }
}
