/// UI helpers shared by list pages
use crate::shared::resource_store::ResourceStore;
use contracts::domain::common::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::File;

/// Debounce of the search box, ms.
pub const SEARCH_DEBOUNCE_MS: i32 = 300;

/// Поле поиска с debounce и кнопкой очистки
///
/// `on_change` receives the text once typing pauses; clearing fires
/// immediately.
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для подсветки)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let cancel_pending = move || {
        if let (Some(timeout_id), Some(window)) = (debounce_timeout.get_value(), web_sys::window())
        {
            window.clear_timeout_with_handle(timeout_id);
        }
        debounce_timeout.set_value(None);
    };

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        cancel_pending();

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            SEARCH_DEBOUNCE_MS,
        ) {
            Ok(timeout_id) => debounce_timeout.set_value(Some(timeout_id)),
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
        closure.forget();
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        cancel_pending();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{crate::shared::icons::icon("search")}</span>
            <input
                type="text"
                placeholder=placeholder
                class=move || {
                    if is_filter_active() {
                        "search-input__field search-input__field--active"
                    } else {
                        "search-input__field"
                    }
                }
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Query of a server-mode list page. Every change of the query fetches the
/// page it describes from the store.
#[derive(Clone, Copy)]
pub struct ServerList {
    store: ResourceStore,
    query: RwSignal<ListQuery>,
}

impl ServerList {
    /// Starts from the resource's default query and fetches right away.
    pub fn new(store: ResourceStore) -> Self {
        Self::with_query(store, store.descriptor().default_query())
    }

    pub fn with_query(store: ResourceStore, initial: ListQuery) -> Self {
        let query = RwSignal::new(initial);
        Effect::new(move |_| {
            let q = query.get();
            log::debug!("{}: load page {} ({})", store.descriptor().name, q.page, q.limit);
            spawn_local(async move {
                let _ = store.fetch_list(q).await;
            });
        });
        Self { store, query }
    }

    pub fn store(&self) -> ResourceStore {
        self.store
    }

    pub fn query(&self) -> ListQuery {
        self.query.get()
    }

    fn change(&self, f: impl FnOnce(ListQuery) -> ListQuery) {
        let current = self.query.get_untracked();
        let next = f(current.clone());
        if next != current {
            self.query.set(next);
        }
    }

    pub fn reload(&self) {
        self.query.update(|_| {});
    }

    /// Replaces the whole query and fetches it, even when it is unchanged.
    pub fn reset_to(&self, query: ListQuery) {
        self.query.set(query);
    }

    /// Uploads an import file; after success the page lands on the reload
    /// query the store hands back.
    pub fn bulk_import(&self, file: File) {
        let this = *self;
        spawn_local(async move {
            if let Ok(landing) = this.store.bulk_import(&file).await {
                this.reset_to(landing);
            }
        });
    }

    pub fn set_filter(&self, key: &str, value: String) {
        self.change(|q| q.with_filter(key, value));
    }

    pub fn on_page(&self) -> Callback<u32> {
        let this = *self;
        Callback::new(move |page: u32| this.change(|q| q.with_page(page)))
    }

    pub fn on_limit(&self) -> Callback<u32> {
        let this = *self;
        Callback::new(move |limit: u32| this.change(|q| q.with_limit(limit)))
    }

    pub fn on_search(&self) -> Callback<String> {
        let this = *self;
        Callback::new(move |text: String| this.change(|q| q.with_search(text)))
    }

    /// Reactive value of one filter, "" when unset.
    pub fn filter(&self, key: &'static str) -> Signal<String> {
        let query = self.query;
        Signal::derive(move || query.with(|q| q.filters.get(key).cloned().unwrap_or_default()))
    }
}
