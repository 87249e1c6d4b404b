use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Open pages of the admin and the sidebar state.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Restores the page named by `?active=` and keeps the URL in sync with
    /// the active page afterwards.
    pub fn init_router_integration(&self, fallback: (&str, &str)) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        match params.get("active").filter(|k| !k.is_empty()) {
            Some(active_key) => {
                let title = super::tabs::tab_label_for_key(active_key);
                let title = if title.is_empty() { active_key.as_str() } else { title };
                self.open_tab(active_key, title);
            }
            None => self.open_tab(fallback.0, fallback.1),
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("open_tab: key='{}', title='{}'", key, title);
        self.opened.update(|tabs| {
            if !tabs.iter().any(|tab| tab.key == key) {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                });
            }
        });
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        leptos::logging::log!("close_tab: key='{}'", key);
        let active = self.active.get_untracked();
        let mut next = active.clone();
        self.opened.update(|tabs| {
            next = next_active_after_close(tabs, key, active.as_deref());
            tabs.retain(|tab| tab.key != key);
        });
        if next != active {
            self.active.set(next);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Active tab once `closing` is gone: unchanged unless the active tab is the
/// one closing, then its right neighbour, else its left one.
pub fn next_active_after_close(tabs: &[Tab], closing: &str, active: Option<&str>) -> Option<String> {
    if active != Some(closing) {
        return active.map(str::to_string);
    }
    let idx = tabs.iter().position(|t| t.key == closing)?;
    tabs.get(idx + 1)
        .or_else(|| idx.checked_sub(1).and_then(|i| tabs.get(i)))
        .map(|t| t.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect()
    }

    #[test]
    fn closing_inactive_tab_keeps_active() {
        let t = tabs(&["diamonds", "orders"]);
        assert_eq!(
            next_active_after_close(&t, "orders", Some("diamonds")).as_deref(),
            Some("diamonds")
        );
    }

    #[test]
    fn closing_active_tab_moves_to_neighbour() {
        let t = tabs(&["diamonds", "orders", "coupons"]);
        assert_eq!(
            next_active_after_close(&t, "orders", Some("orders")).as_deref(),
            Some("coupons")
        );
        assert_eq!(
            next_active_after_close(&t, "coupons", Some("coupons")).as_deref(),
            Some("orders")
        );
        assert_eq!(
            next_active_after_close(&tabs(&["diamonds"]), "diamonds", Some("diamonds")),
            None
        );
    }
}
