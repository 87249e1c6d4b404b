//! Stack of open dialogs. Record editors are pushed here and render above
//! the page; Escape or an overlay click closes the topmost one.

use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen_futures::spawn_local;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

/// Width class of the dialog surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    #[default]
    Form,
    /// Editors with many fields lay them out in two columns.
    Wide,
}

impl ModalSize {
    fn class(self) -> &'static str {
        match self {
            ModalSize::Form => "modal--form",
            ModalSize::Wide => "modal--wide",
        }
    }
}

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    size: ModalSize,
    builder: ModalBuilder,
}

/// Open dialogs in stacking order plus the id counter.
#[derive(Clone, Default)]
struct ModalStack {
    entries: Vec<ModalEntry>,
    last_id: u64,
}

impl ModalStack {
    fn push(&mut self, size: ModalSize, builder: ModalBuilder) -> u64 {
        self.last_id += 1;
        let id = self.last_id;
        self.entries.push(ModalEntry { id, size, builder });
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    fn top(&self) -> Option<u64> {
        self.entries.last().map(|e| e.id)
    }
}

/// Closes the dialog it was issued for. Closing twice is a no-op.
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<ModalStack>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(ModalStack::default()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.entries.is_empty())
    }

    pub fn open<F>(&self, size: ModalSize, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let mut id = 0;
        self.stack.update(|s| id = s.push(size, Arc::new(builder)));
        ModalHandle { id, svc: *self }
    }

    /// Removes the dialog on the next tick: it may be closing from inside
    /// its own click handler.
    pub fn close(&self, id: u64) {
        let stack = self.stack;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            let mut removed = false;
            stack.update(|s| removed = s.remove(id));
            if !removed {
                log::debug!("modal {} already closed", id);
            }
        });
    }

    pub fn close_top(&self) {
        if let Some(id) = self.stack.with_untracked(ModalStack::top) {
            self.close(id);
        }
    }
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the open dialogs. Mounted once at the application root.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let escape = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" && svc.is_open() {
            svc.close_top();
        }
    });
    on_cleanup(move || escape.remove());

    view! {
        <For
            each=move || {
                svc.stack.with(|s| s.entries.iter().cloned().enumerate().collect::<Vec<_>>())
            }
            key=|(_, entry)| entry.id
            children=move |(depth, entry)| {
                let handle = ModalHandle { id: entry.id, svc };
                let on_close = {
                    let handle = handle.clone();
                    Callback::new(move |_| handle.close())
                };
                view! {
                    <ModalFrame
                        z_index=1000 + depth as i32
                        on_close=on_close
                        modal_class=entry.size.class()
                    >
                        {(entry.builder)(handle)}
                    </ModalFrame>
                }
            }
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ModalBuilder {
        Arc::new(|_| ().into_any())
    }

    #[test]
    fn ids_are_never_reused() {
        let mut stack = ModalStack::default();
        let a = stack.push(ModalSize::Form, builder());
        assert!(stack.remove(a));
        let b = stack.push(ModalSize::Form, builder());
        assert_ne!(a, b);
    }

    #[test]
    fn top_follows_push_order() {
        let mut stack = ModalStack::default();
        let a = stack.push(ModalSize::Form, builder());
        let b = stack.push(ModalSize::Wide, builder());
        assert_eq!(stack.top(), Some(b));
        assert!(stack.remove(b));
        assert_eq!(stack.top(), Some(a));
        assert!(!stack.remove(b));
    }
}
