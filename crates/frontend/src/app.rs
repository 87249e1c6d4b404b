use crate::app_shell::MainLayout;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::notifications::{NotificationHost, NotificationService};
use crate::stores::AdminStores;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Cross-cutting services go through context.
    provide_context(AppGlobalContext::new());
    provide_context(ModalStackService::new());
    let notifications = NotificationService::new();
    provide_context(notifications);

    // Stores are composed here and passed down as props.
    let stores = AdminStores::new(notifications);

    view! {
        <MainLayout stores=stores />
        <ModalHost />
        <NotificationHost />
    }
}
