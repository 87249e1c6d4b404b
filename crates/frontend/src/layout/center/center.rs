use super::tabs::TabBar;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-center">
            <TabBar />
            <div class="app-tabs" style="flex: 1; overflow: auto;">
                {children()}
            </div>
        </div>
    }
}
