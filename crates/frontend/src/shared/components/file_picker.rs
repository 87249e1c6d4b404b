use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

/// First file selected in the `<input type="file">` that fired `ev`.
pub fn picked_file(ev: &ev::Event) -> Option<File> {
    let input = ev.target()?.dyn_into::<HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Clears the input so picking the same file again fires `change`.
pub fn reset_input(ev: &ev::Event) {
    if let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}

/// Button opening the browser file dialog.
#[component]
pub fn FilePickerButton(
    #[prop(into)] label: String,
    /// `accept` attribute, e.g. `.xlsx,.xls,.csv`
    #[prop(into)]
    accept: String,
    #[prop(optional, into)] disabled: Signal<bool>,
    on_pick: Callback<File>,
) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let open_dialog = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let handle_change = move |ev: ev::Event| {
        if let Some(file) = picked_file(&ev) {
            on_pick.run(file);
        }
        reset_input(&ev);
    };

    view! {
        <input
            type="file"
            accept=accept
            style="display: none;"
            node_ref=input_ref
            on:change=handle_change
        />
        <Button appearance=ButtonAppearance::Secondary on_click=open_dialog disabled=disabled>
            {icon("upload")}
            <span>{label}</span>
        </Button>
    }
}
