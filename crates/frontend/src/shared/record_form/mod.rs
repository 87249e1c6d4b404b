//! Record editor opened in a modal.
//!
//! Inputs are generated from `FieldSpec`s; values are kept as flat strings
//! and turned into a typed payload on submit. A save that fails keeps the
//! dialog open with what was typed.

use crate::shared::components::file_picker::picked_file;
use crate::shared::file_encode::encode_file_as_data_url;
use crate::shared::modal_stack::{ModalHandle, ModalSize, ModalStackService};
use crate::shared::notifications::NotificationService;
use crate::shared::resource_store::{ResourceStore, SingletonStore};
use crate::shared::rest_resource::RecordPayload;
use contracts::domain::common::{
    build_payload, form_values, missing_required, ApiError, FieldKind, FieldSpec, FormValues,
    Record,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use web_sys::File;

/// Where the editor sends its payload.
#[derive(Clone)]
pub enum SaveTarget {
    Create(ResourceStore),
    Update(ResourceStore, String),
    Singleton(SingletonStore),
}

impl SaveTarget {
    async fn save(self, payload: RecordPayload) -> Result<Record, ApiError> {
        match self {
            SaveTarget::Create(store) => store.create(payload).await,
            SaveTarget::Update(store, id) => store.update(&id, payload).await,
            SaveTarget::Singleton(store) => store.save(payload).await,
        }
    }

    fn is_create(&self) -> bool {
        matches!(self, SaveTarget::Create(_))
    }
}

/// Image upload attached to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInput {
    /// Record field holding the current image URL, shown until a new file
    /// is picked.
    pub url_field: &'static str,
    pub required_on_create: bool,
}

impl ImageInput {
    pub const fn new(url_field: &'static str) -> Self {
        Self {
            url_field,
            required_on_create: true,
        }
    }
}

/// Everything the editor needs to open.
#[derive(Clone)]
pub struct RecordFormSpec {
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub record: Option<Record>,
    pub image: Option<ImageInput>,
    pub target: SaveTarget,
}

/// Editors with more fields than this open in the wide dialog.
const WIDE_FORM_FIELDS: usize = 8;

/// Pushes the editor onto the modal stack.
pub fn open_record_form(modal: ModalStackService, spec: RecordFormSpec) -> ModalHandle {
    let size = if spec.fields.len() > WIDE_FORM_FIELDS {
        ModalSize::Wide
    } else {
        ModalSize::Form
    };
    modal.open(size, move |handle| {
        view! { <RecordForm spec=spec.clone() handle=handle /> }.into_any()
    })
}

#[component]
pub fn RecordForm(spec: RecordFormSpec, handle: ModalHandle) -> impl IntoView {
    let notifications = use_context::<NotificationService>();
    let RecordFormSpec {
        title,
        fields,
        record,
        image,
        target,
    } = spec;

    let values = RwSignal::new(form_values(&fields, record.as_ref()));
    let form_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let picked = StoredValue::new_local(None::<File>);
    let preview = RwSignal::new(
        image
            .and_then(|img| record.as_ref().map(|r| r.display(img.url_field)))
            .filter(|url| !url.is_empty()),
    );
    let has_image = image.is_some() && record.is_some();

    let fields = StoredValue::new(fields);
    let target = StoredValue::new(target);

    let on_file = move |ev: leptos::ev::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        picked.set_value(Some(file.clone()));
        spawn_local(async move {
            match encode_file_as_data_url(&file).await {
                Ok(url) => preview.set(Some(url)),
                Err(err) => {
                    log::warn!("preview failed: {}", err);
                    picked.set_value(None);
                    form_error.set(Some(err.message.clone()));
                    if let Some(n) = notifications {
                        n.error(err.message);
                    }
                }
            }
        });
    };

    let close = {
        let handle = handle.clone();
        move |_| handle.close()
    };

    let submit = move |_| {
        if saving.get_untracked() {
            return;
        }
        let current = values.get_untracked();
        let missing = fields.with_value(|f| missing_required(f, &current));
        if !missing.is_empty() {
            form_error.set(Some(format!("Required: {}", missing.join(", "))));
            return;
        }
        let file = picked.get_value();
        let needs_image = image.is_some_and(|img| img.required_on_create)
            && target.with_value(SaveTarget::is_create)
            && !has_image;
        if needs_image && file.is_none() {
            form_error.set(Some("Please choose an image".to_string()));
            return;
        }
        form_error.set(None);

        let payload = RecordPayload::with_file(fields.with_value(|f| build_payload(f, &current)), file);
        let target = target.get_value();
        let handle = handle.clone();
        saving.set(true);
        spawn_local(async move {
            let result = target.save(payload).await;
            saving.set(false);
            match result {
                Ok(_) => handle.close(),
                Err(err) => form_error.set(Some(err.message)),
            }
        });
    };

    view! {
        <div class="record-form">
            <div class="record-form__header">
                <h3>{title}</h3>
            </div>

            <div class="record-form__body">
                {fields.with_value(|specs| {
                    specs
                        .iter()
                        .cloned()
                        .map(|spec| field_input(spec, values))
                        .collect_view()
                })}

                {image.map(|_| view! {
                    <div class="record-form__field">
                        <label class="record-form__label">"Image"</label>
                        <input type="file" accept="image/*" on:change=on_file />
                        {move || preview.get().map(|src| view! {
                            <img class="record-form__preview" src=src alt="preview" />
                        })}
                    </div>
                })}

                {move || form_error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}
            </div>

            <div class="record-form__footer">
                <Button appearance=ButtonAppearance::Secondary on_click=close>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </div>
    }
}

fn set_value(values: RwSignal<FormValues>, name: &'static str, value: String) {
    values.update(|v| {
        v.insert(name.to_string(), value);
    });
}

fn field_input(spec: FieldSpec, values: RwSignal<FormValues>) -> AnyView {
    let name = spec.name;
    let current = move || values.with(|v| v.get(name).cloned().unwrap_or_default());
    let label = if spec.required {
        format!("{} *", spec.label)
    } else {
        spec.label.to_string()
    };

    let input = match spec.kind {
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                prop:checked=move || current() == "true"
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    set_value(values, name, checked.to_string());
                }
            />
        }
        .into_any(),
        FieldKind::TextArea => view! {
            <textarea
                class="record-form__input"
                rows="4"
                prop:value=current
                on:input=move |ev| set_value(values, name, event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select
                class="record-form__input"
                prop:value=current
                on:change=move |ev| set_value(values, name, event_target_value(&ev))
            >
                <option value="">"Select..."</option>
                {options
                    .into_iter()
                    .map(|opt| {
                        let value = opt.value().to_string();
                        let selected_value = value.clone();
                        view! {
                            <option value=value selected=move || current() == selected_value>
                                {opt.label().to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        kind => {
            let (input_type, hint) = match kind {
                FieldKind::Number => ("number", ""),
                FieldKind::Date => ("date", ""),
                FieldKind::List => ("text", "Comma separated"),
                _ => ("text", ""),
            };
            view! {
                <input
                    class="record-form__input"
                    type=input_type
                    step=(input_type == "number").then_some("any")
                    placeholder=hint
                    prop:value=current
                    on:input=move |ev| set_value(values, name, event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    view! {
        <div class="record-form__field">
            <label class="record-form__label">{label}</label>
            {input}
        </div>
    }
    .into_any()
}
