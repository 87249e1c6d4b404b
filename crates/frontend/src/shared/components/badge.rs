use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    Primary,
    Success,
    Warning,
    Error,
    #[default]
    Neutral,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Primary => "badge badge--primary",
            BadgeVariant::Success => "badge badge--success",
            BadgeVariant::Warning => "badge badge--warning",
            BadgeVariant::Error => "badge badge--error",
            BadgeVariant::Neutral => "badge badge--neutral",
        }
    }
}

/// Badge component with different variants
#[component]
pub fn Badge(
    #[prop(optional)] variant: BadgeVariant,
    children: Children,
) -> impl IntoView {
    view! { <span class=variant.class()>{children()}</span> }
}

/// Active / Inactive pill of a status column.
#[component]
pub fn ActiveBadge(active: bool) -> impl IntoView {
    let (variant, text) = if active {
        (BadgeVariant::Success, "Active")
    } else {
        (BadgeVariant::Neutral, "Inactive")
    };
    view! { <Badge variant=variant>{text}</Badge> }
}
