use crate::shared::icons::icon;
use contracts::domain::a008_media::MediaKind;
use contracts::domain::common::Record;
use leptos::prelude::*;

/// Heading of a media item: the section's caption field, then any other
/// naming field.
pub fn item_title(kind: MediaKind, record: &Record) -> String {
    std::iter::once(kind.caption_field())
        .chain(["title", "display_text", "customer_name", "category"])
        .map(|field| record.display(field))
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Five-star strip for a 1..=5 rating.
pub fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Detail line of a media card.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailLine {
    pub label: Option<&'static str>,
    pub value: String,
    pub link: bool,
}

fn line(label: Option<&'static str>, value: String, link: bool) -> Option<DetailLine> {
    (!value.is_empty()).then_some(DetailLine { label, value, link })
}

/// Section-specific fields shown beside the thumbnail; empty ones are left
/// out.
pub fn detail_lines(kind: MediaKind, r: &Record) -> Vec<DetailLine> {
    let link = || line(None, r.display("link_url"), true);
    let lines = match kind {
        MediaKind::Banner | MediaKind::EngagementBanner => vec![
            line(Some("Subtitle"), r.display("subtitle"), false),
            line(Some("Button"), r.display("button_text"), false),
            link(),
        ],
        MediaKind::Collection => vec![
            line(Some("Key"), r.display("category"), false),
            line(Some("Display"), r.display("display_text"), false),
            link(),
        ],
        MediaKind::Featured => vec![line(Some("Subtitle"), r.display("subtitle"), false), link()],
        MediaKind::CustomerReview => vec![line(None, r.display("review_text"), false)],
        MediaKind::DiamondType => vec![line(None, r.display("description"), false), link()],
    };
    lines.into_iter().flatten().collect()
}

pub fn thumbnail(record: &Record) -> AnyView {
    let url = record.display("image_url");
    if url.is_empty() {
        view! { <div class="thumb thumb--wide thumb--empty">{icon("image")}</div> }.into_any()
    } else {
        view! { <img class="thumb thumb--wide" src=url alt="Media" /> }.into_any()
    }
}

pub fn details_view(kind: MediaKind, record: &Record) -> AnyView {
    let rating = (kind == MediaKind::CustomerReview)
        .then(|| record.f64_field("rating"))
        .flatten();
    view! {
        <div class="media-details">
            <strong class="media-details__title">{item_title(kind, record)}</strong>
            {rating.map(|r| view! { <div class="media-details__stars">{stars(r)}</div> })}
            {detail_lines(kind, record)
                .into_iter()
                .map(|l| {
                    view! {
                        <div class="media-details__line">
                            {l.label.map(|label| view! { <span class="details__label">{format!("{}:", label)}</span> " " })}
                            {if l.link {
                                view! { <span class="chip chip--mono">{icon("link")} " " {l.value}</span> }.into_any()
                            } else {
                                view! { <span>{l.value}</span> }.into_any()
                            }}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_fall_back() {
        let review = Record::new().with("customer_name", "Maya").with("title", "ignored");
        assert_eq!(item_title(MediaKind::CustomerReview, &review), "Maya");
        let collection = Record::new().with("category", "rings");
        assert_eq!(item_title(MediaKind::Collection, &collection), "rings");
        assert_eq!(item_title(MediaKind::Banner, &Record::new()), "Untitled");
    }

    #[test]
    fn star_strip() {
        assert_eq!(stars(4.0), "★★★★☆");
        assert_eq!(stars(9.0), "★★★★★");
        assert_eq!(stars(-1.0), "☆☆☆☆☆");
    }

    #[test]
    fn banner_lines_skip_blanks() {
        let r = Record::new()
            .with("subtitle", "New season")
            .with("link_url", "/shop");
        let lines = detail_lines(MediaKind::Banner, &r);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, Some("Subtitle"));
        assert!(lines[1].link);
    }
}
