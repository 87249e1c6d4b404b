use crate::domain::common::{FieldKind, FieldSpec, ResourceDescriptor};

/// Раздел медиатеки. Каждый раздел - отдельный ресурс со своим путём.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Banner,
    Collection,
    Featured,
    CustomerReview,
    DiamondType,
    EngagementBanner,
}

const BASE: &str = "/admin/images";

const BANNERS: ResourceDescriptor = ResourceDescriptor {
    default_limit: 100,
    bulk_refetch_limit: 100,
    ..ResourceDescriptor::new("banners", "Banner", "/admin/images/banners")
};

const fn image_list(name: &'static str, noun: &'static str, path: &'static str) -> ResourceDescriptor {
    ResourceDescriptor {
        list_key: "images",
        default_limit: 100,
        bulk_refetch_limit: 100,
        ..ResourceDescriptor::new(name, noun, path)
    }
}

const COLLECTIONS: ResourceDescriptor =
    image_list("collections", "Collection", "/admin/images/collections");
const FEATURED: ResourceDescriptor = image_list("featured", "Featured item", "/admin/images/featured");
const REVIEWS: ResourceDescriptor =
    image_list("customer-reviews", "Review", "/admin/images/customer-reviews");
const DIAMOND_TYPES: ResourceDescriptor =
    image_list("diamond-types", "Diamond type", "/admin/images/diamond-types");

/// Singleton: list key doubles as the record key, no id in paths.
const ENGAGEMENT_BANNER: ResourceDescriptor = ResourceDescriptor {
    list_key: "image",
    item_key: Some("image"),
    ..ResourceDescriptor::new(
        "engagement-ring-banner",
        "Engagement banner",
        "/admin/images/engagement-ring-banner",
    )
};

impl MediaKind {
    pub const ALL: [MediaKind; 6] = [
        MediaKind::Banner,
        MediaKind::Collection,
        MediaKind::Featured,
        MediaKind::CustomerReview,
        MediaKind::DiamondType,
        MediaKind::EngagementBanner,
    ];

    /// Collections managed as lists; the engagement banner is separate.
    pub const LISTS: [MediaKind; 5] = [
        MediaKind::Banner,
        MediaKind::Collection,
        MediaKind::Featured,
        MediaKind::CustomerReview,
        MediaKind::DiamondType,
    ];

    pub const fn descriptor(self) -> ResourceDescriptor {
        match self {
            MediaKind::Banner => BANNERS,
            MediaKind::Collection => COLLECTIONS,
            MediaKind::Featured => FEATURED,
            MediaKind::CustomerReview => REVIEWS,
            MediaKind::DiamondType => DIAMOND_TYPES,
            MediaKind::EngagementBanner => ENGAGEMENT_BANNER,
        }
    }

    pub const fn is_singleton(self) -> bool {
        matches!(self, MediaKind::EngagementBanner)
    }

    pub fn title(self) -> &'static str {
        match self {
            MediaKind::Banner => "Banners",
            MediaKind::Collection => "Collections",
            MediaKind::Featured => "Featured",
            MediaKind::CustomerReview => "Reviews",
            MediaKind::DiamondType => "Diamond Types",
            MediaKind::EngagementBanner => "Engagement Banner",
        }
    }

    /// Text shown under the thumbnail.
    pub fn caption_field(self) -> &'static str {
        match self {
            MediaKind::Collection => "display_text",
            MediaKind::CustomerReview => "customer_name",
            _ => "title",
        }
    }

    /// Editor fields; the image itself is handled by the upload control.
    pub fn form_fields(self) -> Vec<FieldSpec> {
        let mut fields = match self {
            MediaKind::Banner | MediaKind::EngagementBanner => vec![
                FieldSpec::text("title", "Title"),
                FieldSpec::text("subtitle", "Subtitle"),
                FieldSpec::text("button_text", "Button Text"),
                FieldSpec::text("link_url", "Link URL"),
            ],
            MediaKind::Collection => vec![
                FieldSpec::text("category", "Category Key").required(),
                FieldSpec::text("display_text", "Display Text").required(),
                FieldSpec::text("link_url", "Link URL"),
            ],
            MediaKind::Featured => vec![
                FieldSpec::text("title", "Title"),
                FieldSpec::text("subtitle", "Subtitle"),
                FieldSpec::text("link_url", "Link URL"),
            ],
            MediaKind::CustomerReview => vec![
                FieldSpec::text("customer_name", "Customer Name").required(),
                FieldSpec::number("rating", "Rating (1-5)").default_value("5"),
                FieldSpec::new("review_text", "Review", FieldKind::TextArea).required(),
            ],
            MediaKind::DiamondType => vec![
                FieldSpec::text("title", "Title").required(),
                FieldSpec::new("description", "Description", FieldKind::TextArea),
                FieldSpec::text("link_url", "Link URL"),
            ],
        };
        if !self.is_singleton() {
            fields.push(FieldSpec::number("sort_order", "Sort Order").default_value("0"));
        }
        fields
    }
}

/// Root of every media path.
pub fn media_base() -> &'static str {
    BASE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{normalize_list, normalize_singleton, ListQuery};
    use serde_json::json;

    #[test]
    fn envelope_keys_per_kind() {
        let banners = normalize_list(
            json!({"banners": [{"_id": "b1"}]}),
            MediaKind::Banner.descriptor().list_key,
            &ListQuery::default(),
        )
        .unwrap();
        assert_eq!(banners.items.len(), 1);

        let reviews = normalize_list(
            json!({"images": [{"_id": "r1"}, {"_id": "r2"}]}),
            MediaKind::CustomerReview.descriptor().list_key,
            &ListQuery::default(),
        )
        .unwrap();
        assert_eq!(reviews.items.len(), 2);
    }

    #[test]
    fn engagement_banner_is_singleton() {
        let kind = MediaKind::EngagementBanner;
        assert!(kind.is_singleton());
        let d = kind.descriptor();
        assert_eq!(d.base_path, "/admin/images/engagement-ring-banner");
        assert_eq!(normalize_singleton(json!({"image": null}), d.list_key).unwrap(), None);
        assert!(!kind.form_fields().iter().any(|f| f.name == "sort_order"));
    }

    #[test]
    fn every_path_is_under_images() {
        for kind in MediaKind::ALL {
            assert!(kind.descriptor().base_path.starts_with(media_base()));
        }
    }
}
