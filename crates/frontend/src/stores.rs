//! Stores of every resource the admin manages, built once at the root and
//! handed to pages explicitly.

use crate::shared::notifications::NotificationService;
use crate::shared::resource_store::{ResourceStore, SingletonStore};
use contracts::domain::a001_diamond::DIAMONDS;
use contracts::domain::a002_metal::METALS;
use contracts::domain::a003_product::PRODUCTS;
use contracts::domain::a004_variant::VARIANTS;
use contracts::domain::a005_order::ORDERS;
use contracts::domain::a006_coupon::COUPONS;
use contracts::domain::a007_contact::CONTACTS;
use contracts::domain::a008_media::MediaKind;

/// One list store per media section plus the engagement banner.
#[derive(Clone, Copy)]
pub struct MediaStores {
    banners: ResourceStore,
    collections: ResourceStore,
    featured: ResourceStore,
    reviews: ResourceStore,
    diamond_types: ResourceStore,
    pub engagement_banner: SingletonStore,
}

impl MediaStores {
    pub fn new(notifications: NotificationService) -> Self {
        let list = |kind: MediaKind| ResourceStore::new(kind.descriptor(), notifications);
        Self {
            banners: list(MediaKind::Banner),
            collections: list(MediaKind::Collection),
            featured: list(MediaKind::Featured),
            reviews: list(MediaKind::CustomerReview),
            diamond_types: list(MediaKind::DiamondType),
            engagement_banner: SingletonStore::new(
                MediaKind::EngagementBanner.descriptor(),
                notifications,
            ),
        }
    }

    /// List store of a section; `None` for the singleton banner.
    pub fn list(&self, kind: MediaKind) -> Option<ResourceStore> {
        match kind {
            MediaKind::Banner => Some(self.banners),
            MediaKind::Collection => Some(self.collections),
            MediaKind::Featured => Some(self.featured),
            MediaKind::CustomerReview => Some(self.reviews),
            MediaKind::DiamondType => Some(self.diamond_types),
            MediaKind::EngagementBanner => None,
        }
    }
}

#[derive(Clone, Copy)]
pub struct AdminStores {
    pub diamonds: ResourceStore,
    pub metals: ResourceStore,
    pub products: ResourceStore,
    pub variants: ResourceStore,
    pub orders: ResourceStore,
    pub coupons: ResourceStore,
    pub contacts: ResourceStore,
    pub media: MediaStores,
}

impl AdminStores {
    pub fn new(notifications: NotificationService) -> Self {
        Self {
            diamonds: ResourceStore::new(DIAMONDS, notifications),
            metals: ResourceStore::new(METALS, notifications),
            products: ResourceStore::new(PRODUCTS, notifications),
            variants: ResourceStore::new(VARIANTS, notifications),
            orders: ResourceStore::new(ORDERS, notifications),
            coupons: ResourceStore::new(COUPONS, notifications),
            contacts: ResourceStore::new(CONTACTS, notifications),
            media: MediaStores::new(notifications),
        }
    }
}
