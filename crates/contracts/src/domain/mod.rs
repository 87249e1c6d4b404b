pub mod common;

pub mod a001_diamond;
pub mod a002_metal;
pub mod a003_product;
pub mod a004_variant;
pub mod a005_order;
pub mod a006_coupon;
pub mod a007_contact;
pub mod a008_media;
