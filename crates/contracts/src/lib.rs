//! Shared types for the jewelry admin frontend.
//!
//! Everything here is platform-neutral: records, pagination, envelope
//! normalization and the per-resource descriptors used to talk to the
//! back-office REST API.

pub mod domain;
