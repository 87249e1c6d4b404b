//! Common types shared by every resource

pub mod api_error;
pub mod bulk;
pub mod descriptor;
pub mod envelope;
pub mod field_option;
pub mod form;
pub mod pagination;
pub mod record;
pub mod status;

// Re-exports
pub use api_error::{ApiError, ApiErrorKind};
pub use bulk::{BulkImportSummary, ImportTemplate};
pub use descriptor::{ListRoute, ResourceDescriptor};
pub use envelope::{normalize_item, normalize_list, normalize_singleton, ListPage};
pub use field_option::FieldOption;
pub use form::{build_payload, form_values, missing_required, set_options, FieldKind, FieldSpec, FormValues};
pub use pagination::{ListQuery, Pagination, LIMIT_OPTIONS};
pub use record::{display_value, IdentityField, Record};
pub use status::{StatusRoute, StatusToggle, StatusValue};
