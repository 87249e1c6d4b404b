//! Page category constants.
//!
//! Every page rendered inside a tab declares an HTML `id` in the format
//! `{entity}--{category}` (e.g. `"a001_diamond--list"`) and a
//! `data-page-category` with one of the constants below. The `--` separator
//! keeps the entity searchable from the DOM inspector.

/// List of records: table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Free-form page (media library with its tab strip).
pub const PAGE_CAT_CUSTOM: &str = "custom";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, category)) if !entity.is_empty() && !category.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids() {
        assert!(is_valid_page_id("a001_diamond--list"));
        assert!(!is_valid_page_id("a001_diamond"));
        assert!(!is_valid_page_id("--list"));
    }
}
