//! Paging arithmetic of the resource table. Pure, no signals.

use contracts::domain::common::pagination::total_pages;
use contracts::domain::common::Record;

/// One cell of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    /// Inert "…" placeholder.
    Gap,
}

/// Page buttons shown for `page` of `total`.
///
/// Up to six pages are listed in full. Otherwise the first and last pages
/// are always present and the current one is shown with its neighbours.
pub fn page_strip(page: u32, total: u32) -> Vec<PageSlot> {
    use PageSlot::{Gap, Page};

    let total = total.max(1);
    let page = page.clamp(1, total);
    if total <= 6 {
        return (1..=total).map(Page).collect();
    }
    if page <= 3 {
        return vec![Page(1), Page(2), Page(3), Page(4), Gap, Page(total)];
    }
    if page >= total - 2 {
        return vec![
            Page(1),
            Gap,
            Page(total - 3),
            Page(total - 2),
            Page(total - 1),
            Page(total),
        ];
    }
    vec![
        Page(1),
        Gap,
        Page(page - 1),
        Page(page),
        Page(page + 1),
        Gap,
        Page(total),
    ]
}

/// Target of a navigation request, or `None` when it falls outside
/// `[1, total]` or points at the current page.
pub fn navigate(current: u32, target: i64, total: u32) -> Option<u32> {
    let total = i64::from(total.max(1));
    if target < 1 || target > total || target == i64::from(current) {
        return None;
    }
    Some(target as u32)
}

/// Records whose fields contain `search`, in their original order.
pub fn filter_records(items: &[Record], search: &str) -> Vec<Record> {
    let needle = search.trim();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|r| r.matches_search(needle))
        .cloned()
        .collect()
}

/// Slice of `items` shown on local page `page`, with the original row
/// offset of its first element.
pub fn local_page(items: &[Record], page: u32, limit: u32) -> (usize, Vec<Record>) {
    let limit = limit.max(1) as usize;
    let pages = local_total_pages(items.len(), limit as u32);
    let page = page.clamp(1, pages) as usize;
    let start = (page - 1) * limit;
    let end = (start + limit).min(items.len());
    if start >= end {
        return (start, Vec::new());
    }
    (start, items[start..end].to_vec())
}

pub fn local_total_pages(len: usize, limit: u32) -> u32 {
    total_pages(len as u64, limit)
}

/// Where paging happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// The caller holds one page and fetches others on request.
    Server,
    /// The whole collection is held; paging and search are done here.
    Local,
}

impl TableMode {
    /// Server mode needs both pagination metadata and a page handler.
    pub fn resolve(has_pagination: bool, has_page_handler: bool) -> Self {
        if has_pagination && has_page_handler {
            TableMode::Server
        } else {
            TableMode::Local
        }
    }
}

/// State change or outgoing request produced by a pager or search event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIntent {
    LocalPage(u32),
    LocalLimit(u32),
    LocalSearch(String),
    RequestPage(u32),
    RequestLimit(u32),
    RequestSearch(String),
}

/// Navigation to `target`. Nothing happens while loading or when the target
/// is out of range.
pub fn page_intents(
    mode: TableMode,
    current: u32,
    target: i64,
    total: u32,
    loading: bool,
) -> Vec<TableIntent> {
    if loading {
        return Vec::new();
    }
    match navigate(current, target, total) {
        Some(page) if mode == TableMode::Server => vec![TableIntent::RequestPage(page)],
        Some(page) => vec![TableIntent::LocalPage(page)],
        None => Vec::new(),
    }
}

/// Page size change: always back to page 1, forwarded when the caller
/// pages on the server and listens for it.
pub fn limit_intents(mode: TableMode, limit: u32, has_limit_handler: bool) -> Vec<TableIntent> {
    let routed = if mode == TableMode::Server && has_limit_handler {
        TableIntent::RequestLimit(limit)
    } else {
        TableIntent::LocalLimit(limit)
    };
    vec![TableIntent::LocalPage(1), routed]
}

/// Search text change: kept for the box, back to page 1, forwarded
/// verbatim when the caller searches itself.
pub fn search_intents(text: String, has_search_handler: bool) -> Vec<TableIntent> {
    let mut intents = vec![TableIntent::LocalSearch(text.clone()), TableIntent::LocalPage(1)];
    if has_search_handler {
        intents.push(TableIntent::RequestSearch(text));
    }
    intents
}

/// Key of a row for expansion: identity when known, otherwise its index.
pub fn row_key(identity: Option<String>, row_index: usize) -> String {
    identity.unwrap_or_else(|| format!("#{}", row_index))
}

#[cfg(test)]
mod tests {
    use super::PageSlot::{Gap, Page};
    use super::*;
    use serde_json::json;

    fn rec(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn short_strip_lists_every_page() {
        assert_eq!(page_strip(1, 1), vec![Page(1)]);
        assert_eq!(
            page_strip(2, 6),
            (1..=6).map(Page).collect::<Vec<_>>()
        );
    }

    #[test]
    fn strip_near_start() {
        assert_eq!(
            page_strip(2, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Gap, Page(10)]
        );
        assert_eq!(page_strip(3, 10), page_strip(1, 10));
    }

    #[test]
    fn strip_near_end() {
        assert_eq!(
            page_strip(9, 10),
            vec![Page(1), Gap, Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(page_strip(8, 10), page_strip(10, 10));
    }

    #[test]
    fn strip_in_the_middle() {
        assert_eq!(
            page_strip(5, 10),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]
        );
    }

    #[test]
    fn strip_for_seven_pages() {
        assert_eq!(
            page_strip(4, 7),
            vec![Page(1), Gap, Page(3), Page(4), Page(5), Gap, Page(7)]
        );
        assert_eq!(
            page_strip(5, 7),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn navigation_is_clamped() {
        assert_eq!(navigate(1, 0, 5), None);
        assert_eq!(navigate(5, 6, 5), None);
        assert_eq!(navigate(3, 3, 5), None);
        assert_eq!(navigate(3, 4, 5), Some(4));
        assert_eq!(navigate(1, 1, 0), None);
    }

    #[test]
    fn local_search_matches_hidden_fields() {
        let items = vec![
            rec(json!({"sku": "A1", "certNumber": "GIA-1"})),
            rec(json!({"sku": "B2", "certNumber": "IGI-2"})),
        ];
        let found = filter_records(&items, "igi");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].str_field("sku"), Some("B2"));
        assert_eq!(filter_records(&items, "  ").len(), 2);
    }

    #[test]
    fn local_pages_slice_items() {
        let items: Vec<Record> = (0..45).map(|i| rec(json!({"n": i}))).collect();
        assert_eq!(local_total_pages(items.len(), 20), 3);

        let (offset, rows) = local_page(&items, 3, 20);
        assert_eq!(offset, 40);
        assert_eq!(rows.len(), 5);

        // Page past the end falls back to the last page.
        let (offset, rows) = local_page(&items, 9, 20);
        assert_eq!((offset, rows.len()), (40, 5));

        let (_, rows) = local_page(&[], 1, 50);
        assert!(rows.is_empty());
    }

    #[test]
    fn mode_needs_pagination_and_handler() {
        assert_eq!(TableMode::resolve(true, true), TableMode::Server);
        assert_eq!(TableMode::resolve(true, false), TableMode::Local);
        assert_eq!(TableMode::resolve(false, true), TableMode::Local);
    }

    #[test]
    fn page_clicks_route_by_mode() {
        assert_eq!(
            page_intents(TableMode::Server, 1, 3, 5, false),
            vec![TableIntent::RequestPage(3)]
        );
        assert_eq!(
            page_intents(TableMode::Local, 1, 3, 5, false),
            vec![TableIntent::LocalPage(3)]
        );
        assert!(page_intents(TableMode::Server, 1, 6, 5, false).is_empty());
    }

    #[test]
    fn no_navigation_while_loading() {
        assert!(page_intents(TableMode::Server, 1, 2, 5, true).is_empty());
        assert!(page_intents(TableMode::Local, 1, 2, 5, true).is_empty());
    }

    #[test]
    fn limit_change_resets_page() {
        // On page 3 of 10-row pages the user picks 50.
        assert_eq!(
            limit_intents(TableMode::Server, 50, true),
            vec![TableIntent::LocalPage(1), TableIntent::RequestLimit(50)]
        );
        assert_eq!(
            limit_intents(TableMode::Local, 20, true),
            vec![TableIntent::LocalPage(1), TableIntent::LocalLimit(20)]
        );
        assert_eq!(
            limit_intents(TableMode::Server, 20, false),
            vec![TableIntent::LocalPage(1), TableIntent::LocalLimit(20)]
        );
    }

    #[test]
    fn search_resets_page_and_forwards() {
        assert_eq!(
            search_intents("ring".into(), false),
            vec![TableIntent::LocalSearch("ring".into()), TableIntent::LocalPage(1)]
        );
        assert_eq!(
            search_intents("ring".into(), true).last(),
            Some(&TableIntent::RequestSearch("ring".into()))
        );
    }

    #[test]
    fn row_keys_fall_back_to_index() {
        assert_eq!(row_key(Some("d1".into()), 4), "d1");
        assert_eq!(row_key(None, 4), "#4");
    }
}
