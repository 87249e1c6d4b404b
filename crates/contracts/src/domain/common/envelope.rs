//! Response envelope normalization.
//!
//! Endpoints wrap their payloads differently:
//! `{diamonds, pagination}`, `{coupons, page, pages, total}`, `{images}`,
//! `{image}` or a bare array. Every shape is folded into [`ListPage`] here so
//! the stores never look at raw envelopes.

use super::api_error::ApiError;
use super::pagination::{ListQuery, Pagination};
use super::record::Record;
use serde_json::Value;

/// Canonical list response: current items plus server pagination, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub items: Vec<Record>,
    pub pagination: Option<Pagination>,
    /// Entries of the collection that were not objects and were left out.
    pub skipped: usize,
}

/// Normalizes a list response. `key` is the collection field declared by the
/// resource; `items` and a bare array are accepted as well.
pub fn normalize_list(body: Value, key: &str, query: &ListQuery) -> Result<ListPage, ApiError> {
    let (raw_items, envelope) = match body {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let items = match map.remove(key).or_else(|| map.remove("items")) {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(ApiError::decode(format!(
                        "expected an array under `{key}`, got {}",
                        kind_name(&other)
                    )))
                }
            };
            (items, Some(map))
        }
        other => {
            return Err(ApiError::decode(format!(
                "unexpected list response: {}",
                kind_name(&other)
            )))
        }
    };

    let total = raw_items.len();
    let items: Vec<Record> = raw_items.into_iter().filter_map(Record::from_value).collect();
    let skipped = total - items.len();
    let pagination = envelope.and_then(|map| pagination_from(&map, query));
    Ok(ListPage {
        items,
        pagination,
        skipped,
    })
}

fn pagination_from(map: &serde_json::Map<String, Value>, query: &ListQuery) -> Option<Pagination> {
    if let Some(Value::Object(nested)) = map.get("pagination") {
        let total = first_u64(nested, &["total", "totalItems"])?;
        return Some(Pagination {
            page: first_u64(nested, &["page", "currentPage"])
                .map_or(query.page, |p| p.max(1) as u32),
            limit: first_u64(nested, &["limit", "itemsPerPage"])
                .filter(|l| *l > 0)
                .map_or(query.limit, |l| l as u32),
            total,
        });
    }

    // Flat `{page, pages, total}`: the limit is whatever was requested.
    let total = first_u64(map, &["total"])?;
    Some(Pagination {
        page: first_u64(map, &["page"]).map_or(query.page, |p| p.max(1) as u32),
        limit: query.limit,
        total,
    })
}

fn first_u64(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| map.get(*key).and_then(as_u64))
}

/// Unwraps `{ <key>: record }` or returns the body itself when it already is
/// the record.
pub fn normalize_item(body: Value, key: Option<&str>) -> Result<Record, ApiError> {
    let value = match (body, key) {
        (Value::Object(mut map), Some(key)) => match map.remove(key) {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert(key.to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        (body, _) => body,
    };
    Record::from_value(value).ok_or_else(|| ApiError::decode("expected a record object"))
}

/// Singleton responses carry either a record or `null` under `key`. An
/// object without `key` (an acknowledgement, an empty envelope) means no
/// record.
pub fn normalize_singleton(body: Value, key: &str) -> Result<Option<Record>, ApiError> {
    match body {
        Value::Null => Ok(None),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Object(inner)) => Ok(Some(Record(inner))),
            Some(Value::Null) => Ok(None),
            Some(other) => Err(ApiError::decode(format!(
                "expected an object under `{key}`, got {}",
                kind_name(&other)
            ))),
            None => Ok(None),
        },
        other => Err(ApiError::decode(format!(
            "unexpected singleton response: {}",
            kind_name(&other)
        ))),
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_pagination() {
        let body = json!({
            "diamonds": [{"_id": "a"}, {"_id": "b"}],
            "pagination": {"page": 2, "limit": 20, "total": 41}
        });
        let page = normalize_list(body, "diamonds", &ListQuery::new(2, 20)).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.pagination,
            Some(Pagination { page: 2, limit: 20, total: 41 })
        );
        assert_eq!(page.pagination.unwrap().total_pages(), 3);
    }

    #[test]
    fn nested_pagination_aliases() {
        let body = json!({
            "diamonds": [{"_id": "a"}],
            "pagination": {"currentPage": 3, "itemsPerPage": 10, "totalItems": 95}
        });
        let page = normalize_list(body, "diamonds", &ListQuery::new(3, 10)).unwrap();
        assert_eq!(
            page.pagination,
            Some(Pagination { page: 3, limit: 10, total: 95 })
        );
    }

    #[test]
    fn flat_pagination_uses_requested_limit() {
        let body = json!({"coupons": [{"_id": "c1"}], "page": 1, "pages": 4, "total": 61});
        let page = normalize_list(body, "coupons", &ListQuery::new(1, 20)).unwrap();
        assert_eq!(
            page.pagination,
            Some(Pagination { page: 1, limit: 20, total: 61 })
        );
    }

    #[test]
    fn bare_array_has_no_pagination() {
        let body = json!([{"metal_type": "Platinum"}, {"metal_type": "18K"}]);
        let page = normalize_list(body, "metals", &ListQuery::default()).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.pagination.is_none());
    }

    #[test]
    fn items_key_fallback_and_missing_collection() {
        let body = json!({"items": [{"_id": "p"}], "pagination": {"page": 1, "limit": 50, "total": 1}});
        let page = normalize_list(body, "products", &ListQuery::default()).unwrap();
        assert_eq!(page.items.len(), 1);

        let page = normalize_list(json!({"images": null}), "images", &ListQuery::default()).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn non_object_entries_are_counted() {
        let body = json!({"banners": [{"_id": "a"}, "junk", 7, {"_id": "b"}]});
        let page = normalize_list(body, "banners", &ListQuery::default()).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.skipped, 2);
    }

    #[test]
    fn wrong_collection_type_is_decode_error() {
        let err = normalize_list(json!({"images": "nope"}), "images", &ListQuery::default())
            .unwrap_err();
        assert_eq!(err.kind, crate::domain::common::ApiErrorKind::Decode);
    }

    #[test]
    fn item_unwrapping() {
        let wrapped = normalize_item(json!({"coupon": {"_id": "c"}, "message": "ok"}), Some("coupon"))
            .unwrap();
        assert_eq!(wrapped.str_field("_id"), Some("c"));

        let bare = normalize_item(json!({"_id": "d", "sku": "X"}), Some("diamond")).unwrap();
        assert_eq!(bare.str_field("sku"), Some("X"));

        assert!(normalize_item(json!([1]), None).is_err());
    }

    #[test]
    fn singleton_shapes() {
        assert_eq!(normalize_singleton(json!({"image": null}), "image").unwrap(), None);
        assert_eq!(normalize_singleton(json!({}), "image").unwrap(), None);
        assert_eq!(
            normalize_singleton(json!({"success": true, "count": 0}), "image").unwrap(),
            None
        );
        assert_eq!(normalize_singleton(json!({"message": "Not found"}), "image").unwrap(), None);
        let some = normalize_singleton(json!({"image": {"_id": "e", "title": "Rings"}}), "image")
            .unwrap()
            .unwrap();
        assert_eq!(some.str_field("title"), Some("Rings"));
    }
}
