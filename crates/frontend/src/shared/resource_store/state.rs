//! Pure state transitions of the resource stores.
//!
//! Nothing here touches signals or the network, so every rule about which
//! response lands where is testable natively.

use contracts::domain::common::{
    ApiError, BulkImportSummary, IdentityField, ListPage, ListQuery, Pagination, Record,
};

/// Which of two overlapping list fetches is allowed to land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchOrdering {
    /// Only the most recently issued fetch may apply its result.
    #[default]
    LatestIssued,
    /// Every result applies; the one that resolves last wins.
    LastResolved,
}

/// Sequence number handed out when a list fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// Superseded by a later fetch and dropped.
    Stale,
}

/// Collection held by one list store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionState {
    pub items: Vec<Record>,
    pub pagination: Option<Pagination>,
    pub loading: bool,
    pub error: Option<String>,
    pending: u32,
    issued: u64,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a request as started. `loading` stays true until every started
    /// request has finished.
    pub fn begin(&mut self) {
        self.pending += 1;
        self.loading = true;
    }

    pub fn end(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        self.loading = self.pending > 0;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.begin();
        FetchTicket(self.issued)
    }

    fn is_stale(&self, ticket: FetchTicket, ordering: FetchOrdering) -> bool {
        ordering == FetchOrdering::LatestIssued && ticket.0 < self.issued
    }

    /// Lands a list response. A successful page replaces items and pagination
    /// wholesale; a failure keeps the previous items.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListPage, ApiError>,
        ordering: FetchOrdering,
    ) -> FetchOutcome {
        self.end();
        if self.is_stale(ticket, ordering) {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(page) => {
                self.items = page.items;
                self.pagination = page.pagination;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                self.error = Some(err.message);
                FetchOutcome::Failed
            }
        }
    }

    pub fn fail(&mut self, err: &ApiError) {
        self.error = Some(err.message.clone());
    }

    /// Ends a bulk upload. On success returns the query the list has to be
    /// reloaded with; on failure records the error and keeps the items.
    pub fn finish_import(
        &mut self,
        result: &Result<BulkImportSummary, ApiError>,
        landing: &ListQuery,
    ) -> Option<ListQuery> {
        self.end();
        match result {
            Ok(_) => {
                self.error = None;
                Some(landing.clone())
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn position(&self, identity: IdentityField, id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|r| r.identity(identity).as_deref() == Some(id))
    }

    /// Newly created records go to the front of the list.
    pub fn insert_created(&mut self, record: Record) {
        self.items.insert(0, record);
        self.error = None;
    }

    /// Replaces the record with identity `id` by `record`, keeping its index.
    /// Returns false when the record is no longer held.
    pub fn replace(&mut self, identity: IdentityField, id: &str, record: Record) -> bool {
        self.error = None;
        match self.position(identity, id) {
            Some(idx) => {
                self.items[idx] = record;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, identity: IdentityField, id: &str) -> bool {
        self.error = None;
        match self.position(identity, id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Merges a status patch into the held record; other fields stay as held.
    pub fn apply_patch(&mut self, identity: IdentityField, id: &str, patch: &Record) -> bool {
        match self.position(identity, id) {
            Some(idx) => {
                self.items[idx].merge(patch);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, identity: IdentityField, id: &str) -> Option<&Record> {
        self.position(identity, id).map(|idx| &self.items[idx])
    }

    /// Drops the collection. Results of fetches issued before the reset are
    /// ignored afterwards.
    pub fn clear(&mut self) {
        let issued = self.issued;
        *self = Self::default();
        self.issued = issued + 1;
    }
}

/// State of a single-record resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingletonState {
    pub record: Option<Record>,
    pub loading: bool,
    pub error: Option<String>,
    /// A fetch has completed at least once; tells "nothing yet" from "not loaded".
    pub loaded: bool,
    pending: u32,
    issued: u64,
}

impl SingletonState {
    pub fn begin(&mut self) {
        self.pending += 1;
        self.loading = true;
    }

    pub fn end(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        self.loading = self.pending > 0;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.begin();
        FetchTicket(self.issued)
    }

    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<Record>, ApiError>,
    ) -> FetchOutcome {
        self.end();
        if ticket.0 < self.issued {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(record) => {
                self.record = record;
                self.loaded = true;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                self.error = Some(err.message);
                FetchOutcome::Failed
            }
        }
    }

    /// Whether a save has to create the record first.
    pub fn exists(&self) -> bool {
        self.record.is_some()
    }

    pub fn set(&mut self, record: Option<Record>) {
        self.record = record;
        self.loaded = true;
        self.error = None;
    }

    pub fn fail(&mut self, err: &ApiError) {
        self.error = Some(err.message.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: IdentityField = IdentityField::DocumentId;

    fn rec(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn page(ids: &[&str], total: u64) -> ListPage {
        ListPage {
            items: ids.iter().map(|id| rec(json!({"_id": id}))).collect(),
            pagination: Some(Pagination { page: 1, limit: 20, total }),
            skipped: 0,
        }
    }

    fn ids(state: &CollectionState) -> Vec<String> {
        state
            .items
            .iter()
            .filter_map(|r| r.identity(ID))
            .collect()
    }

    #[test]
    fn fetch_replaces_items_and_pagination() {
        let mut s = CollectionState::new();
        s.items = vec![rec(json!({"_id": "old"}))];

        let t = s.begin_fetch();
        assert!(s.loading);
        let outcome = s.finish_fetch(t, Ok(page(&["a", "b"], 41)), FetchOrdering::LatestIssued);

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(ids(&s), vec!["a", "b"]);
        assert_eq!(s.pagination.map(|p| p.total), Some(41));
        assert!(!s.loading);
        assert!(s.error.is_none());
    }

    #[test]
    fn failed_fetch_keeps_items() {
        let mut s = CollectionState::new();
        let t = s.begin_fetch();
        s.finish_fetch(t, Ok(page(&["a"], 1)), FetchOrdering::LatestIssued);

        let t = s.begin_fetch();
        let outcome = s.finish_fetch(
            t,
            Err(ApiError::from_response(500, "")),
            FetchOrdering::LatestIssued,
        );
        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(ids(&s), vec!["a"]);
        assert!(s.error.is_some());
        assert!(!s.loading);
    }

    #[test]
    fn import_lands_on_first_page() {
        let mut s = CollectionState::new();
        let t = s.begin_fetch();
        s.finish_fetch(t, Ok(page(&["a", "b"], 2)), FetchOrdering::LatestIssued);

        s.begin();
        let summary = BulkImportSummary { created: 3, ..Default::default() };
        let landing = s.finish_import(&Ok(summary), &ListQuery::new(1, 10));

        assert_eq!(landing, Some(ListQuery::new(1, 10)));
        // Items change only when the reload lands.
        assert_eq!(ids(&s), vec!["a", "b"]);
        assert!(!s.loading);
    }

    #[test]
    fn failed_import_keeps_items() {
        let mut s = CollectionState::new();
        let t = s.begin_fetch();
        s.finish_fetch(t, Ok(page(&["a"], 1)), FetchOrdering::LatestIssued);

        s.begin();
        let landing = s.finish_import(
            &Err(ApiError::from_response(400, r#"{"message":"bad sheet"}"#)),
            &ListQuery::new(1, 10),
        );

        assert_eq!(landing, None);
        assert_eq!(ids(&s), vec!["a"]);
        assert_eq!(s.error.as_deref(), Some("bad sheet"));
        assert!(!s.loading);
    }

    #[test]
    fn latest_issued_drops_slow_earlier_fetch() {
        let mut s = CollectionState::new();
        let first = s.begin_fetch();
        let second = s.begin_fetch();

        // Second request answers first.
        s.finish_fetch(second, Ok(page(&["p2"], 40)), FetchOrdering::LatestIssued);
        assert!(s.loading);
        let outcome = s.finish_fetch(first, Ok(page(&["p1"], 40)), FetchOrdering::LatestIssued);

        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(ids(&s), vec!["p2"]);
        assert!(!s.loading);
    }

    #[test]
    fn last_resolved_lets_late_response_win() {
        let mut s = CollectionState::new();
        let first = s.begin_fetch();
        let second = s.begin_fetch();

        s.finish_fetch(second, Ok(page(&["p2"], 40)), FetchOrdering::LastResolved);
        let outcome = s.finish_fetch(first, Ok(page(&["p1"], 40)), FetchOrdering::LastResolved);

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(ids(&s), vec!["p1"]);
    }

    #[test]
    fn loading_waits_for_every_request() {
        let mut s = CollectionState::new();
        let t = s.begin_fetch();
        s.begin();
        s.finish_fetch(t, Ok(page(&[], 0)), FetchOrdering::LatestIssued);
        assert!(s.loading);
        s.end();
        assert!(!s.loading);
        s.end();
        assert!(!s.loading);
    }

    #[test]
    fn create_inserts_at_front() {
        let mut s = CollectionState::new();
        s.items = vec![rec(json!({"_id": "a"})), rec(json!({"_id": "b"}))];
        s.insert_created(rec(json!({"_id": "new"})));
        assert_eq!(ids(&s), vec!["new", "a", "b"]);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut s = CollectionState::new();
        s.items = vec![
            rec(json!({"_id": "a", "price": 1})),
            rec(json!({"_id": "b", "price": 2})),
            rec(json!({"_id": "c", "price": 3})),
        ];
        assert!(s.replace(ID, "b", rec(json!({"_id": "b", "price": 20}))));
        assert_eq!(ids(&s), vec!["a", "b", "c"]);
        assert_eq!(s.items[1].f64_field("price"), Some(20.0));

        assert!(!s.replace(ID, "gone", rec(json!({"_id": "gone"}))));
        assert_eq!(s.items.len(), 3);
    }

    #[test]
    fn natural_key_update_can_rename() {
        let key = IdentityField::Natural("metal_type");
        let mut s = CollectionState::new();
        s.items = vec![rec(json!({"metal_type": "18K", "price_per_gram": 60}))];
        s.replace(key, "18K", rec(json!({"metal_type": "18K Gold", "price_per_gram": 61})));
        assert_eq!(s.items[0].str_field("metal_type"), Some("18K Gold"));
    }

    #[test]
    fn delete_removes_only_target() {
        let mut s = CollectionState::new();
        s.items = vec![rec(json!({"_id": "a"})), rec(json!({"_id": "b"}))];
        assert!(s.remove(ID, "a"));
        assert_eq!(ids(&s), vec!["b"]);
        assert!(!s.remove(ID, "a"));
    }

    #[test]
    fn status_patch_keeps_other_fields() {
        let mut s = CollectionState::new();
        s.items = vec![rec(json!({"_id": "d1", "active": false, "price": 999, "sku": "X"}))];
        let patch = Record::new().with("active", true);
        assert!(s.apply_patch(ID, "d1", &patch));
        assert_eq!(
            s.items[0],
            rec(json!({"_id": "d1", "active": true, "price": 999, "sku": "X"}))
        );
        assert!(!s.loading);
    }

    #[test]
    fn clear_ignores_fetches_issued_before() {
        let mut s = CollectionState::new();
        let t = s.begin_fetch();
        s.clear();
        assert!(s.items.is_empty());
        assert!(!s.loading);

        let outcome = s.finish_fetch(t, Ok(page(&["late"], 1)), FetchOrdering::LatestIssued);
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(s.items.is_empty());
    }

    #[test]
    fn singleton_fetch_and_exists() {
        let mut s = SingletonState::default();
        assert!(!s.exists());
        assert!(!s.loaded);

        let t = s.begin_fetch();
        s.finish_fetch(t, Ok(None));
        assert!(s.loaded);
        assert!(!s.exists());

        s.set(Some(rec(json!({"_id": "e", "title": "Rings"}))));
        assert!(s.exists());

        let older = s.begin_fetch();
        let newer = s.begin_fetch();
        s.finish_fetch(newer, Ok(None));
        assert_eq!(s.finish_fetch(older, Ok(Some(Record::new()))), FetchOutcome::Stale);
        assert!(!s.exists());
        assert!(!s.loading);
    }
}
