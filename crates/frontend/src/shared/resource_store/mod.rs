//! Resource store synchronizer.
//!
//! One store per REST resource keeps the collection the list page renders and
//! reconciles it with every response: fetches replace it, mutations patch it
//! in place. Transitions live in [`state`]; this module adds the signals,
//! the network calls and the notifications.

pub mod in_flight;
pub mod singleton;
pub mod state;

pub use in_flight::InFlightSet;
pub use singleton::SingletonStore;
pub use state::{CollectionState, FetchOrdering, FetchOutcome};

use crate::shared::notifications::NotificationService;
use crate::shared::rest_resource::{RecordPayload, RestResource};
use contracts::domain::common::{
    ApiError, ApiErrorKind, ListPage, ListQuery, Pagination, Record,
    ResourceDescriptor, StatusValue,
};
use leptos::prelude::*;
use web_sys::File;

#[derive(Clone, Copy)]
pub struct ResourceStore {
    api: RestResource,
    state: RwSignal<CollectionState>,
    notifications: NotificationService,
    ordering: FetchOrdering,
}

impl ResourceStore {
    pub fn new(descriptor: ResourceDescriptor, notifications: NotificationService) -> Self {
        Self {
            api: RestResource::new(descriptor),
            state: RwSignal::new(CollectionState::new()),
            notifications,
            ordering: FetchOrdering::default(),
        }
    }

    pub fn with_ordering(mut self, ordering: FetchOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn descriptor(&self) -> ResourceDescriptor {
        self.api.descriptor
    }

    // ------------------------------------------------------------------
    // Reactive reads
    // ------------------------------------------------------------------

    pub fn items(&self) -> Vec<Record> {
        self.state.with(|s| s.items.clone())
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state.with(|s| s.pagination)
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn find(&self, id: &str) -> Option<Record> {
        let identity = self.descriptor().identity;
        self.state.with(|s| s.find(identity, id).cloned())
    }

    /// Identity of `record` under this resource's identity field.
    pub fn id_of(&self, record: &Record) -> Option<String> {
        self.descriptor().identity_of(record)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    fn report(&self, action: &str, err: &ApiError) {
        log::warn!("{} {} failed: {}", self.descriptor().name, action, err);
        if err.kind != ApiErrorKind::Busy {
            self.notifications.error(err.message.clone());
        }
    }

    /// Replaces the collection with the page answering `query`. A response
    /// overtaken by a later fetch is returned to the caller but not applied.
    pub async fn fetch_list(&self, query: ListQuery) -> Result<ListPage, ApiError> {
        let mut ticket = None;
        self.state.update(|s| ticket = Some(s.begin_fetch()));
        let result = self.api.list(&query).await;

        let Some(ticket) = ticket else {
            return result;
        };
        let mut outcome = FetchOutcome::Stale;
        let ordering = self.ordering;
        let landed = result.clone();
        self.state
            .update(|s| outcome = s.finish_fetch(ticket, landed, ordering));

        match (&result, outcome) {
            (Err(err), FetchOutcome::Failed) => self.report("fetch", err),
            (Ok(page), FetchOutcome::Applied) if page.skipped > 0 => log::warn!(
                "{}: {} list entries were not objects and were skipped",
                self.descriptor().name,
                page.skipped
            ),
            (Ok(_), FetchOutcome::Stale) => {
                log::debug!("{}: dropped stale page {}", self.descriptor().name, query.page)
            }
            _ => {}
        }
        result
    }

    /// Fetches one record and refreshes the held copy, if any.
    pub async fn fetch_one(&self, id: &str) -> Result<Record, ApiError> {
        self.state.update(|s| s.begin());
        let result = self.api.get(id).await;
        let identity = self.descriptor().identity;
        self.state.update(|s| {
            s.end();
            match &result {
                Ok(record) => {
                    s.replace(identity, id, record.clone());
                }
                Err(err) => s.fail(err),
            }
        });
        if let Err(err) = &result {
            self.report("fetch one", err);
        }
        result
    }

    pub async fn create(&self, payload: RecordPayload) -> Result<Record, ApiError> {
        self.state.update(|s| s.begin());
        let result = self.api.create(payload).await;
        self.state.update(|s| {
            s.end();
            match &result {
                Ok(record) => s.insert_created(record.clone()),
                Err(err) => s.fail(err),
            }
        });
        match &result {
            Ok(_) => {
                self.notifications
                    .success(format!("{} created", self.descriptor().noun));
            }
            Err(err) => self.report("create", err),
        }
        result
    }

    pub async fn update(&self, id: &str, payload: RecordPayload) -> Result<Record, ApiError> {
        self.state.update(|s| s.begin());
        let result = self.api.update(id, payload).await;
        let identity = self.descriptor().identity;
        self.state.update(|s| {
            s.end();
            match &result {
                Ok(record) => {
                    if !s.replace(identity, id, record.clone()) {
                        log::debug!("updated record {} is not on the current page", id);
                    }
                }
                Err(err) => s.fail(err),
            }
        });
        match &result {
            Ok(_) => {
                self.notifications
                    .success(format!("{} updated", self.descriptor().noun));
            }
            Err(err) => self.report("update", err),
        }
        result
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.state.update(|s| s.begin());
        let result = self.api.delete(id).await;
        let identity = self.descriptor().identity;
        self.state.update(|s| {
            s.end();
            match &result {
                Ok(()) => {
                    s.remove(identity, id);
                }
                Err(err) => s.fail(err),
            }
        });
        match &result {
            Ok(()) => {
                self.notifications
                    .success(format!("{} deleted", self.descriptor().noun));
            }
            Err(err) => self.report("delete", err),
        }
        result
    }

    /// Flips the status of row `id`. Only the status field of the held
    /// record changes; a row already in `in_flight` is rejected without a
    /// request. Does not touch the collection-wide `loading` flag.
    pub async fn toggle_status(
        &self,
        id: &str,
        current: &StatusValue,
        in_flight: InFlightSet,
    ) -> Result<Record, ApiError> {
        in_flight.try_begin(id)?;
        let target = current.complement();
        let result = self.api.set_status(id, &target).await;
        in_flight.finish(id);

        let identity = self.descriptor().identity;
        self.state.update(|s| match &result {
            Ok(patch) => {
                s.apply_patch(identity, id, patch);
            }
            Err(err) => s.fail(err),
        });
        match &result {
            Ok(_) => {
                let verb = if target.is_active() { "activated" } else { "deactivated" };
                self.notifications
                    .success(format!("{} {}", self.descriptor().noun, verb));
            }
            Err(err) => self.report("status change", err),
        }
        result
    }

    /// Uploads a spreadsheet. On success returns the query the collection
    /// has to be reloaded with, `{page: 1, limit}` of the resource; the list
    /// page lands on it so its own query and the store agree.
    pub async fn bulk_import(&self, file: &File) -> Result<ListQuery, ApiError> {
        self.state.update(|s| s.begin());
        let result = self.api.bulk_import(file).await;
        let landing = self.descriptor().refetch_query();
        let mut reload = None;
        self.state
            .update(|s| reload = s.finish_import(&result, &landing));
        match result {
            Ok(summary) => {
                log::info!("{} import: {:?}", self.descriptor().name, summary);
                self.notifications.success(summary.summary_line());
                Ok(reload.unwrap_or(landing))
            }
            Err(err) => {
                self.report("bulk import", &err);
                Err(err)
            }
        }
    }

    /// Empties the collection, e.g. when a scoped list loses its scope.
    pub fn clear(&self) {
        self.state.update(|s| s.clear());
    }
}
