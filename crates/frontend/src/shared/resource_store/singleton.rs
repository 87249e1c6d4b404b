use super::state::SingletonState;
use crate::shared::notifications::NotificationService;
use crate::shared::rest_resource::{RecordPayload, RestResource};
use contracts::domain::common::{ApiError, Record, ResourceDescriptor};
use leptos::prelude::*;

/// Store of a resource that holds at most one record (the engagement ring
/// banner). There is no id: saving creates the record while none exists and
/// updates it afterwards.
#[derive(Clone, Copy)]
pub struct SingletonStore {
    api: RestResource,
    state: RwSignal<SingletonState>,
    notifications: NotificationService,
}

impl SingletonStore {
    pub fn new(descriptor: ResourceDescriptor, notifications: NotificationService) -> Self {
        Self {
            api: RestResource::new(descriptor),
            state: RwSignal::new(SingletonState::default()),
            notifications,
        }
    }

    pub fn descriptor(&self) -> ResourceDescriptor {
        self.api.descriptor
    }

    pub fn record(&self) -> Option<Record> {
        self.state.with(|s| s.record.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn loaded(&self) -> bool {
        self.state.with(|s| s.loaded)
    }

    pub async fn fetch(&self) -> Result<Option<Record>, ApiError> {
        let mut ticket = None;
        self.state.update(|s| ticket = Some(s.begin_fetch()));
        let result = self.api.fetch_singleton().await;
        if let Some(ticket) = ticket {
            let landed = result.clone();
            self.state.update(|s| {
                s.finish_fetch(ticket, landed);
            });
        }
        if let Err(err) = &result {
            log::warn!("{} fetch failed: {}", self.descriptor().name, err);
            self.notifications.error(err.message.clone());
        }
        result
    }

    pub async fn save(&self, payload: RecordPayload) -> Result<Record, ApiError> {
        let exists = self.state.with_untracked(|s| s.exists());
        self.state.update(|s| s.begin());
        let result = self.api.save_singleton(payload, exists).await;
        self.state.update(|s| {
            s.end();
            match &result {
                Ok(record) => s.set(Some(record.clone())),
                Err(err) => s.fail(err),
            }
        });
        match &result {
            Ok(_) => {
                let verb = if exists { "updated" } else { "created" };
                self.notifications
                    .success(format!("{} {}", self.descriptor().noun, verb));
            }
            Err(err) => {
                log::warn!("{} save failed: {}", self.descriptor().name, err);
                self.notifications.error(err.message.clone());
            }
        }
        result
    }

    pub async fn delete(&self) -> Result<(), ApiError> {
        self.state.update(|s| s.begin());
        let result = self.api.delete_singleton().await;
        self.state.update(|s| {
            s.end();
            match &result {
                Ok(()) => s.set(None),
                Err(err) => s.fail(err),
            }
        });
        match &result {
            Ok(()) => {
                self.notifications
                    .success(format!("{} deleted", self.descriptor().noun));
            }
            Err(err) => {
                log::warn!("{} delete failed: {}", self.descriptor().name, err);
                self.notifications.error(err.message.clone());
            }
        }
        result
    }
}
