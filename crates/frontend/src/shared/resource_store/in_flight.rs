use contracts::domain::common::ApiError;
use leptos::prelude::*;
use std::collections::HashSet;

/// Ids with a row operation in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InFlightIds(HashSet<String>);

impl InFlightIds {
    /// Claims `id`. Returns false if it is already claimed.
    pub fn try_begin(&mut self, id: &str) -> bool {
        self.0.insert(id.to_string())
    }

    pub fn finish(&mut self, id: &str) {
        self.0.remove(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-page set of rows whose status toggle is in flight.
///
/// Owned by the list page, not by the store: the store only checks it so a
/// second click on the same row never sends a second request.
#[derive(Clone, Copy)]
pub struct InFlightSet {
    ids: RwSignal<InFlightIds>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self {
            ids: RwSignal::new(InFlightIds::default()),
        }
    }

    pub fn try_begin(&self, id: &str) -> Result<(), ApiError> {
        let mut claimed = false;
        self.ids.update(|ids| claimed = ids.try_begin(id));
        if claimed {
            Ok(())
        } else {
            Err(ApiError::busy(id))
        }
    }

    pub fn finish(&self, id: &str) {
        self.ids.update(|ids| ids.finish(id));
    }

    /// Reactive: re-renders the row when its state changes.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.with(|ids| ids.contains(id))
    }
}

impl Default for InFlightSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected() {
        let mut ids = InFlightIds::default();
        assert!(ids.try_begin("d1"));
        assert!(!ids.try_begin("d1"));
        assert!(ids.try_begin("d2"));
        assert!(ids.contains("d1"));

        ids.finish("d1");
        assert!(!ids.contains("d1"));
        assert!(ids.try_begin("d1"));
    }

    #[test]
    fn finishing_unknown_id_is_noop() {
        let mut ids = InFlightIds::default();
        ids.finish("x");
        assert!(ids.is_empty());
    }
}
