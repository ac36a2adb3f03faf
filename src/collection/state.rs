use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::FetchError;

/// The items of one successful fetch.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    items: Arc<Vec<T>>,
    fetched_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::at(items, Utc::now())
    }

    pub fn at(items: Vec<T>, fetched_at: DateTime<Utc>) -> Self {
        Self { items: Arc::new(items), fetched_at }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

/// Lifecycle of a remote collection.
///
/// `Loading` and `Failed` keep whatever was last fetched successfully so a
/// view never goes blank because a refresh is running or broke.
#[derive(Debug, Clone)]
pub enum CollectionState<T> {
    Idle,
    Loading { previous: Option<Snapshot<T>> },
    Ready(Snapshot<T>),
    Failed { error: FetchError, last_good: Option<Snapshot<T>> },
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        CollectionState::Idle
    }
}

impl<T: Clone> CollectionState<T> {
    pub(crate) fn begin_loading(&self) -> Self {
        CollectionState::Loading { previous: self.snapshot().cloned() }
    }

    pub(crate) fn fail(&self, error: FetchError) -> Self {
        CollectionState::Failed { error, last_good: self.snapshot().cloned() }
    }
}

impl<T> CollectionState<T> {
    /// The most recent successful fetch, if any.
    pub fn snapshot(&self) -> Option<&Snapshot<T>> {
        match self {
            CollectionState::Idle => None,
            CollectionState::Ready(snapshot) => Some(snapshot),
            CollectionState::Loading { previous } => previous.as_ref(),
            CollectionState::Failed { last_good, .. } => last_good.as_ref(),
        }
    }

    /// What a view should show right now.
    pub fn items(&self) -> &[T] {
        self.snapshot().map_or(&[][..], Snapshot::items)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            CollectionState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CollectionState::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CollectionState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CollectionState::Failed { .. })
    }

    /// Data is on screen but the latest refresh failed.
    pub fn is_stale(&self) -> bool {
        matches!(self, CollectionState::Failed { last_good: Some(_), .. })
    }

    /// Whether a fetch has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.is_ready() || self.is_failed()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollectionState::Idle => "idle",
            CollectionState::Loading { .. } => "loading",
            CollectionState::Ready(_) => "ready",
            CollectionState::Failed { .. } => "failed",
        }
    }
}

/// JSON summary served by `GET /collections/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionStatus {
    pub name: &'static str,
    pub state: &'static str,
    pub count: usize,
    pub stale: bool,
    pub error: Option<String>,
    pub fetched_at: Option<String>,
}

impl CollectionStatus {
    pub fn of<T>(name: &'static str, state: &CollectionState<T>) -> Self {
        Self {
            name,
            state: state.label(),
            count: state.items().len(),
            stale: state.is_stale(),
            error: state.error().map(ToString::to_string),
            fetched_at: state.snapshot().map(|s| s.fetched_at().to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_last_good_items() {
        let ready = CollectionState::Ready(Snapshot::new(vec![1, 2, 3]));
        let loading = ready.begin_loading();
        assert!(loading.is_loading());
        assert_eq!(loading.items(), &[1, 2, 3]);

        let failed = loading.fail(FetchError::Status(502));
        assert!(failed.is_stale());
        assert_eq!(failed.items(), &[1, 2, 3]);
        assert_eq!(failed.error(), Some(&FetchError::Status(502)));
    }

    #[test]
    fn failure_from_idle_is_empty_and_not_stale() {
        let failed = CollectionState::<u8>::Idle.begin_loading().fail(FetchError::Network("refused".into()));
        assert!(failed.is_failed());
        assert!(!failed.is_stale());
        assert!(failed.items().is_empty());
    }

    #[test]
    fn status_summarizes_state() {
        let state = CollectionState::Ready(Snapshot::new(vec!["a", "b"]));
        let status = CollectionStatus::of("rooms", &state);
        assert_eq!(status.state, "ready");
        assert_eq!(status.count, 2);
        assert!(!status.stale);
        assert!(status.error.is_none());
        assert!(status.fetched_at.is_some());
    }
}
