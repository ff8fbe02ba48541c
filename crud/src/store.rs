//! Record persistence seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The coordinator decides *what* should change; a `RecordStore` performs it.
//! The browser build talks to the HR REST API through `client::net::api`.
//! Local-only resources never reach a store: the coordinator settles their
//! mutations itself. `MemoryStore` stands in for the backend in tests.
//!
//! Futures are `?Send` because the browser store holds `gloo-net` requests,
//! which are tied to the single wasm thread.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::coordinator::{Outcome, next_local_id};
use crate::record::{Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("not signed in or session expired")]
    Unauthorized,
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("request timed out")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
}

impl StoreError {
    /// How a failed call settles the optimistic change it was carrying. Only
    /// failures where the server may still have applied the change are
    /// `Unknown`.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Timeout | Self::Transport(_) => Outcome::Unknown,
            other => Outcome::Rejected(other.to_string()),
        }
    }

    #[must_use]
    pub fn not_found(id: &RecordId) -> Self {
        Self::Status { status: 404, message: format!("no record with id {id}") }
    }
}

/// Network call a page must issue for one mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    Create { payload: Map<String, Value> },
    Update { id: RecordId, payload: Map<String, Value> },
    Delete { id: RecordId },
}

impl StoreRequest {
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

#[async_trait(?Send)]
pub trait RecordStore {
    async fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Create a record. `Ok(None)` means the backend accepted the payload
    /// without echoing the stored row.
    async fn create(&self, payload: &Map<String, Value>) -> Result<Option<Record>, StoreError>;

    async fn update(&self, id: &RecordId, payload: &Map<String, Value>) -> Result<Option<Record>, StoreError>;

    async fn delete(&self, id: &RecordId) -> Result<(), StoreError>;
}

/// Run one mutation against any store.
///
/// # Errors
///
/// Whatever the store returns for the underlying call, except a 404 on a
/// delete, which counts as success.
pub async fn execute<S>(store: &S, request: &StoreRequest) -> Result<Option<Record>, StoreError>
where
    S: RecordStore + ?Sized,
{
    let result = match request {
        StoreRequest::Create { payload } => store.create(payload).await,
        StoreRequest::Update { id, payload } => store.update(id, payload).await,
        StoreRequest::Delete { id } => match store.delete(id).await {
            Ok(()) => Ok(None),
            // Already gone on the server: the delete achieved its goal.
            Err(StoreError::Status { status: 404, .. }) => {
                tracing::debug!(%id, "delete of missing record treated as done");
                Ok(None)
            }
            Err(e) => Err(e),
        },
    };
    if let Err(e) = &result {
        tracing::warn!(verb = request.verb(), error = %e, "store request failed");
    }
    result
}

// =============================================================
// In-memory store
// =============================================================

#[derive(Debug, Default)]
struct MemoryInner {
    records: Vec<Record>,
    fail_next: Option<StoreError>,
}

/// Store backed by a plain vector, issuing integer ids like the backend does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { inner: Mutex::new(MemoryInner { records, fail_next: None }) }
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: StoreError) {
        self.lock().fail_next = Some(error);
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_failure(inner: &mut MemoryInner) -> Result<(), StoreError> {
        match inner.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl RecordStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        Ok(inner.records.clone())
    }

    async fn create(&self, payload: &Map<String, Value>) -> Result<Option<Record>, StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        let id = next_local_id(&inner.records);
        let record = Record::with_fields(id, payload);
        inner.records.push(record.clone());
        Ok(Some(record))
    }

    async fn update(&self, id: &RecordId, payload: &Map<String, Value>) -> Result<Option<Record>, StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        let row = inner.records.iter_mut().find(|r| r.id() == *id).ok_or_else(|| StoreError::not_found(id))?;
        row.merge(payload);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::take_failure(&mut inner)?;
        let before = inner.records.len();
        inner.records.retain(|r| r.id() != *id);
        if inner.records.len() == before {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }
}
