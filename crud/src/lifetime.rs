//! Mount-scoped cancellation for async work started by a component.
//!
//! A page opens a `MountScope` when it mounts and closes it from its cleanup
//! hook. Every spawned request carries a `ScopeGuard`; once the scope is
//! closed the guard turns late responses into `StoreError::Cancelled` so they
//! never write into state that belongs to an unmounted view.

#[cfg(test)]
#[path = "lifetime_test.rs"]
mod lifetime_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::store::StoreError;

#[derive(Debug, Clone)]
pub struct MountScope {
    alive: Arc<AtomicBool>,
}

impl Default for MountScope {
    fn default() -> Self {
        Self::new()
    }
}

impl MountScope {
    #[must_use]
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Close the scope. Idempotent.
    pub fn close(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    /// Token for one piece of async work.
    #[must_use]
    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard { alive: Arc::clone(&self.alive) }
    }
}

#[derive(Debug, Clone)]
pub struct ScopeGuard {
    alive: Arc<AtomicBool>,
}

impl ScopeGuard {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Pass `result` through while the scope is open.
    ///
    /// # Errors
    ///
    /// `StoreError::Cancelled` once the owning scope has closed, otherwise the
    /// error carried by `result`.
    pub fn check<T>(&self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if !self.is_alive() {
            tracing::debug!("dropping response for closed scope");
            return Err(StoreError::Cancelled);
        }
        result
    }

    /// Await `fut` and check the scope afterwards.
    ///
    /// # Errors
    ///
    /// See [`ScopeGuard::check`].
    pub async fn run<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        if !self.is_alive() {
            return Err(StoreError::Cancelled);
        }
        let result = fut.await;
        self.check(result)
    }
}
