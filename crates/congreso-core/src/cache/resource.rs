// ── Cached resources and subscriptions ──

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

/// A failed fetch, classified for display and retry decisions.
///
/// `status == 0` means no HTTP response was received at all.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ClassifiedError {
    pub status: u16,
    pub status_text: String,
    pub message: String,
}

impl ClassifiedError {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        let status_text = status_text.into();
        Self {
            message: format!("HTTP error! status: {status}"),
            status,
            status_text,
        }
    }

    /// A failure that produced no HTTP response.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            status_text: "Network Error".into(),
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        self.status == 0
    }
}

impl From<congreso_api::Error> for ClassifiedError {
    fn from(err: congreso_api::Error) -> Self {
        match err.status() {
            Some(status) => Self {
                status,
                status_text: err.status_text(),
                message: format!("HTTP error! status: {status}"),
            },
            None => Self {
                status: 0,
                status_text: err.status_text(),
                message: err.to_string(),
            },
        }
    }
}

/// State of one keyed request, shared by every subscriber of the key.
pub struct CachedResource<T> {
    pub key: String,
    /// Last successful payload. `None` before the first success and after a
    /// not-found response.
    pub data: Option<Arc<T>>,
    /// Set when the latest attempt chain failed after all retries.
    pub error: Option<ClassifiedError>,
    /// A request is in flight and the key has never resolved.
    pub is_loading: bool,
    /// Any request for the key is in flight.
    pub is_validating: bool,
    /// At least one request for the key has completed, whatever its outcome.
    pub is_resolved: bool,
}

impl<T> CachedResource<T> {
    pub(crate) fn pending(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            data: None,
            error: None,
            is_loading: false,
            is_validating: false,
            is_resolved: false,
        }
    }

    /// Resolved with neither data nor error: the content is not configured.
    /// A key that was never requested, or whose first request is still in
    /// flight, is not "not found" yet.
    pub fn is_not_found(&self) -> bool {
        self.is_resolved && !self.is_validating && self.data.is_none() && self.error.is_none()
    }
}

impl<T> Clone for CachedResource<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.is_loading,
            is_validating: self.is_validating,
            is_resolved: self.is_resolved,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CachedResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedResource")
            .field("key", &self.key)
            .field("data", &self.data)
            .field("error", &self.error)
            .field("is_loading", &self.is_loading)
            .field("is_validating", &self.is_validating)
            .field("is_resolved", &self.is_resolved)
            .finish()
    }
}

/// A live interest in one key.
///
/// Dropping the subscription unsubscribes; an in-flight request still
/// completes and updates the shared resource.
pub struct Subscription<T> {
    receiver: watch::Receiver<CachedResource<T>>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(receiver: watch::Receiver<CachedResource<T>>) -> Self {
        Self { receiver }
    }

    /// Snapshot of the resource right now.
    pub fn current(&self) -> CachedResource<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next update. Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<CachedResource<T>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Wait until no request for the key is in flight.
    pub async fn resolved(&mut self) -> CachedResource<T> {
        let resolved = self
            .receiver
            .wait_for(|r| !r.is_validating)
            .await
            .map(|r| r.clone());
        match resolved {
            Ok(r) => r,
            Err(_) => self.receiver.borrow().clone(),
        }
    }
}
