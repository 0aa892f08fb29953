// ── Fetcher seam ──
//
// The cache never talks HTTP itself. A `Fetcher` turns a key into either
// a payload, a not-found marker, or a classified error.

use std::future::Future;

use congreso_api::CmsClient;
use serde_json::Value;
use tracing::warn;

use super::resource::ClassifiedError;

/// Successful outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    Found(T),
    /// The backend answered 404: the content is not configured.
    NotFound,
}

/// Source of payloads for the cache store.
pub trait Fetcher: Send + Sync + 'static {
    type Payload: Send + Sync + 'static;

    fn fetch(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<FetchOutcome<Self::Payload>, ClassifiedError>> + Send;
}

impl Fetcher for CmsClient {
    type Payload = Value;

    async fn fetch(&self, key: &str) -> Result<FetchOutcome<Value>, ClassifiedError> {
        match self.get_json(key).await {
            Ok(Some(value)) => Ok(FetchOutcome::Found(value)),
            Ok(None) => Ok(FetchOutcome::NotFound),
            Err(e) => {
                warn!(key, error = %e, "fetch failed");
                Err(ClassifiedError::from(e))
            }
        }
    }
}
