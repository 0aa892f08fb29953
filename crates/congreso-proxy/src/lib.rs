//! Same-origin reverse proxy for the CMS.
//!
//! Browsers fetch `/api/strapi/{path}` from the site's own origin; the
//! proxy forwards the GET to `{backend}/api/{path}` and relays the JSON
//! with permissive CORS headers. Failures come back as small JSON
//! envelopes (`{"error": ...}`) with a mirrored or 5xx status.

mod error;
mod handler;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::any;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use congreso_api::CmsClient;

pub use error::{ProxyError, ServeError};

/// Route the proxy is mounted on.
pub const ROUTE: &str = "/api/strapi/{*path}";

/// Shared state of the proxy handlers.
#[derive(Debug, Clone)]
pub struct ProxyState {
    pub client: CmsClient,
}

impl ProxyState {
    pub fn new(client: CmsClient) -> Self {
        Self { client }
    }
}

/// Build the proxy router with request tracing.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route(ROUTE, any(handler::forward))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr).await.map_err(|source| ServeError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Serve `router` on `listener` until `cancel` fires, then drain
/// in-flight requests.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<(), ServeError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "proxy listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;
    info!("proxy stopped");
    Ok(())
}
