//! Async client for the congress site's headless CMS.
//!
//! - **[`CmsClient`]** : GETs content keys against the backend origin,
//!   treating 404 as "not configured" (`Ok(None)`) and classifying every
//!   other failure into [`Error`].
//! - **[`TransportConfig`]** : shared reqwest builder settings (timeout,
//!   TLS, bearer token).
//! - **[`endpoints`]** : the content keys the site's sections request.
//! - **[`proxy_path`]** : rewriting of backend URLs onto the same-origin
//!   proxy route.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod proxy_path;
pub mod transport;

pub use client::{CmsClient, Forwarded, media_url};
pub use error::Error;
pub use proxy_path::to_proxy_path;
pub use transport::{TlsMode, TransportConfig};
