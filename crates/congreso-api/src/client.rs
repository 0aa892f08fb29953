// CMS HTTP client
//
// Wraps `reqwest::Client` with backend-relative URL construction and
// status classification. Content keys are path + query strings such as
// `/api/home-page?populate[HomeSection][populate]=*`; the client owns the
// backend origin they resolve against.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

const BODY_PREVIEW_LEN: usize = 200;

/// Result of forwarding a request verbatim to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Forwarded {
    /// Success status with a JSON body.
    Json(Value),
    /// Any non-success status, mirrored by the caller.
    Failed { status: u16, status_text: String },
}

/// Raw HTTP client for the CMS content API.
///
/// All reads are GETs. A 404 is reported as `Ok(None)` because missing
/// content is an expected state of a partially configured site, not a
/// failure.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CmsClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend origin (e.g. `http://127.0.0.1:1337`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve a content key against the backend origin.
    ///
    /// Absolute `http(s)://` keys are used as-is; anything else is treated
    /// as a path (with optional query) below the origin.
    pub fn resource_url(&self, key: &str) -> Result<Url, Error> {
        if key.starts_with("http://") || key.starts_with("https://") {
            return Ok(Url::parse(key)?);
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = key.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Make a media path returned by the CMS (`/uploads/...`) absolute.
    ///
    /// Already absolute URLs and empty paths are returned unchanged.
    pub fn media_url(&self, path: &str) -> String {
        media_url(&self.base_url, path)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a content key and parse the JSON body.
    ///
    /// Returns `Ok(None)` on 404 and `Error::Http` for any other
    /// non-success status.
    pub async fn get_json(&self, key: &str) -> Result<Option<Value>, Error> {
        let url = self.resource_url(key)?;
        debug!("GET {}", url);

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            trace!(%url, "content not configured (404)");
            return Ok(None);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %url, "API error");
            return Err(Error::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                body: preview(&body).to_owned(),
            });
        }

        let body = resp.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })?;
        Ok(Some(value))
    }

    /// GET a content key and deserialize it into `T`.
    pub async fn get_json_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        let Some(value) = self.get_json(key).await? else {
            return Ok(None);
        };
        let body = value.to_string();
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })
    }

    /// Forward a GET to `{origin}/api/{path}` with the given query pairs.
    ///
    /// Pairs are appended in order; repeated keys are kept. The body of a
    /// successful response must be JSON.
    pub async fn forward(&self, path: &str, query: &[(String, String)]) -> Result<Forwarded, Error> {
        let mut url = self.resource_url(&format!("/api/{}", path.trim_start_matches('/')))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        debug!("forward GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Ok(Forwarded::Failed {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        let body = resp.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: preview(&body).to_owned(),
        })?;
        Ok(Forwarded::Json(value))
    }
}

/// Make a CMS media path absolute against `base`.
///
/// Already absolute URLs and empty paths are returned unchanged.
pub fn media_url(base: &Url, path: &str) -> String {
    if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    let base = base.as_str().trim_end_matches('/');
    format!("{base}/{}", path.trim_start_matches('/'))
}

/// First bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    if body.len() <= BODY_PREVIEW_LEN {
        return body;
    }
    let mut end = BODY_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CmsClient {
        CmsClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn resource_url_joins_relative_keys() {
        let c = client("http://127.0.0.1:1337/");
        let url = c.resource_url("/api/seo-setting?populate=*").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1337/api/seo-setting?populate=*");

        let url = c.resource_url("api/talleres").unwrap();
        assert_eq!(url.path(), "/api/talleres");
    }

    #[test]
    fn resource_url_keeps_absolute_keys() {
        let c = client("http://127.0.0.1:1337");
        let url = c.resource_url("https://cms.example.org/api/x").unwrap();
        assert_eq!(url.host_str(), Some("cms.example.org"));
    }

    #[test]
    fn media_url_prefixes_backend_origin() {
        let c = client("http://cms.local:1337");
        assert_eq!(
            c.media_url("/uploads/hero.jpg"),
            "http://cms.local:1337/uploads/hero.jpg"
        );
        assert_eq!(c.media_url("https://cdn/x.png"), "https://cdn/x.png");
        assert_eq!(c.media_url(""), "");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "ñ".repeat(150);
        let cut = preview(&body);
        assert!(cut.len() <= BODY_PREVIEW_LEN);
        assert!(body.starts_with(cut));
    }
}
