// Catch-all GET forwarder for `/api/strapi/{*path}`.

use axum::Json;
use axum::extract::{Path, RawQuery, State};
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use tracing::{debug, error, warn};

use congreso_api::Forwarded;

use crate::ProxyState;
use crate::error::ProxyError;

pub(crate) async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    if method != Method::GET {
        debug!(%method, %path, "rejecting non-GET request");
        return Err(ProxyError::MethodNotAllowed);
    }

    let pairs = query_pairs(query.as_deref());
    match state.client.forward(&path, &pairs).await {
        Ok(Forwarded::Json(body)) => Ok((
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, "GET"),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            ],
            Json(body),
        )
            .into_response()),
        Ok(Forwarded::Failed {
            status,
            status_text,
        }) => {
            warn!(status, %path, "backend rejected proxied request");
            Err(ProxyError::Upstream {
                status,
                status_text,
            })
        }
        Err(e) => {
            error!(%path, error = %e, "proxy error");
            Err(ProxyError::Internal(e.to_string()))
        }
    }
}

/// Decode a raw query string into ordered pairs.
///
/// Repeated keys are kept; pairs with an empty value are dropped.
pub(crate) fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    url::form_urlencoded::parse(raw.as_bytes())
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_owned(), v.to_owned())
    }

    #[test]
    fn keeps_order_and_repeats() {
        let pairs = query_pairs(Some("populate[a][populate]=*&sort=x&sort=y"));
        assert_eq!(
            pairs,
            vec![
                pair("populate[a][populate]", "*"),
                pair("sort", "x"),
                pair("sort", "y")
            ]
        );
    }

    #[test]
    fn drops_empty_values() {
        assert_eq!(
            query_pairs(Some("a=&b=1&c")),
            vec![pair("b", "1")]
        );
        assert!(query_pairs(None).is_empty());
    }

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(
            query_pairs(Some("populate%5Bx%5D=%2A&q=a+b")),
            vec![pair("populate[x]", "*"), pair("q", "a b")]
        );
    }
}
