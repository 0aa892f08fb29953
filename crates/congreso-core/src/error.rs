// ── Core error types ──
//
// User-facing errors from congreso-core. Consumers see "backend
// unreachable" or "content not configured" rather than reqwest internals.
// `From<congreso_api::Error>` and `From<ClassifiedError>` translate the
// lower layers.

use thiserror::Error;

use crate::cache::ClassifiedError;
use crate::carousel::CarouselError;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the CMS at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("CMS request timed out")]
    Timeout,

    // ── Content errors ───────────────────────────────────────────────
    #[error("Content not configured: {key}")]
    NotConfigured { key: String },

    #[error("CMS returned {status} {status_text}: {message}")]
    Backend {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("Unexpected content shape: {message}")]
    InvalidContent { message: String },

    // ── Widget errors ────────────────────────────────────────────────
    #[error(transparent)]
    Carousel(#[from] CarouselError),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether retrying later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout | Self::Backend { .. }
        )
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<congreso_api::Error> for CoreError {
    fn from(err: congreso_api::Error) -> Self {
        match err {
            congreso_api::Error::Transport(ref e) if e.is_timeout() => CoreError::Timeout,
            congreso_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            congreso_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            congreso_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            congreso_api::Error::InvalidToken(msg) => CoreError::Config {
                message: format!("Invalid API token: {msg}"),
            },
            congreso_api::Error::Http {
                status,
                status_text,
                body,
            } => CoreError::Backend {
                status,
                status_text,
                message: body,
            },
            congreso_api::Error::Deserialization { message, .. } => {
                CoreError::InvalidContent { message }
            }
        }
    }
}

impl From<ClassifiedError> for CoreError {
    fn from(err: ClassifiedError) -> Self {
        if err.is_network() {
            CoreError::ConnectionFailed {
                url: String::new(),
                reason: err.message,
            }
        } else {
            CoreError::Backend {
                status: err.status,
                status_text: err.status_text,
                message: err.message,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_become_backend_errors() {
        let err = CoreError::from(congreso_api::Error::Http {
            status: 502,
            status_text: "Bad Gateway".into(),
            body: "upstream".into(),
        });
        assert!(matches!(err, CoreError::Backend { status: 502, .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn network_classified_errors_are_connection_failures() {
        let err = CoreError::from(ClassifiedError::network("connection refused"));
        assert!(matches!(err, CoreError::ConnectionFailed { .. }));
    }

    #[test]
    fn invalid_url_is_config() {
        let parse = url::Url::parse("not a url").unwrap_err();
        let err = CoreError::from(congreso_api::Error::InvalidUrl(parse));
        assert!(matches!(err, CoreError::Config { .. }));
        assert!(!err.is_transient());
    }
}
