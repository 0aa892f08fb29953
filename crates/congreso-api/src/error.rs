use thiserror::Error;

/// Top-level error type for the `congreso-api` crate.
///
/// Covers every failure mode of a CMS round-trip: transport, URL building,
/// non-success HTTP statuses, and payload decoding. `congreso-core` maps
/// these into classified fetch errors and user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The configured API token cannot be sent as a header value.
    #[error("Invalid API token: {0}")]
    InvalidToken(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// The CMS answered with a non-success status.
    #[error("HTTP error! status: {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        /// Leading part of the response body, for debugging.
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status of the failed response, if the CMS answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this is an error worth retrying.
    ///
    /// Everything that is not a 404, a malformed URL or a TLS setup problem
    /// may go away on its own.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Deserialization { .. } => true,
            Self::Http { status, .. } => *status != 404,
            Self::InvalidUrl(_) | Self::Tls(_) | Self::InvalidToken(_) => false,
        }
    }

    /// Reason phrase to report alongside the status.
    pub fn status_text(&self) -> String {
        match self {
            Self::Http { status_text, .. } => status_text.clone(),
            Self::Transport(e) if e.is_timeout() => "Request Timeout".into(),
            Self::Transport(e) => e
                .status()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Network Error")
                .into(),
            Self::Deserialization { .. } => "Invalid Payload".into(),
            Self::InvalidUrl(_) => "Invalid URL".into(),
            Self::Tls(_) => "TLS Error".into(),
            Self::InvalidToken(_) => "Invalid Token".into(),
        }
    }
}
