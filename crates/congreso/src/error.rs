//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `ConfigError` and proxy failures into user-facing
//! errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use congreso_config::ConfigError;
use congreso_core::{ClassifiedError, CoreError};
use congreso_proxy::ServeError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the CMS at {url}")]
    #[diagnostic(
        code(congreso::connection_failed),
        help(
            "Check that Strapi is running and reachable.\n\
             Reason: {reason}\n\
             Set the URL with --backend or CONGRESO_BACKEND_URL."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("CMS request timed out")]
    #[diagnostic(
        code(congreso::timeout),
        help("Increase the timeout with --timeout or check CMS responsiveness.")
    )]
    Timeout,

    // ── Content ──────────────────────────────────────────────────────
    #[error("No content at '{key}'")]
    #[diagnostic(
        code(congreso::not_found),
        help("The CMS returned 404. Check that the collection exists and is published.")
    )]
    NotFound { key: String },

    #[error("CMS error {status} {status_text}: {message}")]
    #[diagnostic(code(congreso::backend))]
    Backend {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("Unexpected content: {message}")]
    #[diagnostic(code(congreso::invalid_content))]
    InvalidContent { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(congreso::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(congreso::config),
        help("Inspect the merged settings with: congreso config show")
    )]
    Config { message: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(congreso::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Proxy ────────────────────────────────────────────────────────
    #[error("Proxy server failed: {message}")]
    #[diagnostic(code(congreso::serve))]
    Serve { message: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(congreso::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::NotConfigured { key } => Self::NotFound { key },
            CoreError::Backend {
                status,
                status_text,
                message,
            } => Self::Backend {
                status,
                status_text,
                message,
            },
            CoreError::InvalidContent { message } => Self::InvalidContent { message },
            CoreError::Carousel(e) => Self::Validation {
                field: "page".into(),
                reason: e.to_string(),
            },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

impl From<ClassifiedError> for CliError {
    fn from(err: ClassifiedError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<ServeError> for CliError {
    fn from(err: ServeError) -> Self {
        Self::Serve {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(
            CliError::NotFound { key: "/api/x".into() }.exit_code(),
            exit_code::NOT_FOUND
        );
        assert_eq!(CliError::Timeout.exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::Validation {
                field: "items".into(),
                reason: "must be positive".into(),
            }
            .exit_code(),
            exit_code::USAGE
        );
        assert_eq!(
            CliError::Render("boom".into()).exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn classified_errors_keep_their_kind() {
        let err: CliError = ClassifiedError::new(503, "Service Unavailable").into();
        assert!(matches!(err, CliError::Backend { status: 503, .. }));

        let err: CliError = ClassifiedError::network("connection refused").into();
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }
}
