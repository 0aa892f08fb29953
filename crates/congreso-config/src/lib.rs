//! Shared configuration for the congreso CLI, TUI and proxy.
//!
//! A single TOML file layered under `CONGRESO_*` environment variables,
//! translated into `congreso_api::TransportConfig`,
//! `congreso_core::FetchPolicy` and carousel breakpoints. Binaries apply
//! their own flag overrides on top.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use congreso_api::{TlsMode, TransportConfig};
use congreso_core::{Breakpoints, FetchPolicy};

/// Prefix of environment overrides. Nested keys use `__`, e.g.
/// `CONGRESO_FETCH__RETRY_COUNT=0`.
pub const ENV_PREFIX: &str = "CONGRESO_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration shared by every binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,

    #[serde(default)]
    pub carousel: CarouselConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Where the CMS lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// CMS origin, e.g. `http://127.0.0.1:1337`.
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment variable holding the CMS API token.
    pub api_token_env: Option<String>,

    /// API token in plaintext (prefer `api_token_env`).
    pub api_token: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout(),
            api_token_env: None,
            api_token: None,
            ca_cert: None,
            insecure: false,
        }
    }
}

fn default_backend_url() -> String {
    "http://127.0.0.1:1337".into()
}
fn default_timeout() -> u64 {
    30
}

/// Cache behaviour; mirrors `FetchPolicy` in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub dedupe_window_ms: u64,
    pub retry_count: u32,
    pub retry_delay_ms: u64,
    pub revalidate_on_focus: bool,
    pub revalidate_on_reconnect: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(FetchPolicy::default())
    }
}

impl From<FetchPolicy> for FetchConfig {
    fn from(policy: FetchPolicy) -> Self {
        Self {
            dedupe_window_ms: millis(policy.dedupe_window),
            retry_count: policy.retry_count,
            retry_delay_ms: millis(policy.retry_delay),
            revalidate_on_focus: policy.revalidate_on_focus,
            revalidate_on_reconnect: policy.revalidate_on_reconnect,
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay_interval_ms: u64,
    pub tablet_min_width: u32,
    pub desktop_min_width: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let bp = Breakpoints::default();
        Self {
            autoplay_interval_ms: 5000,
            tablet_min_width: bp.tablet_min_width,
            desktop_min_width: bp.desktop_min_width,
        }
    }
}

// ── Translation to runtime types ────────────────────────────────────

impl BackendConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.url.parse().map_err(|_| ConfigError::Validation {
            field: "backend.url".into(),
            reason: format!("invalid URL: {}", self.url),
        })
    }

    /// API token from `api_token_env`, falling back to the plaintext value.
    pub fn resolve_api_token(&self) -> Option<SecretString> {
        if let Some(ref env_name) = self.api_token_env {
            if let Ok(val) = std::env::var(env_name) {
                return Some(SecretString::from(val));
            }
        }
        self.api_token.clone().map(SecretString::from)
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.timeout_secs),
            api_token: self.resolve_api_token(),
        }
    }
}

impl FetchConfig {
    pub fn policy(&self) -> FetchPolicy {
        FetchPolicy {
            dedupe_window: Duration::from_millis(self.dedupe_window_ms),
            retry_count: self.retry_count,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            revalidate_on_focus: self.revalidate_on_focus,
            revalidate_on_reconnect: self.revalidate_on_reconnect,
        }
    }
}

impl ProxyConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|_| ConfigError::Validation {
            field: "proxy.bind".into(),
            reason: format!("expected HOST:PORT, got '{}'", self.bind),
        })
    }
}

impl CarouselConfig {
    pub fn breakpoints(&self) -> Result<Breakpoints, ConfigError> {
        if self.tablet_min_width >= self.desktop_min_width {
            return Err(ConfigError::Validation {
                field: "carousel.tablet_min_width".into(),
                reason: format!(
                    "must be below desktop_min_width ({} >= {})",
                    self.tablet_min_width, self.desktop_min_width
                ),
            });
        }
        Ok(Breakpoints {
            tablet_min_width: self.tablet_min_width,
            desktop_min_width: self.desktop_min_width,
        })
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms.max(1))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "congreso", "congreso").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("congreso");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if present), then `CONGRESO_*` variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
