//! Flag overrides on top of `congreso-config`.
//!
//! Precedence: defaults < config file < `CONGRESO_*` env < command-line flags.

use congreso_config::Config;
use congreso_core::ContentService;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Load the config file and environment, then apply global flags.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = congreso_config::load_config()?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

pub fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.backend {
        cfg.backend.url.clone_from(url);
    }
    if let Some(ref token) = global.api_token {
        cfg.backend.api_token = Some(token.clone());
        cfg.backend.api_token_env = None;
    }
    if let Some(secs) = global.timeout {
        cfg.backend.timeout_secs = secs;
    }
    if global.insecure {
        cfg.backend.insecure = true;
    }
}

/// Build the content service the fetch/content commands share.
pub fn content_service(cfg: &Config) -> Result<ContentService, CliError> {
    let base_url = cfg.backend.base_url()?;
    let service = ContentService::connect(base_url, &cfg.backend.transport(), cfg.fetch.policy())?;
    Ok(service)
}

/// Output format: flag, else `defaults.output`, else table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| parse_value(&cfg.defaults.output))
        .unwrap_or(OutputFormat::Table)
}

pub fn color_mode(global: &GlobalOpts, cfg: &Config) -> ColorMode {
    global
        .color
        .or_else(|| parse_value(&cfg.defaults.color))
        .unwrap_or(ColorMode::Auto)
}

fn parse_value<T: clap::ValueEnum>(raw: &str) -> Option<T> {
    T::from_str(raw, true).ok()
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["congreso"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["config", "path"]);
        match Cli::try_parse_from(argv) {
            Ok(cli) => cli.global,
            Err(e) => panic!("parse failed: {e}"),
        }
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = Config::default();
        apply_overrides(
            &mut cfg,
            &global(&["--backend", "https://cms.example.org", "--timeout", "5", "-k"]),
        );
        assert_eq!(cfg.backend.url, "https://cms.example.org");
        assert_eq!(cfg.backend.timeout_secs, 5);
        assert!(cfg.backend.insecure);
    }

    #[test]
    fn output_falls_back_to_config_default() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        assert_eq!(output_format(&global(&[]), &cfg), OutputFormat::Yaml);
        assert_eq!(
            output_format(&global(&["-o", "json-compact"]), &cfg),
            OutputFormat::JsonCompact
        );

        cfg.defaults.output = "bogus".into();
        assert_eq!(output_format(&global(&[]), &cfg), OutputFormat::Table);
    }
}
