//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::Ctx;

const REDACTED: &str = "********";

pub fn handle(args: ConfigArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let mut cfg = ctx.config.clone();
            if cfg.backend.api_token.is_some() {
                cfg.backend.api_token = Some(REDACTED.into());
            }
            let rendered = match ctx.format {
                OutputFormat::Table | OutputFormat::Plain => {
                    toml::to_string_pretty(&cfg).map_err(|e| CliError::Render(e.to_string()))?
                }
                format => output::render_single(format, &cfg, |_| String::new(), |_| String::new())?,
            };
            ctx.print(&rendered);
            Ok(())
        }

        ConfigCommand::Path => {
            ctx.print(&congreso_config::config_path().display().to_string());
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = congreso_config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let path = congreso_config::save_config(&ctx.config)?;
            ctx.status(true, &format!("wrote {}", path.display()));
            Ok(())
        }
    }
}
