//! Command dispatch: bridges CLI args -> core services -> output formatting.

pub mod carousel;
pub mod config_cmd;
pub mod content;
pub mod countdown;
pub mod fetch;
pub mod serve;

use congreso_config::Config;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Effective settings shared by every handler.
pub struct Ctx<'a> {
    pub global: &'a GlobalOpts,
    pub config: Config,
    pub format: OutputFormat,
    pub color: bool,
}

impl<'a> Ctx<'a> {
    pub fn new(global: &'a GlobalOpts, config: Config) -> Self {
        let format = config::output_format(global, &config);
        let color = output::should_color(config::color_mode(global, &config));
        Self {
            global,
            config,
            format,
            color,
        }
    }

    pub fn print(&self, rendered: &str) {
        output::print_output(rendered, self.global.quiet);
    }

    /// Status message on stderr, suppressed by `--quiet`.
    pub fn status(&self, ok: bool, message: &str) {
        if !self.global.quiet {
            eprintln!("{}", output::status_line(self.color, ok, message));
        }
    }
}

/// Dispatch a command that needs the effective configuration.
pub async fn dispatch(cmd: Command, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Fetch(args) => fetch::handle(args, ctx).await,
        Command::Content(args) => content::handle(args, ctx).await,
        Command::Countdown(args) => countdown::handle(args, ctx).await,
        Command::Carousel(args) => carousel::handle(args, ctx),
        Command::Serve(args) => serve::handle(args, ctx).await,
        Command::Config(args) => config_cmd::handle(args, ctx),
        // Completions are generated before any config is loaded
        Command::Completions(_) => Ok(()),
    }
}
