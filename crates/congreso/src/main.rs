mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ConfigArgs, ConfigCommand};
use crate::commands::Ctx;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Neither needs a readable config file
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "congreso", &mut std::io::stdout());
            Ok(())
        }
        Command::Config(ConfigArgs {
            command: ConfigCommand::Path,
        }) => {
            println!("{}", congreso_config::config_path().display());
            Ok(())
        }

        cmd => {
            let cfg = config::effective_config(&cli.global)?;
            let ctx = Ctx::new(&cli.global, cfg);
            tracing::debug!(command = ?cmd, backend = %ctx.config.backend.url, "dispatching command");
            commands::dispatch(cmd, &ctx).await
        }
    }
}
