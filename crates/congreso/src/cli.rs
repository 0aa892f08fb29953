//! Clap derive structures for the `congreso` CLI.
//!
//! Defines the command tree, global flags, and shared value types. This file
//! is also compiled by `build.rs` for man pages, so it only depends on clap.

use std::fmt;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// congreso -- content tools for the congress website
#[derive(Debug, Parser)]
#[command(
    name = "congreso",
    version,
    about = "Fetch congress content from the CMS, preview carousels, and run the content proxy",
    long_about = "Command-line companion for the pediatrics congress website.\n\n\
        Reads hero, speakers, workshops and site settings from the Strapi CMS\n\
        through the same cache the site uses, simulates the responsive\n\
        carousel, and serves the same-origin /api/strapi proxy.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// CMS base URL (overrides config)
    #[arg(long, short = 'b', env = "CONGRESO_BACKEND_URL", global = true)]
    pub backend: Option<String>,

    /// CMS API token
    #[arg(long, env = "CONGRESO_API_TOKEN", global = true, hide_env = true)]
    pub api_token: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "CONGRESO_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates from the CMS
    #[arg(long, short = 'k', env = "CONGRESO_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "CONGRESO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one CMS key through the cache and print the raw JSON
    #[command(alias = "get")]
    Fetch(FetchArgs),

    /// Show normalized site content
    #[command(alias = "c")]
    Content(ContentArgs),

    /// Time left until the congress starts
    Countdown(CountdownArgs),

    /// Simulate the responsive carousel
    Carousel(CarouselArgs),

    /// Run the same-origin CMS proxy
    Serve(ServeArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Fetch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Backend-relative path with query, e.g. "/api/talleres?populate=*"
    pub key: String,

    /// Retry budget for transient failures (overrides config)
    #[arg(long, short = 'r')]
    pub retries: Option<u32>,
}

// ── Content ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub command: ContentCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// Home page hero block
    Hero,
    /// Global SEO settings
    Seo,
    /// Site configuration: colors, navigation, footer
    Config,
    /// Congress logo URL
    Logo,
    /// Speakers heading and list
    #[command(alias = "disertantes")]
    Speakers,
    /// Workshop list
    #[command(alias = "talleres")]
    Workshops,
}

// ── Countdown ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CountdownArgs {
    /// Event date (RFC 3339 or YYYY-MM-DD); read from the hero block if omitted
    #[arg(long, short = 'd')]
    pub date: Option<String>,
}

// ── Carousel ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CarouselArgs {
    #[command(subcommand)]
    pub command: CarouselCommand,
}

#[derive(Debug, Subcommand)]
pub enum CarouselCommand {
    /// Step a carousel through navigation events and print each state
    #[command(alias = "sim")]
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Number of items in the carousel
    #[arg(long, short = 'n')]
    pub items: usize,

    /// Fixed items per view
    #[arg(long, short = 'p', conflicts_with_all = ["mobile", "tablet", "desktop"])]
    pub per_view: Option<usize>,

    /// Items per view below the tablet breakpoint
    #[arg(long, requires_all = ["tablet", "desktop"])]
    pub mobile: Option<usize>,

    /// Items per view from the tablet breakpoint
    #[arg(long, requires_all = ["mobile", "desktop"])]
    pub tablet: Option<usize>,

    /// Items per view from the desktop breakpoint
    #[arg(long, requires_all = ["mobile", "tablet"])]
    pub desktop: Option<usize>,

    /// Viewport width in pixels
    #[arg(long, short = 'w', default_value = "1280")]
    pub width: u32,

    /// Loop by single items instead of paging
    #[arg(long = "loop")]
    pub infinite_loop: bool,

    /// Comma-separated steps: next, prev, page:N, resize:PX, tick, enter, leave
    #[arg(long, short = 's', value_delimiter = ',', default_value = "next")]
    pub steps: Vec<Step>,
}

/// One simulated host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
    Page(usize),
    Resize(u32),
    Tick,
    Enter,
    Leave,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let (name, arg) = s.split_once(':').map_or((s.as_str(), None), |(n, a)| (n, Some(a)));
        match (name, arg) {
            ("next", None) => Ok(Self::Next),
            ("prev", None) => Ok(Self::Prev),
            ("tick", None) => Ok(Self::Tick),
            ("enter", None) => Ok(Self::Enter),
            ("leave", None) => Ok(Self::Leave),
            ("page", Some(n)) => n
                .parse()
                .map(Self::Page)
                .map_err(|_| format!("invalid page number '{n}'")),
            ("resize", Some(px)) => px
                .parse()
                .map(Self::Resize)
                .map_err(|_| format!("invalid width '{px}'")),
            _ => Err(format!(
                "unknown step '{s}' (expected next, prev, page:N, resize:PX, tick, enter, leave)"
            )),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("next"),
            Self::Prev => f.write_str("prev"),
            Self::Page(n) => write!(f, "page:{n}"),
            Self::Resize(px) => write!(f, "resize:{px}"),
            Self::Tick => f.write_str("tick"),
            Self::Enter => f.write_str("enter"),
            Self::Leave => f.write_str("leave"),
        }
    }
}

// ── Serve ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address, HOST:PORT (overrides config)
    #[arg(long, env = "CONGRESO_BIND")]
    pub bind: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file, env and flags merged)
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with defaults and the current flag overrides
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
