//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Kudos CLI - Show the latest reviews of a business.
#[derive(Debug, Parser)]
#[command(name = "kudos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Review cards (default)
    Cards,
    /// JSON format
    Json,
    /// Quiet format (card ids or the status message)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and show the reviews of a place
    Reviews(ReviewsArgs),

    /// Show how a raw profile photo value resolves to an avatar
    Avatar(AvatarArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the reviews command.
#[derive(Debug, Parser)]
pub struct ReviewsArgs {
    /// Place id (defaults to place_id from the config file)
    #[arg(short, long, env = "KUDOS_PLACE_ID")]
    pub place_id: Option<String>,

    /// Reviews proxy base URL
    #[arg(long, env = "KUDOS_PROXY_URL")]
    pub proxy: Option<String>,

    /// Delay between avatar loads, in milliseconds
    #[arg(long)]
    pub stagger_ms: Option<u64>,

    /// Load avatars straight from their host instead of through the proxy
    #[arg(long)]
    pub direct: bool,

    /// Print as soon as reviews arrive, without waiting for avatars
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the avatar command.
#[derive(Debug, Parser)]
pub struct AvatarArgs {
    /// Raw profile photo value as the provider sends it
    pub value: String,

    /// Resolve to the external URL instead of the proxy path
    #[arg(long)]
    pub direct: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a configuration file
    Init {
        /// Reviews proxy base URL
        #[arg(long)]
        proxy_url: Option<String>,

        /// Default place id
        #[arg(long)]
        place_id: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Cards => Self::Cards,
            CliFormat::Json => Self::Json,
            CliFormat::Quiet => Self::Quiet,
        }
    }
}
