//! Clap derive structures for the `ecovacs` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ecovacs -- talk to Ecovacs cloud-connected devices
#[derive(Debug, Parser)]
#[command(
    name = "ecovacs",
    version,
    about = "Query and command Ecovacs devices through the cloud API",
    long_about = "Lists the devices on an Ecovacs account, fetches the product catalog,\n\
        and sends raw commands to a device through the regional cloud portal.",
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
    /// Config file to use instead of the platform default
    #[arg(long, env = "ECOVACS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Account profile to use
    #[arg(long, short = 'p', env = "ECOVACS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Two-letter account country (overrides profile)
    #[arg(long, env = "ECOVACS_COUNTRY", global = true)]
    pub country: Option<String>,

    /// Continent token (overrides the one derived from the country)
    #[arg(long, env = "ECOVACS_CONTINENT", global = true)]
    pub continent: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ECOVACS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "ECOVACS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "ECOVACS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the account's supported devices
    #[command(alias = "dev", alias = "d")]
    Devices,

    /// Show the device class to product map
    #[command(alias = "prod")]
    Products,

    /// Send a raw command to a device
    Send(SendArgs),

    /// Print the regional portal URL for an API path
    PortalUrl(PortalUrlArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Device id (did) as shown by `ecovacs devices`
    pub did: String,

    /// Command name, e.g. getBattery or GetCleanLogs
    pub command: String,

    /// Command arguments as JSON (object or array)
    #[arg(long, short = 'a')]
    pub args: Option<String>,
}

#[derive(Debug, Args)]
pub struct PortalUrlArgs {
    /// Path relative to the portal API root
    #[arg(default_value = "")]
    pub path: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Show the active profile (token redacted)
    Show,
    /// List configured profiles (* marks the default)
    Profiles,
    /// Set the default profile
    Use {
        /// Profile name to make the default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
