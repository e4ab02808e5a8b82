//! Clap derive structures for the `sonarsync` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sonarsync_core::ResourceKind;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sonarsync -- reconcile declared SonarQube state
#[derive(Debug, Parser)]
#[command(
    name = "sonarsync",
    version,
    about = "Reconcile SonarQube permissions, ALM bindings and user tokens",
    long_about = "Applies one declaration file to a SonarQube server per invocation.\n\n\
        Declarations describe permission grants, GitLab/GitHub project bindings\n\
        or user tokens, tagged by `kind`, in TOML, YAML or JSON.",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "SONARSYNC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, env = "SONARSYNC_URL", global = true)]
    pub url: Option<String>,

    /// User token (overrides profile credentials)
    #[arg(long, env = "SONARSYNC_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Assume this edition instead of asking the server
    #[arg(long, env = "SONARSYNC_EDITION", global = true)]
    pub edition: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SONARSYNC_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "SONARSYNC_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SONARSYNC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Key/value table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a resource from a declaration file
    #[command(alias = "apply")]
    Create(FileArgs),

    /// Read a resource's current server state
    #[command(alias = "get")]
    Read(IdentifiedFileArgs),

    /// Re-apply a declaration under an existing identity
    Update(IdentifiedFileArgs),

    /// Remove a resource
    #[command(alias = "rm")]
    Delete(IdentifiedFileArgs),

    /// Rebuild a declaration from an identity alone
    Import(ImportArgs),

    /// Show the server's edition and version
    Server,

    /// Inspect the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Lifecycle ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Declaration file (.toml, .yaml, .yml or .json)
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct IdentifiedFileArgs {
    /// Declaration file (.toml, .yaml, .yml or .json)
    pub file: PathBuf,

    /// Identity returned by `create`
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Resource kind
    #[arg(value_parser = parse_kind)]
    pub kind: ResourceKind,

    /// Identity to import (`<project>/<repository>` or `<login>/<name>`)
    pub id: String,
}

fn parse_kind(value: &str) -> Result<ResourceKind, String> {
    value.replace('-', "_").parse().map_err(|_| {
        format!(
            "unknown kind '{value}' (expected permissions, gitlab_binding, \
             github_binding or user_token)"
        )
    })
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Print the loaded configuration with secrets redacted
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
