//! Clap derive structures for the `rosync` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rosync -- keep RouterOS PPP secrets in step with live sessions
#[derive(Debug, Parser)]
#[command(
    name = "rosync",
    version,
    about = "Reconcile PPP subscribers and manage address lists on MikroTik routers",
    long_about = "Copies the caller-id and address of active PPP sessions back onto\n\
        their configured secrets, and manages firewall address lists.\n\n\
        Talks to RouterOS v7 over its REST API (/rest on the www-ssl service).",
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
    /// Router profile to use
    #[arg(long, short = 'p', env = "ROSYNC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router address or URL (overrides profile)
    #[arg(long, short = 'r', env = "ROSYNC_ROUTER", global = true)]
    pub router: Option<String>,

    /// RouterOS user name (overrides profile)
    #[arg(long, short = 'u', env = "ROSYNC_USERNAME", global = true)]
    pub username: Option<String>,

    /// RouterOS password
    #[arg(long, env = "ROSYNC_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ROSYNC_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ROSYNC_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ROSYNC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Site label attached to listed secrets (overrides profile)
    #[arg(long, env = "ROSYNC_HOST", global = true)]
    pub host: Option<String>,

    /// Base-station label attached to listed secrets (overrides profile)
    #[arg(long, env = "ROSYNC_BTS", global = true)]
    pub bts: Option<String>,
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
    /// Show the router's system identity
    #[command(alias = "id")]
    Identity,

    /// View configured PPP secrets
    Secrets(SecretsArgs),

    /// View active PPP sessions
    Active(ActiveArgs),

    /// Copy session attributes back onto PPP secrets
    Sync(SyncArgs),

    /// Manage firewall address lists
    #[command(alias = "al")]
    AddressList(AddressListArgs),

    /// SNMP agent settings
    Snmp(SnmpArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SECRETS / ACTIVE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SecretsCommand {
    /// List PPP secrets
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct ActiveArgs {
    #[command(subcommand)]
    pub command: ActiveCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActiveCommand {
    /// List active PPP sessions
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SYNC
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(subcommand)]
    pub command: SyncCommand,
}

#[derive(Debug, Subcommand)]
pub enum SyncCommand {
    /// Set each secret's caller-id from its active session
    CallerId,

    /// Set each secret's remote-address from its active session
    RemoteAddress,

    /// Run both passes, caller-id first
    All,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADDRESS LISTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AddressListArgs {
    #[command(subcommand)]
    pub command: AddressListCommand,
}

#[derive(Debug, Subcommand)]
pub enum AddressListCommand {
    /// List the entries of one address list
    #[command(alias = "ls")]
    List {
        /// Address-list name
        list: String,
    },

    /// Add an address to a list
    Add {
        /// IP address, range or prefix
        address: String,

        /// Address-list name
        #[arg(long, short = 'l')]
        list: String,

        /// Comment stored with the entry
        #[arg(long, short = 'c', default_value = "")]
        comment: String,
    },

    /// Remove every entry of an address from a list
    #[command(alias = "rm")]
    Remove {
        /// Address to remove
        address: String,

        /// Address-list name
        #[arg(long, short = 'l')]
        list: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SNMP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SnmpArgs {
    #[command(subcommand)]
    pub command: SnmpCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnmpCommand {
    /// Enable the SNMP agent with v2 traps
    Enable,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current configuration (passwords masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (router, username, password_env, ca_cert, insecure, timeout, host, bts)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name (defaults to the active profile)
        name: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
