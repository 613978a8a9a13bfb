//! Clap derive structures for the `edgeguard` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// edgeguard -- manage EdgeCenter DDoS and web protection resources
#[derive(Debug, Parser)]
#[command(
    name = "edgeguard",
    version,
    about = "Manage EdgeCenter DDoS protection resources from the command line",
    long_about = "A CLI for the EdgeCenter protection management API.\n\n\
        Protected resources and their aliases, origins, headers and access\n\
        lists can be listed, inspected, created, updated and deleted.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "EDGEGUARD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "EDGEGUARD_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// API key, with or without the "APIKey " prefix
    #[arg(long, env = "EDGEGUARD_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format [default: table, or `defaults.output` from the config]
    #[arg(long, short = 'o', env = "EDGEGUARD_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "EDGEGUARD_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "EDGEGUARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Retry 429 and 5xx responses up to N times (0 disables)
    #[arg(long, env = "EDGEGUARD_RETRIES", global = true, value_name = "N")]
    pub retries: Option<u32>,
}

impl GlobalOpts {
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
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
    /// Manage protected resources
    #[command(alias = "res", alias = "r")]
    Resources(ResourcesArgs),

    /// Manage resource aliases (additional hostnames)
    Aliases(AliasesArgs),

    /// Manage resource origins (upstream servers)
    Origins(OriginsArgs),

    /// Manage headers added to origin requests
    Headers(HeadersArgs),

    /// Manage denied addresses of a resource
    #[command(alias = "bl")]
    Blacklists(AccessListArgs),

    /// Manage addresses exempt from filtering
    #[command(alias = "wl")]
    Whitelists(AccessListArgs),

    /// Show protection subscription status
    Status(StatusArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Shared pagination arguments for all list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Max results (0 = server default)
    #[arg(long, short = 'l', default_value = "0")]
    pub limit: u32,

    /// Pagination offset
    #[arg(long, default_value = "0")]
    pub offset: u32,
}

/// SSL certificate source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SslTypeArg {
    /// Customer-supplied certificate and key
    Custom,
    /// Let's Encrypt
    Le,
}

impl SslTypeArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Le => "le",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESOURCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ResourcesArgs {
    #[command(subcommand)]
    pub command: ResourcesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResourcesCommand {
    /// List protected resources
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        #[command(flatten)]
        filter: ResourceFilterArgs,
    },

    /// Get resource details
    Get {
        /// Resource ID or name
        resource: String,
    },

    /// Create a protected resource
    Create {
        #[command(flatten)]
        fields: ResourceFieldArgs,

        /// Create from JSON file
        #[arg(long, short = 'F', conflicts_with = "name")]
        from_file: Option<PathBuf>,
    },

    /// Update resource settings (only the given fields change)
    Update {
        /// Resource ID or name
        resource: String,

        #[command(flatten)]
        fields: ResourceFieldArgs,

        /// Load full payload from JSON file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a protected resource
    #[command(alias = "rm")]
    Delete {
        /// Resource ID or name
        resource: String,
    },

    /// Show the current DNS records of a resource
    DnsCheck {
        /// Resource ID or name
        resource: String,
    },
}

#[derive(Debug, Args)]
pub struct ResourceFilterArgs {
    /// Filter by name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by client account ID
    #[arg(long)]
    pub client: Option<i64>,

    /// Filter by status
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by active flag
    #[arg(long)]
    pub active: Option<bool>,

    /// Filter by protection IP
    #[arg(long)]
    pub service_ip: Option<String>,

    /// Filter by origin address
    #[arg(long)]
    pub origin_ip: Option<String>,

    /// Sort key, e.g. "name" or "-created"
    #[arg(long)]
    pub ordering: Option<String>,
}

/// Settable resource fields shared by `create` and `update`.
#[derive(Debug, Args)]
pub struct ResourceFieldArgs {
    /// Resource (domain) name
    #[arg(long)]
    pub name: Option<String>,

    /// Enable or disable the resource
    #[arg(long)]
    pub active: Option<bool>,

    /// Certificate source
    #[arg(long, value_enum)]
    pub ssl_type: Option<SslTypeArg>,

    /// PEM certificate file (with --ssl-type custom)
    #[arg(long)]
    pub ssl_cert: Option<PathBuf>,

    /// PEM private key file (with --ssl-type custom)
    #[arg(long)]
    pub ssl_key: Option<PathBuf>,

    /// Enabled TLS versions (comma-separated: 1, 1.1, 1.2, 1.3)
    #[arg(long, value_delimiter = ',')]
    pub tls: Option<Vec<String>>,

    /// Talk plain HTTP to the origins (0 or 1)
    #[arg(long)]
    pub https2http: Option<u8>,

    /// Balance origins by client IP hash (0 or 1)
    #[arg(long)]
    pub iphash: Option<u8>,

    /// Redirect between www and bare domain (0 or 1)
    #[arg(long)]
    pub wwwredir: Option<u8>,

    /// GeoIP mode (0 off, 1 allow-list, 2 deny-list)
    #[arg(long)]
    pub geoip_mode: Option<u8>,

    /// GeoIP country list (comma-separated ISO codes)
    #[arg(long)]
    pub geoip_list: Option<String>,

    /// Enable the web application firewall
    #[arg(long)]
    pub waf: Option<bool>,

    /// Redirect HTTP to HTTPS
    #[arg(long)]
    pub redirect_https: Option<bool>,

    /// Allow several origins
    #[arg(long)]
    pub multiple_origins: Option<bool>,

    /// Allow wildcard aliases
    #[arg(long)]
    pub wildcard_aliases: Option<bool>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALIASES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AliasesArgs {
    #[command(subcommand)]
    pub command: AliasesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AliasesCommand {
    /// List aliases of a resource
    #[command(alias = "ls")]
    List {
        /// Resource ID or name
        resource: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Get alias details
    Get {
        /// Resource ID or name
        resource: String,
        /// Alias ID
        id: i64,
    },

    /// Add an alias
    Create {
        /// Resource ID or name
        resource: String,

        /// Alias hostname
        #[arg(long)]
        data: String,

        /// Certificate source
        #[arg(long, value_enum)]
        ssl_type: Option<SslTypeArg>,

        /// PEM certificate file
        #[arg(long)]
        ssl_cert: Option<PathBuf>,

        /// PEM private key file
        #[arg(long)]
        ssl_key: Option<PathBuf>,
    },

    /// Change the certificate of an alias
    Update {
        /// Resource ID or name
        resource: String,
        /// Alias ID
        id: i64,

        /// Certificate source
        #[arg(long, value_enum)]
        ssl_type: Option<SslTypeArg>,

        /// PEM certificate file
        #[arg(long)]
        ssl_cert: Option<PathBuf>,

        /// PEM private key file
        #[arg(long)]
        ssl_key: Option<PathBuf>,
    },

    /// Remove an alias
    #[command(alias = "rm")]
    Delete {
        /// Resource ID or name
        resource: String,
        /// Alias ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ORIGINS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OriginsArgs {
    #[command(subcommand)]
    pub command: OriginsCommand,
}

#[derive(Debug, Subcommand)]
pub enum OriginsCommand {
    /// List origins of a resource
    #[command(alias = "ls")]
    List {
        /// Resource ID or name
        resource: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Get origin details
    Get {
        /// Resource ID or name
        resource: String,
        /// Origin ID
        id: i64,
    },

    /// Add an origin
    Create {
        /// Resource ID or name
        resource: String,

        #[command(flatten)]
        fields: OriginFieldArgs,
    },

    /// Replace the settings of an origin
    Update {
        /// Resource ID or name
        resource: String,
        /// Origin ID
        id: i64,

        #[command(flatten)]
        fields: OriginFieldArgs,
    },

    /// Remove an origin
    #[command(alias = "rm")]
    Delete {
        /// Resource ID or name
        resource: String,
        /// Origin ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct OriginFieldArgs {
    /// Origin address (host or IP, optional :port)
    #[arg(long)]
    pub data: String,

    /// Load-balancing role
    #[arg(long, value_enum)]
    pub mode: Option<OriginModeArg>,

    /// Balancing weight
    #[arg(long)]
    pub weight: Option<u32>,

    /// Failed attempts before the origin is marked down
    #[arg(long)]
    pub max_fails: Option<u32>,

    /// Seconds an origin stays down
    #[arg(long)]
    pub fail_timeout: Option<u32>,

    /// Free-form comment
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OriginModeArg {
    /// Receives traffic normally
    Primary,
    /// Receives traffic only when all primaries are down
    Backup,
}

impl OriginModeArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Backup => "backup",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  HEADERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct HeadersArgs {
    #[command(subcommand)]
    pub command: HeadersCommand,
}

#[derive(Debug, Subcommand)]
pub enum HeadersCommand {
    /// List headers of a resource
    #[command(alias = "ls")]
    List {
        /// Resource ID or name
        resource: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Get header details
    Get {
        /// Resource ID or name
        resource: String,
        /// Header ID
        id: i64,
    },

    /// Add a header
    Create {
        /// Resource ID or name
        resource: String,
        /// Header name
        #[arg(long)]
        key: String,
        /// Header value
        #[arg(long, default_value = "")]
        value: String,
    },

    /// Replace a header
    Update {
        /// Resource ID or name
        resource: String,
        /// Header ID
        id: i64,
        /// Header name
        #[arg(long)]
        key: String,
        /// Header value
        #[arg(long, default_value = "")]
        value: String,
    },

    /// Remove a header
    #[command(alias = "rm")]
    Delete {
        /// Resource ID or name
        resource: String,
        /// Header ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BLACKLISTS / WHITELISTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AccessListArgs {
    #[command(subcommand)]
    pub command: AccessListCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccessListCommand {
    /// List entries of a resource
    #[command(alias = "ls")]
    List {
        /// Resource ID or name
        resource: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Get entry details
    Get {
        /// Resource ID or name
        resource: String,
        /// Entry ID
        id: i64,
    },

    /// Add an entry
    Create {
        /// Resource ID or name
        resource: String,
        /// Address or network (CIDR)
        data: String,
    },

    /// Replace an entry
    Update {
        /// Resource ID or name
        resource: String,
        /// Entry ID
        id: i64,
        /// Address or network (CIDR)
        data: String,
    },

    /// Remove an entry
    #[command(alias = "rm")]
    Delete {
        /// Resource ID or name
        resource: String,
        /// Entry ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STATUS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(subcommand)]
    pub command: StatusCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatusCommand {
    /// Web protection subscription
    Web,

    /// Infrastructure protection subscription
    #[command(alias = "infra")]
    Infrastructure,
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
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a profile key (base_url, api_key, api_key_env, ca_cert,
    /// insecure, timeout, retry_max, retry_wait_min, retry_wait_max)
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// List configured profiles (* marks the default)
    Profiles,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },

    /// Store an API key in the system keyring
    SetKey {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resource_update() {
        let cli = Cli::try_parse_from([
            "edgeguard",
            "-o",
            "json",
            "--retries",
            "2",
            "resources",
            "update",
            "example.com",
            "--tls",
            "1.2,1.3",
            "--geoip-mode",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.global.format(), OutputFormat::Json);
        assert_eq!(cli.global.retries, Some(2));
        match cli.command {
            Command::Resources(ResourcesArgs {
                command:
                    ResourcesCommand::Update {
                        resource, fields, ..
                    },
            }) => {
                assert_eq!(resource, "example.com");
                assert_eq!(fields.tls, Some(vec!["1.2".to_owned(), "1.3".to_owned()]));
                assert_eq!(fields.geoip_mode, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_access_list_create() {
        let cli =
            Cli::try_parse_from(["edgeguard", "wl", "create", "42", "198.51.100.0/24"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Whitelists(AccessListArgs {
                command: AccessListCommand::Create { ref resource, ref data },
            }) if resource == "42" && data == "198.51.100.0/24"
        ));
    }
}
