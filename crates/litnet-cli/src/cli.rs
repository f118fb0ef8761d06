//! CLI argument parsing and command definitions.
//!
//! Commands fall into three groups: `network` builds and exports a network
//! from the configured dataset, `graph` inspects a saved network, and
//! `config` manages the configuration file.

use clap::{Args, Parser, Subcommand};
use litnet_graph::NodeKind;
use litnet_store::EntityId;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "LITNET_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and export a network.
    Network(NetworkCommand),

    /// Inspect a saved network.
    Graph(GraphCommand),

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Output flags shared by every network build.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output file path for the network.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Build and summarize without writing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Network-specific subcommands.
#[derive(Parser, Debug)]
pub struct NetworkCommand {
    /// Network subcommand to execute.
    #[command(subcommand)]
    pub command: NetworkSubcommand,
}

/// Available networks.
#[derive(Subcommand, Debug)]
pub enum NetworkSubcommand {
    /// Editors, authors and translators linked to journals and each other.
    Contributors {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Schools with their locations, members and journals.
    ///
    /// Without a selection, every school in the dataset is included.
    Schools {
        /// Only schools classified by this categorizer slug.
        #[arg(long, conflicts_with = "school")]
        categorizer: Option<String>,

        /// Only these school ids (repeatable).
        #[arg(long = "school", value_name = "ID")]
        school: Vec<EntityId>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Every entity of one kind, with the edges each entity declares.
    Entities {
        /// Entity kind: person, school, journal, issue, item, location.
        #[arg(short, long, value_parser = parse_node_kind)]
        kind: NodeKind,

        /// Skip entities that declare no edges.
        #[arg(long)]
        with_edges_only: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Graph-specific subcommands.
#[derive(Parser, Debug)]
pub struct GraphCommand {
    /// Graph subcommand to execute.
    #[command(subcommand)]
    pub command: GraphSubcommand,
}

/// Locates a saved network.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Graph file to read; defaults to the configured output for `--network`.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Network name used to find the default graph file.
    #[arg(short, long, default_value = "contributors")]
    pub network: String,
}

/// Available graph subcommands.
#[derive(Subcommand, Debug)]
pub enum GraphSubcommand {
    /// Show graph statistics.
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Number of highest-degree nodes to list.
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// Validate graph integrity.
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "cache.ttl_secs").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

fn parse_node_kind(value: &str) -> Result<NodeKind, String> {
    NodeKind::from_prefix(value).ok_or_else(|| {
        let known: Vec<&str> = NodeKind::ALL.iter().map(|k| k.prefix()).collect();
        format!("unknown entity kind '{value}' (expected one of: {})", known.join(", "))
    })
}

// ============================================================================
// Tests
// ============================================================================
