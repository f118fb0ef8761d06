//! The litnet CLI application.
//!
//! Owns the loaded configuration, initialises logging, wires the entity
//! store and graph cache into a [`NetworkService`], and dispatches commands.

use crate::cli::{CliArgs, Command, GraphSubcommand, NetworkSubcommand};
use crate::config::LitnetConfig;
use crate::config_handlers;
use crate::graph_handlers::{self, SchoolSelection};
use litnet_core::Result;
use litnet_core::traits::ConfigProvider;
use litnet_graph::{GraphCache, MemoryGraphCache, NetworkService, NullGraphCache};
use litnet_store::load_store;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// LitnetCli
// ============================================================================

/// The CLI application.
pub struct LitnetCli {
    name: String,
    config: Arc<LitnetConfig>,
    version: String,
}

impl LitnetCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = LitnetConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    pub fn new(name: impl Into<String>, config: LitnetConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config(&self) -> &LitnetConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    /// Library crates log through `log`; the subscriber picks those records up.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be set (e.g. in tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Load the configured dataset and wire it to a cache.
    pub fn service(&self) -> Result<NetworkService> {
        let dataset = self.config.dataset_path()?;
        let store = load_store(&dataset)?;
        tracing::info!(
            project = self.config.project_name(),
            dataset = %dataset.display(),
            "Loaded entity store"
        );

        let cache: Arc<dyn GraphCache> = if self.config.cache.enabled {
            Arc::new(MemoryGraphCache::new(self.config.cache.cache_options()))
        } else {
            Arc::new(NullGraphCache)
        };
        Ok(NetworkService::new(Arc::new(store), cache))
    }

    /// Run the CLI with the given arguments.
    pub fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Network(network_cmd)) => self.handle_network(network_cmd.command),
            Some(Command::Graph(graph_cmd)) => self.handle_graph(graph_cmd.command),
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    fn handle_network(&self, command: NetworkSubcommand) -> Result<()> {
        let service = self.service()?;
        let config = &*self.config;
        match command {
            NetworkSubcommand::Contributors { output } => {
                graph_handlers::handle_contributors(config, &service, output)
            }
            NetworkSubcommand::Schools {
                categorizer,
                school,
                output,
            } => {
                let selection = SchoolSelection::from_flags(categorizer, school);
                graph_handlers::handle_schools(config, &service, selection, output)
            }
            NetworkSubcommand::Entities {
                kind,
                with_edges_only,
                output,
            } => graph_handlers::handle_entities(config, &service, kind, with_edges_only, output),
        }
    }

    fn handle_graph(&self, command: GraphSubcommand) -> Result<()> {
        match command {
            GraphSubcommand::Stats { input, top } => {
                graph_handlers::handle_stats(&*self.config, &input, top)
            }
            GraphSubcommand::Validate { input } => {
                graph_handlers::handle_validate(&*self.config, &input)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GraphConfig, StoreConfig};
    use clap::Parser;
    use std::path::Path;

    const DATASET: &str = r#"{
        "journals": [ { "id": 1, "title": "Yugen" } ],
        "people": [
            { "id": 1, "first_name": "LeRoi", "last_name": "Jones" },
            { "id": 2, "first_name": "Hettie", "last_name": "Cohen" }
        ],
        "issues": [ { "id": 10, "journal_id": 1, "editors": [1, 2] } ],
        "items": [
            { "id": 100, "issue_id": 10, "title": "Poem", "creators": [ { "person_id": 1 } ] }
        ]
    }"#;

    fn config_in(dir: &Path) -> LitnetConfig {
        let dataset = dir.join("dataset.json");
        std::fs::write(&dataset, DATASET).unwrap();
        LitnetConfig {
            base_path: Some(dir.to_string_lossy().into_owned()),
            store: StoreConfig {
                dataset_path: Some(dataset.to_string_lossy().into_owned()),
            },
            graph: GraphConfig {
                output_path: Some(dir.join("out").to_string_lossy().into_owned()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_litnet_cli_new() {
        let cli = LitnetCli::new("litnet", LitnetConfig::default()).with_version("1.2.3");
        assert_eq!(cli.name, "litnet");
        assert_eq!(cli.version, "1.2.3");
        assert_eq!(cli.config().project_name(), "litnet");
    }

    #[test]
    fn test_run_version_and_no_command() {
        let cli = LitnetCli::new("litnet", LitnetConfig::default());
        assert!(cli.run(CliArgs::parse_from(["litnet", "version"])).is_ok());
        assert!(cli.run(CliArgs::parse_from(["litnet"])).is_ok());
    }

    #[test]
    fn test_init_logging_is_repeatable() {
        let cli = LitnetCli::new("litnet", LitnetConfig::default());
        cli.init_logging(false, false);
        cli.init_logging(true, false);
        cli.init_logging(false, true);
    }

    #[test]
    fn test_service_loads_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = LitnetCli::new("litnet", config_in(dir.path()));

        let service = cli.service().unwrap();
        let graph = service.contributor_network().unwrap();
        // Yugen, Jones, Cohen.
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_service_missing_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LitnetConfig {
            base_path: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        let err = LitnetCli::new("litnet", config).service().err().expect("expected service() to fail");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_service_without_cache() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.cache.enabled = false;

        let service = LitnetCli::new("litnet", config).service().unwrap();
        let first = service.contributor_network().unwrap();
        let second = service.contributor_network().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_each_service_owns_its_cache() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = LitnetCli::new("litnet", config_in(dir.path()));

        let service = cli.service().unwrap();
        let first = service.contributor_network().unwrap();
        assert!(Arc::ptr_eq(&first, &service.contributor_network().unwrap()));

        let fresh = cli.service().unwrap().contributor_network().unwrap();
        assert!(!Arc::ptr_eq(&first, &fresh));
    }

    #[test]
    fn test_run_network_then_graph_commands() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = LitnetCli::new("litnet", config_in(dir.path()));

        cli.run(CliArgs::parse_from(["litnet", "network", "contributors"]))
            .unwrap();
        assert!(dir.path().join("out/contributors.json").exists());

        cli.run(CliArgs::parse_from(["litnet", "graph", "stats"]))
            .unwrap();
        cli.run(CliArgs::parse_from(["litnet", "graph", "validate"]))
            .unwrap();

        cli.run(CliArgs::parse_from([
            "litnet", "network", "entities", "--kind", "issue",
        ]))
        .unwrap();
        assert!(dir.path().join("out/issue.json").exists());
    }

    #[test]
    fn test_run_config_command_dispatch() {
        let cli = LitnetCli::new("litnet", LitnetConfig::default());
        let args = CliArgs::parse_from(["litnet", "--config", "/nonexistent.toml", "config", "path"]);
        assert!(cli.run(args).is_ok());
    }
}
