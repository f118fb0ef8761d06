//! Configuration for the litnet CLI.
//!
//! Provides the [`LitnetConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `LITNET_CONFIG` environment variable
//! 3. XDG default: `~/.config/litnet/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use litnet_core::traits::ConfigProvider;
use litnet_core::{Error, Result};
use litnet_graph::{CacheOptions, DEFAULT_MAX_ENTRIES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the litnet CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LitnetConfig {
    /// Project name, used in log lines and default paths.
    pub project_name: String,

    /// Base path for all project data.
    pub base_path: Option<String>,

    /// Entity store configuration.
    pub store: StoreConfig,

    /// Graph cache configuration.
    pub cache: CacheConfig,

    /// Graph output configuration.
    pub graph: GraphConfig,
}

/// Entity store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON dataset loaded into the store.
    pub dataset_path: Option<String>,
}

/// Graph cache configuration.
///
/// The cache lives in the [`NetworkService`](litnet_graph::NetworkService)
/// of one process. Each `litnet` invocation builds a fresh service and exits,
/// so these settings only change behaviour for a long-running embedder that
/// keeps the service alive across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether built networks are cached at all.
    pub enabled: bool,

    /// Entry lifetime in seconds; `0` keeps entries until cleared.
    pub ttl_secs: u64,

    /// Largest graph cached, counted as nodes plus edges.
    pub max_graph_elements: Option<usize>,

    /// Most networks held at once before the least recently used is evicted.
    pub max_entries: usize,
}

/// Graph output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Directory exported networks are written to.
    pub output_path: Option<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for LitnetConfig {
    fn default() -> Self {
        Self {
            project_name: "litnet".to_string(),
            base_path: None,
            store: StoreConfig::default(),
            cache: CacheConfig::default(),
            graph: GraphConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
            max_graph_elements: None,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Options for an in-memory graph cache.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            ttl: (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs)),
            max_graph_elements: self.max_graph_elements,
            max_entries: self.max_entries,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl LitnetConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// Loading priority:
    /// 1. Explicit `config_path` (from `--config` flag)
    /// 2. `LITNET_CONFIG` env var
    /// 3. XDG default: `~/.config/litnet/config.toml`
    /// 4. Built-in defaults
    ///
    /// Environment values reach serde as strings, so only string-typed
    /// fields can be overridden from the environment.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            log::debug!("Loading config from {}", path.display());
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level("LITNET");
        env_opts.add_section("store");
        env_opts.add_section("cache");
        env_opts.add_section("graph");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("LITNET_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("litnet").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `LITNET_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "LITNET", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for LitnetConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn dataset_path(&self) -> Result<PathBuf> {
        match &self.store.dataset_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Ok(self.base_path()?.join("data").join("dataset.json")),
        }
    }

    fn graph_output_path(&self, network: &str) -> Result<PathBuf> {
        let dir = match &self.graph.output_path {
            Some(p) => PathBuf::from(p),
            None => self.base_path()?.join("data").join("graphs"),
        };
        Ok(dir.join(format!("{network}.json")))
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that touch process environment.
    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// RAII guard for env var manipulation in tests.
    pub(crate) struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        pub(crate) fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: env-mutating tests hold `env_lock()`.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        pub(crate) fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: env-mutating tests hold `env_lock()`.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: the guard is dropped before the test releases `env_lock()`.
            unsafe {
                match &self.prev {
                    Some(val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Default tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_litnet_config_default() {
        let config = LitnetConfig::default();
        assert_eq!(config.project_name, "litnet");
        assert!(config.base_path.is_none());
        assert!(config.store.dataset_path.is_none());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 300);
        assert!(config.cache.max_graph_elements.is_none());
        assert!(config.graph.output_path.is_none());
    }

    #[test]
    fn test_cache_options_from_config() {
        let options = CacheConfig::default().cache_options();
        assert_eq!(options.ttl, Some(Duration::from_secs(300)));
        assert!(options.max_graph_elements.is_none());
        assert_eq!(options.max_entries, DEFAULT_MAX_ENTRIES);

        let forever = CacheConfig {
            ttl_secs: 0,
            max_graph_elements: Some(5000),
            max_entries: 8,
            ..Default::default()
        }
        .cache_options();
        assert!(forever.ttl.is_none());
        assert_eq!(forever.max_graph_elements, Some(5000));
        assert_eq!(forever.max_entries, 8);
    }

    // ------------------------------------------------------------------------
    // Serialization tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_litnet_config_from_toml() {
        let toml_str = r#"
            project_name = "little-magazines"
            base_path = "/srv/archive"

            [store]
            dataset_path = "/srv/archive/dataset.json"

            [cache]
            enabled = false
            ttl_secs = 60
            max_graph_elements = 10000
            max_entries = 16

            [graph]
            output_path = "/srv/archive/graphs"
        "#;

        let config: LitnetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "little-magazines");
        assert_eq!(config.base_path.as_deref(), Some("/srv/archive"));
        assert_eq!(
            config.store.dataset_path.as_deref(),
            Some("/srv/archive/dataset.json")
        );
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.cache.max_graph_elements, Some(10000));
        assert_eq!(config.cache.max_entries, 16);
        assert_eq!(config.graph.output_path.as_deref(), Some("/srv/archive/graphs"));
    }

    #[test]
    fn test_litnet_config_partial_toml_keeps_defaults() {
        let config: LitnetConfig = toml::from_str("[cache]\nttl_secs = 30").unwrap();
        assert_eq!(config.project_name, "litnet");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 30);
    }

    #[test]
    fn test_litnet_config_to_toml() {
        let config = LitnetConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"litnet\""));
        assert!(toml_str.contains("[cache]"));
        assert!(toml_str.contains("ttl_secs = 300"));

        let parsed: LitnetConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.project_name, config.project_name);
        assert_eq!(parsed.cache.ttl_secs, config.cache.ttl_secs);
    }

    // ------------------------------------------------------------------------
    // Loading tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_litnet_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [cache]
                ttl_secs = 120
            "#,
        )
        .unwrap();

        let config = LitnetConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.cache.ttl_secs, 120);
    }

    #[test]
    fn test_litnet_config_load_defaults() {
        let config = LitnetConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "litnet");
        assert_eq!(config.cache.ttl_secs, 300);
    }

    #[test]
    fn test_litnet_config_load_env_overlay() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                [store]
                dataset_path = "/from/file.json"
            "#,
        )
        .unwrap();

        let _guard = EnvGuard::new("LITNET_STORE_DATASET_PATH", "/from/env.json");
        let config = LitnetConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.store.dataset_path.as_deref(), Some("/from/env.json"));
    }

    // ------------------------------------------------------------------------
    // resolve_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_litnet_config_resolve_config_path_explicit() {
        let path = LitnetConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_litnet_config_resolve_config_path_env() {
        let _lock = env_lock();
        let _guard = EnvGuard::new("LITNET_CONFIG", "/env/config.toml");
        let path = LitnetConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_litnet_config_resolve_config_path_default() {
        let _lock = env_lock();
        let _guard = EnvGuard::remove("LITNET_CONFIG");
        let Some(path) = LitnetConfig::resolve_config_path(None) else {
            // No config directory on this platform.
            return;
        };
        assert!(path.to_str().unwrap().contains("litnet"));
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }

    // ------------------------------------------------------------------------
    // ConfigProvider tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_litnet_config_provider_base_path() {
        let config = LitnetConfig {
            base_path: Some("/my/data".into()),
            ..Default::default()
        };
        assert_eq!(config.base_path().unwrap(), PathBuf::from("/my/data"));

        let default = LitnetConfig::default();
        assert_eq!(default.base_path().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_litnet_config_provider_dataset_path() {
        let config = LitnetConfig {
            base_path: Some("/project".into()),
            ..Default::default()
        };
        assert_eq!(
            config.dataset_path().unwrap(),
            PathBuf::from("/project/data/dataset.json")
        );

        let explicit = LitnetConfig {
            store: StoreConfig {
                dataset_path: Some("/custom/catalogue.json".into()),
            },
            ..Default::default()
        };
        assert_eq!(
            explicit.dataset_path().unwrap(),
            PathBuf::from("/custom/catalogue.json")
        );
    }

    #[test]
    fn test_litnet_config_provider_graph_output_path() {
        let config = LitnetConfig {
            base_path: Some("/project".into()),
            ..Default::default()
        };
        assert_eq!(
            config.graph_output_path("schools").unwrap(),
            PathBuf::from("/project/data/graphs/schools.json")
        );

        let explicit = LitnetConfig {
            graph: GraphConfig {
                output_path: Some("/out".into()),
            },
            ..Default::default()
        };
        assert_eq!(
            explicit.graph_output_path("contributors").unwrap(),
            PathBuf::from("/out/contributors.json")
        );
    }

    // ------------------------------------------------------------------------
    // to_env_vars tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_litnet_config_to_env_vars() {
        let config = LitnetConfig::default();
        let vars = config.to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("LITNET_PROJECT_NAME").unwrap(), "litnet");
        assert_eq!(map.get("LITNET_CACHE_ENABLED").unwrap(), "true");
        assert_eq!(map.get("LITNET_CACHE_TTL_SECS").unwrap(), "300");
        assert_eq!(map.get("LITNET_CACHE_MAX_ENTRIES").unwrap(), "64");
        assert!(!map.contains_key("LITNET_CACHE_MAX_GRAPH_ELEMENTS"));
    }

    #[test]
    fn test_litnet_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LitnetConfig>();
    }
}
