//! Core traits for litnet applications.
//!
//! The primary trait is [`ConfigProvider`], which tells the store and graph
//! layers where a deployment keeps its dataset and where derived networks
//! should be written.

use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use litnet_core::traits::ConfigProvider;
/// use litnet_core::Result;
///
/// #[derive(Clone)]
/// struct ArchiveConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for ArchiveConfig {
///     fn project_name(&self) -> &str {
///         "little-magazines"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.clone())
///     }
///
///     fn dataset_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.join("dataset.json"))
///     }
/// }
///
/// let config = ArchiveConfig { data_dir: PathBuf::from("/srv/archive") };
/// assert_eq!(
///     config.graph_output_path("contributors").unwrap(),
///     PathBuf::from("/srv/archive/data/graphs/contributors.json"),
/// );
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used in log lines and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined (e.g., missing
    /// environment variable or invalid configuration).
    fn base_path(&self) -> Result<PathBuf>;

    /// Path of the JSON dataset loaded into the entity store.
    ///
    /// # Errors
    ///
    /// Returns an error if no dataset is configured and no default applies.
    fn dataset_path(&self) -> Result<PathBuf>;

    /// Default output file for an exported network.
    ///
    /// `network` is a short name like `"contributors"` or `"schools"`.
    fn graph_output_path(&self, network: &str) -> Result<PathBuf> {
        Ok(self
            .base_path()?
            .join("data")
            .join("graphs")
            .join(format!("{network}.json")))
    }
}
