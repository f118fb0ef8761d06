//! Error types for litnet operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all litnet crates. Uses `thiserror` for derive macros.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in litnet operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// The file being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entity, node, or file not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A graph or store operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),

    /// The graph cache refused or failed to store an entry.
    ///
    /// Callers treat this as recoverable and continue with the uncached value.
    #[error("Cache storage error: {0}")]
    CacheStorage(String),
}

impl Error {
    /// Create an I/O error from a raw `std::io::Error`.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Create an I/O error that records the offending path.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a "file not found" error for a path.
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound(format!("file {}", path.as_ref().display()))
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Create a cache storage error.
    pub fn cache_storage(msg: impl Into<String>) -> Self {
        Self::CacheStorage(msg.into())
    }

    /// Whether this error is a (recoverable) cache storage failure.
    pub fn is_cache_storage(&self) -> bool {
        matches!(self, Self::CacheStorage(_))
    }

    /// Whether this error means something was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using litnet's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_variant() {
        assert!(matches!(Error::config("x"), Error::Config(_)));
        assert!(matches!(Error::not_found("x"), Error::NotFound(_)));
        assert!(matches!(Error::invalid_data("x"), Error::InvalidData(_)));
        assert!(matches!(Error::parse("x"), Error::Parse(_)));
        assert!(matches!(Error::operation("x"), Error::Operation(_)));
        assert!(matches!(Error::serialization("x"), Error::Serialization(_)));
    }

    #[test]
    fn test_cache_storage_is_recoverable_marker() {
        let err = Error::cache_storage("entry too large");
        assert!(err.is_cache_storage());
        assert!(!Error::config("x").is_cache_storage());
        assert_eq!(err.to_string(), "Cache storage error: entry too large");
    }

    #[test]
    fn test_io_with_path_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(io, "/data/store.json");
        let msg = err.to_string();
        assert!(msg.contains("/data/store.json"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_file_not_found() {
        let err = Error::file_not_found("/tmp/missing.json");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/tmp/missing.json"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::other("boom");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
