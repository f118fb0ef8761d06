//! Litnet Core: shared error type and configuration traits.
//!
//! This crate provides the foundational types used across all litnet crates.
//! It has no internal litnet dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Core traits for application configuration

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;
