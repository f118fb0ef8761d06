//! Command-line interface for litnet.
//!
//! # Modules
//!
//! - [`cli`]: clap argument and command definitions
//! - [`config`]: [`LitnetConfig`] loading via `confyg`
//! - [`app`]: [`LitnetCli`], logging setup and command dispatch
//! - [`graph_handlers`] and [`config_handlers`]: command implementations

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod graph_handlers;

pub use app::LitnetCli;
pub use cli::CliArgs;
pub use config::LitnetConfig;
