//! Core types and configuration for the partner summary pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Tabular result sets (`Table`, `Value`) and the summary column names
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
