//! Summary persistence for the partner summary pipeline.
//!
//! This crate provides:
//! - The two-step `TableSink` contract (clear, then bulk insert)
//! - A SQLite sink
//! - The `Persister` that replaces the destination table

pub mod sink;
pub mod persister;

pub use sink::{SqliteSink, TableSink};
pub use persister::Persister;
