//! Data ingestion for the partner summary pipeline.
//!
//! This crate handles:
//! - Source relation checks
//! - The purchase/sale/freight aggregation query
//! - Reading the joined result set into a `Table`

pub mod aggregator;
pub mod query;

pub use aggregator::Aggregator;
pub use query::summary_query;
