//! Summary enrichment for the partner summary pipeline.
//!
//! This crate handles:
//! - Volume coercion and text trimming
//! - Filling missing numeric values
//! - Derived profitability metrics (gross profit, margin, turnover, ratio)

pub mod cleaning;
pub mod metrics;
pub mod enricher;

pub use metrics::{derive_metrics, DerivedMetrics, MetricInputs};
pub use enricher::Enricher;
