//! Partner summary pipeline: aggregate, enrich, persist.
//!
//! The library half of the `partner-summary` binary, so the full pipeline
//! can be driven against any open connection.

pub mod logging;
pub mod pipeline;
pub mod report;

pub use pipeline::Pipeline;
pub use report::PipelineReport;
