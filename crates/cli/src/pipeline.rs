//! The linear summary pipeline.
//!
//! Aggregator → Enricher → Persister, run once on a single shared
//! connection. Any stage failure aborts the run.

use partner_core::{Config, Result};
use partner_features::Enricher;
use partner_ingestion::Aggregator;
use partner_persist::{Persister, SqliteSink};
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::report::PipelineReport;

/// One configured pipeline.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a pipeline. The configuration is validated up front.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every stage against `conn`, replacing the destination table.
    pub fn run(&self, conn: &Connection) -> Result<PipelineReport> {
        let preview_rows = self.config.logging.preview_rows;
        let destination = self.config.destination.table.as_str();

        info!("Creating partner summary table");
        let aggregated =
            Aggregator::new(conn, self.config.source.relations.clone()).aggregate()?;
        debug!("aggregated preview:\n{}", aggregated.preview(preview_rows));

        info!("Cleaning data");
        let enriched = Enricher::new().enrich(&aggregated)?;
        debug!("enriched preview:\n{}", enriched.preview(preview_rows));

        let mut report = PipelineReport::from_summary(destination, aggregated.len(), &enriched);
        if report.fanned_out_vendors > 0 {
            warn!(
                vendors = report.fanned_out_vendors,
                "vendor freight repeated on every brand row; do not sum FreightCost across brands"
            );
        }

        info!(table = destination, "Ingesting data");
        report.persisted_rows =
            Persister::new(SqliteSink::new(conn)).persist(destination, &enriched)?;
        info!("Completed: {}", report);
        Ok(report)
    }
}
