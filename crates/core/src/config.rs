//! Configuration structures for the partner summary pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration for a pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source database configuration.
    pub source: SourceConfig,
    /// Destination table configuration.
    pub destination: DestinationConfig,
    /// Operational log configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load a configuration from a JSON file. Missing sections fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every relation and table name is a plain SQL identifier.
    pub fn validate(&self) -> Result<()> {
        self.source.relations.validate()?;
        validate_identifier(&self.destination.table)
    }
}

/// Source database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the SQLite inventory database.
    pub database_path: PathBuf,
    /// Names of the source relations.
    pub relations: SourceRelations,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("inventory.db"),
            relations: SourceRelations::default(),
        }
    }
}

/// Names of the four relations the summary query reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRelations {
    /// Purchase transactions.
    pub purchases: String,
    /// Price reference (actual price and volume per brand).
    pub purchase_prices: String,
    /// Sale transactions.
    pub sales: String,
    /// Vendor invoices carrying freight.
    pub vendor_invoice: String,
}

impl SourceRelations {
    /// All relation names, in the order they are checked.
    pub fn names(&self) -> [&str; 4] {
        [
            self.purchases.as_str(),
            self.purchase_prices.as_str(),
            self.sales.as_str(),
            self.vendor_invoice.as_str(),
        ]
    }

    /// Validate every relation name.
    pub fn validate(&self) -> Result<()> {
        self.names().into_iter().try_for_each(validate_identifier)
    }
}

impl Default for SourceRelations {
    fn default() -> Self {
        Self {
            purchases: "purchases".to_string(),
            purchase_prices: "purchase_prices".to_string(),
            sales: "sale".to_string(),
            vendor_invoice: "vendor_invoice".to_string(),
        }
    }
}

/// Destination table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationConfig {
    /// Table replaced on every run.
    pub table: String,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            table: "partner_sales_summary".to_string(),
        }
    }
}

/// Operational log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append-only log file. `None` logs to stderr.
    pub file: Option<PathBuf>,
    /// Default filter directive (overridden by `RUST_LOG`).
    pub level: String,
    /// Rows shown in each stage preview.
    pub preview_rows: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from("logs/partner_summary.log")),
            level: "info".to_string(),
            preview_rows: 5,
        }
    }
}

/// Accept `[A-Za-z_][A-Za-z0-9_]*`; names are interpolated into SQL.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::config(format!("invalid SQL identifier: {:?}", name)))
    }
}
