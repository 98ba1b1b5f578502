//! `partner-summary` — rebuild the partner sales summary table.
//!
//! Takes no arguments. Configuration is read from the JSON file named by
//! `PARTNER_SUMMARY_CONFIG` when set, otherwise defaults are used: source
//! `inventory.db`, destination table `partner_sales_summary`, log appended to
//! `logs/partner_summary.log`.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use partner_core::Config;
use partner_summary::{logging, Pipeline};
use rusqlite::{Connection, OpenFlags};
use tracing::{error, info};

const CONFIG_ENV: &str = "PARTNER_SUMMARY_CONFIG";

fn load_config() -> Result<Config> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Config::from_json_file(&path)
            .with_context(|| format!("loading {}", Path::new(&path).display())),
        None => Ok(Config::default()),
    }
}

fn run(config: Config) -> Result<()> {
    let db_path = config.source.database_path.clone();
    let conn = Connection::open_with_flags(
        &db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("opening source database {}", db_path.display()))?;
    info!(database = %db_path.display(), "opened source database");

    let pipeline = Pipeline::new(config)?;
    pipeline.run(&conn)?;
    Ok(())
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("partner-summary: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("partner-summary: cannot initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("pipeline failed: {:#}", e);
            eprintln!("partner-summary: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
