//! Purchase/sale/freight aggregation.
//!
//! Runs the summary query against the source database and reads the joined
//! result set into a [`Table`]. Read-only.

use partner_core::config::SourceRelations;
use partner_core::{Error, Result, Table, Value};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::query::summary_query;

/// Aggregates the source relations into one joined result set.
pub struct Aggregator<'c> {
    conn: &'c Connection,
    relations: SourceRelations,
}

impl<'c> Aggregator<'c> {
    /// Create an aggregator over an open connection.
    pub fn new(conn: &'c Connection, relations: SourceRelations) -> Self {
        Self { conn, relations }
    }

    /// Fail on the first configured relation that is not a table or view.
    pub fn verify_relations(&self) -> Result<()> {
        for name in self.relations.names() {
            let found: i64 = self
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master
                     WHERE type IN ('table', 'view') AND name = ?1",
                    [name],
                    |row| row.get(0),
                )
                .map_err(|e| Error::data_source(format!("cannot read schema: {}", e)))?;
            if found == 0 {
                return Err(Error::data_source(format!("missing relation {}", name)));
            }
        }
        Ok(())
    }

    /// Run the aggregation and collect every row.
    ///
    /// An empty table (with all columns) is returned when no purchase passes
    /// the unit price filter.
    pub fn aggregate(&self) -> Result<Table> {
        self.relations.validate()?;
        self.verify_relations()?;

        let sql = summary_query(&self.relations);
        debug!(%sql, "running summary query");

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| Error::data_source(format!("cannot prepare summary query: {}", e)))?;
        let mut table = Table::new(stmt.column_names());
        let width = table.columns().len();

        let mut rows = stmt
            .query([])
            .map_err(|e| Error::data_source(format!("summary query failed: {}", e)))?;
        while let Some(row) = rows
            .next()
            .map_err(|e| Error::data_source(format!("cannot read summary row: {}", e)))?
        {
            let values = (0..width)
                .map(|i| row.get_ref(i).map(to_value))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::data_source(format!("cannot read summary cell: {}", e)))?;
            table.push_row(values)?;
        }

        info!(rows = table.len(), "aggregated partner summary");
        Ok(table)
    }
}

fn to_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(t) | ValueRef::Blob(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
    }
}
