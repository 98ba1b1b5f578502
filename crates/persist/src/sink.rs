//! Destination sinks.
//!
//! Replacing a table is split into two explicit steps so that sinks without
//! an atomic replace primitive can still honor it: `clear` drops (or
//! truncates) the destination, `bulk_insert` recreates and fills it.

use partner_core::config::validate_identifier;
use partner_core::{ColumnKind, Error, Result, Table, Value};
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection};
use tracing::debug;

/// A writable relational destination.
pub trait TableSink {
    /// Remove any existing table of this name.
    fn clear(&mut self, table: &str) -> Result<()>;

    /// Create the table from `data`'s schema and insert every row.
    ///
    /// Returns the number of rows written.
    fn bulk_insert(&mut self, table: &str, data: &Table) -> Result<usize>;
}

/// Sink writing into a SQLite database.
pub struct SqliteSink<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteSink<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl TableSink for SqliteSink<'_> {
    fn clear(&mut self, table: &str) -> Result<()> {
        validate_identifier(table)?;
        self.conn
            .execute_batch(&format!(r#"DROP TABLE IF EXISTS "{}""#, table))
            .map_err(|e| Error::write(format!("cannot drop {}: {}", table, e)))
    }

    fn bulk_insert(&mut self, table: &str, data: &Table) -> Result<usize> {
        validate_identifier(table)?;

        let create = create_statement(table, data);
        debug!(sql = %create, "creating destination table");

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| Error::write(format!("cannot begin transaction: {}", e)))?;
        tx.execute_batch(&create)
            .map_err(|e| Error::write(format!("cannot create {}: {}", table, e)))?;
        {
            let mut stmt = tx
                .prepare(&insert_statement(table, data))
                .map_err(|e| Error::write(format!("cannot prepare insert into {}: {}", table, e)))?;
            for row in data.rows() {
                stmt.execute(params_from_iter(row.iter().map(sql_value)))
                    .map_err(|e| Error::write(format!("cannot insert into {}: {}", table, e)))?;
            }
        }
        tx.commit()
            .map_err(|e| Error::write(format!("cannot commit {}: {}", table, e)))?;

        Ok(data.len())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `CREATE TABLE` with one declared type per inferred column kind.
///
/// Entirely null columns are left untyped.
fn create_statement(table: &str, data: &Table) -> String {
    let columns: Vec<String> = data
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| match data.column_kind(idx) {
            Some(ColumnKind::Integer) => format!("{} INTEGER", quote_ident(name)),
            Some(ColumnKind::Real) => format!("{} REAL", quote_ident(name)),
            Some(ColumnKind::Text) => format!("{} TEXT", quote_ident(name)),
            None => quote_ident(name),
        })
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(table), columns.join(", "))
}

fn insert_statement(table: &str, data: &Table) -> String {
    let names: Vec<String> = data.columns().iter().map(|c| quote_ident(c)).collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        names.join(", "),
        placeholders.join(", ")
    )
}

fn sql_value(value: &Value) -> ToSqlOutput<'_> {
    ToSqlOutput::Borrowed(match value {
        Value::Null => ValueRef::Null,
        Value::Integer(i) => ValueRef::Integer(*i),
        Value::Real(r) => ValueRef::Real(*r),
        Value::Text(s) => ValueRef::Text(s.as_bytes()),
    })
}
