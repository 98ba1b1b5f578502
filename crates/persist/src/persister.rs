//! Destination table replacement.

use partner_core::{Result, Table};
use tracing::info;

use crate::sink::TableSink;

/// Replaces a destination table with the enriched summary.
///
/// Not transactional across the two steps: a failure after `clear` leaves
/// the destination absent and the whole pipeline must be rerun.
pub struct Persister<S: TableSink> {
    sink: S,
}

impl<S: TableSink> Persister<S> {
    /// Create a persister writing through `sink`.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Drop `table` and write every row of `data` into a fresh one.
    pub fn persist(&mut self, table: &str, data: &Table) -> Result<usize> {
        self.sink.clear(table)?;
        let written = self.sink.bulk_insert(table, data)?;
        info!(table, rows = written, "persisted partner summary");
        Ok(written)
    }

    /// Consume the persister, returning its sink.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SqliteSink;
    use partner_core::{Error, Value};
    use rusqlite::Connection;

    /// Records calls and optionally fails the insert.
    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
        fail_insert: bool,
    }

    impl TableSink for RecordingSink {
        fn clear(&mut self, table: &str) -> Result<()> {
            self.calls.push(format!("clear {}", table));
            Ok(())
        }

        fn bulk_insert(&mut self, table: &str, data: &Table) -> Result<usize> {
            self.calls.push(format!("insert {} {}", table, data.len()));
            if self.fail_insert {
                Err(Error::write("connection lost"))
            } else {
                Ok(data.len())
            }
        }
    }

    fn sample(rows: i64) -> Table {
        let mut table = Table::new(["VendorNumber", "GrossProfit"]);
        for i in 0..rows {
            table
                .push_row(vec![Value::Integer(i), Value::Real(i as f64 * 1.5)])
                .unwrap();
        }
        table
    }

    #[test]
    fn test_clear_then_insert() {
        let mut persister = Persister::new(RecordingSink::default());

        let written = persister.persist("partner_sales_summary", &sample(3)).unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            persister.into_inner().calls,
            vec!["clear partner_sales_summary", "insert partner_sales_summary 3"]
        );
    }

    #[test]
    fn test_insert_failure_propagates() {
        let mut persister = Persister::new(RecordingSink {
            fail_insert: true,
            ..Default::default()
        });

        let err = persister.persist("summary", &sample(1)).unwrap_err();
        assert!(matches!(err, Error::Write(_)));
    }

    #[test]
    fn test_replaces_previous_contents() {
        let conn = Connection::open_in_memory().unwrap();
        let mut persister = Persister::new(SqliteSink::new(&conn));

        persister.persist("summary", &sample(5)).unwrap();
        persister.persist("summary", &sample(2)).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM summary", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_empty_summary_creates_table() {
        let conn = Connection::open_in_memory().unwrap();
        let mut persister = Persister::new(SqliteSink::new(&conn));

        let written = persister.persist("summary", &sample(0)).unwrap();

        assert_eq!(written, 0);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM summary", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
