//! End-of-run summary of a pipeline execution.

use std::collections::BTreeMap;
use std::fmt;

use partner_core::{columns, Table, Value};

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Destination table name.
    pub destination: String,
    /// Rows returned by the aggregation query.
    pub aggregated_rows: usize,
    /// Rows written to the destination. Zero until the write has happened.
    pub persisted_rows: usize,
    /// Rows with no matching sales.
    pub rows_without_sales: usize,
    /// Sum of GrossProfit over all rows.
    pub total_gross_profit: f64,
    /// Vendors whose freight cost is repeated on more than one brand row.
    pub fanned_out_vendors: usize,
}

impl PipelineReport {
    /// Summarize the enriched table.
    ///
    /// Only the metric, sales and freight columns are read. A missing column
    /// or a non-numeric cell counts as 0, so passthrough columns such as
    /// ActualPrice never make the report fail.
    pub fn from_summary(
        destination: impl Into<String>,
        aggregated_rows: usize,
        summary: &Table,
    ) -> Self {
        let number = |row: &[Value], column: &str| {
            summary
                .column_index(column)
                .and_then(|i| row[i].as_f64())
                .unwrap_or(0.0)
        };
        let vendor = summary.column_index(columns::VENDOR_NUMBER);

        let mut freight_rows: BTreeMap<String, usize> = BTreeMap::new();
        let mut rows_without_sales = 0;
        let mut total_gross_profit = 0.0;
        for row in summary.rows() {
            if number(row, columns::TOTAL_SALES_QUANTITY) == 0.0
                && number(row, columns::TOTAL_SALES_DOLLARS) == 0.0
            {
                rows_without_sales += 1;
            }
            total_gross_profit += number(row, columns::GROSS_PROFIT);
            if number(row, columns::FREIGHT_COST) != 0.0 {
                let key = vendor.map(|i| row[i].to_string()).unwrap_or_default();
                *freight_rows.entry(key).or_default() += 1;
            }
        }

        Self {
            destination: destination.into(),
            aggregated_rows,
            persisted_rows: 0,
            rows_without_sales,
            total_gross_profit,
            fanned_out_vendors: freight_rows.values().filter(|&&n| n > 1).count(),
        }
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} rows aggregated, {} persisted, {} without sales, gross profit {:.2}",
            self.destination,
            self.aggregated_rows,
            self.persisted_rows,
            self.rows_without_sales,
            self.total_gross_profit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(rows: Vec<Vec<Value>>) -> Table {
        let mut table = Table::new([
            columns::VENDOR_NUMBER,
            columns::ACTUAL_PRICE,
            columns::TOTAL_SALES_QUANTITY,
            columns::TOTAL_SALES_DOLLARS,
            columns::FREIGHT_COST,
            columns::GROSS_PROFIT,
        ]);
        for row in rows {
            table.push_row(row).unwrap();
        }
        table
    }

    #[test]
    fn test_non_numeric_passthrough_is_ignored() {
        let table = summary(vec![
            vec![
                Value::Integer(1),
                Value::Text("n/a".into()),
                Value::Integer(8),
                Value::Real(80.0),
                Value::Real(7.5),
                Value::Real(30.0),
            ],
            vec![
                Value::Integer(1),
                Value::Real(3.0),
                Value::Integer(0),
                Value::Real(0.0),
                Value::Real(7.5),
                Value::Real(-10.0),
            ],
        ]);

        let report = PipelineReport::from_summary("partner_sales_summary", 2, &table);

        assert_eq!(report.persisted_rows, 0);
        assert_eq!(report.rows_without_sales, 1);
        assert_eq!(report.total_gross_profit, 20.0);
        assert_eq!(report.fanned_out_vendors, 1);
    }

    #[test]
    fn test_missing_columns_count_as_zero() {
        let table = Table::new([columns::VENDOR_NUMBER]);
        let report = PipelineReport::from_summary("t", 0, &table);

        assert_eq!(report.rows_without_sales, 0);
        assert_eq!(report.total_gross_profit, 0.0);
        assert_eq!(report.fanned_out_vendors, 0);
    }
}
