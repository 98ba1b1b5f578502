//! Summary enrichment.
//!
//! Turns the aggregated result set into the persisted summary: coerces
//! `Volume`, trims descriptive text, fills missing numerics with zero and
//! appends the four derived metric columns. The input table is never
//! modified.

use partner_core::{columns, Error, Result, Table, Value};
use tracing::{debug, info};

use crate::cleaning::{coerce_numeric, fill_missing_numeric, trim_text};
use crate::metrics::{derive_metrics, DerivedMetrics, MetricInputs};

/// Text columns trimmed when present.
const TRIMMED_COLUMNS: [&str; 3] = [columns::VENDOR_NAME, columns::DESCRIPTION, columns::BRAND];

/// Column indices of the metric inputs.
struct MetricColumns {
    sales_dollars: usize,
    purchase_dollars: usize,
    sales_quantity: usize,
    purchase_quantity: usize,
}

impl MetricColumns {
    fn locate(table: &Table) -> Result<Self> {
        Ok(Self {
            sales_dollars: table.require_column(columns::TOTAL_SALES_DOLLARS)?,
            purchase_dollars: table.require_column(columns::TOTAL_PURCHASE_DOLLARS)?,
            sales_quantity: table.require_column(columns::TOTAL_SALES_QUANTITY)?,
            purchase_quantity: table.require_column(columns::TOTAL_PURCHASE_QUANTITY)?,
        })
    }

    fn inputs(&self, table: &Table, row: &[Value]) -> Result<MetricInputs> {
        let read = |idx: usize| {
            row[idx].as_f64().ok_or_else(|| {
                Error::schema(format!(
                    "column {} holds non-numeric value {}",
                    table.columns()[idx],
                    row[idx]
                ))
            })
        };
        Ok(MetricInputs {
            total_sales_dollars: read(self.sales_dollars)?,
            total_purchase_dollars: read(self.purchase_dollars)?,
            total_sales_quantity: read(self.sales_quantity)?,
            total_purchase_quantity: read(self.purchase_quantity)?,
        })
    }
}

/// Cleans the aggregated summary and derives profitability metrics.
#[derive(Debug, Clone, Default)]
pub struct Enricher;

impl Enricher {
    /// Create a new enricher.
    pub fn new() -> Self {
        Self
    }

    /// Produce the enriched copy of `input`.
    pub fn enrich(&self, input: &Table) -> Result<Table> {
        let volume = input.require_column(columns::VOLUME)?;
        let metric_columns = MetricColumns::locate(input)?;

        let mut table = input.clone();
        let trimmed: Vec<usize> = TRIMMED_COLUMNS
            .iter()
            .filter_map(|name| table.column_index(name))
            .collect();

        let mut unparsed_volumes = 0;
        for row in table.rows_mut() {
            let coerced = coerce_numeric(&row[volume]);
            if coerced.is_null() && !row[volume].is_null() {
                unparsed_volumes += 1;
            }
            row[volume] = coerced;
            for &idx in &trimmed {
                trim_text(&mut row[idx]);
            }
        }
        if unparsed_volumes > 0 {
            debug!(count = unparsed_volumes, "non-numeric volumes coerced to null");
        }

        let filled = fill_missing_numeric(&mut table);
        debug!(cells = filled, "filled missing numeric values with zero");

        let metrics = table
            .rows()
            .iter()
            .map(|row| metric_columns.inputs(&table, row).map(derive_metrics))
            .collect::<Result<Vec<DerivedMetrics>>>()?;

        let (mut gross, mut margin, mut turnover, mut ratio) = (
            Vec::with_capacity(metrics.len()),
            Vec::with_capacity(metrics.len()),
            Vec::with_capacity(metrics.len()),
            Vec::with_capacity(metrics.len()),
        );
        for m in &metrics {
            gross.push(Value::Real(m.gross_profit));
            margin.push(Value::Real(m.profit_margin));
            turnover.push(Value::Real(m.stock_turnover));
            ratio.push(Value::Real(m.sales_to_purchase_ratio));
        }
        table.push_column(columns::GROSS_PROFIT, gross)?;
        table.push_column(columns::PROFIT_MARGIN, margin)?;
        table.push_column(columns::STOCK_TURNOVER, turnover)?;
        table.push_column(columns::SALES_TO_PURCHASE_RATIO, ratio)?;

        info!(rows = table.len(), "enriched partner summary");
        Ok(table)
    }
}
