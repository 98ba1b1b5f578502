//! Core data types for the partner summary pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column names of the partner summary, in output order.
pub mod columns {
    pub const VENDOR_NUMBER: &str = "VendorNumber";
    pub const VENDOR_NAME: &str = "VendorName";
    pub const BRAND: &str = "Brand";
    pub const DESCRIPTION: &str = "Description";
    pub const PURCHASE_PRICE: &str = "PurchasePrice";
    pub const ACTUAL_PRICE: &str = "ActualPrice";
    pub const VOLUME: &str = "Volume";
    pub const TOTAL_PURCHASE_QUANTITY: &str = "TotalPurchaseQuantity";
    pub const TOTAL_PURCHASE_DOLLARS: &str = "TotalPurchaseDollars";
    pub const TOTAL_SALES_QUANTITY: &str = "TotalSalesQuantity";
    pub const TOTAL_SALES_DOLLARS: &str = "TotalSalesDollars";
    pub const TOTAL_SALES_PRICE: &str = "TotalSalesPrice";
    pub const TOTAL_EXCISE_TAX: &str = "TotalExciseTax";
    pub const FREIGHT_COST: &str = "FreightCost";
    pub const GROSS_PROFIT: &str = "GrossProfit";
    pub const PROFIT_MARGIN: &str = "ProfitMargin";
    pub const STOCK_TURNOVER: &str = "StockTurnover";
    pub const SALES_TO_PURCHASE_RATIO: &str = "SalesToPurchaseRatio";

    /// Columns produced by the aggregation query.
    pub const AGGREGATED: [&str; 14] = [
        VENDOR_NUMBER,
        VENDOR_NAME,
        BRAND,
        DESCRIPTION,
        PURCHASE_PRICE,
        ACTUAL_PRICE,
        VOLUME,
        TOTAL_PURCHASE_QUANTITY,
        TOTAL_PURCHASE_DOLLARS,
        TOTAL_SALES_QUANTITY,
        TOTAL_SALES_DOLLARS,
        TOTAL_SALES_PRICE,
        TOTAL_EXCISE_TAX,
        FREIGHT_COST,
    ];

    /// Columns appended by enrichment.
    pub const DERIVED: [&str; 4] = [
        GROSS_PROFIT,
        PROFIT_MARGIN,
        STOCK_TURNOVER,
        SALES_TO_PURCHASE_RATIO,
    ];
}

/// A single cell, mirroring the SQLite storage classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Real(_))
    }

    /// Numeric view of the cell. Text is not parsed.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Kind of a column, inferred from its non-null cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
}

impl ColumnKind {
    /// Numeric columns get their nulls filled during enrichment.
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Real)
    }
}

/// An ordered, named, row-major result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<Value>] {
        &mut self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row. Its arity must match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::schema(format!(
                "row has {} values but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a column holding one value per existing row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.column_index(&name).is_some() {
            return Err(Error::schema(format!("duplicate column {}", name)));
        }
        if values.len() != self.rows.len() {
            return Err(Error::schema(format!(
                "column {} has {} values but table has {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        self.columns.push(name);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a column that must be present.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| Error::schema(format!("missing column {}", name)))
    }

    /// Iterate over the cells of one column.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Infer the kind of a column. `None` when every cell is null.
    pub fn column_kind(&self, index: usize) -> Option<ColumnKind> {
        let mut kind = None;
        for value in self.column_values(index) {
            kind = match (kind, value) {
                (_, Value::Null) => kind,
                (_, Value::Text(_)) => return Some(ColumnKind::Text),
                (None | Some(ColumnKind::Integer), Value::Integer(_)) => Some(ColumnKind::Integer),
                (_, _) => Some(ColumnKind::Real),
            };
        }
        kind
    }

    /// First `n` rows as a new table.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Plain-text rendering of the first `n` rows, for log snapshots.
    pub fn preview(&self, n: usize) -> String {
        let mut out = self.columns.join(" | ");
        for row in self.rows.iter().take(n) {
            out.push('\n');
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            out.push_str(&cells.join(" | "));
        }
        if self.rows.len() > n {
            out.push_str(&format!("\n... ({} rows total)", self.rows.len()));
        }
        out
    }
}

/// One enriched summary row, read back from a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerSummaryRow {
    pub vendor_number: Value,
    pub vendor_name: Value,
    pub brand: Value,
    pub description: Value,
    pub purchase_price: f64,
    pub actual_price: f64,
    pub volume: f64,
    pub total_purchase_quantity: f64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: f64,
    pub total_sales_dollars: f64,
    pub total_sales_price: f64,
    pub total_excise_tax: f64,
    pub freight_cost: f64,
    pub gross_profit: f64,
    pub profit_margin: f64,
    pub stock_turnover: f64,
    pub sales_to_purchase_ratio: f64,
}

impl PartnerSummaryRow {
    /// Read every row of an enriched table.
    ///
    /// All 18 summary columns must be present and the numeric ones must hold
    /// numbers (nulls are already filled by enrichment).
    pub fn read_all(table: &Table) -> Result<Vec<Self>> {
        let key = |name| table.require_column(name);
        let num_idx: Vec<usize> = [
            columns::PURCHASE_PRICE,
            columns::ACTUAL_PRICE,
            columns::VOLUME,
            columns::TOTAL_PURCHASE_QUANTITY,
            columns::TOTAL_PURCHASE_DOLLARS,
            columns::TOTAL_SALES_QUANTITY,
            columns::TOTAL_SALES_DOLLARS,
            columns::TOTAL_SALES_PRICE,
            columns::TOTAL_EXCISE_TAX,
            columns::FREIGHT_COST,
            columns::GROSS_PROFIT,
            columns::PROFIT_MARGIN,
            columns::STOCK_TURNOVER,
            columns::SALES_TO_PURCHASE_RATIO,
        ]
        .into_iter()
        .map(key)
        .collect::<Result<_>>()?;
        let vendor_number = key(columns::VENDOR_NUMBER)?;
        let vendor_name = key(columns::VENDOR_NAME)?;
        let brand = key(columns::BRAND)?;
        let description = key(columns::DESCRIPTION)?;

        table
            .rows()
            .iter()
            .map(|row| -> Result<Self> {
                let mut nums = [0.0; 14];
                for (slot, &idx) in nums.iter_mut().zip(&num_idx) {
                    *slot = row[idx].as_f64().ok_or_else(|| {
                        Error::schema(format!(
                            "column {} holds non-numeric value {}",
                            table.columns()[idx],
                            row[idx]
                        ))
                    })?;
                }
                Ok(Self {
                    vendor_number: row[vendor_number].clone(),
                    vendor_name: row[vendor_name].clone(),
                    brand: row[brand].clone(),
                    description: row[description].clone(),
                    purchase_price: nums[0],
                    actual_price: nums[1],
                    volume: nums[2],
                    total_purchase_quantity: nums[3],
                    total_purchase_dollars: nums[4],
                    total_sales_quantity: nums[5],
                    total_sales_dollars: nums[6],
                    total_sales_price: nums[7],
                    total_excise_tax: nums[8],
                    freight_cost: nums[9],
                    gross_profit: nums[10],
                    profit_margin: nums[11],
                    stock_turnover: nums[12],
                    sales_to_purchase_ratio: nums[13],
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["VendorNumber", "Brand", "Dollars"]);
        table
            .push_row(vec![1i64.into(), "B1".into(), 50.0.into()])
            .unwrap();
        table
            .push_row(vec![2i64.into(), "B2".into(), Value::Null])
            .unwrap();
        table
    }

    #[test]
    fn test_push_row_arity() {
        let mut table = sample();
        let err = table.push_row(vec![3i64.into()]).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_push_column() {
        let mut table = sample();
        table
            .push_column("Flag", vec![Value::Integer(1), Value::Integer(0)])
            .unwrap();
        assert_eq!(table.columns().len(), 4);
        assert_eq!(table.rows()[1][3], Value::Integer(0));

        assert!(table.push_column("Flag", vec![Value::Null, Value::Null]).is_err());
        assert!(table.push_column("Short", vec![Value::Null]).is_err());
    }

    #[test]
    fn test_require_column() {
        let table = sample();
        assert_eq!(table.require_column("Brand").unwrap(), 1);
        assert!(matches!(
            table.require_column("Volume"),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn test_column_kind_inference() {
        let mut table = Table::new(["a", "b", "c", "d"]);
        table
            .push_row(vec![1i64.into(), 1i64.into(), "x".into(), Value::Null])
            .unwrap();
        table
            .push_row(vec![2i64.into(), 2.5.into(), 3i64.into(), Value::Null])
            .unwrap();

        assert_eq!(table.column_kind(0), Some(ColumnKind::Integer));
        assert_eq!(table.column_kind(1), Some(ColumnKind::Real));
        assert_eq!(table.column_kind(2), Some(ColumnKind::Text));
        assert_eq!(table.column_kind(3), None);
    }

    #[test]
    fn test_head_and_preview() {
        let table = sample();
        let head = table.head(1);
        assert_eq!(head.len(), 1);
        assert_eq!(head.columns(), table.columns());

        let preview = table.preview(1);
        assert!(preview.starts_with("VendorNumber | Brand | Dollars\n1 | B1 | 50"));
        assert!(preview.ends_with("(2 rows total)"));
    }

    #[test]
    fn test_read_all_requires_summary_columns() {
        let err = PartnerSummaryRow::read_all(&sample()).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
