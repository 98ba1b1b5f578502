//! Cell-level cleaning: numeric coercion, text trimming, null filling.

use partner_core::{ColumnKind, Table, Value};

/// Coerce a cell to a real number.
///
/// Text is trimmed and parsed; anything that does not parse to a number
/// becomes `Null` rather than an error.
pub fn coerce_numeric(value: &Value) -> Value {
    match value {
        Value::Integer(i) => Value::Real(*i as f64),
        Value::Real(r) if r.is_nan() => Value::Null,
        Value::Real(r) => Value::Real(*r),
        Value::Text(s) => match s.trim().parse::<f64>() {
            Ok(r) if !r.is_nan() => Value::Real(r),
            _ => Value::Null,
        },
        Value::Null => Value::Null,
    }
}

/// Trim surrounding whitespace from a text cell. Other cells pass through.
pub fn trim_text(value: &mut Value) {
    if let Value::Text(s) = value {
        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            *s = trimmed.to_string();
        }
    }
}

/// Replace nulls with zero in every numeric (or entirely null) column.
///
/// Integer columns get `Integer(0)`, everything else `Real(0.0)`.
/// Returns the number of cells filled.
pub fn fill_missing_numeric(table: &mut Table) -> usize {
    let fills: Vec<(usize, Value)> = (0..table.columns().len())
        .filter_map(|idx| match table.column_kind(idx) {
            Some(ColumnKind::Text) => None,
            Some(ColumnKind::Integer) => Some((idx, Value::Integer(0))),
            Some(ColumnKind::Real) | None => Some((idx, Value::Real(0.0))),
        })
        .collect();

    let mut filled = 0;
    for row in table.rows_mut() {
        for (idx, zero) in &fills {
            if row[*idx].is_null() {
                row[*idx] = zero.clone();
                filled += 1;
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric(&Value::Text("750".into())), Value::Real(750.0));
        assert_eq!(coerce_numeric(&Value::Text(" 1.75 ".into())), Value::Real(1.75));
        assert_eq!(coerce_numeric(&Value::Integer(375)), Value::Real(375.0));
        assert_eq!(coerce_numeric(&Value::Real(50.0)), Value::Real(50.0));
    }

    #[test]
    fn test_coerce_non_numeric_to_null() {
        assert_eq!(coerce_numeric(&Value::Text("750ml".into())), Value::Null);
        assert_eq!(coerce_numeric(&Value::Text("Unknown".into())), Value::Null);
        assert_eq!(coerce_numeric(&Value::Text("".into())), Value::Null);
        assert_eq!(coerce_numeric(&Value::Text("NaN".into())), Value::Null);
        assert_eq!(coerce_numeric(&Value::Null), Value::Null);
    }

    #[test]
    fn test_trim_text() {
        let mut v = Value::Text("  SOUTHERN WINE & SPIRITS NE  ".into());
        trim_text(&mut v);
        assert_eq!(v, Value::Text("SOUTHERN WINE & SPIRITS NE".into()));

        let mut n = Value::Integer(58);
        trim_text(&mut n);
        assert_eq!(n, Value::Integer(58));

        let mut null = Value::Null;
        trim_text(&mut null);
        assert!(null.is_null());
    }

    #[test]
    fn test_fill_missing_numeric() {
        let mut table = Table::new(["Name", "Qty", "Dollars", "Empty"]);
        table
            .push_row(vec!["a".into(), 1i64.into(), 2.5.into(), Value::Null])
            .unwrap();
        table
            .push_row(vec![Value::Null, Value::Null, Value::Null, Value::Null])
            .unwrap();

        let filled = fill_missing_numeric(&mut table);

        assert_eq!(filled, 4);
        let row = &table.rows()[1];
        assert!(row[0].is_null());
        assert_eq!(row[1], Value::Integer(0));
        assert_eq!(row[2], Value::Real(0.0));
        assert_eq!(row[3], Value::Real(0.0));
    }
}
