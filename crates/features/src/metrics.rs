//! Per-row profitability metrics.
//!
//! Every ratio resolves to 0 when its denominator is not positive.

/// Inputs to the derived metrics, after null filling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricInputs {
    pub total_sales_dollars: f64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: f64,
    pub total_purchase_quantity: f64,
}

/// Derived profitability metrics for one summary row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedMetrics {
    /// Sales dollars minus purchase dollars. May be negative.
    pub gross_profit: f64,
    /// Gross profit as a percentage of sales dollars.
    pub profit_margin: f64,
    /// Units sold per unit purchased.
    pub stock_turnover: f64,
    /// Sales dollars per purchase dollar.
    pub sales_to_purchase_ratio: f64,
}

/// Compute the derived metrics for one row.
#[inline]
pub fn derive_metrics(inputs: MetricInputs) -> DerivedMetrics {
    let gross_profit = inputs.total_sales_dollars - inputs.total_purchase_dollars;

    DerivedMetrics {
        gross_profit,
        profit_margin: guarded_ratio(gross_profit, inputs.total_sales_dollars) * 100.0,
        stock_turnover: guarded_ratio(
            inputs.total_sales_quantity,
            inputs.total_purchase_quantity,
        ),
        sales_to_purchase_ratio: guarded_ratio(
            inputs.total_sales_dollars,
            inputs.total_purchase_dollars,
        ),
    }
}

#[inline]
fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_sales() {
        let m = derive_metrics(MetricInputs {
            total_purchase_dollars: 50.0,
            total_purchase_quantity: 10.0,
            ..Default::default()
        });

        assert_eq!(m.gross_profit, -50.0);
        assert_eq!(m.profit_margin, 0.0);
        assert_eq!(m.stock_turnover, 0.0);
        assert_eq!(m.sales_to_purchase_ratio, 0.0);
    }

    #[test]
    fn test_with_sales() {
        let m = derive_metrics(MetricInputs {
            total_sales_dollars: 80.0,
            total_purchase_dollars: 50.0,
            total_sales_quantity: 8.0,
            total_purchase_quantity: 10.0,
        });

        assert_relative_eq!(m.gross_profit, 30.0);
        assert_relative_eq!(m.profit_margin, 37.5);
        assert_relative_eq!(m.stock_turnover, 0.8);
        assert_relative_eq!(m.sales_to_purchase_ratio, 1.6);
    }

    #[test]
    fn test_zero_purchases() {
        let m = derive_metrics(MetricInputs {
            total_sales_dollars: 20.0,
            total_sales_quantity: 2.0,
            ..Default::default()
        });

        assert_eq!(m.gross_profit, 20.0);
        assert_relative_eq!(m.profit_margin, 100.0);
        assert_eq!(m.stock_turnover, 0.0);
        assert_eq!(m.sales_to_purchase_ratio, 0.0);
    }

    #[test]
    fn test_negative_sales_dollars_use_safe_default() {
        // Returns can push summed sales negative; margin is only defined for positive sales.
        let m = derive_metrics(MetricInputs {
            total_sales_dollars: -10.0,
            total_purchase_dollars: 5.0,
            total_sales_quantity: -1.0,
            total_purchase_quantity: 1.0,
        });

        assert_eq!(m.gross_profit, -15.0);
        assert_eq!(m.profit_margin, 0.0);
        assert_eq!(m.stock_turnover, -1.0);
        assert_eq!(m.sales_to_purchase_ratio, -2.0);
    }

    #[test]
    fn test_gross_profit_is_exact_difference() {
        for (sales, purchases) in [(0.1, 0.3), (1e9, 1e-3), (123.456, 654.321)] {
            let m = derive_metrics(MetricInputs {
                total_sales_dollars: sales,
                total_purchase_dollars: purchases,
                ..Default::default()
            });
            assert_eq!(m.gross_profit, sales - purchases);
        }
    }
}
