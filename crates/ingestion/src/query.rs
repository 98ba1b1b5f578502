//! The summary aggregation statement.
//!
//! Freight is summed per vendor and joined on vendor alone, so every brand
//! row of a vendor carries the vendor's full freight cost.

use partner_core::config::SourceRelations;

/// Build the aggregation query for the given relations.
///
/// Relation names must already be validated identifiers.
pub fn summary_query(relations: &SourceRelations) -> String {
    format!(
        r#"WITH FreightSummary AS (
    SELECT
        VendorNumber,
        SUM(Freight) AS FreightCost
    FROM "{invoice}"
    GROUP BY VendorNumber
),
PurchaseSummary AS (
    SELECT
        p.VendorNumber,
        p.VendorName,
        p.Brand,
        p.Description,
        p.PurchasePrice,
        pp.Price AS ActualPrice,
        pp.Volume,
        SUM(p.Quantity) AS TotalPurchaseQuantity,
        SUM(p.Dollars) AS TotalPurchaseDollars
    FROM "{purchases}" p
    JOIN "{prices}" pp
        ON p.Brand = pp.Brand
    WHERE p.PurchasePrice > 0
    GROUP BY p.VendorNumber, p.VendorName, p.Brand, p.Description,
             p.PurchasePrice, pp.Price, pp.Volume
),
SalesSummary AS (
    SELECT
        VendorNo,
        Brand,
        SUM(SalesQuantity) AS TotalSalesQuantity,
        SUM(SalesDollars) AS TotalSalesDollars,
        SUM(SalesPrice) AS TotalSalesPrice,
        SUM(ExciseTax) AS TotalExciseTax
    FROM "{sales}"
    GROUP BY VendorNo, Brand
)
SELECT
    ps.VendorNumber,
    ps.VendorName,
    ps.Brand,
    ps.Description,
    ps.PurchasePrice,
    ps.ActualPrice,
    ps.Volume,
    ps.TotalPurchaseQuantity,
    ps.TotalPurchaseDollars,
    ss.TotalSalesQuantity,
    ss.TotalSalesDollars,
    ss.TotalSalesPrice,
    ss.TotalExciseTax,
    fs.FreightCost
FROM PurchaseSummary ps
LEFT JOIN SalesSummary ss
    ON ps.VendorNumber = ss.VendorNo
    AND ps.Brand = ss.Brand
LEFT JOIN FreightSummary fs
    ON ps.VendorNumber = fs.VendorNumber
ORDER BY ps.TotalPurchaseDollars DESC,
         ps.VendorNumber, ps.VendorName, ps.Brand, ps.Description,
         ps.PurchasePrice, ps.ActualPrice, ps.Volume"#,
        invoice = relations.vendor_invoice,
        purchases = relations.purchases,
        prices = relations.purchase_prices,
        sales = relations.sales,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_uses_configured_relations() {
        let relations = SourceRelations {
            sales: "sale_2024".to_string(),
            ..Default::default()
        };
        let sql = summary_query(&relations);

        assert!(sql.contains(r#"FROM "sale_2024""#));
        assert!(sql.contains(r#"FROM "purchases" p"#));
        assert!(sql.contains(r#"JOIN "purchase_prices" pp"#));
        assert!(sql.contains(r#"FROM "vendor_invoice""#));
        assert!(sql.contains("WHERE p.PurchasePrice > 0"));
    }
}
