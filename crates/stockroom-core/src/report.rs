//! # Reporting Aggregator
//!
//! Monthly report derivation and CSV rendering, as pure functions over the
//! catalog and ledger.
//!
//! ## What The Report Is (And Isn't)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Monthly Report Derivation                              │
//! │                                                                         │
//! │  For each month January..June of the given year:                       │
//! │                                                                         │
//! │  utilized_items     = Σ quantity of borrow records that month          │
//! │  newly_purchased    = Σ restock adjustments that month                 │
//! │  defective_removed  = Σ defect adjustments that month                  │
//! │                                                                         │
//! │  opening_stock = current Σ master_count                                │
//! │                + that month's borrowed + purchased quantities          │
//! │  closing_stock = current Σ availability                                │
//! │                                                                         │
//! │  opening/closing are back-calculations from CURRENT totals, not        │
//! │  historical snapshots; they do not account for other months' changes.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{
    AdjustmentKind, LendingRecord, MonthlyStat, Product, RecordType, StockAdjustment,
};

/// The fixed report window: the first six calendar months.
pub const REPORT_MONTHS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

// =============================================================================
// Monthly Report
// =============================================================================

/// Derives the monthly report for January through June of `year`.
///
/// Bucketing is by year + month of each record's `created_at`, so
/// transactions from other years in the same calendar month do not
/// collide.
pub fn monthly_report(
    products: &[Product],
    records: &[LendingRecord],
    adjustments: &[StockAdjustment],
    year: i32,
) -> Vec<MonthlyStat> {
    let total_master: i64 = products.iter().map(|p| p.master_count).sum();
    let total_available: i64 = products.iter().map(|p| p.availability).sum();

    REPORT_MONTHS
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let month_number = index as u32 + 1;
            let in_month = |y: i32, m: u32| y == year && m == month_number;

            let borrowed: i64 = records
                .iter()
                .filter(|r| {
                    r.record_type == RecordType::Borrow
                        && in_month(r.created_at.year(), r.created_at.month())
                })
                .map(|r| r.quantity)
                .sum();

            let purchased: i64 = records
                .iter()
                .filter(|r| {
                    r.record_type == RecordType::Purchase
                        && in_month(r.created_at.year(), r.created_at.month())
                })
                .map(|r| r.quantity)
                .sum();

            let newly_purchased: i64 = adjustments
                .iter()
                .filter(|a| {
                    a.kind == AdjustmentKind::Restock
                        && in_month(a.created_at.year(), a.created_at.month())
                })
                .map(|a| a.quantity)
                .sum();

            let defective_removed: i64 = adjustments
                .iter()
                .filter(|a| {
                    a.kind == AdjustmentKind::Defect
                        && in_month(a.created_at.year(), a.created_at.month())
                })
                .map(|a| a.quantity)
                .sum();

            MonthlyStat {
                month: month.to_string(),
                opening_stock: total_master + borrowed + purchased,
                closing_stock: total_available,
                utilized_items: borrowed,
                newly_purchased,
                defective_removed,
            }
        })
        .collect()
}

/// Finds one month's row by name (case-insensitive).
pub fn find_month<'a>(stats: &'a [MonthlyStat], month: &str) -> CoreResult<&'a MonthlyStat> {
    stats
        .iter()
        .find(|s| s.month.eq_ignore_ascii_case(month))
        .ok_or_else(|| CoreError::UnknownMonth(month.to_string()))
}

// =============================================================================
// CSV Export
// =============================================================================

/// Renders one month as CSV: five `label,value` rows in the fixed order
/// Month, Opening Stock, Closing Stock, Purchased, Defective.
pub fn single_month_csv(stat: &MonthlyStat) -> String {
    let rows = [
        ("Month", stat.month.clone()),
        ("Opening Stock", stat.opening_stock.to_string()),
        ("Closing Stock", stat.closing_stock.to_string()),
        ("Purchased", stat.newly_purchased.to_string()),
        ("Defective", stat.defective_removed.to_string()),
    ];

    rows.iter()
        .map(|(label, value)| format!("{label},{value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the full report as CSV: a header row plus one row per month,
/// columns in the fixed order Month, Opening Stock, Closing Stock,
/// Purchased, Defective.
pub fn report_csv(stats: &[MonthlyStat]) -> String {
    let mut lines = vec!["Month,Opening Stock,Closing Stock,Purchased,Defective".to_string()];

    lines.extend(stats.iter().map(|s| {
        format!(
            "{},{},{},{},{}",
            s.month, s.opening_stock, s.closing_stock, s.newly_purchased, s.defective_removed
        )
    }));

    lines.join("\n")
}

// =============================================================================
// Catalog Summary
// =============================================================================

/// Aggregate figures over the whole catalog and ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_products: usize,
    pub total_master_count: i64,
    pub total_availability: i64,
    /// Total units ever borrowed.
    pub total_borrowed: i64,
    /// Total units ever purchased by students.
    pub total_purchased: i64,
    /// Share of owned units currently out on loan, 0-100, rounded.
    pub utilization_pct: i64,
}

impl CatalogSummary {
    /// Computes the summary from current catalog and ledger state.
    pub fn derive(products: &[Product], records: &[LendingRecord]) -> Self {
        let total_master_count: i64 = products.iter().map(|p| p.master_count).sum();
        let total_availability: i64 = products.iter().map(|p| p.availability).sum();

        let sum_by = |record_type: RecordType| -> i64 {
            records
                .iter()
                .filter(|r| r.record_type == record_type)
                .map(|r| r.quantity)
                .sum()
        };

        let utilization_pct = if total_master_count > 0 {
            let out = (total_master_count - total_availability) as f64;
            (out / total_master_count as f64 * 100.0).round() as i64
        } else {
            0
        };

        CatalogSummary {
            total_products: products.len(),
            total_master_count,
            total_availability,
            total_borrowed: sum_by(RecordType::Borrow),
            total_purchased: sum_by(RecordType::Purchase),
            utilization_pct,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(month: u32, record_type: RecordType, quantity: i64) -> LendingRecord {
        LendingRecord {
            id: format!("r-{month}-{quantity}"),
            product_id: "p1".to_string(),
            student_name: "John Doe".to_string(),
            usn: "1MS21CS001".to_string(),
            phone_number: "9876543210".to_string(),
            section: "A".to_string(),
            taken_date: NaiveDate::from_ymd_opt(2026, month, 1).unwrap(),
            return_date: None,
            record_type,
            quantity,
            created_at: Utc.with_ymd_and_hms(2026, month, 1, 10, 0, 0).unwrap(),
        }
    }

    fn adjustment(month: u32, kind: AdjustmentKind, quantity: i64) -> StockAdjustment {
        StockAdjustment {
            id: format!("a-{month}-{quantity}"),
            product_id: "p1".to_string(),
            kind,
            quantity,
            created_at: Utc.with_ymd_and_hms(2026, month, 2, 9, 0, 0).unwrap(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![Product::new("Arduino Uno", 50, 45), Product::new("Multimeter", 15, 12)]
    }

    #[test]
    fn test_report_has_six_months() {
        let report = monthly_report(&catalog(), &[], &[], 2026);
        assert_eq!(report.len(), 6);
        assert_eq!(report[0].month, "January");
        assert_eq!(report[5].month, "June");
    }

    #[test]
    fn test_utilized_sums_borrows_per_month() {
        let records = vec![
            record(3, RecordType::Borrow, 2),
            record(3, RecordType::Borrow, 3),
            record(4, RecordType::Borrow, 7),
            record(3, RecordType::Purchase, 1),
        ];
        let report = monthly_report(&catalog(), &records, &[], 2026);

        assert_eq!(report[2].utilized_items, 5); // March
        assert_eq!(report[3].utilized_items, 7); // April
        assert_eq!(report[0].utilized_items, 0);

        // Deterministic part of the whole report: total utilized equals the
        // total borrow quantity in the ledger.
        let total_utilized: i64 = report.iter().map(|m| m.utilized_items).sum();
        assert_eq!(total_utilized, 12);
    }

    #[test]
    fn test_opening_and_closing_stock() {
        let records = vec![
            record(2, RecordType::Borrow, 4),
            record(2, RecordType::Purchase, 1),
        ];
        let report = monthly_report(&catalog(), &records, &[], 2026);

        // Totals: master 65, availability 57.
        assert_eq!(report[1].opening_stock, 65 + 4 + 1);
        assert_eq!(report[1].closing_stock, 57);
        // A month with no activity still shows the current totals.
        assert_eq!(report[4].opening_stock, 65);
        assert_eq!(report[4].closing_stock, 57);
    }

    #[test]
    fn test_adjustment_aggregates() {
        let adjustments = vec![
            adjustment(1, AdjustmentKind::Restock, 10),
            adjustment(1, AdjustmentKind::Restock, 5),
            adjustment(1, AdjustmentKind::Defect, 2),
            adjustment(6, AdjustmentKind::Defect, 1),
        ];
        let report = monthly_report(&catalog(), &[], &adjustments, 2026);

        assert_eq!(report[0].newly_purchased, 15);
        assert_eq!(report[0].defective_removed, 2);
        assert_eq!(report[5].newly_purchased, 0);
        assert_eq!(report[5].defective_removed, 1);
    }

    #[test]
    fn test_bucketing_is_year_aware() {
        let mut old = record(3, RecordType::Borrow, 9);
        old.created_at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();

        let report = monthly_report(&catalog(), &[old], &[], 2026);
        assert_eq!(report[2].utilized_items, 0);

        let report_2025 = monthly_report(&catalog(), &[record(3, RecordType::Borrow, 9)], &[], 2025);
        assert_eq!(report_2025[2].utilized_items, 0);
    }

    #[test]
    fn test_find_month() {
        let report = monthly_report(&catalog(), &[], &[], 2026);
        assert_eq!(find_month(&report, "march").unwrap().month, "March");
        assert!(matches!(
            find_month(&report, "Smarch"),
            Err(CoreError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_single_month_csv_shape() {
        let report = monthly_report(&catalog(), &[], &[], 2026);
        let csv = single_month_csv(&report[0]);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in &lines {
            assert_eq!(line.split(',').count(), 2, "row {line} must have 2 fields");
        }
        assert_eq!(lines[0], "January,65");
    }

    #[test]
    fn test_report_csv_shape() {
        let report = monthly_report(&catalog(), &[], &[], 2026);
        let csv = report_csv(&report);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 7); // header + 6 months
        assert_eq!(
            lines[0],
            "Month,Opening Stock,Closing Stock,Purchased,Defective"
        );
        for line in &lines[1..] {
            assert_eq!(line.split(',').count(), 5);
        }
    }

    #[test]
    fn test_catalog_summary() {
        let records = vec![
            record(1, RecordType::Borrow, 3),
            record(2, RecordType::Borrow, 2),
            record(2, RecordType::Purchase, 4),
        ];
        let summary = CatalogSummary::derive(&catalog(), &records);

        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.total_master_count, 65);
        assert_eq!(summary.total_availability, 57);
        assert_eq!(summary.total_borrowed, 5);
        assert_eq!(summary.total_purchased, 4);
        // (65 - 57) / 65 = 12.3% → 12
        assert_eq!(summary.utilization_pct, 12);
    }

    #[test]
    fn test_summary_empty_catalog() {
        let summary = CatalogSummary::derive(&[], &[]);
        assert_eq!(summary.utilization_pct, 0);
        assert_eq!(summary.total_products, 0);
    }
}
