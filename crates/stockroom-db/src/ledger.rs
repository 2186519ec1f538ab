//! # Ledger Service
//!
//! The single invariant-checked mutation path over the product catalog and
//! the lending ledger.
//!
//! ## Validate-Then-Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  create_record: one atomic unit                         │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                     │
//! │       │                                                                 │
//! │       ├── load product            → ProductNotFound                    │
//! │       ├── validate (7 rules)      → ValidationError / Insufficient*    │
//! │       │      (nothing written yet, so failures commit nothing)         │
//! │       ├── guarded counter UPDATE  (WHERE counter >= quantity)          │
//! │       │      two concurrent requests cannot both pass the stock        │
//! │       │      check and over-subtract                                   │
//! │       └── append ledger row                                            │
//! │       │                                                                 │
//! │  COMMIT (or roll back entirely)                                        │
//! │                                                                         │
//! │  No observer ever sees the ledger row without the counter delta,       │
//! │  or the delta without the row.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every counter mutation in the system goes through this service, so the
//! `0 <= availability <= master_count` invariant is checked centrally
//! instead of being re-derived at each call site.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, LedgerError, LedgerResult};
use stockroom_core::{
    report, validation, AdjustmentKind, CatalogSummary, CoreError, LendingRecord, MonthlyStat,
    NewLendingRecord, Product, ProductPatch, RecordType, StockAdjustment,
};

/// Owned store over catalog + ledger. Cheap to clone; inject it wherever
/// mutations happen instead of reaching for module-level state.
#[derive(Debug, Clone)]
pub struct LedgerService {
    pool: SqlitePool,
}

impl LedgerService {
    /// Creates a new LedgerService over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerService { pool }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Registers a new product.
    ///
    /// `availability` is clamped to `min(availability, master_count)`;
    /// counters must be non-negative and the name non-blank.
    pub async fn add_product(
        &self,
        name: &str,
        master_count: i64,
        availability: i64,
    ) -> LedgerResult<Product> {
        validation::validate_product_name(name).map_err(CoreError::from)?;
        validation::validate_count("master count", master_count).map_err(CoreError::from)?;
        validation::validate_count("availability", availability).map_err(CoreError::from)?;

        let product = Product::new(name.trim(), master_count, availability);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, master_count, availability, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.master_count)
        .bind(product.availability)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        info!(id = %product.id, name = %product.name, "Product registered");
        Ok(product)
    }

    /// Merges a partial update into a product.
    ///
    /// Re-validates the counter invariant on the merged result and rejects
    /// (never clamps) a patch that would leave `availability > master_count`
    /// or a negative counter. Unknown ids are a distinct not-found error,
    /// not a silent no-op.
    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> LedgerResult<Product> {
        let mut tx = self.pool.begin().await?;

        let mut product = fetch_product(&mut tx, id).await?;

        if let Some(name) = patch.name {
            validation::validate_product_name(&name).map_err(CoreError::from)?;
            product.name = name.trim().to_string();
        }
        if let Some(master_count) = patch.master_count {
            product.master_count = master_count;
        }
        if let Some(availability) = patch.availability {
            product.availability = availability;
        }

        if !product.invariant_holds() {
            return Err(CoreError::InvariantViolation {
                id: product.id,
                availability: product.availability,
                master_count: product.master_count,
            }
            .into());
        }

        sqlx::query(
            r#"
            UPDATE products SET name = ?2, master_count = ?3, availability = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.master_count)
        .bind(product.availability)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product together with every lending record and stock
    /// adjustment referencing it, atomically.
    pub async fn delete_product(&self, id: &str) -> LedgerResult<()> {
        let mut tx = self.pool.begin().await?;

        // Existence check first so the caller gets ProductNotFound, not a
        // silent no-op.
        fetch_product(&mut tx, id).await?;

        sqlx::query("DELETE FROM lending_records WHERE product_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM stock_adjustments WHERE product_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(id = %id, "Product deleted with its records");
        Ok(())
    }

    /// Manager-side restock intake: both counters grow by `quantity`, and a
    /// restock adjustment is written in the same transaction so the monthly
    /// report can aggregate it.
    pub async fn restock(&self, id: &str, quantity: i64) -> LedgerResult<Product> {
        validation::validate_quantity(quantity).map_err(CoreError::from)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET master_count = master_count + ?2,
                availability = availability + ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ProductNotFound(id.to_string()).into());
        }

        let adjustment = StockAdjustment::new(id, AdjustmentKind::Restock, quantity);
        insert_adjustment(&mut tx, &adjustment).await?;

        let product = fetch_product(&mut tx, id).await?;
        tx.commit().await?;

        info!(id = %id, quantity, "Restocked product");
        Ok(product)
    }

    /// Removes defective units from the lending pool: `availability` drops
    /// by `quantity`, floored at zero; `master_count` is untouched (the
    /// units are still owned, just not lendable). The adjustment row
    /// records the applied delta so report aggregates reflect what actually
    /// left the pool.
    pub async fn mark_defective(&self, id: &str, quantity: i64) -> LedgerResult<Product> {
        validation::validate_quantity(quantity).map_err(CoreError::from)?;

        let mut tx = self.pool.begin().await?;

        let product = fetch_product(&mut tx, id).await?;
        let applied = quantity.min(product.availability);

        sqlx::query(
            r#"
            UPDATE products
            SET availability = MAX(availability - ?2, 0)
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        if applied > 0 {
            let adjustment = StockAdjustment::new(id, AdjustmentKind::Defect, applied);
            insert_adjustment(&mut tx, &adjustment).await?;
        }

        let product = fetch_product(&mut tx, id).await?;
        tx.commit().await?;

        info!(id = %id, requested = quantity, applied, "Marked units defective");
        Ok(product)
    }

    /// Gets one product, or a distinct not-found error.
    pub async fn get_product(&self, id: &str) -> LedgerResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, master_count, availability, created_at FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
    }

    /// Lists the catalog, sorted by name.
    pub async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        Ok(crate::repository::product::ProductRepository::new(self.pool.clone())
            .list()
            .await?)
    }

    /// Case-insensitive substring search on product name.
    pub async fn search_products(&self, query: &str) -> LedgerResult<Vec<Product>> {
        Ok(crate::repository::product::ProductRepository::new(self.pool.clone())
            .search(query)
            .await?)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Validates a borrow/purchase request and, if every rule passes,
    /// atomically appends the ledger row and applies the counter delta.
    ///
    /// Counter effects:
    /// - borrow: `availability -= quantity`
    /// - purchase: `master_count -= quantity`, `availability -= quantity`
    ///   (floored at zero)
    ///
    /// Failures return before anything is written.
    pub async fn create_record(&self, input: NewLendingRecord) -> LedgerResult<LendingRecord> {
        let mut tx = self.pool.begin().await?;

        let product = fetch_product(&mut tx, &input.product_id).await?;

        // Full validation before any write; produces the normalized record.
        let record = validation::validate_record(&product, &input)?;

        // The WHERE guard re-asserts the stock check at write time, so a
        // concurrent committer can never make both requests pass rule 6/7
        // and over-subtract.
        let result = match record.record_type {
            RecordType::Borrow => {
                sqlx::query(
                    r#"
                    UPDATE products
                    SET availability = MAX(availability - ?2, 0)
                    WHERE id = ?1 AND availability >= ?2
                    "#,
                )
                .bind(&record.product_id)
                .bind(record.quantity)
                .execute(&mut *tx)
                .await?
            }
            RecordType::Purchase => {
                sqlx::query(
                    r#"
                    UPDATE products
                    SET master_count = MAX(master_count - ?2, 0),
                        availability = MAX(availability - ?2, 0)
                    WHERE id = ?1 AND master_count >= ?2
                    "#,
                )
                .bind(&record.product_id)
                .bind(record.quantity)
                .execute(&mut *tx)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            // Lost a race after validation: surface the same insufficient
            // stock errors the validator would have produced.
            let err = match record.record_type {
                RecordType::Borrow => CoreError::InsufficientAvailable {
                    name: product.name,
                    available: product.availability,
                    requested: record.quantity,
                },
                RecordType::Purchase => CoreError::InsufficientOwned {
                    name: product.name,
                    owned: product.master_count,
                    requested: record.quantity,
                },
            };
            return Err(err.into());
        }

        sqlx::query(
            r#"
            INSERT INTO lending_records (
                id, product_id, student_name, usn, phone_number, section,
                taken_date, return_date, record_type, quantity, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&record.id)
        .bind(&record.product_id)
        .bind(&record.student_name)
        .bind(&record.usn)
        .bind(&record.phone_number)
        .bind(&record.section)
        .bind(record.taken_date)
        .bind(record.return_date)
        .bind(record.record_type)
        .bind(record.quantity)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            id = %record.id,
            product_id = %record.product_id,
            record_type = ?record.record_type,
            quantity = record.quantity,
            "Lending record committed"
        );
        Ok(record)
    }

    /// Lists the ledger rows for one product, oldest first.
    pub async fn records_for_product(&self, product_id: &str) -> LedgerResult<Vec<LendingRecord>> {
        Ok(crate::repository::record::RecordRepository::new(self.pool.clone())
            .list_for_product(product_id)
            .await?)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Derives the January-June monthly report for `year`.
    pub async fn monthly_report(&self, year: i32) -> LedgerResult<Vec<MonthlyStat>> {
        let (products, records, adjustments) = self.load_report_inputs().await?;

        debug!(
            products = products.len(),
            records = records.len(),
            adjustments = adjustments.len(),
            year,
            "Deriving monthly report"
        );

        Ok(report::monthly_report(&products, &records, &adjustments, year))
    }

    /// CSV export of one month's row (5 `label,value` lines).
    pub async fn month_csv(&self, year: i32, month: &str) -> LedgerResult<String> {
        let stats = self.monthly_report(year).await?;
        let stat = report::find_month(&stats, month).map_err(LedgerError::Core)?;
        Ok(report::single_month_csv(stat))
    }

    /// CSV export of the whole report (header plus one line per month).
    pub async fn report_csv(&self, year: i32) -> LedgerResult<String> {
        let stats = self.monthly_report(year).await?;
        Ok(report::report_csv(&stats))
    }

    /// Aggregate catalog/ledger figures (totals, utilization).
    pub async fn summary(&self) -> LedgerResult<CatalogSummary> {
        let (products, records, _) = self.load_report_inputs().await?;
        Ok(CatalogSummary::derive(&products, &records))
    }

    async fn load_report_inputs(
        &self,
    ) -> LedgerResult<(Vec<Product>, Vec<LendingRecord>, Vec<StockAdjustment>)> {
        let products = crate::repository::product::ProductRepository::new(self.pool.clone())
            .list()
            .await?;
        let records = crate::repository::record::RecordRepository::new(self.pool.clone())
            .list_all()
            .await?;
        let adjustments = crate::repository::adjustment::AdjustmentRepository::new(self.pool.clone())
            .list_all()
            .await?;

        Ok((products, records, adjustments))
    }
}

// =============================================================================
// Transaction Helpers
// =============================================================================

async fn fetch_product(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: &str,
) -> LedgerResult<Product> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, master_count, availability, created_at FROM products WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    product.ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
}

async fn insert_adjustment(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    adjustment: &StockAdjustment,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO stock_adjustments (id, product_id, kind, quantity, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&adjustment.id)
    .bind(&adjustment.product_id)
    .bind(adjustment.kind)
    .bind(adjustment.quantity)
    .bind(adjustment.created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{NaiveDate, TimeZone, Utc};
    use stockroom_core::ValidationError;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn input(product_id: &str, record_type: RecordType, quantity: i64) -> NewLendingRecord {
        NewLendingRecord {
            product_id: product_id.to_string(),
            student_name: "John Doe".to_string(),
            usn: "1ms21cs001".to_string(),
            phone_number: "9876543210".to_string(),
            section: "a".to_string(),
            taken_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            return_date: Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()),
            record_type,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_add_product_clamps_availability() {
        let db = db().await;
        let product = db.ledger().add_product("X", 10, 15).await.unwrap();
        assert_eq!(product.availability, 10);

        let loaded = db.ledger().get_product(&product.id).await.unwrap();
        assert_eq!(loaded.availability, 10);
    }

    #[tokio::test]
    async fn test_add_product_rejects_bad_input() {
        let db = db().await;
        assert!(db.ledger().add_product("  ", 5, 5).await.is_err());
        assert!(db.ledger().add_product("X", -1, 0).await.is_err());
    }

    #[tokio::test]
    async fn test_borrow_decreases_only_availability() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Arduino Uno", 50, 45).await.unwrap();

        ledger
            .create_record(input(&product.id, RecordType::Borrow, 2))
            .await
            .unwrap();

        let after = ledger.get_product(&product.id).await.unwrap();
        assert_eq!(after.master_count, 50);
        assert_eq!(after.availability, 43);
    }

    #[tokio::test]
    async fn test_purchase_decreases_both_counters_and_appends_once() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Breadboard", 100, 85).await.unwrap();

        ledger
            .create_record(input(&product.id, RecordType::Purchase, 5))
            .await
            .unwrap();

        let after = ledger.get_product(&product.id).await.unwrap();
        assert_eq!(after.master_count, 95);
        assert_eq!(after.availability, 80);
        assert_eq!(db.records().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_over_borrow_fails_and_leaves_state_unchanged() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Multimeter", 15, 12).await.unwrap();

        let err = ledger
            .create_record(input(&product.id, RecordType::Borrow, 13))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::InsufficientAvailable { .. })
        ));
        assert!(err.is_validation());

        // Product counters untouched, ledger untouched.
        let after = ledger.get_product(&product.id).await.unwrap();
        assert_eq!(after.availability, 12);
        assert_eq!(after.master_count, 15);
        assert_eq!(db.records().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_over_purchase_fails() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("LED Pack", 20, 18).await.unwrap();

        let err = ledger
            .create_record(input(&product.id, RecordType::Purchase, 21))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::InsufficientOwned { .. })
        ));
        assert_eq!(db.records().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_commits_nothing() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Multimeter", 15, 12).await.unwrap();

        let mut bad = input(&product.id, RecordType::Borrow, 2);
        bad.usn = "SHORT".to_string();

        let err = ledger.create_record(bad).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::Validation(ValidationError::WrongLength { .. }))
        ));
        assert_eq!(db.records().count().await.unwrap(), 0);
        assert_eq!(
            ledger.get_product(&product.id).await.unwrap().availability,
            12
        );
    }

    #[tokio::test]
    async fn test_record_fields_are_normalized_on_commit() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Arduino Uno", 50, 45).await.unwrap();

        let record = ledger
            .create_record(input(&product.id, RecordType::Borrow, 1))
            .await
            .unwrap();
        assert_eq!(record.usn, "1MS21CS001");
        assert_eq!(record.section, "A");

        let stored = ledger.records_for_product(&product.id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].usn, "1MS21CS001");
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let db = db().await;
        let err = db
            .ledger()
            .create_record(input("missing", RecordType::Borrow, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::ProductNotFound(_))
        ));
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_update_product_rejects_invariant_violation() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Breadboard", 100, 85).await.unwrap();

        let err = ledger
            .update_product(
                &product.id,
                ProductPatch {
                    availability: Some(120),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::InvariantViolation { .. })
        ));

        // Rejected, so nothing changed.
        let after = ledger.get_product(&product.id).await.unwrap();
        assert_eq!(after.availability, 85);

        // A consistent patch goes through.
        let updated = ledger
            .update_product(
                &product.id,
                ProductPatch {
                    name: Some("Breadboard (large)".to_string()),
                    master_count: Some(110),
                    availability: Some(95),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Breadboard (large)");
        assert_eq!(updated.master_count, 110);
        assert_eq!(updated.availability, 95);
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found() {
        let db = db().await;
        let err = db
            .ledger()
            .update_product("missing", ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_restock_raises_both_counters_and_logs_adjustment() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Multimeter", 15, 12).await.unwrap();

        let after = ledger.restock(&product.id, 5).await.unwrap();
        assert_eq!(after.master_count, 20);
        assert_eq!(after.availability, 17);

        let adjustments = db.adjustments().list_for_product(&product.id).await.unwrap();
        assert_eq!(adjustments.len(), 1);
        assert_eq!(adjustments[0].kind, AdjustmentKind::Restock);
        assert_eq!(adjustments[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_mark_defective_floors_at_zero_and_logs_applied_delta() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("LED Pack", 20, 3).await.unwrap();

        let after = ledger.mark_defective(&product.id, 10).await.unwrap();
        assert_eq!(after.availability, 0);
        assert_eq!(after.master_count, 20); // still owned

        let adjustments = db.adjustments().list_for_product(&product.id).await.unwrap();
        assert_eq!(adjustments.len(), 1);
        assert_eq!(adjustments[0].kind, AdjustmentKind::Defect);
        assert_eq!(adjustments[0].quantity, 3); // applied, not requested
    }

    #[tokio::test]
    async fn test_delete_product_cascades_to_own_records_only() {
        let db = db().await;
        let ledger = db.ledger();

        let a = ledger.add_product("Arduino Uno", 50, 45).await.unwrap();
        let b = ledger.add_product("Raspberry Pi 4", 30, 25).await.unwrap();

        ledger
            .create_record(input(&a.id, RecordType::Borrow, 2))
            .await
            .unwrap();
        ledger
            .create_record(input(&b.id, RecordType::Borrow, 1))
            .await
            .unwrap();
        ledger.restock(&a.id, 5).await.unwrap();

        ledger.delete_product(&a.id).await.unwrap();

        assert!(ledger.get_product(&a.id).await.is_err());
        assert!(ledger.records_for_product(&a.id).await.unwrap().is_empty());
        assert!(db
            .adjustments()
            .list_for_product(&a.id)
            .await
            .unwrap()
            .is_empty());

        // The other product's rows are untouched.
        assert_eq!(ledger.records_for_product(&b.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_monthly_report_aggregates_ledger() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Breadboard", 100, 85).await.unwrap();

        // Insert ledger rows with controlled timestamps directly through
        // the repository so they land in known report buckets.
        let mut march = ledger
            .create_record(input(&product.id, RecordType::Borrow, 4))
            .await
            .unwrap();
        march.id = "fixed-march".to_string();
        march.created_at = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        db.records().insert(&march).await.unwrap();

        let report = ledger.monthly_report(2026).await.unwrap();
        assert_eq!(report.len(), 6);
        assert_eq!(report[2].month, "March");
        assert_eq!(report[2].utilized_items, 4);

        let total_borrowed: i64 = db
            .records()
            .list_all()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.record_type == RecordType::Borrow)
            .map(|r| r.quantity)
            .sum();

        // If every record falls in the window, the deterministic column
        // sums to the ledger's total borrow quantity.
        let in_window: i64 = report.iter().map(|m| m.utilized_items).sum();
        assert!(in_window <= total_borrowed);
    }

    #[tokio::test]
    async fn test_csv_exports() {
        let db = db().await;
        let ledger = db.ledger();
        ledger.add_product("Multimeter", 15, 12).await.unwrap();

        let single = ledger.month_csv(2026, "March").await.unwrap();
        let lines: Vec<&str> = single.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in &lines {
            assert_eq!(line.split(',').count(), 2);
        }

        let all = ledger.report_csv(2026).await.unwrap();
        assert_eq!(all.lines().count(), 7);

        let err = ledger.month_csv(2026, "Smarch").await.unwrap_err();
        assert!(matches!(err, LedgerError::Core(CoreError::UnknownMonth(_))));
    }

    #[tokio::test]
    async fn test_summary() {
        let db = db().await;
        let ledger = db.ledger();
        let product = ledger.add_product("Arduino Uno", 50, 45).await.unwrap();

        ledger
            .create_record(input(&product.id, RecordType::Borrow, 5))
            .await
            .unwrap();

        let summary = ledger.summary().await.unwrap();
        assert_eq!(summary.total_products, 1);
        assert_eq!(summary.total_master_count, 50);
        assert_eq!(summary.total_availability, 40);
        assert_eq!(summary.total_borrowed, 5);
        assert_eq!(summary.utilization_pct, 20);
    }
}
