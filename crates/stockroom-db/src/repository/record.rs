//! # Lending Record Repository
//!
//! Database operations for the append-only borrow/purchase ledger.
//!
//! There is deliberately no update or delete here: records are immutable
//! once committed, and only the product delete cascade removes them.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::LendingRecord;

const RECORD_COLUMNS: &str = "id, product_id, student_name, usn, phone_number, section, \
     taken_date, return_date, record_type, quantity, created_at";

/// Repository for lending record database operations.
#[derive(Debug, Clone)]
pub struct RecordRepository {
    pool: SqlitePool,
}

impl RecordRepository {
    /// Creates a new RecordRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RecordRepository { pool }
    }

    /// Appends a record to the ledger.
    ///
    /// Callers go through `LedgerService::create_record`, which validates
    /// and pairs this append with the product counter update in one
    /// transaction.
    pub async fn insert(&self, record: &LendingRecord) -> DbResult<()> {
        debug!(
            id = %record.id,
            product_id = %record.product_id,
            quantity = record.quantity,
            "Appending lending record"
        );

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
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all records for one product, oldest first.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<LendingRecord>> {
        let records = sqlx::query_as::<_, LendingRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM lending_records \
             WHERE product_id = ?1 ORDER BY created_at"
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Lists the entire ledger, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<LendingRecord>> {
        let records = sqlx::query_as::<_, LendingRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM lending_records ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Counts ledger entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lending_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
