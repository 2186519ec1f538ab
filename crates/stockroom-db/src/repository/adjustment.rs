//! # Stock Adjustment Repository
//!
//! Database operations for manager-side restock / defect events. These rows
//! back the `Purchased` and `Defective` columns of the monthly report.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::StockAdjustment;

/// Repository for stock adjustment events.
#[derive(Debug, Clone)]
pub struct AdjustmentRepository {
    pool: SqlitePool,
}

impl AdjustmentRepository {
    /// Creates a new AdjustmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AdjustmentRepository { pool }
    }

    /// Appends an adjustment event.
    pub async fn insert(&self, adjustment: &StockAdjustment) -> DbResult<()> {
        debug!(
            id = %adjustment.id,
            product_id = %adjustment.product_id,
            quantity = adjustment.quantity,
            "Recording stock adjustment"
        );

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
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all adjustments, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<StockAdjustment>> {
        let adjustments = sqlx::query_as::<_, StockAdjustment>(
            r#"
            SELECT id, product_id, kind, quantity, created_at
            FROM stock_adjustments
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(adjustments)
    }

    /// Lists adjustments for one product, oldest first.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<StockAdjustment>> {
        let adjustments = sqlx::query_as::<_, StockAdjustment>(
            r#"
            SELECT id, product_id, kind, quantity, created_at
            FROM stock_adjustments
            WHERE product_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(adjustments)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::{AdjustmentKind, Product};

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let product = Product::new("Breadboard", 100, 85);
        db.products().insert(&product).await.unwrap();

        let repo = db.adjustments();
        repo.insert(&StockAdjustment::new(&product.id, AdjustmentKind::Restock, 10))
            .await
            .unwrap();
        repo.insert(&StockAdjustment::new(&product.id, AdjustmentKind::Defect, 3))
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);

        let for_product = repo.list_for_product(&product.id).await.unwrap();
        assert_eq!(for_product.len(), 2);
        assert_eq!(for_product[0].kind, AdjustmentKind::Restock);
        assert_eq!(for_product[1].quantity, 3);
    }
}
