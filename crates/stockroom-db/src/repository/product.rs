//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! Counter mutations that belong to the ledger rules (record application,
//! restock, defect removal) are sequenced by [`crate::LedgerService`]; this
//! repository provides the raw reads and writes it builds on.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::Product;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let results = repo.search("arduino").await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, master_count, availability, created_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Searches products by case-insensitive substring match on name.
    ///
    /// An empty query returns the full catalog, matching the behavior of a
    /// cleared search box.
    pub async fn search(&self, query: &str) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, "Searching products");

        if query.is_empty() {
            return self.list().await;
        }

        // LIKE is case-insensitive for ASCII in SQLite; % and _ in the
        // query are escaped so they match literally.
        let pattern = format!(
            "%{}%",
            query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
        );

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, master_count, availability, created_at
            FROM products
            WHERE name LIKE ?1 ESCAPE '\'
            ORDER BY name
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, master_count, availability, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

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

        Ok(product.clone())
    }

    /// Writes a product's full row back.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                master_count = ?3,
                availability = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.master_count)
        .bind(product.availability)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product and everything referencing it, atomically.
    ///
    /// The lending records and stock adjustments for the product go with
    /// it; rows for other products are untouched.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product with cascade");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM lending_records WHERE product_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM stock_adjustments WHERE product_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Nothing deleted: roll back the (empty) cascade too.
            tx.rollback().await?;
            return Err(DbError::not_found("Product", id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
