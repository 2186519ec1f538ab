//! # Domain Types
//!
//! Core domain types for the Stockroom ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  LendingRecord  │   │ StockAdjustment │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  product_id (FK)│   │  product_id (FK)│       │
//! │  │  master_count   │   │  borrower info  │   │  kind           │       │
//! │  │  availability   │   │  record_type    │   │  quantity       │       │
//! │  └─────────────────┘   │  quantity       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  Invariant: 0 <= availability <= master_count, after every mutation    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Counter Semantics
//! - `master_count`: total units the pool owns
//! - `availability`: units currently free to lend
//! - borrow: availability goes down, master count untouched
//! - purchase: both go down (permanent withdrawal)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Product
// =============================================================================

/// An inventoried item type with a total owned count and a currently
/// lendable count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4), immutable once created.
    pub id: String,

    /// Display name shown to staff.
    pub name: String,

    /// Total units owned. Non-negative.
    pub master_count: i64,

    /// Units currently free to lend. Non-negative, never above
    /// `master_count`.
    pub availability: i64,

    /// When the product was registered.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product with a fresh id and creation timestamp.
    ///
    /// `availability` is clamped to `min(availability, master_count)`:
    /// caller input is silently corrected rather than rejected, matching
    /// how stock is registered at intake.
    pub fn new(name: impl Into<String>, master_count: i64, availability: i64) -> Self {
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            master_count,
            availability: availability.min(master_count),
            created_at: Utc::now(),
        }
    }

    /// Checks whether `quantity` units can be borrowed right now.
    #[inline]
    pub fn can_borrow(&self, quantity: i64) -> bool {
        quantity <= self.availability
    }

    /// Checks whether `quantity` units can be purchased (permanently
    /// withdrawn) right now.
    #[inline]
    pub fn can_purchase(&self, quantity: i64) -> bool {
        quantity <= self.master_count
    }

    /// True when less than 30% of the owned units are still available.
    pub fn is_low_stock(&self) -> bool {
        self.master_count > 0
            && (self.availability as f64) / (self.master_count as f64) < crate::LOW_STOCK_RATIO
    }

    /// Verifies the counter invariant `0 <= availability <= master_count`.
    #[inline]
    pub fn invariant_holds(&self) -> bool {
        0 <= self.availability && self.availability <= self.master_count
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// Partial update for a product. `None` fields are left unchanged.
///
/// Applied only through the ledger's invariant-checked update path; a patch
/// that would leave `availability > master_count` is rejected, not clamped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub master_count: Option<i64>,
    pub availability: Option<i64>,
}

// =============================================================================
// Record Type
// =============================================================================

/// The kind of a lending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// Temporary withdrawal; reduces availability only.
    Borrow,
    /// Permanent withdrawal; reduces both availability and master count.
    Purchase,
}

// =============================================================================
// Lending Record
// =============================================================================

/// A borrow or purchase event that consumed stock from a product.
///
/// Records are append-only: once committed they are never updated or
/// deleted, except as a cascade of deleting their product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LendingRecord {
    /// Unique identifier (UUID v4), immutable.
    pub id: String,

    /// Owning product.
    pub product_id: String,

    /// Borrower display name (trimmed on storage).
    pub student_name: String,

    /// University serial number, exactly 10 characters, upper-cased.
    pub usn: String,

    /// Phone number, exactly 10 characters (digits filtered upstream).
    pub phone_number: String,

    /// Class section, upper-cased.
    pub section: String,

    /// Calendar date the items were taken.
    pub taken_date: NaiveDate,

    /// Optional return date, strictly later than `taken_date`.
    pub return_date: Option<NaiveDate>,

    /// Borrow or purchase.
    pub record_type: RecordType,

    /// Units consumed. Always positive.
    pub quantity: i64,

    /// When the record was committed; drives monthly report bucketing.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// New Lending Record (input)
// =============================================================================

/// Raw input for a lending record, before validation and normalization.
///
/// String fields arrive as typed by the user; `validation::validate_record`
/// checks them in order and produces the normalized stored form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLendingRecord {
    pub product_id: String,
    pub student_name: String,
    pub usn: String,
    pub phone_number: String,
    pub section: String,
    pub taken_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub record_type: RecordType,
    pub quantity: i64,
}

// =============================================================================
// Stock Adjustment
// =============================================================================

/// The kind of a manager-side stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// New inventory arrived; both counters increased.
    Restock,
    /// Item pulled from the lending pool (broken, in repair); availability
    /// decreased, master count untouched.
    Defect,
}

/// A manager-side stock event: restock intake or defect removal.
///
/// These feed the monthly report's `newly_purchased` and
/// `defective_removed` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockAdjustment {
    pub id: String,
    pub product_id: String,
    pub kind: AdjustmentKind,
    /// Applied delta. For defect removals this is the quantity actually
    /// taken out of the pool after flooring availability at zero.
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl StockAdjustment {
    /// Creates an adjustment with a fresh id and timestamp.
    pub fn new(product_id: impl Into<String>, kind: AdjustmentKind, quantity: i64) -> Self {
        StockAdjustment {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.into(),
            kind,
            quantity,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Monthly Stat
// =============================================================================

/// Aggregate stock/flow statistics for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    /// Month name ("January" .. "June").
    pub month: String,

    /// Back-calculated stock before this month's consumption: current total
    /// master count plus this month's borrowed and purchased quantities.
    /// Not a point-in-time snapshot.
    pub opening_stock: i64,

    /// Current total availability across all products. Reflects current
    /// state regardless of month.
    pub closing_stock: i64,

    /// Units borrowed by students this month.
    pub utilized_items: i64,

    /// Units added by manager restocks this month.
    pub newly_purchased: i64,

    /// Units removed as defective this month.
    pub defective_removed: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_clamps_availability() {
        let p = Product::new("X", 10, 15);
        assert_eq!(p.master_count, 10);
        assert_eq!(p.availability, 10);
        assert!(p.invariant_holds());
    }

    #[test]
    fn test_new_product_keeps_valid_availability() {
        let p = Product::new("Arduino Uno", 50, 45);
        assert_eq!(p.availability, 45);
        assert!(!p.id.is_empty());
    }

    #[test]
    fn test_can_borrow_and_purchase() {
        let p = Product::new("Multimeter", 15, 12);
        assert!(p.can_borrow(12));
        assert!(!p.can_borrow(13));
        assert!(p.can_purchase(15));
        assert!(!p.can_purchase(16));
    }

    #[test]
    fn test_low_stock() {
        let mut p = Product::new("LED Pack", 20, 18);
        assert!(!p.is_low_stock());

        p.availability = 5;
        assert!(p.is_low_stock());

        // Zero master count never counts as low stock
        let empty = Product::new("Ghost", 0, 0);
        assert!(!empty.is_low_stock());
    }

    #[test]
    fn test_adjustment_new() {
        let adj = StockAdjustment::new("p1", AdjustmentKind::Defect, 3);
        assert_eq!(adj.product_id, "p1");
        assert_eq!(adj.kind, AdjustmentKind::Defect);
        assert_eq!(adj.quantity, 3);
        assert!(!adj.id.is_empty());
    }
}
