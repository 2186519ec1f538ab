//! # Stockroom Database Layer
//!
//! SQLite persistence for the Stockroom inventory and lending ledger.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      stockroom-db                                       │
//! │                                                                         │
//! │  ┌──────────┐  ┌────────────┐  ┌──────────────┐  ┌──────────────────┐ │
//! │  │  pool    │  │ migrations │  │  repository  │  │      ledger      │ │
//! │  │          │  │            │  │              │  │                  │ │
//! │  │ Database │  │ Embedded   │  │ Product /    │  │ LedgerService:   │ │
//! │  │ DbConfig │  │ SQL files  │  │ Record /     │  │ validate-then-   │ │
//! │  │ WAL mode │  │            │  │ Adjustment   │  │ commit mutations │ │
//! │  └──────────┘  └────────────┘  └──────────────┘  └──────────────────┘ │
//! │                                                                         │
//! │  Business rules live in stockroom-core; this crate sequences them      │
//! │  against SQLite transactions.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use stockroom_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./stockroom.db")).await?;
//! let product = db.ledger().add_product("Arduino Uno", 50, 45).await?;
//! let report = db.ledger().monthly_report(2026).await?;
//! ```

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

// Re-export main types for convenience
pub use error::{DbError, DbResult, LedgerError, LedgerResult};
pub use ledger::LedgerService;
pub use pool::{Database, DbConfig};
pub use repository::adjustment::AdjustmentRepository;
pub use repository::product::ProductRepository;
pub use repository::record::RecordRepository;

// Re-export the core domain types embedding apps need alongside the db
pub use stockroom_core::{
    AdjustmentKind, CatalogSummary, CoreError, LendingRecord, MonthlyStat, NewLendingRecord,
    Product, ProductPatch, RecordType, StockAdjustment,
};
