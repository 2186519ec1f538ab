//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate is the heart of the Stockroom inventory ledger. It contains
//! the bookkeeping rules that keep a product's two running counters
//! consistent as borrow/purchase records are applied, plus the derived
//! monthly report.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockroom Architecture                             │
//! │                                                                         │
//! │  Embedding app (UI, CLI, service layer, ...)                           │
//! │       │                                                                 │
//! │  ┌────▼────────────────────────────────────────────────────────────┐   │
//! │  │              ★ stockroom-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐ ┌────────────┐ ┌──────────┐ ┌──────────────┐  │   │
//! │  │   │   types   │ │ validation │ │  report  │ │     auth     │  │   │
//! │  │   │  Product  │ │   rules    │ │ monthly  │ │  Credential  │  │   │
//! │  │   │  Record   │ │   checks   │ │ stats+CSV│ │  gate        │  │   │
//! │  │   └───────────┘ └────────────┘ └──────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └────┬────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │  ┌────▼────────────────────────────────────────────────────────────┐   │
//! │  │                stockroom-db (Database Layer)                    │   │
//! │  │         SQLite queries, migrations, repositories, ledger        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LendingRecord, StockAdjustment, ...)
//! - [`validation`] - Lending-record validation and normalization
//! - [`report`] - Monthly report aggregation and CSV rendering
//! - [`auth`] - Hashed credential gate
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic over its inputs
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Counter Invariant**: `0 <= availability <= master_count` is enforced
//!    by every mutation path, never merely assumed
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::Credential;
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use report::{monthly_report, report_csv, single_month_csv, CatalogSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Exact length of a University Serial Number (USN).
///
/// Borrower identity rule carried over from the lab's registration format
/// (e.g. `1MS21CS001`).
pub const USN_LENGTH: usize = 10;

/// Exact length of a borrower phone number.
///
/// Digits-only filtering happens upstream at the input layer; the ledger
/// re-checks only the length.
pub const PHONE_LENGTH: usize = 10;

/// Fraction of `master_count` below which a product counts as low stock.
///
/// Used by the catalog summary to flag items that are mostly lent out.
pub const LOW_STOCK_RATIO: f64 = 0.3;
