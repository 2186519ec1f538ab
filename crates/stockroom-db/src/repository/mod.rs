//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LedgerService / embedding app                                         │
//! │       │                                                                 │
//! │       │  db.products().search("arduino")                               │
//! │       ▼                                                                 │
//! │  ProductRepository / RecordRepository / AdjustmentRepository           │
//! │       │                                                                 │
//! │       │  SQL query                                                      │
//! │       ▼                                                                 │
//! │  SQLite database                                                       │
//! │                                                                         │
//! │  Benefits: SQL isolated in one place, easy to test, clean seams        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and substring search
//! - [`record::RecordRepository`] - Append-only lending ledger
//! - [`adjustment::AdjustmentRepository`] - Restock / defect events

pub mod adjustment;
pub mod product;
pub mod record;
