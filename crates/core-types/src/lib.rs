//! # Core Types
//!
//! The shared vocabulary of the metrics workspace: the records handed over by the
//! storage layer (orders, expenses, inventory, product catalog) and the canonical
//! `Order` shape every aggregator works on.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** No knowledge of reports or aggregation. Depends on nothing in
//!   the workspace.
//! - **Lenient at the boundary:** Stored records are loosely typed. Numbers may
//!   arrive as strings, ids as numbers, and legacy orders carry a single flat item
//!   instead of `orderItems`. All of that is absorbed during deserialization so
//!   downstream code only ever sees one well-typed shape.

pub mod amount;
pub mod dates;
pub mod enums;
pub mod error;
pub mod lenient;
pub mod order;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::ItemShape;
pub use error::CoreError;
pub use order::Order;
pub use structs::{
    CatalogCategory, CatalogItem, ExpenseRecord, InventoryItem, LineItem, OrderRecord,
    ProductCatalog,
};

/// Returns the trimmed value when it holds anything besides whitespace.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
