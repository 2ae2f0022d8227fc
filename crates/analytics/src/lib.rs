//! # Metrics Analytics
//!
//! Turns the raw business collections (orders, expenses, inventory and the
//! product catalog) into the reports behind the dashboard: sales by channel,
//! expense breakdowns, order statistics, profitability, stock health and the
//! best-selling products.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of where
//!   the records come from or how reports are shown. It depends only on
//!   `core-types` (Layer 0).
//! - **Stateless Calculation:** Every aggregator is a plain function from input
//!   slices to a report struct. The same input always yields the same report,
//!   and empty input yields the report's zero shape instead of an error.
//! - **Exact Arithmetic:** Amounts are `Decimal` end to end, so sums do not drift
//!   and no division can produce a non-number.
//!
//! ## Public API
//!
//! - `MetricsEngine`: Holds the product catalog and produces one report or the whole dashboard.
//! - The `calculate_*` aggregators and `get_top_selling_products`, usable on their own.
//! - `DateRange` / `filter_by_date_range`: Inclusive day windows over dated records.
//! - `format_currency`: Display formatting for amounts.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod currency;
pub mod date_range;
pub mod engine;
pub mod error;
pub mod expenses;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod profitability;
pub mod report;
pub mod resolver;
pub mod sales;
mod tally;
pub mod timeline;

// Re-export the key components to create a clean, public-facing API.
pub use currency::{CurrencyFormat, format_currency, format_currency_opt};
pub use date_range::{DateRange, Dated, filter_by_date_range, filter_dated};
pub use engine::MetricsEngine;
pub use error::AnalyticsError;
pub use expenses::calculate_expense_metrics;
pub use inventory::{calculate_inventory_metrics, stock_status};
pub use orders::calculate_order_metrics;
pub use products::get_top_selling_products;
pub use profitability::calculate_profitability_metrics;
pub use report::*;
pub use resolver::ProductResolver;
pub use sales::calculate_sales_metrics;
pub use timeline::monthly_financials;
