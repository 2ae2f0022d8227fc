//! Report shapes returned by the aggregators.
//!
//! Every struct has a zero-value `Default` that doubles as the result for empty
//! input. Field names serialize in camelCase because chart components and the
//! spreadsheet export consume them directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label used where a "top" entry is asked of an empty series.
pub const NOT_AVAILABLE: &str = "N/A";

/// A labelled amount in a categorical series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: Decimal,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn not_available() -> Self {
        Self::new(NOT_AVAILABLE, Decimal::ZERO)
    }
}

/// A labelled count in a categorical series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub value: usize,
}

impl NamedCount {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// --- Sales ---

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfit {
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesMetrics {
    /// Sum of totals over paid orders.
    pub revenue: Decimal,
    /// Every order, whatever its status or payment.
    pub total_orders: usize,
    /// Order volume per channel.
    pub source_data: Vec<NamedCount>,
    /// Paid revenue and profit after cost of goods and ad spend, per channel.
    pub profitability_data: Vec<ChannelProfit>,
}

// --- Top sellers ---

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    /// The catalog item id, or the product name for free-text products.
    pub key: String,
    pub name: String,
    pub category: String,
    pub quantity: Decimal,
    pub revenue: Decimal,
}

// --- Expenses ---

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub name: String,
    pub value: Decimal,
    /// Category of the first expense seen under this name.
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseMetrics {
    pub total: Decimal,
    /// Expenses as a percentage of paid revenue. Zero when there is no revenue.
    pub expense_sales_ratio: Decimal,
    pub category_data: Vec<NamedValue>,
    pub top_category: NamedValue,
    pub top_items: Vec<ExpenseItem>,
}

impl Default for ExpenseMetrics {
    fn default() -> Self {
        Self {
            total: Decimal::ZERO,
            expense_sales_ratio: Decimal::ZERO,
            category_data: Vec::new(),
            top_category: NamedValue::not_available(),
            top_items: Vec::new(),
        }
    }
}

// --- Orders ---

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyVolume {
    /// `YYYY-MM`.
    pub month: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetrics {
    pub total_orders: usize,
    /// Orders that are neither cancelled nor returned.
    pub valid_orders: usize,
    /// Counts over all orders, by status label.
    pub status_data: Vec<NamedCount>,
    /// Two-decimal average total of valid orders, `"0"` without any.
    pub avg_order_value: String,
    /// Average days from creation to dispatch, `"0"` without qualifying orders.
    pub avg_processing_time: String,
    pub monthly_volume: Vec<MonthlyVolume>,
    pub district_data: Vec<NamedCount>,
    pub top_district: String,
    /// Percentage of customers with more than one valid order.
    pub repeat_rate: Decimal,
    pub unique_customers: usize,
    pub repeat_customers: usize,
}

impl Default for OrderMetrics {
    fn default() -> Self {
        Self {
            total_orders: 0,
            valid_orders: 0,
            status_data: Vec::new(),
            avg_order_value: "0".to_string(),
            avg_processing_time: "0".to_string(),
            monthly_volume: Vec::new(),
            district_data: Vec::new(),
            top_district: NOT_AVAILABLE.to_string(),
            repeat_rate: Decimal::ZERO,
            unique_customers: 0,
            repeat_customers: 0,
        }
    }
}

// --- Profitability ---

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinancials {
    /// `YYYY-MM`.
    pub month: String,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityMetrics {
    pub revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    /// Net profit as a percentage of revenue. Zero when there is no revenue.
    pub margin: Decimal,
    pub avg_revenue_per_order: Decimal,
    /// All expenses per valid order, not cost of goods.
    pub avg_cost_per_order: Decimal,
    pub avg_profit_per_order: Decimal,
    pub monthly_data: Vec<MonthlyFinancials>,
    pub pie_data: Vec<NamedValue>,
    /// Paid revenue minus attributed ad spend per channel, highest first.
    pub profitability_by_source: Vec<NamedValue>,
}

// --- Inventory ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [
        StockStatus::InStock,
        StockStatus::LowStock,
        StockStatus::OutOfStock,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: Option<String>,
    pub item_name: String,
    pub category: String,
    pub current_stock: Decimal,
    pub reorder_level: Decimal,
    pub status: StockStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMetrics {
    pub total_items: usize,
    /// Sum of stock on hand at unit cost.
    pub total_value: Decimal,
    /// Items at or under their reorder level, lowest stock first.
    pub low_stock_items: Vec<LowStockItem>,
    /// Always the three stock statuses, in `StockStatus::ALL` order.
    pub status_data: Vec<NamedCount>,
}

impl Default for InventoryMetrics {
    fn default() -> Self {
        Self {
            total_items: 0,
            total_value: Decimal::ZERO,
            low_stock_items: Vec::new(),
            status_data: StockStatus::ALL
                .iter()
                .map(|status| NamedCount::new(status.label(), 0))
                .collect(),
        }
    }
}

// --- Dashboard ---

/// Every report over one set of collections, as produced by
/// [`crate::MetricsEngine::dashboard`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub sales: SalesMetrics,
    pub expenses: ExpenseMetrics,
    pub orders: OrderMetrics,
    pub profitability: ProfitabilityMetrics,
    pub inventory: InventoryMetrics,
    pub top_products: Vec<TopProduct>,
    pub monthly_financials: Vec<MonthlyFinancials>,
}
