use crate::date_range::{DateRange, filter_dated};
use crate::expenses::calculate_expense_metrics;
use crate::inventory::calculate_inventory_metrics;
use crate::orders::calculate_order_metrics;
use crate::products::rank_products;
use crate::profitability::calculate_profitability_metrics;
use crate::report::{
    DashboardReport, ExpenseMetrics, InventoryMetrics, OrderMetrics, ProfitabilityMetrics,
    SalesMetrics, TopProduct,
};
use crate::resolver::ProductResolver;
use crate::sales::calculate_sales_metrics;
use crate::timeline::monthly_financials;
use core_types::{ExpenseRecord, InventoryItem, Order, ProductCatalog};

/// A stateless calculator over the order, expense and inventory collections.
///
/// The only thing it holds is the product catalog used to name line items, so
/// the same engine can be reused for any number of reports.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    catalog: Option<ProductCatalog>,
}

impl MetricsEngine {
    pub fn new(catalog: Option<ProductCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> Option<&ProductCatalog> {
        self.catalog.as_ref()
    }

    pub fn sales(
        &self,
        orders: &[Order],
        inventory: &[InventoryItem],
        expenses: &[ExpenseRecord],
    ) -> SalesMetrics {
        calculate_sales_metrics(orders, inventory, expenses)
    }

    pub fn expenses(&self, expenses: &[ExpenseRecord], orders: &[Order]) -> ExpenseMetrics {
        calculate_expense_metrics(expenses, orders)
    }

    pub fn orders(&self, orders: &[Order]) -> OrderMetrics {
        calculate_order_metrics(orders)
    }

    pub fn profitability(
        &self,
        orders: &[Order],
        expenses: &[ExpenseRecord],
    ) -> ProfitabilityMetrics {
        calculate_profitability_metrics(orders, expenses)
    }

    pub fn inventory(&self, inventory: &[InventoryItem]) -> InventoryMetrics {
        calculate_inventory_metrics(inventory)
    }

    pub fn top_products(&self, orders: &[Order], inventory: &[InventoryItem]) -> Vec<TopProduct> {
        let resolver = ProductResolver::new(self.catalog(), inventory);
        rank_products(orders, &resolver)
    }

    /// Produces every report at once.
    ///
    /// Orders and expenses are narrowed to `range` first when one is given.
    /// Inventory is a snapshot of the present and is never date filtered.
    #[tracing::instrument(
        name = "metrics_dashboard",
        skip_all,
        fields(orders = orders.len(), expenses = expenses.len(), inventory = inventory.len())
    )]
    pub fn dashboard(
        &self,
        orders: &[Order],
        expenses: &[ExpenseRecord],
        inventory: &[InventoryItem],
        range: Option<&DateRange>,
    ) -> DashboardReport {
        let orders = filter_dated(orders, range);
        let expenses = filter_dated(expenses, range);
        tracing::debug!(
            orders = orders.len(),
            expenses = expenses.len(),
            "Records inside the reporting window."
        );

        DashboardReport {
            sales: self.sales(&orders, inventory, &expenses),
            expenses: self.expenses(&expenses, &orders),
            orders: self.orders(&orders),
            profitability: self.profitability(&orders, &expenses),
            inventory: self.inventory(inventory),
            top_products: self.top_products(&orders, inventory),
            monthly_financials: monthly_financials(&orders, &expenses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn fixtures() -> (Vec<Order>, Vec<ExpenseRecord>, Vec<InventoryItem>, ProductCatalog) {
        let orders = serde_json::from_value(json!([
            { "id": 1, "orderDate": "2024-01-10", "orderSource": "Facebook", "totalPrice": 1200,
              "paymentStatus": "Paid", "status": "Dispatched",
              "orderItems": [{ "itemId": "7", "categoryId": "c1", "quantity": 2, "unitPrice": 600 }] },
            { "id": 2, "orderDate": "2024-02-02", "totalPrice": 400, "paymentStatus": "Paid",
              "itemId": 8, "quantity": 1, "unitPrice": 400 },
            { "id": 3, "orderDate": "2024-03-15", "totalPrice": 900, "paymentStatus": "Paid" }
        ]))
        .unwrap();
        let expenses = serde_json::from_value(json!([
            { "date": "2024-01-20", "category": "Ads", "item": "Facebook", "amount": 200 },
            { "date": "2024-03-01", "category": "Rent", "amount": 500 }
        ]))
        .unwrap();
        let inventory = serde_json::from_value(json!([
            { "id": "7", "itemName": "Sofa", "currentStock": 3, "reorderLevel": 5, "unitCost": 250 },
            { "id": "8", "itemName": "Stool", "currentStock": 10, "reorderLevel": 2, "unitCost": 100 }
        ]))
        .unwrap();
        let catalog = serde_json::from_value(json!({
            "categories": [{ "id": "c1", "name": "Living", "items": [{ "id": 7, "name": "Chesterfield" }] }]
        }))
        .unwrap();
        (orders, expenses, inventory, catalog)
    }

    #[test]
    fn test_dashboard_without_range_uses_everything() {
        let (orders, expenses, inventory, catalog) = fixtures();
        let engine = MetricsEngine::new(Some(catalog));

        let report = engine.dashboard(&orders, &expenses, &inventory, None);

        assert_eq!(report.sales.revenue, dec!(2500));
        assert_eq!(report.expenses.total, dec!(700));
        assert_eq!(report.orders.total_orders, 3);
        assert_eq!(report.profitability.net_profit, dec!(1800));
        assert_eq!(report.monthly_financials.len(), 3);
        assert_eq!(report.top_products[0].name, "Chesterfield");
        assert_eq!(report.top_products[0].category, "Living");
        assert_eq!(report.top_products[1].name, "Stool");
        assert_eq!(report.inventory.low_stock_items.len(), 1);
    }

    #[test]
    fn test_dashboard_window_filters_orders_and_expenses_only() {
        let (orders, expenses, inventory, catalog) = fixtures();
        let engine = MetricsEngine::new(Some(catalog));
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();

        let report = engine.dashboard(&orders, &expenses, &inventory, Some(&range));

        assert_eq!(report.orders.total_orders, 1);
        assert_eq!(report.sales.revenue, dec!(1200));
        assert_eq!(report.expenses.total, dec!(200));
        assert_eq!(report.inventory.total_items, 2);
        assert_eq!(report.inventory.total_value, dec!(1750));
        // 1200 revenue, 2 x 250 cost of goods, 200 ad spend.
        assert_eq!(report.sales.profitability_data[0].profit, dec!(500));
    }

    #[test]
    fn test_dashboard_is_idempotent() {
        let (orders, expenses, inventory, catalog) = fixtures();
        let engine = MetricsEngine::new(Some(catalog));

        let first = engine.dashboard(&orders, &expenses, &inventory, None);
        let second = engine.dashboard(&orders, &expenses, &inventory, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_collections() {
        let engine = MetricsEngine::default();
        let report = engine.dashboard(&[], &[], &[], None);

        assert_eq!(report.orders, OrderMetrics::default());
        assert_eq!(report.expenses, ExpenseMetrics::default());
        assert_eq!(report.inventory, InventoryMetrics::default());
        assert!(report.top_products.is_empty());
    }
}
