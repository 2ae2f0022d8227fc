//! Terminal tables for each report.

use analytics::{
    CurrencyFormat, DashboardReport, ExpenseMetrics, InventoryMetrics, NamedCount,
    OrderMetrics, ProfitabilityMetrics, SalesMetrics, TopProduct,
};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use rust_decimal::{Decimal, RoundingStrategy};

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn percent(value: Decimal) -> String {
    format!(
        "{:.1}%",
        value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn counts(title: &str, series: &[NamedCount]) -> Table {
    let mut table = table(&[title, "Orders"]);
    for entry in series {
        table.add_row(vec![entry.name.clone(), entry.value.to_string()]);
    }
    table
}

pub fn summary(report: &DashboardReport, money: &CurrencyFormat) -> Vec<Table> {
    let mut table = table(&["Metric", "Value"]);
    let rows = [
        ("Revenue (paid)", money.format(report.sales.revenue)),
        ("Expenses", money.format(report.expenses.total)),
        ("Net profit", money.format(report.profitability.net_profit)),
        ("Margin", percent(report.profitability.margin)),
        ("Orders", report.orders.total_orders.to_string()),
        ("Valid orders", report.orders.valid_orders.to_string()),
        ("Average order value", report.orders.avg_order_value.clone()),
        ("Average processing days", report.orders.avg_processing_time.clone()),
        ("Repeat customers", percent(report.orders.repeat_rate)),
        ("Inventory value", money.format(report.inventory.total_value)),
        ("Low stock items", report.inventory.low_stock_items.len().to_string()),
        ("Top category of spend", report.expenses.top_category.name.clone()),
        ("Top district", report.orders.top_district.clone()),
    ];
    for (metric, value) in rows {
        table.add_row(vec![metric.to_string(), value]);
    }
    vec![table]
}

pub fn sales(metrics: &SalesMetrics, money: &CurrencyFormat) -> Vec<Table> {
    let mut channels = table(&["Channel", "Revenue", "Profit"]);
    for channel in &metrics.profitability_data {
        channels.add_row(vec![
            channel.name.clone(),
            money.format(channel.revenue),
            money.format(channel.profit),
        ]);
    }

    let mut totals = table(&["Paid revenue", "Orders"]);
    totals.add_row(vec![money.format(metrics.revenue), metrics.total_orders.to_string()]);

    vec![totals, counts("Channel", &metrics.source_data), channels]
}

pub fn expenses(metrics: &ExpenseMetrics, money: &CurrencyFormat) -> Vec<Table> {
    let mut totals = table(&["Total", "Share of paid revenue", "Top category"]);
    totals.add_row(vec![
        money.format(metrics.total),
        percent(metrics.expense_sales_ratio),
        metrics.top_category.name.clone(),
    ]);

    let mut categories = table(&["Category", "Amount"]);
    for category in &metrics.category_data {
        categories.add_row(vec![category.name.clone(), money.format(category.value)]);
    }

    let mut items = table(&["Item", "Category", "Amount"]);
    for item in &metrics.top_items {
        items.add_row(vec![
            item.name.clone(),
            item.category.clone(),
            money.format(item.value),
        ]);
    }

    vec![totals, categories, items]
}

pub fn orders(metrics: &OrderMetrics) -> Vec<Table> {
    let mut totals = table(&["Orders", "Valid", "Avg value", "Avg days to dispatch", "Repeat rate"]);
    totals.add_row(vec![
        metrics.total_orders.to_string(),
        metrics.valid_orders.to_string(),
        metrics.avg_order_value.clone(),
        metrics.avg_processing_time.clone(),
        format!(
            "{} ({} of {})",
            percent(metrics.repeat_rate),
            metrics.repeat_customers,
            metrics.unique_customers
        ),
    ]);

    let mut volume = table(&["Month", "Orders"]);
    for month in &metrics.monthly_volume {
        volume.add_row(vec![month.month.clone(), month.orders.to_string()]);
    }

    vec![
        totals,
        counts("Status", &metrics.status_data),
        counts("District", &metrics.district_data),
        volume,
    ]
}

pub fn profitability(metrics: &ProfitabilityMetrics, money: &CurrencyFormat) -> Vec<Table> {
    let mut totals = table(&["", "Total", "Per valid order"]);
    totals
        .add_row(vec![
            "Revenue".to_string(),
            money.format(metrics.revenue),
            money.format(metrics.avg_revenue_per_order),
        ])
        .add_row(vec![
            "Expenses".to_string(),
            money.format(metrics.total_expenses),
            money.format(metrics.avg_cost_per_order),
        ])
        .add_row(vec![
            "Net profit".to_string(),
            money.format(metrics.net_profit),
            money.format(metrics.avg_profit_per_order),
        ])
        .add_row(vec!["Margin".to_string(), percent(metrics.margin), String::new()]);

    let mut monthly = table(&["Month", "Revenue", "Expenses", "Profit"]);
    for month in &metrics.monthly_data {
        monthly.add_row(vec![
            month.month.clone(),
            money.format(month.revenue),
            money.format(month.expenses),
            money.format(month.profit),
        ]);
    }

    let mut by_source = table(&["Channel", "Revenue less ad spend"]);
    for channel in &metrics.profitability_by_source {
        by_source.add_row(vec![channel.name.clone(), money.format(channel.value)]);
    }

    vec![totals, monthly, by_source]
}

pub fn inventory(metrics: &InventoryMetrics, money: &CurrencyFormat) -> Vec<Table> {
    let mut totals = table(&["Items", "Stock value"]);
    totals.add_row(vec![
        metrics.total_items.to_string(),
        money.format(metrics.total_value),
    ]);

    let mut status = table(&["Status", "Items"]);
    for entry in &metrics.status_data {
        status.add_row(vec![entry.name.clone(), entry.value.to_string()]);
    }

    let mut low = table(&["Item", "Category", "In stock", "Reorder at", "Status"]);
    for item in &metrics.low_stock_items {
        low.add_row(vec![
            item.item_name.clone(),
            item.category.clone(),
            item.current_stock.normalize().to_string(),
            item.reorder_level.normalize().to_string(),
            item.status.label().to_string(),
        ]);
    }

    vec![totals, status, low]
}

pub fn top_products(products: &[TopProduct], money: &CurrencyFormat) -> Vec<Table> {
    let mut table = table(&["#", "Product", "Category", "Quantity", "Revenue"]);
    for (rank, product) in products.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            product.name.clone(),
            product.category.clone(),
            product.quantity.normalize().to_string(),
            money.format(product.revenue),
        ]);
    }
    vec![table]
}
