use crate::expenses::{paid_revenue, percentage};
use crate::report::{NamedValue, ProfitabilityMetrics};
use crate::sales::{attribute_ad_spend, channel_buckets};
use crate::timeline::monthly_financials;
use core_types::{ExpenseRecord, Order, amount};
use rust_decimal::Decimal;

/// Net profit, margins and per-order averages against total expenses.
///
/// Cost here means every recorded expense, not cost of goods: inventory is not
/// an input. The per-channel breakdown likewise only subtracts attributed ad
/// spend from paid revenue.
pub fn calculate_profitability_metrics(
    orders: &[Order],
    expenses: &[ExpenseRecord],
) -> ProfitabilityMetrics {
    let revenue = paid_revenue(orders);
    let total_expenses = amount::sum(expenses.iter().map(|expense| expense.amount));
    let net_profit = amount::sub(revenue, total_expenses);

    let valid_orders = orders.iter().filter(|order| order.is_valid()).count();
    let per_order = |total: Decimal| amount::div(total, Decimal::from(valid_orders));

    let mut buckets = channel_buckets(orders, |_| Decimal::ZERO);
    attribute_ad_spend(&mut buckets, expenses);
    let mut profitability_by_source: Vec<NamedValue> = buckets
        .values()
        .map(|bucket| NamedValue::new(bucket.name.clone(), amount::sub(bucket.revenue, bucket.ads_expense)))
        .filter(|channel| !channel.value.is_zero())
        .collect();
    profitability_by_source.sort_by(|a, b| b.value.cmp(&a.value));

    ProfitabilityMetrics {
        revenue,
        total_expenses,
        net_profit,
        margin: percentage(net_profit, revenue),
        avg_revenue_per_order: per_order(revenue),
        avg_cost_per_order: per_order(total_expenses),
        avg_profit_per_order: per_order(net_profit),
        monthly_data: monthly_financials(orders, expenses),
        pie_data: vec![
            NamedValue::new("Profit", net_profit.max(Decimal::ZERO)),
            NamedValue::new("Expenses", total_expenses),
        ],
        profitability_by_source,
    }
}
