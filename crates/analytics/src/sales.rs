use crate::expenses::paid_revenue;
use crate::report::{ChannelProfit, NamedCount, SalesMetrics};
use crate::resolver::inventory_index;
use crate::tally::{Accumulate, Tally};
use core_types::{ExpenseRecord, InventoryItem, Order, amount};
use rust_decimal::Decimal;

/// Expense category whose spend is attributed to sales channels.
pub const ADS_CATEGORY: &str = "Ads";

/// Per-channel accumulation shared by the sales and profitability reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ChannelBucket {
    pub name: String,
    /// All orders, paid or not.
    pub orders: usize,
    /// Paid orders only.
    pub revenue: Decimal,
    /// Cost of goods of paid orders.
    pub cost: Decimal,
    pub ads_expense: Decimal,
}

/// Buckets orders by channel. `cost_of` is only consulted for paid orders.
pub(crate) fn channel_buckets<F>(orders: &[Order], cost_of: F) -> Tally<String, ChannelBucket>
where
    F: Fn(&Order) -> Decimal,
{
    let mut buckets: Tally<String, ChannelBucket> = Tally::new();

    for order in orders {
        let channel = order.channel();
        let bucket = buckets.entry(channel.to_string(), || ChannelBucket {
            name: channel.to_string(),
            ..ChannelBucket::default()
        });

        bucket.orders.accumulate(1);
        if order.is_paid() {
            bucket.revenue.accumulate(order.total);
            bucket.cost.accumulate(cost_of(order));
        }
    }

    buckets
}

/// Adds every `Ads` expense to the channel its label names, ignoring case.
///
/// Spend naming no known channel is left out of channel attribution.
pub(crate) fn attribute_ad_spend(
    buckets: &mut Tally<String, ChannelBucket>,
    expenses: &[ExpenseRecord],
) {
    let mut unattributed = Decimal::ZERO;

    for expense in expenses {
        if expense.category_name() != Some(ADS_CATEGORY) {
            continue;
        }
        let Some(label) = expense.label() else {
            unattributed.accumulate(expense.amount);
            continue;
        };

        let label = label.to_lowercase();
        match buckets
            .values_mut()
            .find(|bucket| bucket.name.to_lowercase() == label)
        {
            Some(bucket) => bucket.ads_expense.accumulate(expense.amount),
            None => unattributed.accumulate(expense.amount),
        }
    }

    if !unattributed.is_zero() {
        tracing::debug!(%unattributed, "Ad spend not matching any sales channel.");
    }
}

/// Revenue, volume and per-channel profit after cost of goods and ad spend.
pub fn calculate_sales_metrics(
    orders: &[Order],
    inventory: &[InventoryItem],
    expenses: &[ExpenseRecord],
) -> SalesMetrics {
    let stock = inventory_index(inventory);

    let mut buckets = channel_buckets(orders, |order| {
        amount::sum(order.items.iter().filter_map(|item| {
            let unit_cost = stock.get(item.item_id.as_deref()?)?.unit_cost;
            Some(amount::mul(item.quantity, unit_cost))
        }))
    });
    attribute_ad_spend(&mut buckets, expenses);

    let revenue = paid_revenue(orders);

    let source_data = buckets
        .values()
        .filter(|bucket| bucket.orders > 0)
        .map(|bucket| NamedCount::new(bucket.name.clone(), bucket.orders))
        .collect();

    let profitability_data = buckets
        .values()
        .map(|bucket| ChannelProfit {
            name: bucket.name.clone(),
            revenue: bucket.revenue,
            profit: amount::sub(amount::sub(bucket.revenue, bucket.cost), bucket.ads_expense),
        })
        .filter(|channel| !channel.revenue.is_zero() || !channel.profit.is_zero())
        .collect();

    tracing::debug!(orders = orders.len(), channels = buckets.len(), "Sales metrics calculated.");

    SalesMetrics {
        revenue,
        total_orders: orders.len(),
        source_data,
        profitability_data,
    }
}
