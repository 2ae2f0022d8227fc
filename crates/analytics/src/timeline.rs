//! Month-bucketed series. Buckets are keyed `YYYY-MM` and come out in
//! chronological order; records without a parsable date are left out.

use crate::report::{MonthlyFinancials, MonthlyVolume};
use core_types::dates::{month_key, parse_timestamp};
use crate::tally::Accumulate;
use core_types::{ExpenseRecord, Order, amount};
use std::collections::BTreeMap;

/// Paid revenue against all expenses, month by month.
pub fn monthly_financials(orders: &[Order], expenses: &[ExpenseRecord]) -> Vec<MonthlyFinancials> {
    let mut months: BTreeMap<String, MonthlyFinancials> = BTreeMap::new();

    for order in orders.iter().filter(|order| order.is_paid()) {
        if let Some(at) = order.placed_at() {
            financials_for(&mut months, month_key(&at))
                .revenue
                .accumulate(order.total);
        }
    }

    for expense in expenses {
        if let Some(at) = expense.date.as_deref().and_then(parse_timestamp) {
            financials_for(&mut months, month_key(&at))
                .expenses
                .accumulate(expense.amount);
        }
    }

    months
        .into_values()
        .map(|mut month| {
            month.profit = amount::sub(month.revenue, month.expenses);
            month
        })
        .collect()
}

fn financials_for(
    months: &mut BTreeMap<String, MonthlyFinancials>,
    month: String,
) -> &mut MonthlyFinancials {
    months
        .entry(month.clone())
        .or_insert_with(|| MonthlyFinancials {
            month,
            ..MonthlyFinancials::default()
        })
}

/// Number of orders per month.
pub fn monthly_volume<'a, I>(orders: I) -> Vec<MonthlyVolume>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for at in orders.into_iter().filter_map(Order::placed_at) {
        *months.entry(month_key(&at)).or_default() += 1;
    }

    months
        .into_iter()
        .map(|(month, orders)| MonthlyVolume { month, orders })
        .collect()
}
