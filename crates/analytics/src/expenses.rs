use crate::report::{ExpenseItem, ExpenseMetrics, NamedValue};
use crate::tally::{Accumulate, Tally};
use core_types::{ExpenseRecord, Order, amount};
use rust_decimal::Decimal;

pub const DEFAULT_EXPENSE_CATEGORY: &str = "Other";
pub const DEFAULT_EXPENSE_ITEM: &str = "Unnamed";
pub const TOP_EXPENSE_ITEMS_LIMIT: usize = 5;

/// Percentage of `part` in `whole`, zero when `whole` is zero. Ratios too large
/// to represent clamp to the `Decimal` bounds.
pub(crate) fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    amount::mul(amount::div(part, whole), Decimal::ONE_HUNDRED)
}

pub(crate) fn paid_revenue(orders: &[Order]) -> Decimal {
    amount::sum(
        orders
            .iter()
            .filter(|order| order.is_paid())
            .map(|order| order.total),
    )
}

/// Expense totals, their share of paid revenue and the biggest spending lines.
pub fn calculate_expense_metrics(expenses: &[ExpenseRecord], orders: &[Order]) -> ExpenseMetrics {
    let total = amount::sum(expenses.iter().map(|expense| expense.amount));

    let mut categories: Tally<String, Decimal> = Tally::new();
    let mut items: Tally<String, ExpenseItem> = Tally::new();

    for expense in expenses {
        let category = expense
            .category_name()
            .unwrap_or(DEFAULT_EXPENSE_CATEGORY);
        categories.add(category.to_string(), expense.amount);

        let name = expense.label().unwrap_or(DEFAULT_EXPENSE_ITEM);
        items
            .entry(name.to_string(), || ExpenseItem {
                name: name.to_string(),
                value: Decimal::ZERO,
                category: category.to_string(),
            })
            .value
            .accumulate(expense.amount);
    }

    let mut category_data: Vec<NamedValue> = categories
        .into_entries()
        .into_iter()
        .map(|(name, value)| NamedValue::new(name, value))
        .collect();
    category_data.sort_by(|a, b| b.value.cmp(&a.value));

    let top_category = category_data
        .first()
        .cloned()
        .unwrap_or_else(NamedValue::not_available);

    let mut top_items = items.into_values();
    top_items.sort_by(|a, b| b.value.cmp(&a.value));
    top_items.truncate(TOP_EXPENSE_ITEMS_LIMIT);

    ExpenseMetrics {
        total,
        expense_sales_ratio: percentage(total, paid_revenue(orders)),
        category_data,
        top_category,
        top_items,
    }
}
