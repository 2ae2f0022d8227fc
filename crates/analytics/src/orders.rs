use crate::expenses::percentage;
use crate::report::{NOT_AVAILABLE, NamedCount, OrderMetrics};
use crate::tally::Tally;
use crate::timeline::monthly_volume;
use core_types::{Order, amount, non_blank};
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_STATUS: &str = "New Order";
pub const DEFAULT_DISTRICT: &str = "Unknown";
/// Status whose orders feed the processing-time average.
pub const DISPATCHED_STATUS: &str = "Dispatched";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Status distribution, averages, trend and customer statistics for orders.
///
/// Only the status distribution looks at every order. Everything else is
/// computed over valid orders (neither cancelled nor returned).
pub fn calculate_order_metrics(orders: &[Order]) -> OrderMetrics {
    let valid: Vec<&Order> = orders.iter().filter(|order| order.is_valid()).collect();

    let mut districts: Tally<String, usize> = Tally::new();
    let mut customers: Tally<String, usize> = Tally::new();
    for order in &valid {
        let district = non_blank(order.district.as_deref()).unwrap_or(DEFAULT_DISTRICT);
        districts.add(district.to_string(), 1);

        if let Some(key) = customer_key(order) {
            customers.add(key, 1);
        }
    }

    let mut district_data: Vec<NamedCount> = districts
        .into_entries()
        .into_iter()
        .map(|(name, count)| NamedCount::new(name, count))
        .collect();
    district_data.sort_by(|a, b| b.value.cmp(&a.value));
    let top_district = district_data
        .first()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.name.clone());

    let unique_customers = customers.len();
    let repeat_customers = customers.values().filter(|&&count| count > 1).count();

    OrderMetrics {
        total_orders: orders.len(),
        valid_orders: valid.len(),
        status_data: status_distribution(orders),
        avg_order_value: average_order_value(&valid),
        avg_processing_time: average_processing_days(orders),
        monthly_volume: monthly_volume(valid.iter().copied()),
        district_data,
        top_district,
        repeat_rate: percentage(
            Decimal::from(repeat_customers),
            Decimal::from(unique_customers),
        ),
        unique_customers,
        repeat_customers,
    }
}

/// Counts every order by status. Labels are merged case-insensitively and shown
/// lower-cased with the first letter capitalized, so `CANCELLED` reads `Cancelled`.
fn status_distribution(orders: &[Order]) -> Vec<NamedCount> {
    let mut statuses: Tally<String, NamedCount> = Tally::new();

    for order in orders {
        let label = non_blank(order.status.as_deref()).unwrap_or(DEFAULT_STATUS);
        let key = label.to_lowercase();
        statuses
            .entry(key.clone(), || NamedCount::new(capitalize_first(&key), 0))
            .value += 1;
    }

    statuses.into_values()
}

fn average_order_value(valid: &[&Order]) -> String {
    if valid.is_empty() {
        return "0".to_string();
    }
    let revenue = amount::sum(valid.iter().map(|order| order.total));
    let average = amount::div(revenue, Decimal::from(valid.len()));
    format!(
        "{:.2}",
        average.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Mean whole days between creation and dispatch of dispatched orders, to one
/// decimal. Partial days round up; orders dispatched before they were created
/// are ignored.
fn average_processing_days(orders: &[Order]) -> String {
    let days: Vec<i64> = orders
        .iter()
        .filter(|order| order.has_status(DISPATCHED_STATUS))
        .filter_map(|order| {
            let elapsed = order.dispatched_at()? - order.created_at()?;
            let millis = elapsed.num_milliseconds();
            (millis >= 0).then(|| (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY)
        })
        .collect();

    if days.is_empty() {
        return "0".to_string();
    }

    let average = Decimal::from(days.iter().sum::<i64>()) / Decimal::from(days.len());
    format!(
        "{:.1}",
        average.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Identifies a customer by WhatsApp digits, else phone digits, else name.
fn customer_key(order: &Order) -> Option<String> {
    digits_of(order.whatsapp.as_deref())
        .or_else(|| digits_of(order.phone.as_deref()))
        .or_else(|| non_blank(order.customer_name.as_deref()).map(str::to_lowercase))
}

fn digits_of(raw: Option<&str>) -> Option<String> {
    let digits: String = raw?.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

fn capitalize_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
