use crate::dates::parse_timestamp;
use crate::enums::ItemShape;
use crate::non_blank;
use crate::structs::{LineItem, OrderRecord};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Channel used when an order does not say where it came from.
pub const DEFAULT_CHANNEL: &str = "Ad";

/// Statuses that take an order out of volume and average calculations.
const EXCLUDED_STATUSES: [&str; 2] = ["cancelled", "returned"];

/// A sale in canonical form: always a list of items, whatever the stored shape.
///
/// Deserializing an `Order` goes through [`OrderRecord`], so both stored shapes
/// can be read straight into this type. It is never written back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "OrderRecord")]
pub struct Order {
    pub id: Option<String>,
    pub order_date: Option<String>,
    pub created_date: Option<String>,
    pub dispatch_date: Option<String>,
    /// `totalPrice`, else `totalAmount`, else zero.
    pub total: Decimal,
    pub payment_status: Option<String>,
    pub status: Option<String>,
    pub order_source: Option<String>,
    pub district: Option<String>,
    pub whatsapp: Option<String>,
    pub phone: Option<String>,
    pub customer_name: Option<String>,
    pub items: Vec<LineItem>,
    pub shape: ItemShape,
}

impl From<OrderRecord> for Order {
    fn from(mut record: OrderRecord) -> Self {
        let structured = std::mem::take(&mut record.order_items);
        let (items, shape) = if !structured.is_empty() {
            (structured, ItemShape::Structured)
        } else if let Some(item) = record.legacy_item() {
            (vec![item], ItemShape::Legacy)
        } else {
            (Vec::new(), ItemShape::Empty)
        };

        Self {
            total: record
                .total_price
                .or(record.total_amount)
                .unwrap_or(Decimal::ZERO),
            id: record.id,
            order_date: record.order_date,
            created_date: record.created_date,
            dispatch_date: record.dispatch_date,
            payment_status: record.payment_status,
            status: record.status,
            order_source: record.order_source,
            district: record.district,
            whatsapp: record.whatsapp,
            phone: record.phone,
            customer_name: record.customer_name,
            items,
            shape,
        }
    }
}

impl Order {
    /// Only an exact `"Paid"` counts as paid.
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some("Paid")
    }

    /// False for cancelled and returned orders, whatever their casing.
    pub fn is_valid(&self) -> bool {
        match non_blank(self.status.as_deref()) {
            Some(status) => {
                let status = status.to_lowercase();
                !EXCLUDED_STATUSES.contains(&status.as_str())
            }
            None => true,
        }
    }

    /// Exact comparison, unlike [`Order::is_valid`].
    pub fn has_status(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }

    /// The sales channel bucket this order belongs to.
    pub fn channel(&self) -> &str {
        non_blank(self.order_source.as_deref()).unwrap_or(DEFAULT_CHANNEL)
    }

    /// The date the order was placed: `orderDate`, else `createdDate`.
    pub fn placed_on(&self) -> Option<&str> {
        non_blank(self.order_date.as_deref()).or_else(|| non_blank(self.created_date.as_deref()))
    }

    pub fn placed_at(&self) -> Option<NaiveDateTime> {
        self.placed_on().and_then(parse_timestamp)
    }

    /// When the order entered the system: `createdDate`, else `orderDate`.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        non_blank(self.created_date.as_deref())
            .or_else(|| non_blank(self.order_date.as_deref()))
            .and_then(parse_timestamp)
    }

    pub fn dispatched_at(&self) -> Option<NaiveDateTime> {
        non_blank(self.dispatch_date.as_deref()).and_then(parse_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn order(value: serde_json::Value) -> Order {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_structured_items_win_over_flat_fields() {
        let order = order(json!({
            "orderItems": [{ "itemId": 1, "quantity": 2, "unitPrice": 10 }],
            "itemId": 99,
            "quantity": 5
        }));

        assert_eq!(order.shape, ItemShape::Structured);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].item_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_empty_order_items_fall_back_to_legacy_shape() {
        let order = order(json!({
            "orderItems": [],
            "customItemName": "Wedding Frame",
            "quantity": 1,
            "unitPrice": 4500
        }));

        assert!(order.shape.is_legacy());
        assert_eq!(order.items[0].custom_name(), Some("Wedding Frame"));
    }

    #[test]
    fn test_order_without_any_item_fields_has_no_items() {
        let order = order(json!({ "orderItems": null, "totalPrice": 100 }));
        assert_eq!(order.shape, ItemShape::Empty);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_total_prefers_total_price() {
        assert_eq!(order(json!({ "totalPrice": 100, "totalAmount": 90 })).total, dec!(100));
        assert_eq!(order(json!({ "totalAmount": "90" })).total, dec!(90));
        assert_eq!(order(json!({ "totalPrice": "n/a", "totalAmount": 90 })).total, dec!(90));
        assert_eq!(order(json!({})).total, Decimal::ZERO);
    }

    #[test]
    fn test_validity_ignores_case_and_padding() {
        assert!(!order(json!({ "status": "Cancelled" })).is_valid());
        assert!(!order(json!({ "status": " RETURNED " })).is_valid());
        assert!(order(json!({ "status": "Dispatched" })).is_valid());
        assert!(order(json!({})).is_valid());
    }

    #[test]
    fn test_paid_is_exact() {
        assert!(order(json!({ "paymentStatus": "Paid" })).is_paid());
        assert!(!order(json!({ "paymentStatus": "paid" })).is_paid());
        assert!(!order(json!({ "paymentStatus": "Pending" })).is_paid());
    }

    #[test]
    fn test_channel_defaults_to_ad() {
        assert_eq!(order(json!({})).channel(), "Ad");
        assert_eq!(order(json!({ "orderSource": "   " })).channel(), "Ad");
        assert_eq!(order(json!({ "orderSource": " Facebook " })).channel(), "Facebook");
    }

    #[test]
    fn test_status_match_is_exact() {
        assert!(order(json!({ "status": "Dispatched" })).has_status("Dispatched"));
        assert!(!order(json!({ "status": "dispatched" })).has_status("Dispatched"));
        assert!(!order(json!({})).has_status("Dispatched"));
    }

    #[test]
    fn test_bad_line_items_do_not_lose_the_order() {
        let orders: Vec<Order> = serde_json::from_value(json!([
            { "orderItems": [null, "frame", 4, { "itemId": 7, "quantity": 2, "unitPrice": 10 }] },
            { "orderItems": [null] },
            { "totalPrice": 50 }
        ]))
        .unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].shape, ItemShape::Structured);
        assert_eq!(orders[0].items.len(), 1);
        assert_eq!(orders[0].items[0].line_total(), dec!(20));
        assert_eq!(orders[1].shape, ItemShape::Empty);
        assert_eq!(orders[2].total, dec!(50));
    }

    #[test]
    fn test_placed_on_falls_back_to_created_date() {
        let order = order(json!({ "createdDate": "2024-05-01" }));
        assert_eq!(order.placed_on(), Some("2024-05-01"));
        assert!(order.placed_at().is_some());
    }
}
