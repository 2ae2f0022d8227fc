//! Records as the storage layer hands them over.
//!
//! Field names follow the stored camelCase keys. Every field is optional on the
//! wire; see [`crate::lenient`] for how loosely-typed values are absorbed.

use crate::amount;
use crate::lenient;
use crate::non_blank;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    /// Catalog reference.
    #[serde(deserialize_with = "lenient::id")]
    pub item_id: Option<String>,
    #[serde(deserialize_with = "lenient::id")]
    pub category_id: Option<String>,
    /// Free-text product typed in at order time.
    #[serde(deserialize_with = "lenient::text")]
    pub custom_item_name: Option<String>,
    /// Display name cached when the order was taken.
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Older spelling of `name`.
    #[serde(deserialize_with = "lenient::text")]
    pub item_name: Option<String>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "lenient::decimal")]
    pub unit_price: Decimal,
}

impl LineItem {
    /// The name shown to the customer when the order was placed, if one was cached.
    pub fn cached_name(&self) -> Option<&str> {
        non_blank(self.name.as_deref()).or_else(|| non_blank(self.item_name.as_deref()))
    }

    pub fn custom_name(&self) -> Option<&str> {
        non_blank(self.custom_item_name.as_deref())
    }

    pub fn line_total(&self) -> Decimal {
        amount::mul(self.quantity, self.unit_price)
    }
}

/// A stored sale, in either the current (`orderItems`) or the legacy flat shape.
///
/// Aggregators never see this type directly; it is normalized into
/// [`crate::Order`] on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub order_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub created_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub dispatch_date: Option<String>,
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub total_price: Option<Decimal>,
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub total_amount: Option<Decimal>,
    #[serde(deserialize_with = "lenient::text")]
    pub payment_status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub order_source: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub district: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub whatsapp: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub order_items: Vec<LineItem>,

    // Legacy single-item fields.
    #[serde(deserialize_with = "lenient::id")]
    pub item_id: Option<String>,
    #[serde(deserialize_with = "lenient::id")]
    pub category_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub item_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub custom_item_name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub quantity: Option<Decimal>,
    #[serde(deserialize_with = "lenient::optional_decimal")]
    pub unit_price: Option<Decimal>,
}

impl OrderRecord {
    /// Builds the implicit item of a legacy record, if the record carries any
    /// item field at all.
    pub fn legacy_item(&self) -> Option<LineItem> {
        let has_item = self.item_id.is_some()
            || non_blank(self.item_name.as_deref()).is_some()
            || non_blank(self.custom_item_name.as_deref()).is_some()
            || self.quantity.is_some()
            || self.unit_price.is_some();

        has_item.then(|| LineItem {
            item_id: self.item_id.clone(),
            category_id: self.category_id.clone(),
            custom_item_name: self.custom_item_name.clone(),
            name: None,
            item_name: self.item_name.clone(),
            quantity: self.quantity.unwrap_or_default(),
            unit_price: self.unit_price.unwrap_or_default(),
        })
    }
}

/// A business expense.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    #[serde(deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub item: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

impl ExpenseRecord {
    /// What the money was spent on: `item`, falling back to `description`.
    pub fn label(&self) -> Option<&str> {
        non_blank(self.item.as_deref()).or_else(|| non_blank(self.description.as_deref()))
    }

    pub fn category_name(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }
}

/// A stocked item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItem {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub item_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub current_stock: Decimal,
    /// `0` means no threshold is configured.
    #[serde(deserialize_with = "lenient::decimal")]
    pub reorder_level: Decimal,
    #[serde(deserialize_with = "lenient::decimal")]
    pub unit_cost: Decimal,
}

impl InventoryItem {
    pub fn stock_value(&self) -> Decimal {
        amount::mul(self.current_stock, self.unit_cost)
    }

    pub fn has_reorder_level(&self) -> bool {
        self.reorder_level > Decimal::ZERO
    }
}

/// Read-only product reference data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCatalog {
    #[serde(deserialize_with = "lenient::list")]
    pub categories: Vec<CatalogCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogCategory {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    #[serde(deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::decimal")]
    pub price: Decimal,
}

impl From<Vec<CatalogCategory>> for ProductCatalog {
    fn from(categories: Vec<CatalogCategory>) -> Self {
        Self { categories }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_line_item_prefers_name_over_item_name() {
        let item: LineItem = serde_json::from_value(json!({
            "name": "Frame A",
            "itemName": "Old Frame",
            "quantity": "2",
            "unitPrice": 1500
        }))
        .unwrap();

        assert_eq!(item.cached_name(), Some("Frame A"));
        assert_eq!(item.line_total(), dec!(3000));
    }

    #[test]
    fn test_blank_names_are_not_cached_names() {
        let item: LineItem = serde_json::from_value(json!({ "name": "  ", "itemName": "" })).unwrap();
        assert_eq!(item.cached_name(), None);
    }

    #[test]
    fn test_legacy_item_from_flat_fields() {
        let record: OrderRecord = serde_json::from_value(json!({
            "itemId": 12,
            "categoryId": "frames",
            "quantity": 3,
            "unitPrice": "250.50"
        }))
        .unwrap();

        let item = record.legacy_item().unwrap();
        assert_eq!(item.item_id.as_deref(), Some("12"));
        assert_eq!(item.category_id.as_deref(), Some("frames"));
        assert_eq!(item.quantity, dec!(3));
        assert_eq!(item.unit_price, dec!(250.50));
    }

    #[test]
    fn test_no_legacy_item_without_item_fields() {
        let record: OrderRecord = serde_json::from_value(json!({ "totalPrice": 100 })).unwrap();
        assert!(record.legacy_item().is_none());
    }

    #[test]
    fn test_expense_label_falls_back_to_description() {
        let expense: ExpenseRecord = serde_json::from_value(json!({
            "amount": 500,
            "category": "Ads",
            "description": "Facebook"
        }))
        .unwrap();
        assert_eq!(expense.label(), Some("Facebook"));
    }

    #[test]
    fn test_null_collections_decode_empty() {
        let catalog: ProductCatalog =
            serde_json::from_value(json!({ "categories": [{ "id": 1, "items": null }] })).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert!(catalog.categories[0].items.is_empty());
    }

    #[test]
    fn test_catalog_skips_broken_entries() {
        let catalog: ProductCatalog = serde_json::from_value(json!({
            "categories": [
                null,
                "frames",
                { "id": 1, "name": "Frames", "items": [null, { "id": 7, "name": "Frame A" }, 12] }
            ]
        }))
        .unwrap();

        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].items.len(), 1);
        assert_eq!(catalog.categories[0].items[0].name.as_deref(), Some("Frame A"));
    }

    #[test]
    fn test_oversized_amounts_clamp_instead_of_overflowing() {
        let item: LineItem =
            serde_json::from_value(json!({ "quantity": 1e20, "unitPrice": 1e20 })).unwrap();
        assert_eq!(item.line_total(), Decimal::MAX);

        let stock: InventoryItem =
            serde_json::from_value(json!({ "currentStock": "-1e20", "unitCost": "1e20" })).unwrap();
        assert_eq!(stock.stock_value(), Decimal::MIN);
    }
}
