use crate::report::{InventoryMetrics, LowStockItem, NamedCount, StockStatus};
use crate::resolver::UNCATEGORIZED;
use core_types::{InventoryItem, amount, non_blank};
use rust_decimal::Decimal;

/// Classifies an item against its reorder level. Items without a configured
/// reorder level are always in stock, whatever their quantity.
pub fn stock_status(item: &InventoryItem) -> StockStatus {
    if !item.has_reorder_level() {
        StockStatus::InStock
    } else if item.current_stock <= Decimal::ZERO {
        StockStatus::OutOfStock
    } else if item.current_stock <= item.reorder_level {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

pub fn calculate_inventory_metrics(inventory: &[InventoryItem]) -> InventoryMetrics {
    let mut counts = [0usize; 3];
    let mut low_stock_items = Vec::new();

    for item in inventory {
        let status = stock_status(item);
        counts[status as usize] += 1;

        if status != StockStatus::InStock {
            low_stock_items.push(LowStockItem {
                id: item.id.clone(),
                item_name: non_blank(item.item_name.as_deref())
                    .unwrap_or_default()
                    .to_string(),
                category: non_blank(item.category.as_deref())
                    .unwrap_or(UNCATEGORIZED)
                    .to_string(),
                current_stock: item.current_stock,
                reorder_level: item.reorder_level,
                status,
            });
        }
    }
    low_stock_items.sort_by(|a, b| a.current_stock.cmp(&b.current_stock));

    InventoryMetrics {
        total_items: inventory.len(),
        total_value: amount::sum(inventory.iter().map(InventoryItem::stock_value)),
        low_stock_items,
        status_data: StockStatus::ALL
            .iter()
            .map(|&status| NamedCount::new(status.label(), counts[status as usize]))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn inventory(value: serde_json::Value) -> Vec<InventoryItem> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_stock_status_thresholds() {
        let items = inventory(json!([
            { "currentStock": 0, "reorderLevel": 5 },
            { "currentStock": -2, "reorderLevel": 5 },
            { "currentStock": 5, "reorderLevel": 5 },
            { "currentStock": 6, "reorderLevel": 5 },
            { "currentStock": 0, "reorderLevel": 0 }
        ]));

        let statuses: Vec<StockStatus> = items.iter().map(stock_status).collect();
        assert_eq!(
            statuses,
            vec![
                StockStatus::OutOfStock,
                StockStatus::OutOfStock,
                StockStatus::LowStock,
                StockStatus::InStock,
                StockStatus::InStock,
            ]
        );
    }

    #[test]
    fn test_unset_reorder_level_is_never_flagged() {
        let items = inventory(json!([
            { "id": "a", "itemName": "Flagged", "currentStock": 5, "reorderLevel": 10 },
            { "id": "b", "itemName": "Untracked", "currentStock": 5, "reorderLevel": 0 },
            { "id": "c", "itemName": "Empty", "currentStock": 0 }
        ]));

        let metrics = calculate_inventory_metrics(&items);
        let flagged: Vec<_> = metrics
            .low_stock_items
            .iter()
            .map(|item| item.item_name.as_str())
            .collect();
        assert_eq!(flagged, vec!["Flagged"]);
    }

    #[test]
    fn test_totals_and_ordering() {
        let items = inventory(json!([
            { "itemName": "Thread", "category": "Raw", "currentStock": 8, "reorderLevel": 10, "unitCost": 2 },
            { "itemName": "Buttons", "currentStock": "0", "reorderLevel": 50, "unitCost": "0.25" },
            { "itemName": "Fabric", "currentStock": 100, "reorderLevel": 20, "unitCost": 12.5 },
            { "itemName": "Zips", "currentStock": 8, "reorderLevel": 9, "unitCost": 1 }
        ]));

        let metrics = calculate_inventory_metrics(&items);

        assert_eq!(metrics.total_items, 4);
        assert_eq!(metrics.total_value, dec!(1274));
        let order: Vec<_> = metrics
            .low_stock_items
            .iter()
            .map(|item| item.item_name.as_str())
            .collect();
        assert_eq!(order, vec!["Buttons", "Thread", "Zips"]);
        assert_eq!(metrics.low_stock_items[0].category, UNCATEGORIZED);
        assert_eq!(metrics.low_stock_items[0].status, StockStatus::OutOfStock);
        assert_eq!(
            metrics.status_data,
            vec![
                NamedCount::new("In Stock", 1),
                NamedCount::new("Low Stock", 2),
                NamedCount::new("Out of Stock", 1),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_zero_shape() {
        assert_eq!(calculate_inventory_metrics(&[]), InventoryMetrics::default());
    }
}
