//! Product identity resolution.
//!
//! Line items reach the engine in several generations of shape: catalog-backed
//! items with a cached display name, free-text custom products, legacy flat
//! records, and items whose catalog entry was renamed or deleted since the order
//! was taken. This module turns any of them into a display name, a category and a
//! grouping key.

use core_types::{InventoryItem, LineItem, ProductCatalog, non_blank};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Where a resolved product name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameSource {
    /// Cached on the line item when the order was placed.
    Snapshot,
    /// Free-text product name typed in at order time.
    Custom,
    Catalog,
    Inventory,
    /// `Product <id>` or `Unknown Product`. Never authoritative.
    Placeholder,
}

impl NameSource {
    pub fn is_generic(self) -> bool {
        self == NameSource::Placeholder
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub source: NameSource,
}

impl ResolvedName {
    fn new(name: impl Into<String>, source: NameSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.source.is_generic()
    }
}

/// The key line items are merged under when aggregating across orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Catalog-backed products group by id, so renames still land together.
    Item(String),
    /// Free-text products group by their literal resolved name.
    Name(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Item(id) => write!(f, "{id}"),
            GroupKey::Name(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Default)]
struct IndexedCategory {
    name: Option<String>,
    items: HashMap<String, String>,
}

/// A one-pass index over the product catalog.
///
/// Replaces repeated scans of every category per line item with two lookups.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    categories: HashMap<String, IndexedCategory>,
    /// First name found for an item id across all categories, in catalog order.
    items: HashMap<String, String>,
}

impl CatalogIndex {
    pub fn build(catalog: &ProductCatalog) -> Self {
        let mut index = Self::default();

        for category in &catalog.categories {
            let mut indexed = IndexedCategory {
                name: non_blank(category.name.as_deref()).map(str::to_string),
                items: HashMap::new(),
            };

            for item in &category.items {
                let (Some(id), Some(name)) = (item.id.as_deref(), non_blank(item.name.as_deref()))
                else {
                    continue;
                };
                indexed
                    .items
                    .entry(id.to_string())
                    .or_insert_with(|| name.to_string());
                index
                    .items
                    .entry(id.to_string())
                    .or_insert_with(|| name.to_string());
            }

            if let Some(id) = category.id.as_deref() {
                index.categories.entry(id.to_string()).or_insert(indexed);
            }
        }

        index
    }

    /// Looks the item up in its own category first, then anywhere in the catalog.
    pub fn item_name(&self, category_id: Option<&str>, item_id: &str) -> Option<&str> {
        category_id
            .and_then(|id| self.categories.get(id))
            .and_then(|category| category.items.get(item_id))
            .or_else(|| self.items.get(item_id))
            .map(String::as_str)
    }

    pub fn category_name(&self, category_id: &str) -> Option<&str> {
        self.categories
            .get(category_id)
            .and_then(|category| category.name.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.items.is_empty()
    }
}

/// Maps inventory items by id. Later duplicates replace earlier ones.
pub fn inventory_index(inventory: &[InventoryItem]) -> HashMap<&str, &InventoryItem> {
    inventory
        .iter()
        .filter_map(|item| item.id.as_deref().map(|id| (id, item)))
        .collect()
}

/// Resolves display names, categories and grouping keys for line items.
#[derive(Debug)]
pub struct ProductResolver<'a> {
    catalog: CatalogIndex,
    inventory: HashMap<&'a str, &'a InventoryItem>,
}

impl<'a> ProductResolver<'a> {
    pub fn new(catalog: Option<&ProductCatalog>, inventory: &'a [InventoryItem]) -> Self {
        Self {
            catalog: catalog.map(CatalogIndex::build).unwrap_or_default(),
            inventory: inventory_index(inventory),
        }
    }

    pub fn inventory_item(&self, item_id: &str) -> Option<&'a InventoryItem> {
        self.inventory.get(item_id).copied()
    }

    /// The name to show for one line item.
    ///
    /// The name cached at order time wins over later catalog edits, so a single
    /// order always displays what the customer actually saw.
    pub fn resolve_name(&self, item: &LineItem) -> ResolvedName {
        if let Some(name) = item.cached_name() {
            return ResolvedName::new(name, NameSource::Snapshot);
        }
        if let Some(name) = item.custom_name() {
            return ResolvedName::new(name, NameSource::Custom);
        }

        let Some(item_id) = item.item_id.as_deref() else {
            return ResolvedName::new(UNKNOWN_PRODUCT, NameSource::Placeholder);
        };

        if let Some(name) = self.catalog.item_name(item.category_id.as_deref(), item_id) {
            return ResolvedName::new(name, NameSource::Catalog);
        }
        if let Some(name) = self.inventory_name(item_id) {
            return ResolvedName::new(name, NameSource::Inventory);
        }

        tracing::debug!(item_id, "No catalog or inventory entry for line item.");
        ResolvedName::new(format!("Product {item_id}"), NameSource::Placeholder)
    }

    /// The current reference-data name for an item id, ignoring anything cached
    /// on orders.
    pub fn canonical_name(&self, item_id: &str) -> Option<ResolvedName> {
        self.catalog
            .item_name(None, item_id)
            .map(|name| ResolvedName::new(name, NameSource::Catalog))
            .or_else(|| {
                self.inventory_name(item_id)
                    .map(|name| ResolvedName::new(name, NameSource::Inventory))
            })
    }

    pub fn resolve_category(&self, item: &LineItem) -> String {
        if let Some(name) = item
            .category_id
            .as_deref()
            .and_then(|id| self.catalog.category_name(id))
        {
            return name.to_string();
        }

        if let Some(category) = item
            .item_id
            .as_deref()
            .and_then(|id| self.inventory_item(id))
            .and_then(|inv| non_blank(inv.category.as_deref()))
        {
            return category.to_string();
        }

        match item.category_id.as_deref() {
            Some(id) => title_case(id),
            None => UNCATEGORIZED.to_string(),
        }
    }

    pub fn group_key(item: &LineItem, resolved: &ResolvedName) -> GroupKey {
        match item.item_id.as_deref() {
            Some(id) => GroupKey::Item(id.to_string()),
            None => GroupKey::Name(resolved.name.clone()),
        }
    }

    fn inventory_name(&self, item_id: &str) -> Option<&'a str> {
        self.inventory_item(item_id)
            .and_then(|inv| non_blank(inv.item_name.as_deref()))
    }
}

/// `wall_art` and `wall-art` both become `Wall Art`.
pub fn title_case(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> ProductCatalog {
        serde_json::from_value(json!({
            "categories": [
                { "id": 1, "name": "Frames", "items": [
                    { "id": 7, "name": "Frame A2", "price": 1500 },
                    { "id": 8, "name": "Frame B", "price": 1800 }
                ]},
                { "id": "2", "name": "Albums", "items": [
                    { "id": "8", "name": "Album Eight", "price": 900 },
                    { "id": 30, "name": "Wedding Album", "price": 5000 }
                ]}
            ]
        }))
        .unwrap()
    }

    fn inventory() -> Vec<InventoryItem> {
        serde_json::from_value(json!([
            { "id": 50, "itemName": "Glass Sheet", "category": "Raw Material", "unitCost": 120 },
            { "id": "7", "itemName": "Frame A (stock)", "category": "Stock Frames" }
        ]))
        .unwrap()
    }

    fn item(value: serde_json::Value) -> LineItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_cached_name_wins_over_catalog() {
        let catalog = catalog();
        let resolver = ProductResolver::new(Some(&catalog), &[]);
        let resolved = resolver.resolve_name(&item(json!({ "itemId": 7, "categoryId": 1, "name": "Frame A" })));
        assert_eq!(resolved, ResolvedName::new("Frame A", NameSource::Snapshot));
    }

    #[test]
    fn test_custom_name_before_catalog() {
        let catalog = catalog();
        let resolver = ProductResolver::new(Some(&catalog), &[]);
        let resolved = resolver.resolve_name(&item(json!({ "itemId": 7, "customItemName": "Special" })));
        assert_eq!(resolved.source, NameSource::Custom);
        assert_eq!(resolved.name, "Special");
    }

    #[test]
    fn test_catalog_lookup_prefers_own_category() {
        let catalog = catalog();
        let resolver = ProductResolver::new(Some(&catalog), &[]);

        let in_albums = resolver.resolve_name(&item(json!({ "itemId": 8, "categoryId": 2 })));
        assert_eq!(in_albums.name, "Album Eight");

        let stale_category = resolver.resolve_name(&item(json!({ "itemId": 8, "categoryId": 99 })));
        assert_eq!(stale_category.name, "Frame B");

        let no_category = resolver.resolve_name(&item(json!({ "itemId": "30" })));
        assert_eq!(no_category, ResolvedName::new("Wedding Album", NameSource::Catalog));
    }

    #[test]
    fn test_inventory_then_placeholders() {
        let inventory = inventory();
        let resolver = ProductResolver::new(None, &inventory);

        let from_stock = resolver.resolve_name(&item(json!({ "itemId": 50 })));
        assert_eq!(from_stock, ResolvedName::new("Glass Sheet", NameSource::Inventory));

        let unresolved = resolver.resolve_name(&item(json!({ "itemId": 404 })));
        assert_eq!(unresolved.name, "Product 404");
        assert!(unresolved.is_generic());

        let anonymous = resolver.resolve_name(&item(json!({ "quantity": 1 })));
        assert_eq!(anonymous.name, UNKNOWN_PRODUCT);
        assert!(anonymous.is_generic());
    }

    #[test]
    fn test_canonical_name_ignores_snapshots() {
        let catalog = catalog();
        let inventory = inventory();
        let resolver = ProductResolver::new(Some(&catalog), &inventory);

        assert_eq!(resolver.canonical_name("7").unwrap().name, "Frame A2");
        assert_eq!(resolver.canonical_name("50").unwrap().source, NameSource::Inventory);
        assert!(resolver.canonical_name("404").is_none());
    }

    #[test]
    fn test_category_resolution_chain() {
        let catalog = catalog();
        let inventory = inventory();
        let resolver = ProductResolver::new(Some(&catalog), &inventory);

        assert_eq!(resolver.resolve_category(&item(json!({ "itemId": 7, "categoryId": 1 }))), "Frames");
        assert_eq!(resolver.resolve_category(&item(json!({ "itemId": 50 }))), "Raw Material");
        assert_eq!(resolver.resolve_category(&item(json!({ "categoryId": "wall_art" }))), "Wall Art");
        assert_eq!(resolver.resolve_category(&item(json!({}))), UNCATEGORIZED);
    }

    #[test]
    fn test_group_key_uses_item_id_when_present() {
        let resolved = ResolvedName::new("Frame A", NameSource::Snapshot);
        assert_eq!(
            ProductResolver::group_key(&item(json!({ "itemId": 7 })), &resolved),
            GroupKey::Item("7".to_string())
        );
        assert_eq!(
            ProductResolver::group_key(&item(json!({ "customItemName": "Frame A" })), &resolved),
            GroupKey::Name("Frame A".to_string())
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("frames"), "Frames");
        assert_eq!(title_case("photo-frames and_more"), "Photo Frames And More");
        assert_eq!(title_case(""), "");
    }
}
