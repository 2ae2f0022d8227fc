use crate::report::TopProduct;
use crate::resolver::{GroupKey, NameSource, ProductResolver, UNCATEGORIZED};
use crate::tally::{Accumulate, Tally};
use core_types::{InventoryItem, Order, ProductCatalog};
use rust_decimal::Decimal;

/// How many products the ranking keeps.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

#[derive(Debug)]
struct ProductTotals {
    key: String,
    name: String,
    source: NameSource,
    category: String,
    quantity: Decimal,
    revenue: Decimal,
}

/// The ten best-selling products by quantity.
pub fn get_top_selling_products(
    orders: &[Order],
    inventory: &[InventoryItem],
    catalog: Option<&ProductCatalog>,
) -> Vec<TopProduct> {
    let resolver = ProductResolver::new(catalog, inventory);
    rank_products(orders, &resolver)
}

/// Ranks every line item of `orders`, merging rows that share a group key.
///
/// Each line is named the way its own order displays it. When two orders give
/// the same catalog id different names, the row converges on one label:
/// a real name always replaces a placeholder, and two conflicting real names are
/// settled by the current catalog or inventory entry when there is one.
pub fn rank_products(orders: &[Order], resolver: &ProductResolver<'_>) -> Vec<TopProduct> {
    let mut products: Tally<GroupKey, ProductTotals> = Tally::new();

    for item in orders.iter().flat_map(|order| order.items.iter()) {
        let resolved = resolver.resolve_name(item);
        let category = resolver.resolve_category(item);
        let key = ProductResolver::group_key(item, &resolved);

        let totals = products.entry(key.clone(), || ProductTotals {
            key: key.to_string(),
            name: resolved.name.clone(),
            source: resolved.source,
            category: category.clone(),
            quantity: Decimal::ZERO,
            revenue: Decimal::ZERO,
        });

        if totals.name != resolved.name && !resolved.is_generic() {
            if totals.source.is_generic() {
                totals.name = resolved.name.clone();
                totals.source = resolved.source;
            } else if let GroupKey::Item(item_id) = &key {
                if let Some(canonical) = resolver.canonical_name(item_id) {
                    totals.name = canonical.name;
                    totals.source = canonical.source;
                }
            }
        }
        if totals.category == UNCATEGORIZED && category != UNCATEGORIZED {
            totals.category = category;
        }

        totals.quantity.accumulate(item.quantity);
        totals.revenue.accumulate(item.line_total());
    }

    let mut ranked: Vec<TopProduct> = products
        .into_values()
        .into_iter()
        .map(|totals| TopProduct {
            key: totals.key,
            name: totals.name,
            category: totals.category,
            quantity: totals.quantity,
            revenue: totals.revenue,
        })
        .collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(TOP_PRODUCTS_LIMIT);

    tracing::debug!(products = ranked.len(), "Top-selling products ranked.");
    ranked
}
