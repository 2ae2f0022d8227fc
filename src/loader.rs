use anyhow::{Context, Result};
use configuration::DataPaths;
use core_types::{ExpenseRecord, InventoryItem, Order, ProductCatalog};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Every collection the reports are computed from.
#[derive(Debug, Default)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub expenses: Vec<ExpenseRecord>,
    pub inventory: Vec<InventoryItem>,
    pub catalog: Option<ProductCatalog>,
}

/// Reads the exported collections named in `paths`.
///
/// A collection file that does not exist is treated as empty so a shop without,
/// say, any recorded expenses still gets its other reports. Files that exist
/// but do not parse are errors.
pub fn load_dataset(paths: &DataPaths) -> Result<Dataset> {
    let dataset = Dataset {
        orders: read_collection(&paths.orders)?,
        expenses: read_collection(&paths.expenses)?,
        inventory: read_collection(&paths.inventory)?,
        catalog: paths.catalog.as_deref().map(read_json).transpose()?,
    };

    tracing::info!(
        orders = dataset.orders.len(),
        expenses = dataset.expenses.len(),
        inventory = dataset.inventory.len(),
        catalog = dataset.catalog.is_some(),
        "Records loaded."
    );
    Ok(dataset)
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Data file not found; treating it as empty.");
        return Ok(Vec::new());
    }
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}
