use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataPaths,
    /// The reporting window used when no dates are given on the command line.
    pub range: Option<RangeSettings>,
    pub currency: CurrencySettings,
}

/// Where the exported record collections live.
///
/// Each file holds a JSON array of records. The catalog is a single
/// `{ "categories": [...] }` document and may be left out entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub orders: PathBuf,
    pub expenses: PathBuf,
    pub inventory: PathBuf,
    pub catalog: Option<PathBuf>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            orders: PathBuf::from("data/orders.json"),
            expenses: PathBuf::from("data/expenses.json"),
            inventory: PathBuf::from("data/inventory.json"),
            catalog: None,
        }
    }
}

/// An inclusive default window. Either side may be overridden per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RangeSettings {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    /// Prefix for formatted amounts, e.g. `"Rs. "`.
    pub symbol: String,
}
