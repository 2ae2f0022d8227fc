use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{CurrencySettings, DataPaths, RangeSettings};

/// The file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides, e.g. `BIZMETRICS_DATA__ORDERS`.
pub const ENV_PREFIX: &str = "BIZMETRICS";

/// Loads the application configuration.
///
/// Values come from `path` (or `config.toml` in the working directory) and are
/// then overridden by `BIZMETRICS_*` environment variables. A missing default
/// file is not an error; every setting has a default. An explicitly named file
/// must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if let Some(range) = &config.range {
        if range.start > range.end {
            return Err(ConfigError::ValidationError(format!(
                "range.start ({}) is after range.end ({})",
                range.start, range.end
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_every_section() {
        let file = write_config(
            r#"
            [data]
            orders = "exports/orders.json"
            catalog = "exports/catalog.json"

            [range]
            start = "2024-01-01"
            end = "2024-06-30"

            [currency]
            symbol = "Rs. "
            "#,
        );

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.data.orders, PathBuf::from("exports/orders.json"));
        assert_eq!(config.data.expenses, PathBuf::from("data/expenses.json"));
        assert_eq!(config.data.catalog, Some(PathBuf::from("exports/catalog.json")));
        let range = config.range.unwrap();
        assert_eq!(range.start.to_string(), "2024-01-01");
        assert_eq!(range.end.to_string(), "2024-06-30");
        assert_eq!(config.currency.symbol, "Rs. ");
    }

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let file = write_config("");
        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.data.orders, PathBuf::from("data/orders.json"));
        assert!(config.data.catalog.is_none());
        assert!(config.range.is_none());
        assert!(config.currency.symbol.is_empty());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let file = write_config(
            r#"
            [range]
            start = "2024-02-01"
            end = "2024-01-01"
            "#,
        );

        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let missing = Path::new("does/not/exist/bizmetrics.toml");
        assert!(matches!(load_config(Some(missing)), Err(ConfigError::LoadError(_))));
    }
}
