//! # Till CLI Library
//!
//! Wires configuration, logging and the catalog to the interactive menu.
//!
//! ## Module Organization
//! ```text
//! till_cli/
//! ├── lib.rs      ◄─── You are here (startup & run)
//! ├── config.rs   ◄─── Environment configuration
//! ├── menu.rs     ◄─── Interactive store menu
//! └── error.rs    ◄─── CLI error type
//! ```

pub mod config;
pub mod error;
pub mod menu;

use std::fs;
use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use till_core::catalog::{default_catalog, parse_catalog};
use till_core::Store;

use config::CliConfig;
use error::{CliError, CliResult};
use menu::Menu;

/// Runs the store menu on the process's stdin and stdout.
///
/// ## Startup Sequence
/// 1. Load configuration from the environment
/// 2. Initialize tracing (stderr, `RUST_LOG` or the configured filter)
/// 3. Load the catalog file, or the demo store when none is configured
/// 4. Run the menu until the user quits
pub fn run() -> CliResult<()> {
    let config = CliConfig::load()?;
    init_tracing(&config.log_filter);

    info!(
        store = %config.store_name,
        catalog = ?config.catalog_path,
        "Starting till"
    );

    let store = load_store(&config)?;
    info!(products = store.len(), "Catalog loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(store, &config, stdin.lock(), stdout.lock()).run()
}

/// Initializes the tracing subscriber. Logs go to stderr so the menu on
/// stdout stays readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show purchases and receipts
/// - `RUST_LOG=till_core=trace` - Everything from the core only
/// - Default: the configured filter (`warn,till=info`)
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the store from the configured catalog file, or the demo store.
pub fn load_store(config: &CliConfig) -> CliResult<Store> {
    let Some(path) = &config.catalog_path else {
        return Ok(default_catalog()?);
    };

    let text = fs::read_to_string(path).map_err(|source| CliError::CatalogFile {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "Reading catalog");
    Ok(parse_catalog(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_default_store() {
        let store = load_store(&CliConfig::default()).unwrap();
        assert_eq!(store.get_all_products().len(), 7);
    }

    #[test]
    fn test_load_catalog_file() {
        let path = std::env::temp_dir().join(format!("till-catalog-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{ "products": [{ "kind": "stocked", "name": "Tea", "price": 4, "quantity": 12 }] }"#,
        )
        .unwrap();

        let config = CliConfig {
            catalog_path: Some(path.clone()),
            ..CliConfig::default()
        };
        let store = load_store(&config).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_total_quantity(), 12);
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = CliConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/till/catalog.json")),
            ..CliConfig::default()
        };
        let err = load_store(&config).unwrap_err();
        assert!(matches!(err, CliError::CatalogFile { .. }));
        assert!(err
            .to_string()
            .starts_with("Cannot read catalog /nonexistent/till/catalog.json"));
    }
}
