//! # CLI Error Type
//!
//! Everything that can stop the `till` binary. Rejected orders are not in
//! here: the menu prints those and keeps going.

use std::path::PathBuf;

use till_core::{CatalogError, CoreError, PurchaseError};

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read catalog {path}: {source}")]
    CatalogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<CatalogError> for CliError {
    fn from(error: CatalogError) -> Self {
        CliError::Core(CoreError::Catalog(error))
    }
}

impl From<PurchaseError> for CliError {
    fn from(error: PurchaseError) -> Self {
        CliError::Core(CoreError::Purchase(error))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_wraps_into_core() {
        let err: CliError = CatalogError::DuplicatePromotion {
            name: "Half".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Core(CoreError::Catalog(_))));
        assert_eq!(err.to_string(), "Catalog error: promotion Half is defined twice");
    }

    #[test]
    fn test_purchase_error_wraps_into_core() {
        let err: CliError = PurchaseError::TotalTooLarge {
            name: "Windows License".to_string(),
            requested: 3,
        }
        .into();
        assert!(matches!(err, CliError::Core(CoreError::Purchase(_))));
    }
}
