//! Factory for creating worksheet stores

use tracing::debug;

use super::backends::{FileStore, MemoryStore, SheetsStore};
use super::config::{BackendType, WorksheetConfig};
use super::error::WorksheetResult;
use super::traits::WorksheetStore;

/// Factory for creating worksheet store instances
pub struct WorksheetStoreFactory;

impl WorksheetStoreFactory {
    /// Create the store selected by the configuration
    pub async fn from_config(
        config: &WorksheetConfig,
    ) -> WorksheetResult<Box<dyn WorksheetStore>> {
        config.validate()?;
        debug!(backend = ?config.backend, "Creating worksheet store");

        match config.backend {
            BackendType::File => {
                let store = FileStore::new(&config.file).await?;
                Ok(Box::new(store))
            }
            BackendType::Memory => Ok(Box::new(MemoryStore::with_default_worksheets())),
            BackendType::Sheets => {
                let store = SheetsStore::new(&config.sheets)?;
                Ok(Box::new(store))
            }
        }
    }
}
