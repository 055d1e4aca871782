//! Worksheet layer
//!
//! A [`WorksheetStore`] is any backend that can append rows to, and read rows
//! from, named worksheets. The [`WorksheetGateway`] wraps one store and is
//! passed explicitly to the session, so tests can swap in a [`MemoryStore`].

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod gateway;
pub mod traits;
pub mod types;

pub use backends::{FileStore, MemoryStore, SheetsStore};
pub use config::{BackendType, FileConfig, SheetsConfig, WorksheetConfig};
pub use error::{WorksheetError, WorksheetResult};
pub use factory::WorksheetStoreFactory;
pub use gateway::WorksheetGateway;
pub use traits::WorksheetStore;
pub use types::{Row, Worksheet};
