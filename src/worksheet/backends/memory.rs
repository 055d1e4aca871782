//! In-memory worksheet store for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::items::ItemType;
use crate::worksheet::{
    error::{WorksheetError, WorksheetResult},
    traits::WorksheetStore,
    types::{Row, Worksheet},
};

/// In-memory worksheet store
#[derive(Clone, Default)]
pub struct MemoryStore {
    sheets: Arc<RwLock<HashMap<String, Vec<Row>>>>,
}

impl MemoryStore {
    /// Create an empty store with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the sales, surplus and stock worksheets, each
    /// with an item-name header row
    pub fn with_default_worksheets() -> Self {
        let sheets = Worksheet::ALL
            .iter()
            .map(|sheet| (sheet.name().to_string(), vec![ItemType::header()]))
            .collect();

        Self {
            sheets: Arc::new(RwLock::new(sheets)),
        }
    }

    /// Create or replace a worksheet with the given rows
    pub async fn insert_worksheet(&self, name: &str, rows: Vec<Row>) {
        self.sheets.write().await.insert(name.to_string(), rows);
    }

    /// Append rows of integers, handy for seeding history
    pub async fn seed_rows(&self, name: &str, rows: &[[i64; 6]]) -> WorksheetResult<()> {
        for row in rows {
            let cells = row.iter().map(ToString::to_string).collect();
            self.append_row(name, cells).await?;
        }
        Ok(())
    }

    /// Snapshot of a worksheet's rows
    pub async fn rows(&self, name: &str) -> Option<Vec<Row>> {
        self.sheets.read().await.get(name).cloned()
    }
}

#[async_trait]
impl WorksheetStore for MemoryStore {
    async fn append_row(&self, worksheet: &str, row: Row) -> WorksheetResult<()> {
        let mut sheets = self.sheets.write().await;
        let rows = sheets
            .get_mut(worksheet)
            .ok_or_else(|| WorksheetError::not_found(worksheet))?;
        rows.push(row);
        Ok(())
    }

    async fn get_all_values(&self, worksheet: &str) -> WorksheetResult<Vec<Row>> {
        self.sheets
            .read()
            .await
            .get(worksheet)
            .cloned()
            .ok_or_else(|| WorksheetError::not_found(worksheet))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
