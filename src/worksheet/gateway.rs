//! Domain operations over a worksheet store
//!
//! The gateway is the only part of the tool that touches worksheets. It owns
//! the store handle, knows how many header rows to skip, and speaks in item
//! rows instead of raw cells.

use tracing::{debug, info};

use super::traits::WorksheetStore;
use super::types::{Row, Worksheet};
use crate::error::{Error, Result};
use crate::items::{ItemRow, ItemType};

/// Worksheet access for one session
pub struct WorksheetGateway {
    store: Box<dyn WorksheetStore>,
    header_rows: usize,
}

impl WorksheetGateway {
    pub fn new(store: Box<dyn WorksheetStore>, header_rows: usize) -> Self {
        Self { store, header_rows }
    }

    /// Append a row of item values to the named worksheet
    pub async fn update_worksheet(
        &self,
        data: &ItemRow<i64>,
        worksheet: Worksheet,
    ) -> Result<()> {
        debug!(
            worksheet = worksheet.name(),
            backend = self.store.backend_name(),
            %data,
            "Appending row"
        );
        self.store
            .append_row(worksheet.name(), data.to_cells())
            .await?;
        info!(worksheet = worksheet.name(), "Worksheet updated");
        Ok(())
    }

    /// Data rows of a worksheet, header rows removed
    pub async fn data_rows(&self, worksheet: Worksheet) -> Result<Vec<Row>> {
        let rows = self.store.get_all_values(worksheet.name()).await?;
        Ok(rows.into_iter().skip(self.header_rows).collect())
    }

    /// The last `count` data rows of a worksheet, oldest first
    pub async fn last_rows(&self, worksheet: Worksheet, count: usize) -> Result<Vec<Row>> {
        let mut rows = self.data_rows(worksheet).await?;
        let start = rows.len().saturating_sub(count);
        Ok(rows.split_off(start))
    }

    /// Most recent row of the stock worksheet
    pub async fn latest_stock_row(&self) -> Result<Row> {
        let mut rows = self.data_rows(Worksheet::Stock).await?;
        let row = rows
            .pop()
            .ok_or_else(|| Error::data_shape("stock worksheet has no entries yet"))?;
        debug!(stock = ?row, "Read latest stock row");
        Ok(row)
    }

    /// The last `window` sales values of every item, one column per item
    pub async fn sales_history(&self, window: usize) -> Result<Vec<Vec<String>>> {
        let mut columns = Vec::with_capacity(ItemType::ALL.len());
        for item in ItemType::ALL {
            let mut column: Vec<String> = self
                .store
                .col_values(Worksheet::Sales.name(), item.column())
                .await?
                .into_iter()
                .skip(self.header_rows)
                .collect();
            let start = column.len().saturating_sub(window);
            columns.push(column.split_off(start));
        }
        debug!(window, "Read sales history");
        Ok(columns)
    }
}
