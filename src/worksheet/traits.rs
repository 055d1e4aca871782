//! Core trait for worksheet stores

use async_trait::async_trait;

use super::error::{WorksheetError, WorksheetResult};
use super::types::Row;

/// Append and read access to named worksheets.
///
/// Worksheets are addressed by name and must already exist; implementations
/// return [`WorksheetError::NotFound`] rather than creating them on demand.
#[async_trait]
pub trait WorksheetStore: Send + Sync {
    /// Append a row after the last row of the worksheet
    async fn append_row(&self, worksheet: &str, row: Row) -> WorksheetResult<()>;

    /// Read every row of the worksheet, headers included
    async fn get_all_values(&self, worksheet: &str) -> WorksheetResult<Vec<Row>>;

    /// Read one column (1-based) top to bottom, headers included.
    ///
    /// Trailing empty cells are dropped.
    async fn col_values(&self, worksheet: &str, column: usize) -> WorksheetResult<Vec<String>> {
        let index = column.checked_sub(1).ok_or_else(|| {
            WorksheetError::configuration("worksheet columns are numbered from 1")
        })?;

        let mut values: Vec<String> = self
            .get_all_values(worksheet)
            .await?
            .into_iter()
            .map(|mut row| {
                if index < row.len() {
                    row.swap_remove(index)
                } else {
                    String::new()
                }
            })
            .collect();

        while values.last().is_some_and(|value| value.is_empty()) {
            values.pop();
        }
        Ok(values)
    }

    /// Short backend identifier for logs
    fn backend_name(&self) -> &'static str;
}
