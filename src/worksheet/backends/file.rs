//! CSV-directory worksheet store
//!
//! Each worksheet is a CSV file named `<worksheet>.csv` inside the data
//! directory. Rows are appended in place; nothing is ever rewritten.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::items::ItemType;
use crate::worksheet::{
    config::FileConfig,
    error::{WorksheetError, WorksheetResult},
    traits::WorksheetStore,
    types::{Row, Worksheet},
};

/// Worksheet store backed by CSV files
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open a store over an existing data directory
    pub async fn new(config: &FileConfig) -> WorksheetResult<Self> {
        let data_dir = config.data_dir.clone();
        let metadata = fs::metadata(&data_dir).await.map_err(|e| {
            WorksheetError::configuration(format!(
                "data directory {} is not accessible: {}",
                data_dir.display(),
                e
            ))
        })?;
        if !metadata.is_dir() {
            return Err(WorksheetError::configuration(format!(
                "{} is not a directory",
                data_dir.display()
            )));
        }

        Ok(Self { data_dir })
    }

    fn sheet_path(&self, worksheet: &str) -> PathBuf {
        sheet_path(&self.data_dir, worksheet)
    }

    /// Resolve a worksheet file, failing if it does not exist
    async fn existing_sheet(&self, worksheet: &str) -> WorksheetResult<PathBuf> {
        let path = self.sheet_path(worksheet);
        if fs::try_exists(&path).await? {
            Ok(path)
        } else {
            Err(WorksheetError::not_found(worksheet))
        }
    }
}

fn sheet_path(data_dir: &Path, worksheet: &str) -> PathBuf {
    data_dir.join(format!("{}.csv", worksheet))
}

/// Encode one row as a CSV record
fn encode_row(row: &[String]) -> WorksheetResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(row)?;
    writer
        .into_inner()
        .map_err(|e| WorksheetError::Io(e.into_error()))
}

/// Create the sales, surplus and stock worksheets with an item-name header.
///
/// Existing files are left alone unless `force` is set. Returns the paths
/// that were written.
pub async fn create_worksheets(data_dir: &Path, force: bool) -> WorksheetResult<Vec<PathBuf>> {
    fs::create_dir_all(data_dir).await?;

    let header = encode_row(&ItemType::header())?;
    let mut written = Vec::new();
    for sheet in Worksheet::ALL {
        let path = sheet_path(data_dir, sheet.name());
        if !force && fs::try_exists(&path).await? {
            debug!(path = %path.display(), "Worksheet already exists, keeping it");
            continue;
        }
        fs::write(&path, &header).await?;
        info!(path = %path.display(), "Created worksheet");
        written.push(path);
    }
    Ok(written)
}

#[async_trait]
impl WorksheetStore for FileStore {
    async fn append_row(&self, worksheet: &str, row: Row) -> WorksheetResult<()> {
        let path = self.existing_sheet(worksheet).await?;

        // A file edited by hand may lack the final line break
        let existing = fs::read(&path).await?;
        let mut record = Vec::new();
        if existing.last().is_some_and(|byte| *byte != b'\n') {
            record.push(b'\n');
        }
        record.extend(encode_row(&row)?);

        let mut file = fs::OpenOptions::new().append(true).open(&path).await?;
        file.write_all(&record).await?;
        file.flush().await?;
        Ok(())
    }

    async fn get_all_values(&self, worksheet: &str) -> WorksheetResult<Vec<Row>> {
        let path = self.existing_sheet(worksheet).await?;
        let content = fs::read(&path).await?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_slice());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
