//! Worksheet store configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::error::{WorksheetError, WorksheetResult};

/// Worksheet backend type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// In-memory worksheets (for testing)
    Memory,
    /// CSV files in a local directory (default)
    #[default]
    File,
    /// Google Sheets spreadsheet
    Sheets,
}

impl std::str::FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "sheets" => Ok(Self::Sheets),
            other => Err(format!(
                "unknown backend '{}' (expected memory, file or sheets)",
                other
            )),
        }
    }
}

/// Main worksheet store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetConfig {
    /// Backend type
    #[serde(default)]
    pub backend: BackendType,

    /// Header rows at the top of every worksheet
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,

    /// CSV directory settings
    #[serde(default)]
    pub file: FileConfig,

    /// Google Sheets settings
    #[serde(default)]
    pub sheets: SheetsConfig,
}

/// CSV directory configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Directory holding `sales.csv`, `surplus.csv` and `stock.csv`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Google Sheets configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet ID from the sheet URL
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// OAuth access token with the spreadsheets scope
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            access_token: None,
            endpoint: default_endpoint(),
            timeout: default_timeout(),
        }
    }
}

impl SheetsConfig {
    /// Spreadsheet ID, required for the sheets backend
    pub fn require_spreadsheet_id(&self) -> WorksheetResult<&str> {
        self.spreadsheet_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                WorksheetError::configuration("sheets backend needs a spreadsheet_id")
            })
    }

    /// Access token, required for the sheets backend
    pub fn require_access_token(&self) -> WorksheetResult<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                WorksheetError::configuration(
                    "sheets backend needs an access token (set LOVE_SANDWICHES_ACCESS_TOKEN)",
                )
            })
    }
}

// Default value functions for serde
fn default_header_rows() -> usize {
    1
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_endpoint() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::default(),
            header_rows: default_header_rows(),
            file: FileConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl WorksheetConfig {
    /// Check that the selected backend has what it needs
    pub fn validate(&self) -> WorksheetResult<()> {
        if self.backend == BackendType::Sheets {
            self.sheets.require_spreadsheet_id()?;
            self.sheets.require_access_token()?;
            url::Url::parse(&self.sheets.endpoint).map_err(|e| {
                WorksheetError::configuration(format!(
                    "invalid sheets endpoint '{}': {}",
                    self.sheets.endpoint, e
                ))
            })?;
        }
        Ok(())
    }
}
