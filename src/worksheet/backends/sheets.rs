//! Google Sheets worksheet store
//!
//! Talks to the Sheets v4 REST API with a bearer token. Each worksheet is a
//! tab of one spreadsheet; reads fetch the whole tab and appends go through
//! `values:append` so existing rows are never touched.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::worksheet::{
    config::SheetsConfig,
    error::{WorksheetError, WorksheetResult},
    traits::WorksheetStore,
    types::Row,
};

/// Body of a `values.get` response
#[derive(Debug, Deserialize)]
struct ValueRange {
    /// Omitted by the API when the range is empty
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Body of a `values.append` request
#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    #[serde(rename = "majorDimension")]
    major_dimension: &'static str,
    values: [&'a [String]; 1],
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Worksheet store backed by a Google spreadsheet
pub struct SheetsStore {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl SheetsStore {
    /// Create a new Sheets client
    pub fn new(config: &SheetsConfig) -> WorksheetResult<Self> {
        let spreadsheet_id = config.require_spreadsheet_id()?;
        let access_token = config.require_access_token()?.to_string();
        let base_url = spreadsheet_url(&config.endpoint, spreadsheet_id)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                WorksheetError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    fn values_url(&self, worksheet: &str, suffix: &str) -> WorksheetResult<Url> {
        values_url(&self.base_url, worksheet, suffix)
    }
}

/// `{endpoint}/v4/spreadsheets/{id}/`
fn spreadsheet_url(endpoint: &str, spreadsheet_id: &str) -> WorksheetResult<Url> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        WorksheetError::configuration(format!("invalid sheets endpoint '{}': {}", endpoint, e))
    })?;
    url.path_segments_mut()
        .map_err(|_| WorksheetError::configuration("sheets endpoint cannot be a base URL"))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id]);
    Ok(url)
}

/// `.../values/'{worksheet}'{suffix}` with the sheet name quoted as an A1 range
fn values_url(base: &Url, worksheet: &str, suffix: &str) -> WorksheetResult<Url> {
    let range = format!("'{}'{}", worksheet.replace('\'', "''"), suffix);
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| WorksheetError::configuration("sheets endpoint cannot be a base URL"))?
        .extend(["values", range.as_str()]);
    Ok(url)
}

/// Render a cell the way the sheet displays it
fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Map an unsuccessful response onto a worksheet error
fn classify_error(status: StatusCode, body: &str, worksheet: &str) -> WorksheetError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|response| response.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::BAD_REQUEST if message.contains("Unable to parse range") => {
            WorksheetError::not_found(worksheet)
        }
        StatusCode::NOT_FOUND => {
            WorksheetError::not_found(format!("{} (spreadsheet not found: {})", worksheet, message))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            WorksheetError::authentication(format!("{}: {}", status, message))
        }
        status => WorksheetError::api(format!("{}: {}", status, message)),
    }
}

#[async_trait]
impl WorksheetStore for SheetsStore {
    async fn append_row(&self, worksheet: &str, row: Row) -> WorksheetResult<()> {
        let url = self.values_url(worksheet, ":append")?;
        debug!(%url, cells = row.len(), "Appending row to spreadsheet");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&AppendRequest {
                major_dimension: "ROWS",
                values: [row.as_slice()],
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(classify_error(status, &body, worksheet))
        }
    }

    async fn get_all_values(&self, worksheet: &str) -> WorksheetResult<Vec<Row>> {
        let url = self.values_url(worksheet, "")?;
        debug!(%url, "Reading worksheet from spreadsheet");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body, worksheet));
        }

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| WorksheetError::api(format!("Failed to parse response: {}", e)))?;

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "sheets"
    }
}
