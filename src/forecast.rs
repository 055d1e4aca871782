//! Stock forecasting from recent sales
//!
//! The next stock level for an item is the average of its most recent sales,
//! padded by a safety buffer and rounded to the nearest whole sandwich
//! (ties go to the even neighbour).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::items::{ItemRow, ItemType, StockForecast, ITEM_COUNT};

/// What to do when the sales worksheet holds fewer entries than the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortHistoryPolicy {
    /// Leave the stock worksheet untouched for this run
    #[default]
    Skip,
    /// Average whatever entries exist
    Partial,
    /// Abort the forecast with a data shape error
    Fail,
}

impl std::str::FromStr for ShortHistoryPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "partial" => Ok(Self::Partial),
            "fail" => Ok(Self::Fail),
            other => Err(Error::config(format!(
                "unknown short history policy '{}' (expected skip, partial or fail)",
                other
            ))),
        }
    }
}

/// Forecast tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    /// Recalculate stock after recording sales
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Number of most recent sales entries averaged per item
    #[serde(default = "default_window")]
    pub window: usize,

    /// Multiplier applied to the average (1.1 adds 10%)
    #[serde(default = "default_buffer")]
    pub buffer: f64,

    #[serde(default)]
    pub short_history: ShortHistoryPolicy,
}

fn default_true() -> bool {
    true
}

fn default_window() -> usize {
    5
}

fn default_buffer() -> f64 {
    1.1
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            window: default_window(),
            buffer: default_buffer(),
            short_history: ShortHistoryPolicy::default(),
        }
    }
}

impl ForecastSettings {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::config("forecast window must be at least 1"));
        }
        if !self.buffer.is_finite() || self.buffer <= 0.0 {
            return Err(Error::config(format!(
                "forecast buffer must be a positive number, got {}",
                self.buffer
            )));
        }
        Ok(())
    }
}

/// Outcome of checking the sales history against the forecast window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryCheck {
    /// Enough entries, forecast from these columns
    Ready,
    /// Too few entries and the policy says not to forecast
    Skip { available: usize },
}

/// Apply the short history policy to the columns read from the sales sheet
pub fn check_history(
    history: &[Vec<String>],
    settings: &ForecastSettings,
) -> Result<HistoryCheck> {
    let available = history.iter().map(Vec::len).min().unwrap_or(0);
    if available >= settings.window {
        return Ok(HistoryCheck::Ready);
    }

    match settings.short_history {
        ShortHistoryPolicy::Skip => {
            warn!(
                available,
                window = settings.window,
                "Not enough sales history to forecast stock, skipping"
            );
            Ok(HistoryCheck::Skip { available })
        }
        ShortHistoryPolicy::Partial if available > 0 => {
            debug!(available, "Forecasting from partial sales history");
            Ok(HistoryCheck::Ready)
        }
        ShortHistoryPolicy::Partial | ShortHistoryPolicy::Fail => Err(Error::data_shape(format!(
            "stock forecast needs {} sales entries per item, found {}",
            settings.window, available
        ))),
    }
}

/// Average one column of sales cells and pad it by the buffer
fn forecast_column(item: ItemType, column: &[String], buffer: f64) -> Result<i64> {
    if column.is_empty() {
        return Err(Error::data_shape(format!("no sales recorded for {}", item)));
    }

    let mut total = 0i128;
    for cell in column {
        let value = cell.trim().parse::<i64>().map_err(|_| {
            Error::data_shape(format!(
                "sales value '{}' for {} is not an integer",
                cell, item
            ))
        })?;
        total += i128::from(value);
    }

    let average = total as f64 / column.len() as f64;
    let stock = (average * buffer).round_ties_even();
    if !(i64::MIN as f64..i64::MAX as f64).contains(&stock) {
        return Err(Error::data_shape(format!(
            "stock forecast for {} is out of range ({})",
            item, stock
        )));
    }
    Ok(stock as i64)
}

/// Calculate the next stock level for every item from its sales history
pub fn calculate_stock_data(
    history: &[Vec<String>],
    settings: &ForecastSettings,
) -> Result<StockForecast> {
    if history.len() != ITEM_COUNT {
        return Err(Error::data_shape(format!(
            "expected {} sales columns, found {}",
            ITEM_COUNT,
            history.len()
        )));
    }

    let mut forecast = Vec::with_capacity(ITEM_COUNT);
    for (item, column) in ItemType::ALL.iter().zip(history) {
        forecast.push(forecast_column(*item, column, settings.buffer)?);
    }

    let forecast = ItemRow::try_from_vec(forecast)?;
    debug!(%forecast, "Calculated stock forecast");
    Ok(forecast)
}
