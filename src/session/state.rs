//! Session state machine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::items::{SalesEntry, StockForecast, SurplusEntry};

/// Steps of one data-entry session, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Prompting the operator and reading a line
    AwaitingInput,
    /// Checking the line just read
    Validating,
    /// Appending the sales row
    PersistingSales,
    /// Reading stock and appending the surplus row
    ComputingSurplus,
    /// Reading sales history and appending the stock forecast
    ComputingForecast,
    /// Session finished
    Done,
}

impl SessionState {
    /// Whether `next` may follow this state
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (AwaitingInput, Validating)
                | (Validating, AwaitingInput)
                | (Validating, PersistingSales)
                | (PersistingSales, ComputingSurplus)
                | (ComputingSurplus, ComputingForecast)
                | (ComputingSurplus, Done)
                | (ComputingForecast, Done)
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::AwaitingInput => "awaiting input",
            SessionState::Validating => "validating",
            SessionState::PersistingSales => "persisting sales",
            SessionState::ComputingSurplus => "computing surplus",
            SessionState::ComputingForecast => "computing forecast",
            SessionState::Done => "done",
        };
        f.write_str(name)
    }
}

/// What happened to the stock forecast step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastOutcome {
    /// Forecast computed and appended to the stock worksheet
    Recorded(StockForecast),
    /// Not enough sales history, stock left unchanged
    Skipped { available: usize, window: usize },
    /// Forecasting turned off for this run
    Disabled,
}

/// Summary of a completed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Lines read before one validated
    pub attempts: usize,
    pub sales: SalesEntry,
    pub surplus: SurplusEntry,
    pub forecast: ForecastOutcome,
}
