//! One data-entry session
//!
//! A session reads a sales line from the operator, re-prompting until it
//! validates, then records sales, surplus and (optionally) a new stock
//! forecast through the [`WorksheetGateway`]. Any worksheet failure ends the
//! session; only input mistakes are retried.

pub mod state;


pub use state::{ForecastOutcome, SessionReport, SessionState};

use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::forecast::{calculate_stock_data, check_history, ForecastSettings, HistoryCheck};
use crate::items::{ItemRow, SalesEntry};
use crate::surplus::calculate_surplus;
use crate::validation::parse_sales_line;
use crate::worksheet::{Worksheet, WorksheetGateway};

/// Greeting printed when a session starts
pub const WELCOME: &str = "Welcome to love sandwiches data automation!";

/// Instructions printed before every attempt
const PROMPT: &str = "Please enter sales data from last market.\n\
                      Data should be six numbers separated by commas.\n\
                      Example: 10,20,30,40,50,60\n";

/// Drives one session against a gateway, reading from `input` and writing
/// operator-facing text to `output`
pub struct Session<'a, R, W> {
    gateway: &'a WorksheetGateway,
    forecast: ForecastSettings,
    input: R,
    output: W,
    state: SessionState,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        gateway: &'a WorksheetGateway,
        forecast: ForecastSettings,
        input: R,
        output: W,
    ) -> Self {
        Self {
            gateway,
            forecast,
            input,
            output,
            state: SessionState::AwaitingInput,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid session transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "Session transition");
        self.state = next;
    }

    /// Prompt until the operator enters a valid sales line.
    ///
    /// Returns the entry and the number of lines read.
    pub fn get_sales_data(&mut self) -> Result<(SalesEntry, usize)> {
        let mut attempts = 0;
        loop {
            writeln!(self.output, "{}", PROMPT)?;
            writeln!(self.output, "Enter your data here:")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::Input(
                    "input closed before valid sales data was entered".to_string(),
                ));
            }
            attempts += 1;
            let data = line.trim_end_matches(['\r', '\n']);
            writeln!(self.output, "The data provided is {}", data)?;

            self.transition(SessionState::Validating);
            match parse_sales_line(data).map_err(Error::from) {
                Ok(entry) => {
                    writeln!(self.output, "Data is valid!")?;
                    return Ok((entry, attempts));
                }
                Err(e) if !e.is_fatal() => {
                    debug!(attempt = attempts, error = %e, "Rejected sales input");
                    writeln!(self.output, "{}, please try again.\n", e)?;
                    self.transition(SessionState::AwaitingInput);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Append a row, telling the operator what is happening
    async fn update_worksheet(
        &mut self,
        data: &ItemRow<i64>,
        worksheet: Worksheet,
    ) -> Result<()> {
        writeln!(self.output, "Updating {} worksheet...\n", worksheet)?;
        self.gateway.update_worksheet(data, worksheet).await?;
        writeln!(self.output, "{} worksheet updated successfully.\n", worksheet)?;
        Ok(())
    }

    async fn record_forecast(&mut self) -> Result<ForecastOutcome> {
        if !self.forecast.enabled {
            return Ok(ForecastOutcome::Disabled);
        }
        self.transition(SessionState::ComputingForecast);

        let history = self.gateway.sales_history(self.forecast.window).await?;
        if let HistoryCheck::Skip { available } = check_history(&history, &self.forecast)? {
            writeln!(
                self.output,
                "Not enough sales history to forecast stock ({} of {} entries), stock worksheet left unchanged.\n",
                available, self.forecast.window
            )?;
            return Ok(ForecastOutcome::Skipped {
                available,
                window: self.forecast.window,
            });
        }

        writeln!(self.output, "Calculating stock data...\n")?;
        let stock = calculate_stock_data(&history, &self.forecast)?;
        self.update_worksheet(&stock, Worksheet::Stock).await?;
        Ok(ForecastOutcome::Recorded(stock))
    }

    /// Run the whole session
    pub async fn run(mut self) -> Result<SessionReport> {
        writeln!(self.output, "{}", WELCOME)?;

        let (sales, attempts) = self.get_sales_data()?;

        self.transition(SessionState::PersistingSales);
        self.update_worksheet(&sales, Worksheet::Sales).await?;

        self.transition(SessionState::ComputingSurplus);
        writeln!(self.output, "Calculating surplus data...\n")?;
        let stock_row = self.gateway.latest_stock_row().await?;
        let surplus = calculate_surplus(&stock_row, &sales)?;
        self.update_worksheet(&surplus, Worksheet::Surplus).await?;

        let forecast = self.record_forecast().await?;

        self.transition(SessionState::Done);
        info!(%sales, %surplus, attempts, "Session complete");

        Ok(SessionReport {
            attempts,
            sales,
            surplus,
            forecast,
        })
    }
}
