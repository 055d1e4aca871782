//! Operator input validation
//!
//! Sales figures arrive as a single comma-separated line. Validation is a
//! pure function: it either yields a [`SalesEntry`] or an
//! [`InputFormatError`] describing what to fix, and the session decides
//! whether to ask again.

use thiserror::Error;

use crate::items::{ItemRow, SalesEntry, ITEM_COUNT};

/// Separator between the figures of one entry
pub const FIELD_SEPARATOR: char = ',';

/// Reasons an operator entry is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputFormatError {
    #[error("'{token}' is not a whole number")]
    ParseInt { token: String },

    #[error("Exactly {} values required. You provided {provided}", ITEM_COUNT)]
    WrongCount { provided: usize },
}

/// Split a raw operator line into its fields
pub fn split_fields(raw: &str) -> Vec<&str> {
    raw.split(FIELD_SEPARATOR).collect()
}

/// Check that every value is an integer and that there is one per item.
///
/// Every token is parsed before the count is checked, so a short list with a
/// non-numeric token reports the parse failure rather than the count.
pub fn validate_data(values: &[&str]) -> Result<SalesEntry, InputFormatError> {
    let parsed = values
        .iter()
        .map(|value| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| InputFormatError::ParseInt {
                    token: value.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let parsed: [i64; ITEM_COUNT] = parsed
        .try_into()
        .map_err(|_| InputFormatError::WrongCount {
            provided: values.len(),
        })?;

    Ok(ItemRow::new(parsed))
}

/// Split and validate a raw line in one step
pub fn parse_sales_line(raw: &str) -> Result<SalesEntry, InputFormatError> {
    validate_data(&split_fields(raw))
}
