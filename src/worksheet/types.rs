//! Worksheet names and row types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// A row of cells as the store returns it
pub type Row = Vec<String>;

/// The worksheets this tool reads and appends to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Worksheet {
    Sales,
    Surplus,
    Stock,
}

impl Worksheet {
    pub const ALL: [Worksheet; 3] = [Worksheet::Sales, Worksheet::Surplus, Worksheet::Stock];

    /// Name of the worksheet inside the spreadsheet
    pub fn name(self) -> &'static str {
        match self {
            Worksheet::Sales => "sales",
            Worksheet::Surplus => "surplus",
            Worksheet::Stock => "stock",
        }
    }
}

impl fmt::Display for Worksheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Worksheet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Worksheet::ALL
            .into_iter()
            .find(|sheet| sheet.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::config(format!(
                    "unknown worksheet '{}' (expected sales, surplus or stock)",
                    s
                ))
            })
    }
}
