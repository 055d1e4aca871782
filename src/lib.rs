//! # love-sandwiches
//!
//! Data-entry automation for a sandwich stall. Each run asks the operator for
//! the last market's sales, records them, works out the surplus against the
//! latest stock figures and recalculates stock for the next market.
//!
//! ## Usage
//!
//! ```bash
//! love-sandwiches init --data-dir ./data
//! love-sandwiches run --data-dir ./data
//! love-sandwiches show stock --last 3
//! ```
//!
//! ## Modules
//!
//! - `config` - TOML configuration with environment overrides
//! - `error` - Crate error type
//! - `forecast` - Stock forecasting from recent sales
//! - `items` - Item types and rows aligned on them
//! - `session` - The interactive data-entry session
//! - `surplus` - Stock minus sales per item
//! - `validation` - Parsing operator input
//! - `worksheet` - Worksheet stores (memory, CSV files, Google Sheets)
pub mod config;
pub mod error;
pub mod forecast;
pub mod items;
pub mod session;
pub mod surplus;
pub mod validation;
pub mod worksheet;

pub use error::{Error, Result};
