//! Surplus calculation
//!
//! Surplus is the stock taken to market minus what was sold. A positive value
//! is waste; a negative value means extra sandwiches were made once stock ran
//! out. Both are ordinary outcomes.

use tracing::debug;

use crate::error::{Error, Result};
use crate::items::{ItemRow, ItemType, SalesEntry, SurplusEntry};

/// Parse a stock row read from the worksheet into one integer per item
pub fn parse_stock_row(stock_row: &[String]) -> Result<ItemRow<i64>> {
    let row = ItemRow::try_from_vec(stock_row.to_vec())?;
    let mut values = Vec::with_capacity(ItemType::ALL.len());
    for (item, cell) in row.iter() {
        let value = cell.trim().parse::<i64>().map_err(|_| {
            Error::data_shape(format!(
                "stock value '{}' for {} is not an integer",
                cell, item
            ))
        })?;
        values.push(value);
    }

    ItemRow::try_from_vec(values)
}

/// Subtract each item's sales from its latest stock figure
pub fn calculate_surplus(stock_row: &[String], sales: &SalesEntry) -> Result<SurplusEntry> {
    let stock = parse_stock_row(stock_row)?;
    let mut values = Vec::with_capacity(ItemType::ALL.len());
    for item in ItemType::ALL {
        let value = stock[item].checked_sub(sales[item]).ok_or_else(|| {
            Error::data_shape(format!(
                "surplus for {} overflows ({} stock, {} sold)",
                item, stock[item], sales[item]
            ))
        })?;
        values.push(value);
    }

    let surplus = ItemRow::try_from_vec(values)?;
    debug!(%stock, %sales, %surplus, "Calculated surplus");
    Ok(surplus)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_surplus_is_stock_minus_sales() {
        let stock = cells(&["50", "40", "30", "20", "10", "5"]);
        let sales = ItemRow::new([10, 20, 30, 40, 50, 6]);

        let surplus = calculate_surplus(&stock, &sales).unwrap();
        assert_eq!(surplus, ItemRow::new([40, 20, 0, -20, -40, -1]));
    }

    #[test]
    fn test_stock_cells_may_carry_whitespace() {
        let stock = cells(&[" 10", "10 ", "10", "10", "10", "10"]);
        let surplus = calculate_surplus(&stock, &ItemRow::new([5; 6])).unwrap();
        assert_eq!(surplus, ItemRow::new([5; 6]));
    }

    #[test]
    fn test_overflowing_surplus_is_a_shape_error() {
        let stock = cells(&["1", "1", "1", "1", "1", "1"]);
        let sales = ItemRow::new([i64::MIN, 1, 1, 1, 1, 1]);

        let err = calculate_surplus(&stock, &sales).unwrap_err();
        assert!(matches!(err, Error::DataShape(_)));
        assert!(err.to_string().contains("surplus for bacon overflows"));
    }

    #[test]
    fn test_short_stock_row_is_a_shape_error() {
        let stock = cells(&["10", "10", "10", "10", "10"]);
        let err = calculate_surplus(&stock, &ItemRow::new([1; 6])).unwrap_err();
        assert!(matches!(err, Error::DataShape(_)));
    }

    #[test]
    fn test_non_numeric_stock_is_a_shape_error() {
        let stock = cells(&["bacon", "chicken", "egg", "ham", "tuna", "turkey"]);
        let err = calculate_surplus(&stock, &ItemRow::new([1; 6])).unwrap_err();
        assert!(err.to_string().contains("'bacon' for bacon"));
    }
}
