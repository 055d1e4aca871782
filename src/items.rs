//! Sandwich item types and rows aligned on them
//!
//! Every worksheet stores one column per [`ItemType`], always in the same
//! order. [`ItemRow`] makes that alignment part of the type: a row is a
//! fixed-size array indexed by item type, so sales, stock, surplus and
//! forecast values can only be combined item-for-item.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::error::{Error, Result};

/// Number of item types tracked in every worksheet row
pub const ITEM_COUNT: usize = 6;

/// Sandwich varieties, in worksheet column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Bacon,
    Chicken,
    Egg,
    Ham,
    Tuna,
    Turkey,
}

impl ItemType {
    pub const ALL: [ItemType; ITEM_COUNT] = [
        ItemType::Bacon,
        ItemType::Chicken,
        ItemType::Egg,
        ItemType::Ham,
        ItemType::Tuna,
        ItemType::Turkey,
    ];

    /// Zero-based position of this item in a worksheet row
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based worksheet column holding this item
    pub fn column(self) -> usize {
        self.index() + 1
    }

    /// Header label used in the first row of each worksheet
    pub fn name(self) -> &'static str {
        match self {
            ItemType::Bacon => "bacon",
            ItemType::Chicken => "chicken",
            ItemType::Egg => "egg",
            ItemType::Ham => "ham",
            ItemType::Tuna => "tuna",
            ItemType::Turkey => "turkey",
        }
    }

    /// Header row shared by the sales, surplus and stock worksheets
    pub fn header() -> Vec<String> {
        Self::ALL.iter().map(|item| item.name().to_string()).collect()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow<T>([T; ITEM_COUNT]);

/// Validated sales figures for one market
pub type SalesEntry = ItemRow<i64>;

/// Stock minus sales, per item
pub type SurplusEntry = ItemRow<i64>;

/// Recommended stock level for the next market
pub type StockForecast = ItemRow<i64>;

impl<T> ItemRow<T> {
    pub fn new(values: [T; ITEM_COUNT]) -> Self {
        Self(values)
    }

    /// Build a row from a sequence that must hold exactly one value per item
    pub fn try_from_vec(values: Vec<T>) -> Result<Self> {
        let len = values.len();
        let array: [T; ITEM_COUNT] = values.try_into().map_err(|_| {
            Error::data_shape(format!(
                "expected {} values (one per item type), found {}",
                ITEM_COUNT, len
            ))
        })?;
        Ok(Self(array))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemType, &T)> {
        ItemType::ALL.iter().copied().zip(self.0.iter())
    }
}

impl<T: ToString> ItemRow<T> {
    /// Render the row as worksheet cells
    pub fn to_cells(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl<T> Index<ItemType> for ItemRow<T> {
    type Output = T;

    fn index(&self, item: ItemType) -> &T {
        &self.0[item.index()]
    }
}

impl<T: fmt::Display> fmt::Display for ItemRow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
