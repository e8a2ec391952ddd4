//! Input ordering applied before packing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    /// Keep the caller's order
    #[default]
    Natural,
    ShortToLong,
    LongToShort,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [
        SortOrder::Natural,
        SortOrder::LongToShort,
        SortOrder::ShortToLong,
    ];

    /// Stable sort by item length. Items of equal length keep their relative order.
    pub fn apply(&self, items: &mut [Item]) {
        match self {
            SortOrder::Natural => {}
            SortOrder::ShortToLong => items.sort_by_key(Item::length),
            SortOrder::LongToShort => items.sort_by_key(|item| std::cmp::Reverse(item.length())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Natural => "NATURAL",
            SortOrder::ShortToLong => "SHORT_TO_LONG",
            SortOrder::LongToShort => "LONG_TO_SHORT",
        }
    }

    /// Three letter label used in benchmark tables
    pub fn short_label(&self) -> &'static str {
        match self {
            SortOrder::Natural => "NAT",
            SortOrder::ShortToLong => "STL",
            SortOrder::LongToShort => "LTS",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "NATURAL" => Ok(SortOrder::Natural),
            "SHORT_TO_LONG" => Ok(SortOrder::ShortToLong),
            "LONG_TO_SHORT" => Ok(SortOrder::LongToShort),
            other => Err(CoreError::UnknownSortOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(items: &[Item]) -> Vec<i64> {
        items.iter().map(Item::length).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            Item::new(1, 200, 1, 1.0),
            Item::new(2, 100, 1, 1.0),
            Item::new(3, 300, 1, 1.0),
            Item::new(4, 100, 1, 1.0),
        ]
    }

    #[test]
    fn test_natural_keeps_order() {
        let mut items = sample();
        SortOrder::Natural.apply(&mut items);
        assert_eq!(lengths(&items), vec![200, 100, 300, 100]);
    }

    #[test]
    fn test_short_to_long_is_stable() {
        let mut items = sample();
        SortOrder::ShortToLong.apply(&mut items);
        assert_eq!(lengths(&items), vec![100, 100, 200, 300]);
        assert_eq!(items[0].id(), 2);
        assert_eq!(items[1].id(), 4);
    }

    #[test]
    fn test_long_to_short() {
        let mut items = sample();
        SortOrder::LongToShort.apply(&mut items);
        assert_eq!(lengths(&items), vec![300, 200, 100, 100]);
        assert_eq!(items[2].id(), 2);
    }

    #[test]
    fn test_parse() {
        assert_eq!("NATURAL".parse::<SortOrder>(), Ok(SortOrder::Natural));
        assert_eq!(" LONG_TO_SHORT".parse::<SortOrder>(), Ok(SortOrder::LongToShort));
        assert_eq!(
            "natural".parse::<SortOrder>(),
            Err(CoreError::UnknownSortOrder("natural".to_string()))
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(SortOrder::ShortToLong.short_label(), "STL");
        assert_eq!(SortOrder::LongToShort.to_string(), "LONG_TO_SHORT");
    }
}
