//! Pack domain model

use serde::{Deserialize, Serialize};

use crate::item::{Fragment, Item};

/// Slack used when comparing a pack's weight against its limit
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Per-pack capacity constraints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub max_items: i64,
    pub max_weight: f64,
}

impl Limits {
    pub const MIN_ITEMS: i64 = 1;
    pub const MIN_WEIGHT: f64 = 0.1;

    pub fn new(max_items: i64, max_weight: f64) -> Self {
        Self {
            max_items,
            max_weight,
        }
    }

    /// Raise both constraints to the smallest values a packing run accepts
    pub fn normalized(self) -> Self {
        Self {
            max_items: self.max_items.max(Self::MIN_ITEMS),
            max_weight: self.max_weight.max(Self::MIN_WEIGHT),
        }
    }
}

/// A numbered bin accumulating fragments under a count and weight limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    number: u64,
    fragments: Vec<Fragment>,
    total_items: i64,
    total_weight: f64,
    max_length: i64,
}

impl Pack {
    pub fn new(number: u64) -> Self {
        Self {
            number,
            fragments: Vec::with_capacity(8),
            total_items: 0,
            total_weight: 0.0,
            max_length: 0,
        }
    }

    /// Place the whole quantity of `item`, or nothing.
    pub fn add_item(&mut self, item: &Item, max_items: i64, max_weight: f64) -> bool {
        let new_items = self.total_items + item.quantity();
        let new_weight = self.total_weight + item.total_weight();

        if new_items <= max_items && new_weight <= max_weight {
            self.push(Fragment::from(item));
            true
        } else {
            false
        }
    }

    /// Place as many units as both limits allow and return how many were placed.
    ///
    /// A unit weight of zero never constrains the count. Degenerate inputs
    /// (non-positive quantity or item limit, negative weight limit) place nothing.
    pub fn add_partial_item(
        &mut self,
        id: i64,
        length: i64,
        quantity: i64,
        weight: f64,
        max_items: i64,
        max_weight: f64,
    ) -> i64 {
        if quantity <= 0 || max_items <= 0 || max_weight.is_nan() || max_weight < 0.0 {
            return 0;
        }

        let length = length.max(1);
        let weight = weight.max(0.0);

        let by_items = max_items - self.total_items;
        let by_weight = if weight == 0.0 {
            quantity
        } else {
            ((max_weight - self.total_weight) / weight).floor() as i64
        }
        .max(0);

        let accepted = by_items.min(by_weight).min(quantity);
        if accepted <= 0 {
            return 0;
        }

        self.push(Fragment {
            id,
            length,
            quantity: accepted,
            weight,
        });
        accepted
    }

    pub fn is_full(&self, max_items: i64, max_weight: f64) -> bool {
        self.total_items >= max_items || self.total_weight >= max_weight - WEIGHT_EPSILON
    }

    fn push(&mut self, fragment: Fragment) {
        self.total_items += fragment.quantity;
        self.total_weight += fragment.total_weight();
        self.max_length = self.max_length.max(fragment.length);
        self.fragments.push(fragment);
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn set_number(&mut self, number: u64) {
        self.number = number;
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Longest fragment in the pack, 0 when empty
    pub fn max_length(&self) -> i64 {
        self.max_length
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn remaining_items(&self, max_items: i64) -> i64 {
        max_items - self.total_items
    }

    pub fn remaining_weight(&self, max_weight: f64) -> f64 {
        max_weight - self.total_weight
    }
}
