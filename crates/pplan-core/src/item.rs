//! Item and fragment value types

use serde::{Deserialize, Serialize};

/// A line of identical units waiting to be packed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: i64,
    length: i64,
    quantity: i64,
    weight: f64,
}

impl Item {
    /// Length is raised to at least 1 and weight to at least 0.
    /// Quantity is kept as given; non-positive quantities are skipped by the packers.
    pub fn new(id: i64, length: i64, quantity: i64, weight: f64) -> Self {
        Self {
            id,
            length: length.max(1),
            quantity,
            weight: weight.max(0.0),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Weight of a single unit
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn total_weight(&self) -> f64 {
        self.quantity as f64 * self.weight
    }
}

/// The portion of one item placed inside one pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub id: i64,
    pub length: i64,
    pub quantity: i64,
    pub weight: f64,
}

impl Fragment {
    pub fn total_weight(&self) -> f64 {
        self.quantity as f64 * self.weight
    }
}

impl From<&Item> for Fragment {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            length: item.length,
            quantity: item.quantity,
            weight: item.weight,
        }
    }
}
