//! Plan input parsing
//!
//! ```text
//! NATURAL,40,500.0
//! 1001,6200,30,9.653
//! 2001,7200,50,11.21
//! ```
//!
//! The header carries the sort order, the item limit and the weight limit.
//! Each following line is `id,length,quantity,weight`. Input ends at the first
//! empty line or at EOF.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use pplan_core::{Item, SortOrder};
use tracing::warn;

use crate::error::{InputError, Result};

/// Everything needed to run one plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub order: SortOrder,
    pub max_items: i64,
    pub max_weight: f64,
    pub items: Vec<Item>,
    /// Item lines that could not be parsed and were left out
    pub skipped_lines: usize,
}

impl PlanRequest {
    pub fn new(order: SortOrder, max_items: i64, max_weight: f64, items: Vec<Item>) -> Self {
        Self {
            order,
            max_items,
            max_weight,
            items,
            skipped_lines: 0,
        }
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn parse_field<T>(field: &str, name: &str) -> std::result::Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    field
        .parse::<T>()
        .map_err(|e| format!("{name} '{field}': {e}"))
}

/// Parse `SORT_ORDER,max_items,max_weight`
pub fn parse_header(line: &str) -> Result<(SortOrder, i64, f64)> {
    let invalid = |reason: String| InputError::InvalidHeader {
        line: line.to_string(),
        reason,
    };

    let fields = split_fields(line);
    let [order, max_items, max_weight] = fields.as_slice() else {
        return Err(invalid(format!("expected 3 fields, found {}", fields.len())));
    };

    let order = order
        .parse::<SortOrder>()
        .map_err(|e| invalid(e.to_string()))?;
    let max_items = parse_field(max_items, "max items").map_err(invalid)?;
    let max_weight = parse_field(max_weight, "max weight").map_err(invalid)?;

    Ok((order, max_items, max_weight))
}

/// Parse `id,length,quantity,weight`
pub fn parse_item_line(line: &str, line_number: usize) -> Result<Item> {
    let invalid = |reason: String| InputError::InvalidItem {
        line_number,
        line: line.to_string(),
        reason,
    };

    let fields = split_fields(line);
    let [id, length, quantity, weight] = fields.as_slice() else {
        return Err(invalid(format!("expected 4 fields, found {}", fields.len())));
    };

    let id = parse_field(id, "id").map_err(invalid)?;
    let length = parse_field(length, "length").map_err(invalid)?;
    let quantity = parse_field(quantity, "quantity").map_err(invalid)?;
    let weight = parse_field(weight, "weight").map_err(invalid)?;

    Ok(Item::new(id, length, quantity, weight))
}

/// Read a header and item lines. Malformed item lines are skipped with a warning.
pub fn parse_input<R: BufRead>(reader: R) -> Result<PlanRequest> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(InputError::MissingHeader),
    };
    let header = header.trim();
    if header.is_empty() {
        return Err(InputError::MissingHeader);
    }
    let (order, max_items, max_weight) = parse_header(header)?;

    let mut request = PlanRequest::new(order, max_items, max_weight, Vec::new());
    for (index, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        // Header is line 1
        match parse_item_line(line, index + 2) {
            Ok(item) => request.items.push(item),
            Err(e) => {
                warn!("Skipping item line: {}", e);
                request.skipped_lines += 1;
            }
        }
    }

    Ok(request)
}

/// Read a request from `path`, or from stdin when no path is given
pub fn load_request(path: Option<&Path>) -> anyhow::Result<PlanRequest> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            parse_input(BufReader::new(file))
                .with_context(|| format!("Failed to read plan input from {}", path.display()))
        }
        None => parse_input(io::stdin().lock()).context("Failed to read plan input from stdin"),
    }
}
