//! Error types for pplan-engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InputError>;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Missing header line")]
    MissingHeader,

    #[error("Invalid header '{line}': {reason}")]
    InvalidHeader { line: String, reason: String },

    #[error("Invalid item on line {line_number}: '{line}': {reason}")]
    InvalidItem {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
