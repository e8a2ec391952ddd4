use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    #[error("Unknown packing strategy: {0}")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
