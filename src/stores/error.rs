use thiserror::Error;

/// Validation failures. Raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("ingredient name cannot be empty")]
    EmptyName,

    #[error("no entry at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("an ingredient named \"{existing}\" is already in the list")]
    NameCollision { existing: String },

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),
}
