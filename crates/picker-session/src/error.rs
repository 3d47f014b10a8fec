use thiserror::Error;

/// Edits the product list editor refuses to make.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("cannot remove the last product row")]
    LastRow,

    #[error("no product row with id {0}")]
    UnknownRow(String),

    #[error("product row {row_id} has no variant {variant_id}")]
    UnknownVariant { row_id: String, variant_id: String },
}
