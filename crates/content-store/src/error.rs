use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("reorder contains a card id that does not belong to the target deck")]
    ReorderForeignCard,
}

pub type Result<T> = std::result::Result<T, StoreError>;
