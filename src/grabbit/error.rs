use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GrabbitError {
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Duplicate item id: {0}")]
    DuplicateId(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Validation(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, GrabbitError>;
