use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Catalog is empty: {0}")]
    EmptyCatalog(String),

    #[error("Malformed catalog row {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("Duplicate accessory id: {0}")]
    DuplicateId(String),

    #[error("Missing catalog column: {0}")]
    MissingColumn(String),

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
