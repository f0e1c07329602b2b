use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend could not be reached. Retried by [`crate::Retrying`].
    #[error("Backend unreachable: {0}")]
    Transient(String),

    #[error("{operation} unavailable after {attempts} attempts: {message}")]
    Unavailable {
        operation: String,
        attempts: u32,
        message: String,
    },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

impl CatalogError {
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Transient(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
