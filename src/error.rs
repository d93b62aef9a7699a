use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LdfqError {
    #[error("Invalid query collection: {0}")]
    InvalidCollection(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LdfqError {
    fn from(err: std::io::Error) -> Self {
        LdfqError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LdfqError {
    fn from(err: serde_json::Error) -> Self {
        LdfqError::InvalidCollection(err.to_string())
    }
}
