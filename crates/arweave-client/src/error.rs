use std::fmt;

/// Errors from the Arweave index client
#[derive(Debug)]
pub enum ArweaveError {
    /// No transaction matched the requested id
    NotFound(String),
    Http(reqwest::Error),
    ApiError(String),
}

impl fmt::Display for ArweaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Transaction not found: {id}"),
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::ApiError(msg) => write!(f, "API error: {msg}"),
        }
    }
}

impl std::error::Error for ArweaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ArweaveError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

pub type Result<T> = std::result::Result<T, ArweaveError>;
