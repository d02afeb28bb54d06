use std::fmt;

/// Errors from the ERC-721 subgraph client
#[derive(Debug)]
pub enum Erc721Error {
    /// The index has no record for the requested composite token id
    InvalidToken(String),
    /// Transport or parse failure fetching the metadata document
    MetadataFetch(String),
    Http(reqwest::Error),
    ApiError(String),
}

impl fmt::Display for Erc721Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken(id) => write!(f, "Invalid ERC-721 token: {id}"),
            Self::MetadataFetch(msg) => write!(f, "Metadata fetch failed: {msg}"),
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::ApiError(msg) => write!(f, "API error: {msg}"),
        }
    }
}

impl std::error::Error for Erc721Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Erc721Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

pub type Result<T> = std::result::Result<T, Erc721Error>;
