use std::fmt;

use arweave_client::ArweaveError;
use erc721_client::Erc721Error;

/// Failures of a single resolution attempt
///
/// These never cross the public API: the resolver logs them and reports the
/// attempt as unresolved so the caller renders its fallback.
#[derive(Debug)]
pub enum ResolveError {
    /// Permanent-storage id absent from the index
    NotFound(String),
    /// NFT index has no matching token record
    InvalidToken(String),
    /// Token owner does not match the supplied account address
    OwnershipMismatch { owner: String, address: String },
    /// Transport or parse failure fetching the metadata document
    MetadataFetch(String),
    /// Generic network failure on any remote call
    Transport(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Transaction not found: {id}"),
            Self::InvalidToken(id) => write!(f, "Invalid ERC-721 token: {id}"),
            Self::OwnershipMismatch { owner, address } => {
                write!(f, "Token owned by {owner}, not {address}")
            }
            Self::MetadataFetch(msg) => write!(f, "Metadata fetch failed: {msg}"),
            Self::Transport(msg) => write!(f, "Transport error: {msg}"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<ArweaveError> for ResolveError {
    fn from(err: ArweaveError) -> Self {
        match err {
            ArweaveError::NotFound(id) => Self::NotFound(id),
            ArweaveError::Http(e) => Self::Transport(e.to_string()),
            ArweaveError::ApiError(msg) => Self::Transport(msg),
        }
    }
}

impl From<Erc721Error> for ResolveError {
    fn from(err: Erc721Error) -> Self {
        match err {
            Erc721Error::InvalidToken(id) => Self::InvalidToken(id),
            Erc721Error::MetadataFetch(msg) => Self::MetadataFetch(msg),
            Erc721Error::Http(e) => Self::Transport(e.to_string()),
            Erc721Error::ApiError(msg) => Self::Transport(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_mismatch_display() {
        let err = ResolveError::OwnershipMismatch {
            owner: "0xaaa".to_string(),
            address: "0xbbb".to_string(),
        };
        assert_eq!(format!("{err}"), "Token owned by 0xaaa, not 0xbbb");
    }

    #[test]
    fn test_arweave_not_found_maps_to_not_found() {
        let err: ResolveError = ArweaveError::NotFound("tx".to_string()).into();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[test]
    fn test_erc721_invalid_token_maps_through() {
        let err: ResolveError = Erc721Error::InvalidToken("0xabc/0x1".to_string()).into();
        assert!(matches!(err, ResolveError::InvalidToken(_)));
    }
}
