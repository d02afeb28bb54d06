//! ERC-721 Subgraph Client
//!
//! Queries the hosted ERC-721 token index for a token's owner and metadata
//! URI, and fetches the metadata document to extract its image URL.

mod client;
mod error;
mod types;

pub use client::Erc721Client;
pub use error::{Erc721Error, Result};
pub use types::{Erc721Token, TokenMetadata};
