//! Arweave GraphQL Index Client
//!
//! Looks up transactions on the permanent-storage network by id, and finds
//! the most recent revision of a transaction via its owner and `Origin` tag.

mod client;
mod error;
mod types;

pub use client::ArweaveClient;
pub use error::{ArweaveError, Result};
pub use types::RemoteTransaction;
