//! Avatar URI Resolution Engine
//!
//! Turns an opaque avatar identifier into a concrete, fetchable image URL.
//! Handles `ar://` two-phase revision lookup, `ipfs://`/`ipns://` gateway
//! mapping, literal URL pass-through, and cached, ownership-verified
//! ERC-721 token avatars.

mod error;
mod resolver;

pub use error::{ResolveError, Result};
pub use resolver::AvatarResolver;
