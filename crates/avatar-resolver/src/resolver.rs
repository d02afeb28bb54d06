use arweave_client::ArweaveClient;
use avatar_cache::{nft_cache_key, AvatarCache, METADATA_TTL_HOURS};
use avatar_uri_parser::{parse, token_id_hex, ParsedScheme, Protocol};
use chrono::Duration;
use erc721_client::Erc721Client;
use tracing::{debug, warn};

use crate::error::{ResolveError, Result};

const DEFAULT_IPFS_GATEWAY: &str = "https://gateway.ipfs.io";

/// Resolves raw avatar references to fetchable image URLs
///
/// One resolver instance serves any number of concurrent attempts; the only
/// shared state is the injected cache, where the last write wins.
pub struct AvatarResolver {
    arweave: ArweaveClient,
    erc721: Erc721Client,
    cache: AvatarCache,
    ipfs_gateway: String,
}

impl AvatarResolver {
    /// Create a resolver with default remote endpoints and the given cache
    pub fn new(cache: AvatarCache) -> Self {
        Self::with_clients(
            ArweaveClient::new(),
            Erc721Client::new(),
            cache,
            DEFAULT_IPFS_GATEWAY,
        )
    }

    /// Create a resolver with custom clients and gateway
    pub fn with_clients(
        arweave: ArweaveClient,
        erc721: Erc721Client,
        cache: AvatarCache,
        ipfs_gateway: &str,
    ) -> Self {
        Self {
            arweave,
            erc721,
            cache,
            ipfs_gateway: ipfs_gateway.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve `uri` to a fetchable image URL
    ///
    /// `None` tells the caller to render its own fallback. Remote failures
    /// never escape as errors: each failing call is logged and collapses the
    /// attempt into `None`.
    ///
    /// The ERC-721 path is taken only when both an account address and a
    /// graph API key are supplied; otherwise the reference passes through as
    /// a literal URL. An empty reference resolves to nothing.
    pub async fn resolve(
        &self,
        uri: &str,
        address: Option<&str>,
        graph_api_key: Option<&str>,
    ) -> Option<String> {
        if uri.is_empty() {
            return None;
        }

        match parse(uri) {
            ParsedScheme::Direct {
                protocol: Protocol::Ar,
                payload,
            } => match self.resolve_arweave(&payload).await {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(uri, error = %e, "permanent-storage avatar resolution failed");
                    None
                }
            },
            ParsedScheme::Direct {
                protocol: Protocol::Ipfs,
                payload,
            } => Some(format!("{}/ipfs/{}", self.ipfs_gateway, payload)),
            ParsedScheme::Direct {
                protocol: Protocol::Ipns,
                payload,
            } => Some(format!("{}/ipns/{}", self.ipfs_gateway, payload)),
            // http/https and unknown protocols pass through verbatim
            ParsedScheme::Direct { .. } => Some(uri.to_string()),
            ParsedScheme::Erc721 {
                contract_id,
                token_id_decimal,
            } => {
                let (Some(address), Some(api_key)) = (address, graph_api_key) else {
                    return Some(uri.to_string());
                };

                match self
                    .resolve_erc721(&contract_id, &token_id_decimal, address, api_key)
                    .await
                {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!(uri, error = %e, "token avatar resolution failed");
                        None
                    }
                }
            }
            ParsedScheme::Unrecognized => Some(uri.to_string()),
        }
    }

    /// Two-phase lookup: find the transaction's owner, then the most recent
    /// revision carrying an `Origin` tag naming it. Falls back to the
    /// original id when no revision exists.
    async fn resolve_arweave(&self, id: &str) -> Result<String> {
        let tx = self.arweave.lookup_transaction_owner(id).await?;
        let latest = self
            .arweave
            .lookup_latest_descendant(&tx.owner_address, &tx.id)
            .await?;

        let target = latest.map(|revision| revision.id).unwrap_or_else(|| id.to_string());
        Ok(self.arweave.transaction_url(&target))
    }

    /// Cache-first token avatar lookup with ownership verification
    ///
    /// The cache is written once, on the success path only; any earlier
    /// failure leaves it untouched.
    async fn resolve_erc721(
        &self,
        contract_id: &str,
        token_id_decimal: &str,
        address: &str,
        api_key: &str,
    ) -> Result<String> {
        let hex = token_id_hex(token_id_decimal).ok_or_else(|| {
            ResolveError::InvalidToken(format!("token id {token_id_decimal} is not decimal"))
        })?;
        let normalized = address.to_lowercase();
        let key = nft_cache_key(address, contract_id, &hex);

        if let Some(url) = self.cache.get(&key).await {
            return Ok(url);
        }

        let token = self.erc721.get_token(contract_id, &hex, api_key).await?;

        if token.owner_id.to_lowercase() != normalized {
            return Err(ResolveError::OwnershipMismatch {
                owner: token.owner_id,
                address: normalized,
            });
        }

        let metadata = self.erc721.fetch_metadata(&token.uri).await?;

        self.cache
            .put(&key, &metadata.image, Duration::hours(METADATA_TTL_HOURS))
            .await;
        debug!(key, url = %metadata.image, "Cached token avatar url");

        Ok(metadata.image)
    }
}
