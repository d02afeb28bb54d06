use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::error::{Erc721Error, Result};
use crate::types::{Erc721Token, TokenMetadata, TokenResponse};

const DEFAULT_GATEWAY_URL: &str = "https://gateway.thegraph.com/api";

/// Hosted subgraph indexing ERC-721 ownership and metadata URIs
const SUBGRAPH_ID: &str = "0x7859821024e633c5dc8a4fcf86fc52e7720ce525-0";

/// Client for the ERC-721 token subgraph
///
/// The API credential is supplied per call because it belongs to the caller,
/// not the deployment; the gateway URL embeds it per request.
pub struct Erc721Client {
    http: reqwest::Client,
    gateway_url: String,
}

impl Erc721Client {
    /// Create a new client against the public Graph gateway
    pub fn new() -> Self {
        Self::with_gateway_url(DEFAULT_GATEWAY_URL)
    }

    /// Create a new client against a custom gateway
    pub fn with_gateway_url(gateway_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a token record by contract id and hex token id
    ///
    /// Fails with `InvalidToken` when the index has no matching record.
    pub async fn get_token(
        &self,
        contract_id: &str,
        token_id_hex: &str,
        api_key: &str,
    ) -> Result<Erc721Token> {
        let url = format!(
            "{}/{}/subgraphs/id/{}",
            self.gateway_url, api_key, SUBGRAPH_ID
        );
        let composite_id = format!("{contract_id}/0x{token_id_hex}");
        debug!(token = %composite_id, "Querying token index");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json;charset=UTF-8")
            .json(&json!({ "query": token_query(&composite_id) }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Erc721Error::ApiError(format!(
                "index returned status {}",
                response.status()
            )));
        }

        let body: TokenResponse = response.json().await?;
        let token = body
            .data
            .and_then(|data| data.erc721_token)
            .ok_or(Erc721Error::InvalidToken(composite_id))?;

        Ok(Erc721Token {
            id: token.id,
            owner_id: token.owner.id,
            uri: token.uri,
        })
    }

    /// Fetch a token's metadata document and extract its image URL
    pub async fn fetch_metadata(&self, uri: &str) -> Result<TokenMetadata> {
        debug!(uri, "Fetching token metadata");

        let response = self
            .http
            .get(uri)
            .send()
            .await
            .map_err(|e| Erc721Error::MetadataFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Erc721Error::MetadataFetch(format!(
                "metadata endpoint returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Erc721Error::MetadataFetch(e.to_string()))
    }
}

impl Default for Erc721Client {
    fn default() -> Self {
        Self::new()
    }
}

fn token_query(composite_id: &str) -> String {
    format!(r#"{{ erc721Token(id: "{composite_id}") {{ id owner {{ id }} uri }} }}"#)
}
