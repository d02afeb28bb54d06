use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::error::{ArweaveError, Result};
use crate::types::{GraphResponse, RemoteTransaction, TransactionsData};

const DEFAULT_BASE_URL: &str = "https://arweave.net";

/// Client for the Arweave GraphQL transaction index
///
/// Both lookups are single-attempt POSTs against `<base>/graphql`; transport
/// failures surface as typed errors rather than being retried.
pub struct ArweaveClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArweaveClient {
    /// Create a new client against the public arweave.net gateway
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new client against a custom gateway
    pub fn with_base_url(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL a transaction's content is served from
    pub fn transaction_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Look up a transaction by id, returning its id and owner address
    ///
    /// Fails with `NotFound` when the index has no matching transaction.
    pub async fn lookup_transaction_owner(&self, id: &str) -> Result<RemoteTransaction> {
        let data = self
            .post_query(&owner_query(id))
            .await?
            .ok_or_else(|| ArweaveError::ApiError("response missing data".to_string()))?;

        let node = data
            .transactions
            .edges
            .into_iter()
            .next()
            .map(|edge| edge.node)
            .ok_or_else(|| ArweaveError::NotFound(id.to_string()))?;

        let owner = node
            .owner
            .ok_or_else(|| ArweaveError::ApiError("transaction node missing owner".to_string()))?;

        Ok(RemoteTransaction {
            id: node.id,
            owner_address: owner.address,
        })
    }

    /// Find the most recent transaction by `owner` whose `Origin` tag names
    /// `origin_id`, or `None` when no revision exists
    ///
    /// A response without a data section counts as no revision, not a
    /// failure, so the caller can still fall back to the original id.
    pub async fn lookup_latest_descendant(
        &self,
        owner: &str,
        origin_id: &str,
    ) -> Result<Option<RemoteTransaction>> {
        let Some(data) = self.post_query(&descendant_query(owner, origin_id)).await? else {
            return Ok(None);
        };

        Ok(data
            .transactions
            .edges
            .into_iter()
            .next()
            .map(|edge| RemoteTransaction {
                id: edge.node.id,
                owner_address: owner.to_string(),
            }))
    }

    async fn post_query(&self, query: &str) -> Result<Option<TransactionsData>> {
        let url = format!("{}/graphql", self.base_url);
        debug!(url = %url, "Posting transaction query");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json;charset=UTF-8")
            .json(&json!({ "query": query }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ArweaveError::ApiError(format!(
                "index returned status {}",
                response.status()
            )));
        }

        let body: GraphResponse = response.json().await?;
        Ok(body.data)
    }
}

impl Default for ArweaveClient {
    fn default() -> Self {
        Self::new()
    }
}

fn owner_query(id: &str) -> String {
    format!(
        r#"{{ transactions(ids: ["{id}"]) {{ edges {{ node {{ id owner {{ address }} }} }} }} }}"#
    )
}

fn descendant_query(owner: &str, origin_id: &str) -> String {
    format!(
        r#"{{ transactions(owners: ["{owner}"], tags: {{ name: "Origin", values: ["{origin_id}"] }}, sort: HEIGHT_DESC) {{ edges {{ node {{ id }} }} }} }}"#
    )
}
