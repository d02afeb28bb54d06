//! Response types for the Arweave GraphQL index

use serde::Deserialize;

/// A transaction's id and owner address, as returned by the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTransaction {
    pub id: String,
    pub owner_address: String,
}

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct GraphResponse {
    pub data: Option<TransactionsData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionsData {
    pub transactions: TransactionConnection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionConnection {
    pub edges: Vec<TransactionEdge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionEdge {
    pub node: TransactionNode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionNode {
    pub id: String,
    /// Absent when the query does not select the owner field
    #[serde(default)]
    pub owner: Option<TransactionOwner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionOwner {
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_query_response_deserialization() {
        let json = r#"{
            "data": {
                "transactions": {
                    "edges": [
                        {
                            "node": {
                                "id": "tx-abc",
                                "owner": { "address": "owner-xyz" }
                            }
                        }
                    ]
                }
            }
        }"#;

        let response: GraphResponse = serde_json::from_str(json).unwrap();
        let data = response.data.unwrap();
        assert_eq!(data.transactions.edges.len(), 1);
        let node = &data.transactions.edges[0].node;
        assert_eq!(node.id, "tx-abc");
        assert_eq!(node.owner.as_ref().unwrap().address, "owner-xyz");
    }

    #[test]
    fn test_descendant_query_response_without_owner() {
        let json = r#"{
            "data": {
                "transactions": {
                    "edges": [ { "node": { "id": "tx-newer" } } ]
                }
            }
        }"#;

        let response: GraphResponse = serde_json::from_str(json).unwrap();
        let data = response.data.unwrap();
        assert_eq!(data.transactions.edges[0].node.id, "tx-newer");
        assert!(data.transactions.edges[0].node.owner.is_none());
    }

    #[test]
    fn test_empty_edge_set() {
        let json = r#"{ "data": { "transactions": { "edges": [] } } }"#;
        let response: GraphResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.unwrap().transactions.edges.is_empty());
    }
}
