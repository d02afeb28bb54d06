//! Response types for the ERC-721 subgraph and token metadata documents

use serde::Deserialize;

/// A token record from the index: composite id, owner, and metadata URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc721Token {
    pub id: String,
    pub owner_id: String,
    pub uri: String,
}

/// A token's metadata document; fields beyond `image` are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct TokenMetadata {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub data: Option<TokenData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenData {
    #[serde(rename = "erc721Token")]
    pub erc721_token: Option<TokenNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenNode {
    pub id: String,
    pub owner: TokenOwner,
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenOwner {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{
            "data": {
                "erc721Token": {
                    "id": "0xb47e3cd8/0x427",
                    "owner": { "id": "0xOwner" },
                    "uri": "https://meta.example/427"
                }
            }
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let token = response.data.unwrap().erc721_token.unwrap();
        assert_eq!(token.id, "0xb47e3cd8/0x427");
        assert_eq!(token.owner.id, "0xOwner");
        assert_eq!(token.uri, "https://meta.example/427");
    }

    #[test]
    fn test_absent_token_deserializes_as_none() {
        let json = r#"{ "data": { "erc721Token": null } }"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.unwrap().erc721_token.is_none());
    }

    #[test]
    fn test_metadata_ignores_extra_fields() {
        let json = r#"{
            "name": "Punk #1063",
            "description": "irrelevant",
            "image": "https://img.example/1063.png",
            "attributes": []
        }"#;

        let metadata: TokenMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.image, "https://img.example/1063.png");
    }
}
