//! Parser for avatar image URIs
//!
//! Classifies a raw avatar identifier into a `protocol://payload` pair or an
//! EIP-155 ERC-721 token reference. Classification is pure and total: every
//! input maps to exactly one variant, and the generic protocol match takes
//! priority over the token-reference shape.

use regex::Regex;
use std::sync::LazyLock;

/// Protocol tag of a `protocol://payload` avatar URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protocol {
    /// Permanent-storage (Arweave) transaction id
    Ar,
    Ipfs,
    Ipns,
    Http,
    Https,
    /// Unknown protocols are carried through, not rejected
    Other(String),
}

impl Protocol {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "ar" => Self::Ar,
            "ipfs" => Self::Ipfs,
            "ipns" => Self::Ipns,
            "http" => Self::Http,
            "https" => Self::Https,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Classified form of a raw avatar URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedScheme {
    /// Generic `protocol://payload` reference; the payload is unvalidated
    Direct { protocol: Protocol, payload: String },
    /// `eip155:1/erc721:<contract>/<tokenId>` token reference
    Erc721 {
        contract_id: String,
        token_id_decimal: String,
    },
    /// Anything else; treated downstream as a literal URL
    Unrecognized,
}

static PROTOCOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z]+)://(.*)").unwrap());

static ERC721_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"eip155:1/erc721:(\w+)/(\w+)").unwrap());

/// Classify a raw avatar URI
pub fn parse(raw: &str) -> ParsedScheme {
    if let Some(caps) = PROTOCOL_RE.captures(raw) {
        return ParsedScheme::Direct {
            protocol: Protocol::from_tag(&caps[1]),
            payload: caps[2].to_string(),
        };
    }

    if let Some(caps) = ERC721_RE.captures(raw) {
        return ParsedScheme::Erc721 {
            contract_id: caps[1].to_string(),
            token_id_decimal: caps[2].to_string(),
        };
    }

    ParsedScheme::Unrecognized
}

/// Convert a decimal token id to its lowercase hexadecimal form, as embedded
/// in subgraph ids and cache keys. The `0x` prefix is applied by callers.
///
/// Mirrors `parseInt`: a leading run of digits is parsed and trailing
/// non-digits are ignored, so `"123abc"` converts as `123`. Returns `None`
/// when no leading digits exist or the value overflows.
pub fn token_id_hex(decimal: &str) -> Option<String> {
    let trimmed = decimal.trim_start();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value: u128 = digits.parse().ok()?;
    Some(format!("{value:x}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipfs() {
        let parsed = parse("ipfs://QmTDxnzcvj2p3xBrKcGv1wxoyhAn2yzCQnZZ9LmFjReuH9");
        assert_eq!(
            parsed,
            ParsedScheme::Direct {
                protocol: Protocol::Ipfs,
                payload: "QmTDxnzcvj2p3xBrKcGv1wxoyhAn2yzCQnZZ9LmFjReuH9".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_ar() {
        let parsed = parse("ar://tx123");
        assert_eq!(
            parsed,
            ParsedScheme::Direct {
                protocol: Protocol::Ar,
                payload: "tx123".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_unknown_protocol_carried_through() {
        let parsed = parse("foo://bar/baz");
        assert_eq!(
            parsed,
            ParsedScheme::Direct {
                protocol: Protocol::Other("foo".to_string()),
                payload: "bar/baz".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_uppercase_scheme_not_matched() {
        // The protocol pattern only accepts lowercase tags
        assert_eq!(parse("HTTPS://example.com"), ParsedScheme::Unrecognized);
    }

    #[test]
    fn test_parse_erc721_reference() {
        let parsed = parse("eip155:1/erc721:0xb47e3cd837dDF8e4c57f05d70ab865de6e193bbb/1063");
        assert_eq!(
            parsed,
            ParsedScheme::Erc721 {
                contract_id: "0xb47e3cd837dDF8e4c57f05d70ab865de6e193bbb".to_string(),
                token_id_decimal: "1063".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_dual_match_prefers_protocol() {
        // A protocol match wins even when the token-reference shape also
        // appears in the string
        let parsed = parse("ipfs://eip155:1/erc721:0xabc/1");
        assert!(matches!(
            parsed,
            ParsedScheme::Direct {
                protocol: Protocol::Ipfs,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_plain_string_unrecognized() {
        assert_eq!(parse("not a uri"), ParsedScheme::Unrecognized);
        assert_eq!(parse(""), ParsedScheme::Unrecognized);
    }

    #[test]
    fn test_token_id_hex_small_values() {
        assert_eq!(token_id_hex("1").as_deref(), Some("1"));
        assert_eq!(token_id_hex("255").as_deref(), Some("ff"));
    }

    #[test]
    fn test_token_id_hex_lowercase() {
        assert_eq!(token_id_hex("48879").as_deref(), Some("beef"));
    }

    #[test]
    fn test_token_id_hex_leading_digits_only() {
        assert_eq!(token_id_hex("123abc").as_deref(), Some("7b"));
    }

    #[test]
    fn test_token_id_hex_non_decimal() {
        assert_eq!(token_id_hex("abc"), None);
        assert_eq!(token_id_hex(""), None);
    }
}
