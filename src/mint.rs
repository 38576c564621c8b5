//! Boundary to the NFT minting collaborator
//!
//! Submitting the transaction and waiting for its receipt happen behind the
//! [`Minter`] trait. This module checks what goes in: the request must name a
//! prompt and a well-formed recipient, and only URLs on the configured image
//! service are accepted as token URIs.

use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while preparing or submitting a mint
#[derive(Debug, Error)]
pub enum MintError {
    /// Request is not valid JSON
    #[error("malformed mint request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    /// Request field is absent or blank
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Recipient is not a 20-byte hex address
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Token URI does not point at the image service
    #[error("invalid meme URL, please try again: {0}")]
    InvalidMemeUrl(String),

    /// The collaborator could not submit or confirm the transaction
    #[error("failed to mint NFT: {0}")]
    Transaction(String),
}

/// An EVM account address (`0x` followed by 40 hex digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = MintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| MintError::InvalidAddress(s.to_string()))?;
        if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MintError::InvalidAddress(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated request to generate and mint a meme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub prompt: String,
    pub user_address: Address,
}

/// Request body as sent by the web client
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMintRequest {
    prompt: Option<String>,
    user_address: Option<String>,
}

impl MintRequest {
    /// Validate a prompt and recipient address
    pub fn new(prompt: &str, user_address: &str) -> Result<Self, MintError> {
        if prompt.trim().is_empty() {
            return Err(MintError::MissingParameter("prompt"));
        }
        if user_address.trim().is_empty() {
            return Err(MintError::MissingParameter("userAddress"));
        }
        Ok(Self {
            prompt: prompt.to_string(),
            user_address: user_address.trim().parse()?,
        })
    }

    /// Parse and validate a `{"prompt": ..., "userAddress": ...}` body
    pub fn from_json(body: &str) -> Result<Self, MintError> {
        let raw: RawMintRequest = serde_json::from_str(body)?;
        Self::new(
            raw.prompt.as_deref().unwrap_or_default(),
            raw.user_address.as_deref().unwrap_or_default(),
        )
    }
}

/// Confirmation returned once the mint transaction is included in a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub transaction_hash: String,
    pub block_number: u64,
}

/// Submits a `mintMeme(tokenURI, to)` transaction and waits for its receipt
pub trait Minter {
    fn mint(&self, token_uri: &str, to: &Address) -> Result<MintReceipt, MintError>;
}

/// Check that a token URI is an image URL under `base_url`
pub fn validate_token_uri(token_uri: &str, base_url: &str) -> Result<(), MintError> {
    let base_url = base_url.trim_end_matches('/');
    match token_uri.strip_prefix(base_url) {
        Some(rest) if rest.starts_with('/') => Ok(()),
        _ => Err(MintError::InvalidMemeUrl(token_uri.to_string())),
    }
}

/// Validate the token URI and hand it to the minter
pub fn mint_meme<M: Minter + ?Sized>(
    minter: &M,
    token_uri: &str,
    to: &Address,
    base_url: &str,
) -> Result<MintReceipt, MintError> {
    validate_token_uri(token_uri, base_url)?;

    info!("minting NFT with URL {} to {}", token_uri, to);
    let receipt = minter.mint(token_uri, to)?;
    info!(
        "transaction {} confirmed in block {}",
        receipt.transaction_hash, receipt.block_number
    );

    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const ALICE: &str = "0x52908400098527886E0F7030069857D2E4169EE7";
    const BASE: &str = "https://api.memegen.link";

    /// Records every call and answers with a fixed receipt
    #[derive(Default)]
    struct RecordingMinter {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl Minter for RecordingMinter {
        fn mint(&self, token_uri: &str, to: &Address) -> Result<MintReceipt, MintError> {
            self.calls
                .borrow_mut()
                .push((token_uri.to_string(), to.to_string()));
            Ok(MintReceipt {
                transaction_hash: "0xabc".to_string(),
                block_number: 42,
            })
        }
    }

    struct FailingMinter;

    impl Minter for FailingMinter {
        fn mint(&self, _token_uri: &str, _to: &Address) -> Result<MintReceipt, MintError> {
            Err(MintError::Transaction("execution reverted".to_string()))
        }
    }

    #[test]
    fn test_address_parse() {
        let addr: Address = ALICE.parse().expect("Should parse");
        assert_eq!(addr.as_str(), ALICE);
        assert!("52908400098527886E0F7030069857D2E4169EE7".parse::<Address>().is_err());
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xZZ908400098527886E0F7030069857D2E4169EE7"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn test_request_requires_prompt_and_address() {
        assert!(matches!(
            MintRequest::new("  ", ALICE),
            Err(MintError::MissingParameter("prompt"))
        ));
        assert!(matches!(
            MintRequest::new("cats", ""),
            Err(MintError::MissingParameter("userAddress"))
        ));
        assert!(matches!(
            MintRequest::new("cats", "alice"),
            Err(MintError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_request_from_json() {
        let req = MintRequest::from_json(&format!(
            r#"{{"prompt": "monday mornings", "userAddress": "{}"}}"#,
            ALICE
        ))
        .expect("Should parse");
        assert_eq!(req.prompt, "monday mornings");
        assert_eq!(req.user_address.as_str(), ALICE);

        assert!(matches!(
            MintRequest::from_json(r#"{"prompt": "x"}"#),
            Err(MintError::MissingParameter("userAddress"))
        ));
        assert!(matches!(
            MintRequest::from_json("not json"),
            Err(MintError::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_validate_token_uri() {
        assert!(validate_token_uri("https://api.memegen.link/images/doge.png", BASE).is_ok());
        assert!(validate_token_uri("https://api.memegen.link/images/doge.png", "https://api.memegen.link/").is_ok());
        assert!(validate_token_uri("https://api.memegen.link.evil.com/images/doge.png", BASE).is_err());
        assert!(validate_token_uri("ipfs://bafy/doge.png", BASE).is_err());
    }

    #[test]
    fn test_mint_meme_delegates() {
        let minter = RecordingMinter::default();
        let to: Address = ALICE.parse().expect("Should parse");
        let url = "https://api.memegen.link/images/doge/such/wow.png";

        let receipt = mint_meme(&minter, url, &to, BASE).expect("Should mint");
        assert_eq!(receipt.block_number, 42);
        assert_eq!(
            minter.calls.borrow().as_slice(),
            &[(url.to_string(), ALICE.to_string())]
        );
    }

    #[test]
    fn test_mint_meme_rejects_foreign_url_before_minting() {
        let minter = RecordingMinter::default();
        let to: Address = ALICE.parse().expect("Should parse");

        let result = mint_meme(&minter, "https://example.com/cat.png", &to, BASE);
        assert!(matches!(result, Err(MintError::InvalidMemeUrl(_))));
        assert!(minter.calls.borrow().is_empty());
    }

    #[test]
    fn test_mint_meme_propagates_failure() {
        let to: Address = ALICE.parse().expect("Should parse");
        let result = mint_meme(
            &FailingMinter,
            "https://api.memegen.link/images/doge.png",
            &to,
            BASE,
        );
        assert!(matches!(result, Err(MintError::Transaction(_))));
    }
}
