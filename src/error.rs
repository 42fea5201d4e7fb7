use ethers::types::U256;
use thiserror::Error;

use crate::models::network::ChainId;
use crate::models::token::TokenId;

/// Lookup failures of the static token registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The identifier is outside the token catalog. Callers holding a
    /// `TokenId` can never hit this; it only comes out of string parsing.
    #[error("Unknown token kind: {0}")]
    UnknownTokenKind(String),

    #[error("No address found for token {token} on chain {chain}")]
    UnsupportedTokenOnChain { token: TokenId, chain: ChainId },

    #[error("No token found for address {0}")]
    UnknownAddress(String),
}

#[derive(Error, Debug)]
pub enum TipError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: U256, available: U256 },

    #[error("@{0} has no verified address")]
    NoVerifiedAddress(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to encode transfer call: {0}")]
    Encoding(String),
}
