pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod tip;
pub mod utils;

pub use error::{RegistryError, TipError};
pub use models::network::ChainId;
pub use models::token::{
    get_token, get_token_address, get_token_by_address, get_token_by_id, is_native_token,
    is_stable_token, list_supported_tokens, Token, TokenId,
};
