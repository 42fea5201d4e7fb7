use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use dotenv::dotenv;

use crate::models::frame::AccountAssociation;
use crate::models::network::ChainId;

pub const DEFAULT_RPC_URL: &str = "https://forno.celo.org";
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rpc_url: String,
    pub chain_id: ChainId,
    pub neynar_api_key: Option<String>,
    pub private_key: Option<String>,
    pub app_url: Option<String>,
    pub search_limit: u32,
    pub account_association: AccountAssociation,
}

impl AppConfig {
    /// Loads `.env` from the working directory (or a parent) when present,
    /// then reads the process environment. Variables already set win.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`AppConfig::from_env`] but with an explicit env file, which must exist.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        dotenv::from_path(path).with_context(|| format!("Failed to load {}", path.display()))?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            rpc_url: get("CELO_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            chain_id: parse_or(get("CHAIN_ID"), "CHAIN_ID", ChainId::CELO_MAINNET)?,
            neynar_api_key: get("NEYNAR_API_KEY"),
            private_key: get("PRIVATE_KEY"),
            app_url: get("APP_URL"),
            search_limit: parse_or(get("SEARCH_LIMIT"), "SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?,
            account_association: AccountAssociation {
                header: get("FARCASTER_HEADER").unwrap_or_default(),
                payload: get("FARCASTER_PAYLOAD").unwrap_or_default(),
                signature: get("FARCASTER_SIGNATURE").unwrap_or_default(),
            },
        })
    }

    pub fn require_neynar_key(&self) -> Result<&str> {
        self.neynar_api_key
            .as_deref()
            .ok_or_else(|| anyhow!("NEYNAR_API_KEY must be set in .env"))
    }

    pub fn require_private_key(&self) -> Result<&str> {
        self.private_key
            .as_deref()
            .ok_or_else(|| anyhow!("PRIVATE_KEY must be set in .env"))
    }

    pub fn require_app_url(&self) -> Result<&str> {
        self.app_url
            .as_deref()
            .ok_or_else(|| anyhow!("APP_URL must be set in .env"))
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Invalid {}: {:?}", key, value)),
        None => Ok(default),
    }
}
