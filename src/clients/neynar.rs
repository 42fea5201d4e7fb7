use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::models::profile::Profile;

pub const NEYNAR_SEARCH_URL: &str = "https://api.neynar.com/v2/farcaster/user/search";
pub const MAX_SEARCH_LIMIT: u32 = 10;

#[async_trait]
pub trait ProfileSearch: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Profile>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    users: Vec<Profile>,
}

pub struct NeynarClient {
    client: Client,
    api_key: String,
    search_url: String,
}

impl NeynarClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            search_url: NEYNAR_SEARCH_URL.to_string(),
        }
    }

    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }
}

pub fn validate_query(query: &str) -> Result<&str> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Search term is required");
    }
    Ok(query)
}

fn parse_search_response(body: &str) -> Result<Vec<Profile>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("Failed to parse Neynar search response")?;
    Ok(response.result.users)
}

#[async_trait]
impl ProfileSearch for NeynarClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Profile>> {
        let query = validate_query(query)?;
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT);
        debug!("Searching Farcaster users for {:?} (limit {})", query, limit);

        let response = self
            .client
            .get(&self.search_url)
            .header("x-api-key", &self.api_key)
            .query(&[("q", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .context("Failed to fetch users")?;

        let status = response.status();
        let body = response.text().await.context("Failed to read Neynar response")?;
        if !status.is_success() {
            warn!("Neynar search returned {}: {}", status, body);
            return Err(anyhow!("Failed to fetch users: {}", status));
        }

        let users = parse_search_response(&body)?;
        debug!("Found {} users", users.len());
        Ok(users)
    }
}
