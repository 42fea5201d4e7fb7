use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const WARPCAST_COMPOSE_URL: &str = "https://warpcast.com/~/compose";

pub const CELO_FACTS: &[&str] = &[
    "Celo is a mobile-first, EVM-compatible blockchain.",
    "Transaction fees on Celo can be paid in stable tokens such as cUSD.",
    "Celo's native stable tokens include cUSD, cEUR and cREAL.",
    "Celo mainnet uses chain id 42220.",
    "Alfajores is Celo's public testnet, with chain id 44787.",
    "Celo addresses are plain Ethereum-style 20-byte accounts.",
];

/// Signed proof that the frame domain belongs to a Farcaster account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAssociation {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameConfig {
    pub version: String,
    pub name: String,
    pub icon_url: String,
    pub home_url: String,
    pub image_url: String,
    pub button_title: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
    pub webhook_url: String,
}

/// Body of `/.well-known/farcaster.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameManifest {
    pub account_association: AccountAssociation,
    pub frame: FrameConfig,
}

impl FrameManifest {
    pub fn new(app_url: &str, account_association: AccountAssociation) -> Self {
        let app_url = app_url.trim_end_matches('/');
        Self {
            account_association,
            frame: FrameConfig {
                version: "1".to_string(),
                name: "Tip Me V2".to_string(),
                icon_url: format!("{app_url}/celosplash.png"),
                home_url: app_url.to_string(),
                image_url: format!("{app_url}/tipme.png"),
                button_title: "Launch Frame".to_string(),
                splash_image_url: format!("{app_url}/celosplash.png"),
                splash_background_color: "#f7f7f7".to_string(),
                webhook_url: format!("{app_url}/api/webhook"),
            },
        }
    }
}

pub fn share_url(text: &str, embed: &str) -> Result<String> {
    let url = Url::parse_with_params(WARPCAST_COMPOSE_URL, &[("text", text), ("embeds[]", embed)])
        .context("Failed to build share link")?;
    Ok(url.into())
}

pub fn random_fact() -> &'static str {
    CELO_FACTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

pub fn fact_frame_html(fact: &str, post_url: &str) -> String {
    format!(
        r#"<html prefix="og: http://ogp.me/ns#">
  <head>
    <meta property="og:title" content="Random Celo Fact!" />
    <meta property="og:description" content="{}" />
    <meta property="og:image" content="https://via.placeholder.com/1200x630?text=Celo+Fun+Fact" />
    <meta property="fc:frame" content="vNext" />
    <meta property="fc:frame:button:1" content="Show Another Fact" />
    <meta property="fc:frame:post_url" content="{}" />
  </head>
</html>
"#,
        escape_attr(fact),
        escape_attr(post_url)
    )
}

fn escape_attr(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
