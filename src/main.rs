use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::*;

use celo_tip_frame::clients::{EthersTipSender, NeynarClient, ProfileSearch};
use celo_tip_frame::config::AppConfig;
use celo_tip_frame::models::frame::{fact_frame_html, random_fact, share_url, FrameManifest};
use celo_tip_frame::models::network::{network, truncate_hash, ChainId};
use celo_tip_frame::models::profile::pick_profile;
use celo_tip_frame::models::token::{
    get_token, get_token_address, get_token_by_address, get_token_by_id, is_supported_chain,
    list_supported_tokens, parse_token_id, strip_hex_prefix, Token,
};
use celo_tip_frame::tip::{TipSender, TipService, TipStatus};
use celo_tip_frame::utils::amount::format_amount;
use celo_tip_frame::utils::errors::short_error_message;
use celo_tip_frame::TipError;

const SHARE_TEXT: &str =
    "This is a Celo Tip Me Template. Try it out and share your feedback! Thanks for your support.";

#[derive(Parser, Debug)]
#[command(author, version, about = "Tip Farcaster profiles on Celo", long_about = None)]
struct Args {
    /// Env file to load instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the tokens offered on a chain
    Tokens {
        #[arg(short, long)]
        chain: Option<ChainId>,
    },
    /// Look up a token by id (cUSD) or by contract address
    Token { query: String },
    /// Search Farcaster profiles
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show the signer's balance of every supported token
    Balances,
    /// Send a tip to a Farcaster profile's verified address
    Tip {
        /// Farcaster username
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "CELO")]
        token: String,
        #[arg(long)]
        amount: String,
    },
    /// Print the /.well-known/farcaster.json manifest
    Manifest,
    /// Print a vNext frame page with a random Celo fact
    FactFrame {
        #[arg(long)]
        post_url: Option<String>,
    },
}

fn now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn print_token(token: &Token, chain: ChainId) {
    let address = get_token_address(token.id, chain)
        .map(|a| format!("{:#x}", a))
        .unwrap_or_else(|_| "-".to_string());
    println!(
        "{:<6} {:<12} {:>2} decimals  {}",
        token.symbol.bright_yellow(),
        token.name,
        token.decimals,
        address.bright_black()
    );
}

fn list_tokens(chain: ChainId) {
    if !is_supported_chain(chain) {
        println!("{} No tokens are offered on chain {}", "[INFO]".bright_green(), chain);
        return;
    }
    let name = network(chain).map(|n| n.name).unwrap_or("unknown network");
    println!("{} {} ({})", "Tokens on".bright_blue().bold(), name, chain);
    for id in list_supported_tokens(chain) {
        print_token(get_token(id), chain);
    }
}

fn lookup_token(query: &str, chain: ChainId) -> Result<()> {
    let token = if strip_hex_prefix(query.trim()).is_some() {
        get_token_by_address(query)?
    } else {
        get_token_by_id(query.trim())?
    };
    print_token(token, chain);
    Ok(())
}

async fn search(config: &AppConfig, query: &str, limit: Option<u32>) -> Result<()> {
    let neynar = NeynarClient::new(config.require_neynar_key()?);
    let users = neynar.search(query, limit.unwrap_or(config.search_limit)).await?;

    if users.is_empty() {
        println!("{} No users found", "[INFO]".bright_green());
        return Ok(());
    }
    for user in users {
        let address = user
            .tip_address()
            .map(|a| format!("{:#x}", a))
            .unwrap_or_else(|_| "no verified address".to_string());
        println!(
            "{:>8}  {} (@{})  {}",
            user.fid.to_string().bright_black(),
            user.display_label().bright_white(),
            user.username,
            address.bright_black()
        );
    }
    Ok(())
}

async fn balances(config: &AppConfig) -> Result<()> {
    let sender = EthersTipSender::connect(&config.rpc_url, config.require_private_key()?, config.chain_id)?;
    let chain = config.chain_id;
    let tokens = list_supported_tokens(chain);

    let results = futures::future::join_all(tokens.iter().map(|id| sender.balance(*id, chain))).await;

    println!("{} {:#x}", "Balances of".bright_blue().bold(), sender.address());
    for (id, result) in tokens.iter().zip(results) {
        let token = get_token(*id);
        match result {
            Ok(balance) => println!(
                "{:<6} {}",
                token.symbol.bright_yellow(),
                format_amount(balance, token.decimals)
            ),
            Err(e) => println!(
                "{} Failed to fetch {} balance: {:#}",
                "[ERROR]".bright_red(),
                token.symbol,
                e
            ),
        }
    }
    Ok(())
}

async fn tip(config: &AppConfig, to: &str, token: &str, amount: &str) -> Result<()> {
    let token = parse_token_id(token.trim())?;
    let neynar = NeynarClient::new(config.require_neynar_key()?);
    let users = neynar.search(to, config.search_limit).await?;
    let profile = pick_profile(&users, to).ok_or_else(|| anyhow!("No users found for {}", to))?;

    let sender = EthersTipSender::connect(&config.rpc_url, config.require_private_key()?, config.chain_id)
        .context("Failed to set up wallet")?;
    let service = TipService::new(sender, config.chain_id);
    let symbol = get_token(token).symbol;

    println!(
        "{} {} Sending {} {} to @{}...",
        "[INFO]".bright_green(),
        now().bright_black(),
        amount,
        symbol,
        profile.username
    );

    let receipt = match service.tip(profile, token, amount).await {
        Ok(receipt) => receipt,
        Err(e) => {
            let message = match e.downcast_ref::<TipError>() {
                Some(tip_error) => tip_error.to_string(),
                None => short_error_message(&format!("{:#}", e)),
            };
            println!("{} {} Transaction Failed: {}", "[ERROR]".bright_red(), now().bright_black(), message);
            return Err(e);
        }
    };

    let hash = format!("{:#x}", receipt.hash);
    println!("{} Transaction: {}", "[INFO]".bright_green(), truncate_hash(&hash));
    println!("{} View: {}", "[INFO]".bright_green(), receipt.explorer_url);

    match receipt.status {
        TipStatus::Confirmed { .. } => println!(
            "{} {} Tip of {} {} sent to @{}!",
            "[SUCCESS]".bright_green(),
            now().bright_black(),
            amount,
            symbol,
            profile.username
        ),
        TipStatus::Failed => {
            println!("{} {} Transaction reverted", "[ERROR]".bright_red(), now().bright_black());
            return Err(anyhow!("Transaction {} reverted", hash));
        }
        TipStatus::Pending => println!(
            "{} {} Still pending, check the explorer link",
            "[INFO]".bright_yellow(),
            now().bright_black()
        ),
    }
    Ok(())
}

fn manifest(config: &AppConfig) -> Result<()> {
    let manifest = FrameManifest::new(config.require_app_url()?, config.account_association.clone());
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}

fn fact_frame(config: &AppConfig, post_url: Option<String>) -> Result<()> {
    let post_url = match post_url {
        Some(url) => url,
        None => format!("{}/frame", config.require_app_url()?.trim_end_matches('/')),
    };
    println!("{}", fact_frame_html(random_fact(), &post_url));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match args.env_file.as_deref() {
        Some(path) => AppConfig::from_env_file(path)?,
        None => AppConfig::from_env()?,
    };
    env_logger::init();

    match args.command {
        Command::Tokens { chain } => list_tokens(chain.unwrap_or(config.chain_id)),
        Command::Token { query } => lookup_token(&query, config.chain_id)?,
        Command::Search { query, limit } => search(&config, &query, limit).await?,
        Command::Balances => balances(&config).await?,
        Command::Tip { to, token, amount } => {
            tip(&config, &to, &token, &amount).await?;
            if let Some(app_url) = config.app_url.as_deref() {
                println!("{} Share: {}", "[INFO]".bright_green(), share_url(SHARE_TEXT, app_url)?);
            }
        }
        Command::Manifest => manifest(&config)?,
        Command::FactFrame { post_url } => fact_frame(&config, post_url)?,
    }

    Ok(())
}
