use std::time::Duration;

use anyhow::{Context, Result};
use ethers::types::TxHash;
use log::{debug, info, warn};

use super::{TipPlan, TipSender, TipStatus};
use crate::models::network::{tx_url, ChainId};
use crate::models::profile::Profile;
use crate::models::token::{get_token, TokenId};
use crate::utils::amount::{ensure_sufficient_balance, format_amount, parse_amount};

pub const RECEIPT_POLL_ATTEMPTS: u32 = 60;
pub const RECEIPT_POLL_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct TipReceipt {
    pub plan: TipPlan,
    pub hash: TxHash,
    pub status: TipStatus,
    pub explorer_url: String,
}

pub struct TipService<S> {
    sender: S,
    chain: ChainId,
    poll_attempts: u32,
    poll_delay: Duration,
}

impl<S: TipSender> TipService<S> {
    pub fn new(sender: S, chain: ChainId) -> Self {
        Self {
            sender,
            chain,
            poll_attempts: RECEIPT_POLL_ATTEMPTS,
            poll_delay: RECEIPT_POLL_DELAY,
        }
    }

    pub fn with_polling(mut self, attempts: u32, delay: Duration) -> Self {
        self.poll_attempts = attempts.max(1);
        self.poll_delay = delay;
        self
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    /// Resolves the recipient, converts the amount and checks it against the
    /// sender's balance. Nothing is sent.
    pub async fn prepare(&self, profile: &Profile, token: TokenId, amount: &str) -> Result<TipPlan> {
        let to = profile.tip_address()?;
        let decimals = get_token(token).decimals;
        let value = parse_amount(amount, decimals)?;
        let plan = TipPlan::build(token, self.chain, to, value)?;

        let balance = self
            .sender
            .balance(token, self.chain)
            .await
            .with_context(|| format!("Failed to read {} balance", token))?;
        debug!(
            "Balance {} {}, tip {} {}",
            format_amount(balance, decimals),
            token,
            format_amount(value, decimals),
            token
        );
        ensure_sufficient_balance(value, balance)?;

        Ok(plan)
    }

    pub async fn send(&self, plan: &TipPlan) -> Result<TxHash> {
        info!(
            "Sending {} {} to {:#x}",
            format_amount(plan.amount(), get_token(plan.token()).decimals),
            plan.token(),
            plan.recipient()
        );
        let hash = self.sender.submit(plan).await?;
        info!("Submitted {:#x}", hash);
        Ok(hash)
    }

    /// Polls for a receipt until the transaction settles or the attempt budget
    /// runs out, in which case it is still `Pending`.
    pub async fn wait(&self, hash: TxHash) -> Result<TipStatus> {
        for attempt in 1..=self.poll_attempts {
            match self.sender.receipt_status(hash).await {
                Ok(TipStatus::Pending) => {
                    debug!("{:#x} pending ({}/{})", hash, attempt, self.poll_attempts);
                }
                Ok(status) => {
                    info!("{:#x} settled: {:?}", hash, status);
                    return Ok(status);
                }
                Err(e) => warn!("Failed to fetch receipt for {:#x}: {:#}", hash, e),
            }
            if attempt < self.poll_attempts {
                tokio::time::sleep(self.poll_delay).await;
            }
        }

        warn!("{:#x} still pending after {} attempts", hash, self.poll_attempts);
        Ok(TipStatus::Pending)
    }

    pub async fn tip(&self, profile: &Profile, token: TokenId, amount: &str) -> Result<TipReceipt> {
        let plan = self.prepare(profile, token, amount).await?;
        let hash = self.send(&plan).await?;
        let status = self.wait(hash).await?;

        Ok(TipReceipt {
            plan,
            hash,
            status,
            explorer_url: tx_url(self.chain, &format!("{:#x}", hash)),
        })
    }
}
