mod plan;
mod service;

pub use plan::{erc20_abi, TipPlan};
pub use service::{TipReceipt, TipService, RECEIPT_POLL_ATTEMPTS, RECEIPT_POLL_DELAY};

use anyhow::Result;
use async_trait::async_trait;
use ethers::types::{Address, TxHash, U256};

use crate::models::network::ChainId;
use crate::models::token::TokenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipStatus {
    Pending,
    Confirmed { block: Option<u64> },
    Failed,
}

/// Signs and broadcasts tips, and reports on them afterwards.
#[async_trait]
pub trait TipSender: Send + Sync {
    fn address(&self) -> Address;

    async fn balance(&self, token: TokenId, chain: ChainId) -> Result<U256>;

    async fn submit(&self, plan: &TipPlan) -> Result<TxHash>;

    /// `Pending` until a receipt exists.
    async fn receipt_status(&self, hash: TxHash) -> Result<TipStatus>;
}
