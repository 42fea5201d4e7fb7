use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::prelude::*;
use log::debug;

use crate::models::network::ChainId;
use crate::models::token::{get_token_address, TokenId};
use crate::tip::{erc20_abi, TipPlan, TipSender, TipStatus};

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Tip sender backed by a JSON-RPC node and a local private key.
pub struct EthersTipSender {
    client: Arc<SignerClient>,
}

impl EthersTipSender {
    pub fn connect(rpc_url: &str, private_key: &str, chain: ChainId) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url).context("Failed to connect to Celo network")?;
        let wallet = private_key
            .trim()
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .context("Invalid PRIVATE_KEY")?
            .with_chain_id(chain.as_u64());

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
        })
    }
}

#[async_trait]
impl TipSender for EthersTipSender {
    fn address(&self) -> Address {
        self.client.address()
    }

    async fn balance(&self, token: TokenId, chain: ChainId) -> Result<U256> {
        let owner = self.address();
        if token == TokenId::CELO {
            return self
                .client
                .get_balance(owner, None)
                .await
                .context("Failed to fetch CELO balance");
        }

        let contract = Contract::new(
            get_token_address(token, chain)?,
            erc20_abi().clone(),
            Arc::clone(&self.client),
        );
        let balance = contract
            .method::<_, U256>("balanceOf", owner)?
            .call()
            .await
            .with_context(|| format!("Failed to fetch {} balance", token))?;
        debug!("{} balance of {:#x}: {}", token, owner, balance);
        Ok(balance)
    }

    async fn submit(&self, plan: &TipPlan) -> Result<TxHash> {
        let tx = plan.transaction().from(self.address());
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .context("Failed to submit tip transaction")?;
        Ok(pending.tx_hash())
    }

    async fn receipt_status(&self, hash: TxHash) -> Result<TipStatus> {
        let receipt = self
            .client
            .get_transaction_receipt(hash)
            .await
            .context("Failed to fetch transaction receipt")?;

        Ok(match receipt {
            None => TipStatus::Pending,
            Some(receipt) if receipt.status == Some(U64::one()) => TipStatus::Confirmed {
                block: receipt.block_number.map(|b| b.as_u64()),
            },
            Some(_) => TipStatus::Failed,
        })
    }
}
