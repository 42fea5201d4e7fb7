use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const CELO_MAINNET: ChainId = ChainId(42220);
    pub const CELO_ALFAJORES: ChainId = ChainId(44787);

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ChainId)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        ChainId(id)
    }
}

#[derive(Debug, Clone)]
pub struct Network {
    pub chain_id: ChainId,
    pub name: &'static str,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub native_currency: &'static str,
}

pub static CELO_MAINNET: Network = Network {
    chain_id: ChainId::CELO_MAINNET,
    name: "Celo",
    rpc_url: "https://forno.celo.org",
    explorer_url: "https://celo.blockscout.com",
    native_currency: "CELO",
};

pub static CELO_ALFAJORES: Network = Network {
    chain_id: ChainId::CELO_ALFAJORES,
    name: "Celo Alfajores",
    rpc_url: "https://alfajores-forno.celo-testnet.org",
    explorer_url: "https://celo-alfajores.blockscout.com",
    native_currency: "CELO",
};

pub static NETWORKS: [&Network; 2] = [&CELO_MAINNET, &CELO_ALFAJORES];

pub fn network(chain: ChainId) -> Option<&'static Network> {
    NETWORKS.iter().copied().find(|n| n.chain_id == chain)
}

/// Block explorer link for a transaction. Unknown chains fall back to the
/// mainnet explorer.
pub fn tx_url(chain: ChainId, hash: &str) -> String {
    let explorer = network(chain).unwrap_or(&CELO_MAINNET).explorer_url;
    format!("{}/tx/{}", explorer, hash)
}

pub fn truncate_hash(hash: &str) -> String {
    if hash.len() <= 16 || !hash.is_ascii() {
        return hash.to_string();
    }
    format!("{}...{}", &hash[..8], &hash[hash.len() - 8..])
}
