pub mod ethers_wallet;
pub mod neynar;

pub use ethers_wallet::EthersTipSender;
pub use neynar::{NeynarClient, ProfileSearch};
