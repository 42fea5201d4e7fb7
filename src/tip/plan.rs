use ethers::abi::{parse_abi, Abi};
use ethers::contract::BaseContract;
use ethers::types::{Address, Bytes, TransactionRequest, U256};
use once_cell::sync::Lazy;

use crate::error::TipError;
use crate::models::network::ChainId;
use crate::models::token::{get_token_address, TokenId};

static ERC20_ABI: Lazy<Abi> = Lazy::new(|| {
    parse_abi(&[
        "function transfer(address to, uint256 value) external returns (bool)",
        "function balanceOf(address owner) external view returns (uint256)",
    ])
    .expect("Failed to parse ERC-20 ABI")
});

pub fn erc20_abi() -> &'static Abi {
    &ERC20_ABI
}

/// What will be sent on chain for a single tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipPlan {
    /// CELO moves as the transaction value.
    Native {
        token: TokenId,
        to: Address,
        value: U256,
    },
    /// Everything else is a `transfer(to, amount)` call on the token contract.
    Erc20 {
        token: TokenId,
        contract: Address,
        to: Address,
        amount: U256,
        calldata: Bytes,
    },
}

impl TipPlan {
    pub fn build(token: TokenId, chain: ChainId, to: Address, amount: U256) -> Result<Self, TipError> {
        if token == TokenId::CELO {
            return Ok(TipPlan::Native {
                token,
                to,
                value: amount,
            });
        }

        let contract = get_token_address(token, chain)?;
        let calldata = BaseContract::from(ERC20_ABI.clone())
            .encode("transfer", (to, amount))
            .map_err(|e| TipError::Encoding(e.to_string()))?;

        Ok(TipPlan::Erc20 {
            token,
            contract,
            to,
            amount,
            calldata,
        })
    }

    pub fn token(&self) -> TokenId {
        match self {
            TipPlan::Native { token, .. } | TipPlan::Erc20 { token, .. } => *token,
        }
    }

    pub fn recipient(&self) -> Address {
        match self {
            TipPlan::Native { to, .. } | TipPlan::Erc20 { to, .. } => *to,
        }
    }

    pub fn amount(&self) -> U256 {
        match self {
            TipPlan::Native { value, .. } => *value,
            TipPlan::Erc20 { amount, .. } => *amount,
        }
    }

    pub fn transaction(&self) -> TransactionRequest {
        match self {
            TipPlan::Native { to, value, .. } => TransactionRequest::new().to(*to).value(*value),
            TipPlan::Erc20 {
                contract, calldata, ..
            } => TransactionRequest::new().to(*contract).data(calldata.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use ethers::types::NameOrAddress;

    fn recipient() -> Address {
        "0xd7029bdea1c17493893aafe29aad69ef892b8ff2".parse().unwrap()
    }

    #[test]
    fn celo_is_sent_as_value() {
        let plan = TipPlan::build(TokenId::CELO, ChainId::CELO_MAINNET, recipient(), U256::from(5)).unwrap();
        assert_eq!(
            plan,
            TipPlan::Native {
                token: TokenId::CELO,
                to: recipient(),
                value: U256::from(5),
            }
        );

        let tx = plan.transaction();
        assert_eq!(tx.to, Some(NameOrAddress::Address(recipient())));
        assert_eq!(tx.value, Some(U256::from(5)));
        assert!(tx.data.is_none());
    }

    #[test]
    fn stable_tokens_call_transfer_on_the_contract() {
        let amount = U256::exp10(18);
        let plan = TipPlan::build(TokenId::cUSD, ChainId::CELO_MAINNET, recipient(), amount).unwrap();
        let contract = get_token_address(TokenId::cUSD, ChainId::CELO_MAINNET).unwrap();

        let TipPlan::Erc20 { calldata, .. } = &plan else {
            panic!("expected an ERC-20 plan, got {plan:?}");
        };
        // selector + two 32-byte words
        assert_eq!(calldata.len(), 68);
        assert_eq!(&calldata[..4], &[0xa9u8, 0x05, 0x9c, 0xbb]);
        assert_eq!(&calldata[16..36], recipient().as_bytes());

        let tx = plan.transaction();
        assert_eq!(tx.to, Some(NameOrAddress::Address(contract)));
        assert!(tx.value.is_none());
        assert_eq!(plan.recipient(), recipient());
        assert_eq!(plan.amount(), amount);
        assert_eq!(plan.token(), TokenId::cUSD);
    }

    #[test]
    fn tokens_without_an_address_cannot_be_planned() {
        let err = TipPlan::build(TokenId::USDC, ChainId::CELO_ALFAJORES, recipient(), U256::one()).unwrap_err();
        assert!(matches!(
            err,
            TipError::Registry(RegistryError::UnsupportedTokenOnChain { .. })
        ));
    }
}
