// Celo stable tokens are spelled with a lowercase prefix (cUSD), the rest are
// upper case acronyms
#![allow(non_camel_case_types, clippy::upper_case_acronyms)]

use ethers::types::Address;
use log::debug;
use once_cell::sync::Lazy;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::RegistryError;
use crate::models::network::ChainId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize)]
pub enum TokenId {
    CELO,
    cUSD,
    cEUR,
    cREAL,
    USDC,
    USDT,
}

/// Fiat-pegged tokens issued natively on Celo.
pub const STABLE_TOKEN_IDS: [TokenId; 3] = [TokenId::cUSD, TokenId::cEUR, TokenId::cREAL];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenColor {
    CeloGold,
    CeloGreen,
    UsdcBlue,
}

impl TokenColor {
    pub fn hex(&self) -> &'static str {
        match self {
            TokenColor::CeloGold => "#FBCC5C",
            TokenColor::CeloGreen => "#35D07F",
            TokenColor::UsdcBlue => "#2775CA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub id: TokenId,
    pub symbol: &'static str,
    pub name: &'static str,
    pub color: TokenColor,
    pub decimals: u8,
}

pub static CELO: Token = Token {
    id: TokenId::CELO,
    symbol: "CELO",
    name: "Celo Native",
    color: TokenColor::CeloGold,
    decimals: 18,
};

pub static CUSD: Token = Token {
    id: TokenId::cUSD,
    symbol: "cUSD",
    name: "Celo Dollar",
    color: TokenColor::CeloGreen,
    decimals: 18,
};

pub static CEUR: Token = Token {
    id: TokenId::cEUR,
    symbol: "cEUR",
    name: "Celo Euro",
    color: TokenColor::CeloGreen,
    decimals: 18,
};

pub static CREAL: Token = Token {
    id: TokenId::cREAL,
    symbol: "cREAL",
    name: "Celo Real",
    color: TokenColor::CeloGreen,
    decimals: 18,
};

pub static USDC: Token = Token {
    id: TokenId::USDC,
    symbol: "USDC",
    name: "USDC",
    color: TokenColor::UsdcBlue,
    decimals: 6,
};

pub static USDT: Token = Token {
    id: TokenId::USDT,
    symbol: "USDT",
    name: "USDT",
    color: TokenColor::UsdcBlue,
    decimals: 6,
};

struct ChainTokens {
    chain: ChainId,
    tokens: Vec<(TokenId, Address)>,
}

// Declaration order is the order tokens are listed and searched in.
static TOKEN_ADDRESSES: Lazy<Vec<ChainTokens>> = Lazy::new(|| {
    vec![ChainTokens {
        chain: ChainId::CELO_MAINNET,
        tokens: vec![
            (TokenId::CELO, address("0x471EcE3750Da237f93B8E339c536989b8978a438")),
            (TokenId::cUSD, address("0x765DE816845861e75A25fCA122bb6898B8B1282a")),
            (TokenId::cEUR, address("0xD8763CBa276a3738E6DE85b4b3bF5FDed6D6cA73")),
            (TokenId::cREAL, address("0xe8537a3d056DA446677B9E9d6c5dB704EaAb4787")),
            (TokenId::USDC, address("0xcebA9300f2b948710d2653dD7B07f33A8B32118C")),
            (TokenId::USDT, address("0x48065fbBE25f71C9282ddf5e1cD6D6A887483D5e")),
        ],
    }]
});

fn address(raw: &str) -> Address {
    raw.parse().expect("token address table holds valid addresses")
}

fn chain_tokens(chain: ChainId) -> Option<&'static ChainTokens> {
    TOKEN_ADDRESSES.iter().find(|entry| entry.chain == chain)
}

/// True when `candidate` is exactly one of the catalog's token ids.
pub fn is_native_token(candidate: &str) -> bool {
    candidate.parse::<TokenId>().is_ok()
}

pub fn is_stable_token(candidate: &str) -> bool {
    candidate
        .parse::<TokenId>()
        .map(|id| STABLE_TOKEN_IDS.contains(&id))
        .unwrap_or(false)
}

pub fn is_supported_chain(chain: ChainId) -> bool {
    chain_tokens(chain).is_some()
}

/// Tokens with an address on `chain`. Unknown chains yield an empty list; use
/// [`is_supported_chain`] to tell the two cases apart.
pub fn list_supported_tokens(chain: ChainId) -> Vec<TokenId> {
    chain_tokens(chain)
        .map(|entry| entry.tokens.iter().map(|(id, _)| *id).collect())
        .unwrap_or_default()
}

pub fn all_tokens() -> impl Iterator<Item = &'static Token> {
    TokenId::iter().map(get_token)
}

pub fn get_token(id: TokenId) -> &'static Token {
    match id {
        TokenId::CELO => &CELO,
        TokenId::cUSD => &CUSD,
        TokenId::cEUR => &CEUR,
        TokenId::cREAL => &CREAL,
        TokenId::USDC => &USDC,
        TokenId::USDT => &USDT,
    }
}

pub fn parse_token_id(candidate: &str) -> Result<TokenId, RegistryError> {
    candidate
        .parse::<TokenId>()
        .map_err(|_| RegistryError::UnknownTokenKind(candidate.to_string()))
}

pub fn get_token_by_id(candidate: &str) -> Result<&'static Token, RegistryError> {
    parse_token_id(candidate).map(get_token)
}

pub fn get_token_address(id: TokenId, chain: ChainId) -> Result<Address, RegistryError> {
    chain_tokens(chain)
        .and_then(|entry| entry.tokens.iter().find(|(token, _)| *token == id))
        .map(|(_, address)| *address)
        .ok_or(RegistryError::UnsupportedTokenOnChain { token: id, chain })
}

/// The hex digits of `raw` when it carries a `0x` or `0X` prefix.
pub fn strip_hex_prefix(raw: &str) -> Option<&str> {
    raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))
}

fn find_token_by_address(tables: &[ChainTokens], wanted: Address) -> Option<TokenId> {
    tables
        .iter()
        .flat_map(|entry| entry.tokens.iter())
        .find(|(_, candidate)| *candidate == wanted)
        .map(|(id, _)| *id)
}

/// Reverse lookup across every chain. The `0x` prefix is required in either
/// case and the hex digits are compared as 20-byte values, so casing is
/// irrelevant. The first chain in declaration order wins if two chains ever
/// share an address.
pub fn get_token_by_address(address: &str) -> Result<&'static Token, RegistryError> {
    let unknown = || RegistryError::UnknownAddress(address.to_string());
    let digits = strip_hex_prefix(address.trim()).ok_or_else(unknown)?;
    let wanted: Address = digits.parse().map_err(|_| unknown())?;

    let token = find_token_by_address(&TOKEN_ADDRESSES, wanted)
        .map(get_token)
        .ok_or_else(unknown)?;

    debug!("Resolved {} to {}", address, token.symbol);
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELO_MAINNET_ADDRESS: &str = "0x471EcE3750Da237f93B8E339c536989b8978a438";

    #[test]
    fn get_token_round_trips_every_id() {
        for id in TokenId::iter() {
            assert_eq!(get_token(id).id, id);
            assert_eq!(get_token_by_id(&id.to_string()).unwrap().id, id);
        }
    }

    #[test]
    fn carries_display_and_precision_metadata() {
        assert_eq!(get_token(TokenId::cUSD).name, "Celo Dollar");
        assert_eq!(get_token(TokenId::CELO).color, TokenColor::CeloGold);
        assert_eq!(get_token(TokenId::USDT).color.hex(), "#2775CA");
        assert_eq!(get_token(TokenId::cREAL).decimals, 18);
        assert_eq!(get_token(TokenId::USDC).decimals, 6);
        assert_eq!(get_token(TokenId::USDT).decimals, 6);
    }

    #[test]
    fn recognizes_catalog_ids() {
        assert!(is_native_token("CELO"));
        assert!(is_native_token("cREAL"));
        assert!(!is_native_token("DOGE"));
        assert!(!is_native_token("celo"));
        assert!(!is_native_token(""));
    }

    #[test]
    fn recognizes_stable_tokens() {
        assert!(is_stable_token("cUSD"));
        assert!(is_stable_token("cEUR"));
        assert!(is_stable_token("cREAL"));
        assert!(!is_stable_token("CELO"));
        assert!(!is_stable_token("USDC"));
        assert!(!is_stable_token("DOGE"));
    }

    #[test]
    fn lists_mainnet_tokens_in_declaration_order() {
        let expected = vec![
            TokenId::CELO,
            TokenId::cUSD,
            TokenId::cEUR,
            TokenId::cREAL,
            TokenId::USDC,
            TokenId::USDT,
        ];
        assert_eq!(list_supported_tokens(ChainId::CELO_MAINNET), expected);
        assert_eq!(list_supported_tokens(ChainId::CELO_MAINNET), expected);
    }

    #[test]
    fn unknown_chain_lists_nothing() {
        assert!(list_supported_tokens(ChainId(99999)).is_empty());
        assert!(list_supported_tokens(ChainId::CELO_ALFAJORES).is_empty());
        assert!(!is_supported_chain(ChainId(99999)));
        assert!(is_supported_chain(ChainId::CELO_MAINNET));
    }

    #[test]
    fn resolves_token_addresses() {
        let address = get_token_address(TokenId::CELO, ChainId::CELO_MAINNET).unwrap();
        assert_eq!(address, CELO_MAINNET_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn rejects_tokens_on_unmapped_chains() {
        assert_eq!(
            get_token_address(TokenId::CELO, ChainId(99999)),
            Err(RegistryError::UnsupportedTokenOnChain {
                token: TokenId::CELO,
                chain: ChainId(99999),
            })
        );
    }

    #[test]
    fn reverse_lookup_matches_every_entry() {
        for id in list_supported_tokens(ChainId::CELO_MAINNET) {
            let address = get_token_address(id, ChainId::CELO_MAINNET).unwrap();
            let lower = format!("{:#x}", address);
            let upper = format!("0x{}", lower.trim_start_matches("0x").to_uppercase());
            assert_eq!(get_token_by_address(&lower).unwrap().id, id);
            assert_eq!(get_token_by_address(&upper).unwrap().id, id);
        }
    }

    #[test]
    fn reverse_lookup_is_case_insensitive() {
        let token = get_token_by_address("0xCEBA9300F2B948710D2653DD7B07F33A8B32118C").unwrap();
        assert_eq!(token.id, TokenId::USDC);
        let token = get_token_by_address("0XCEBA9300F2B948710D2653DD7B07F33A8B32118C").unwrap();
        assert_eq!(token.id, TokenId::USDC);
        let token = get_token_by_address(" 0xceba9300f2b948710d2653dd7b07f33a8b32118c ").unwrap();
        assert_eq!(token.id, TokenId::USDC);
    }

    #[test]
    fn reverse_lookup_requires_the_hex_prefix() {
        let bare = "ceba9300f2b948710d2653dd7b07f33a8b32118c";
        assert_eq!(
            get_token_by_address(bare),
            Err(RegistryError::UnknownAddress(bare.to_string()))
        );
        assert!(get_token_by_address("0x").is_err());
        assert_eq!(strip_hex_prefix("0XABC"), Some("ABC"));
        assert_eq!(strip_hex_prefix("x0ABC"), None);
    }

    #[test]
    fn reverse_lookup_prefers_the_first_declared_chain() {
        let shared = address("0x1111111111111111111111111111111111111111");
        let tables = vec![
            ChainTokens {
                chain: ChainId(1),
                tokens: vec![(TokenId::cUSD, shared)],
            },
            ChainTokens {
                chain: ChainId(2),
                tokens: vec![(TokenId::USDT, shared)],
            },
        ];
        assert_eq!(find_token_by_address(&tables, shared), Some(TokenId::cUSD));

        let reversed: Vec<ChainTokens> = tables.into_iter().rev().collect();
        assert_eq!(find_token_by_address(&reversed, shared), Some(TokenId::USDT));
        assert_eq!(find_token_by_address(&reversed, Address::zero()), None);
    }

    #[test]
    fn rejects_unknown_addresses() {
        let zero = "0x0000000000000000000000000000000000000000";
        assert_eq!(
            get_token_by_address(zero),
            Err(RegistryError::UnknownAddress(zero.to_string()))
        );
        assert!(matches!(
            get_token_by_address("not-an-address"),
            Err(RegistryError::UnknownAddress(_))
        ));
    }

    #[test]
    fn rejects_unknown_token_kinds() {
        assert_eq!(
            get_token_by_id("NOTATOKEN"),
            Err(RegistryError::UnknownTokenKind("NOTATOKEN".to_string()))
        );
    }

    #[test]
    fn lists_the_whole_catalog() {
        let symbols: Vec<&str> = all_tokens().map(|t| t.symbol).collect();
        assert_eq!(symbols, vec!["CELO", "cUSD", "cEUR", "cREAL", "USDC", "USDT"]);
    }
}
