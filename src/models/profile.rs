use ethers::types::Address;
use serde::{Deserialize, Serialize};

use crate::error::TipError;

/// A Farcaster user as returned by the Neynar search API. Unused fields of
/// the upstream payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub fid: u64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
    #[serde(default)]
    pub verified_addresses: VerifiedAddresses,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedAddresses {
    #[serde(default)]
    pub eth_addresses: Vec<String>,
}

impl Profile {
    pub fn display_label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.username.as_str())
    }

    /// The first verified address, which receives tips.
    pub fn tip_address(&self) -> Result<Address, TipError> {
        self.verified_addresses
            .eth_addresses
            .first()
            .and_then(|raw| raw.trim().parse::<Address>().ok())
            .ok_or_else(|| TipError::NoVerifiedAddress(self.username.clone()))
    }
}

/// Exact (case-insensitive) username match, else the first result.
pub fn pick_profile<'a>(profiles: &'a [Profile], username: &str) -> Option<&'a Profile> {
    let wanted = username.trim().trim_start_matches('@');
    profiles
        .iter()
        .find(|p| p.username.eq_ignore_ascii_case(wanted))
        .or_else(|| profiles.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(username: &str, addresses: &[&str]) -> Profile {
        Profile {
            fid: 1,
            username: username.to_string(),
            display_name: None,
            pfp_url: None,
            verified_addresses: VerifiedAddresses {
                eth_addresses: addresses.iter().map(|a| a.to_string()).collect(),
            },
        }
    }

    #[test]
    fn deserializes_neynar_users() {
        let json = r#"{
            "object": "user",
            "fid": 3,
            "username": "dwr.eth",
            "display_name": "Dan Romero",
            "pfp_url": "https://example.com/dwr.png",
            "follower_count": 1000,
            "verified_addresses": {
                "eth_addresses": ["0xd7029bdea1c17493893aafe29aad69ef892b8ff2"],
                "sol_addresses": []
            }
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.fid, 3);
        assert_eq!(profile.display_label(), "Dan Romero");
        assert_eq!(
            profile.tip_address().unwrap(),
            "0xd7029bdea1c17493893aafe29aad69ef892b8ff2".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let profile: Profile = serde_json::from_str(r#"{"fid": 7, "username": "bob"}"#).unwrap();
        assert_eq!(profile.display_label(), "bob");
        assert!(profile.verified_addresses.eth_addresses.is_empty());
    }

    #[test]
    fn tip_address_needs_a_verified_address() {
        let err = profile("carol", &[]).tip_address().unwrap_err();
        assert!(matches!(err, TipError::NoVerifiedAddress(name) if name == "carol"));

        let err = profile("dave", &["garbage"]).tip_address().unwrap_err();
        assert!(matches!(err, TipError::NoVerifiedAddress(_)));
    }

    #[test]
    fn picks_exact_username_before_first_result() {
        let profiles = vec![
            profile("alice123", &[]),
            profile("alice", &[]),
        ];
        assert_eq!(pick_profile(&profiles, "@Alice").unwrap().username, "alice");
        assert_eq!(pick_profile(&profiles, "al").unwrap().username, "alice123");
        assert!(pick_profile(&[], "alice").is_none());
    }
}
