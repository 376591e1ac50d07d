//! Supported Algorand network environments

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Enumerated identifier for a blockchain network environment
///
/// Serialized as the lowercase network name. The default is testnet, so a
/// fresh state never points at mainnet by accident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Betanet,
    #[default]
    Testnet,
    Mainnet,
    Localnet,
}

impl NetworkId {
    /// All recognized network identifiers
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Betanet,
        NetworkId::Testnet,
        NetworkId::Mainnet,
        NetworkId::Localnet,
    ];
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Betanet => write!(f, "betanet"),
            NetworkId::Testnet => write!(f, "testnet"),
            NetworkId::Mainnet => write!(f, "mainnet"),
            NetworkId::Localnet => write!(f, "localnet"),
        }
    }
}

impl FromStr for NetworkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "betanet" => Ok(NetworkId::Betanet),
            "testnet" => Ok(NetworkId::Testnet),
            "mainnet" => Ok(NetworkId::Mainnet),
            "localnet" => Ok(NetworkId::Localnet),
            other => Err(Error::UnknownNetwork(other.to_string())),
        }
    }
}
