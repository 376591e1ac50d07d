//! Wallet providers
//!
//! Defines the enumerated set of supported providers ([`WalletId`]) and
//! the adapter seam ([`WalletAdapter`]) through which provider-specific
//! code reports accounts into the shared store. Adapters own the
//! connection handshake and any signing concerns; the state layer only
//! records what they report.
//!
//! Adapters receive an `Arc<Store>` at construction and mutate state
//! exclusively through the operations in [`crate::state::mutations`].

pub mod mnemonic;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::WalletAccount;

pub use mnemonic::MnemonicWallet;

/// Enumerated identifier for a supported wallet provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletId {
    Defly,
    Exodus,
    Kmd,
    Mnemonic,
    Myalgo,
    Pera,
    Walletconnect,
}

impl WalletId {
    /// All recognized wallet identifiers
    pub const ALL: [WalletId; 7] = [
        WalletId::Defly,
        WalletId::Exodus,
        WalletId::Kmd,
        WalletId::Mnemonic,
        WalletId::Myalgo,
        WalletId::Pera,
        WalletId::Walletconnect,
    ];
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletId::Defly => write!(f, "defly"),
            WalletId::Exodus => write!(f, "exodus"),
            WalletId::Kmd => write!(f, "kmd"),
            WalletId::Mnemonic => write!(f, "mnemonic"),
            WalletId::Myalgo => write!(f, "myalgo"),
            WalletId::Pera => write!(f, "pera"),
            WalletId::Walletconnect => write!(f, "walletconnect"),
        }
    }
}

impl FromStr for WalletId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "defly" => Ok(WalletId::Defly),
            "exodus" => Ok(WalletId::Exodus),
            "kmd" => Ok(WalletId::Kmd),
            "mnemonic" => Ok(WalletId::Mnemonic),
            "myalgo" => Ok(WalletId::Myalgo),
            "pera" => Ok(WalletId::Pera),
            "walletconnect" => Ok(WalletId::Walletconnect),
            other => Err(Error::UnknownWallet(other.to_string())),
        }
    }
}

/// Static metadata describing a wallet provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletMetadata {
    /// Display name for wallet pickers
    pub name: String,
}

/// Provider adapter seam
///
/// Implementations perform the provider handshake and report accounts
/// into the store; they never read or write the wallets map directly.
/// Connection failures surface here as errors; the state layer itself
/// never fails.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// The provider this adapter drives
    fn id(&self) -> WalletId;

    /// Provider metadata
    fn metadata(&self) -> WalletMetadata;

    /// Perform the provider handshake and record the reported accounts
    ///
    /// On success the wallet becomes the active wallet (the add-wallet
    /// transition) and the reported accounts are returned.
    async fn connect(&self) -> Result<Vec<WalletAccount>>;

    /// Tear down the provider session and forget the wallet
    async fn disconnect(&self) -> Result<()>;

    /// Re-establish a session recorded in rehydrated state, or clean up
    /// the stale entry when the provider cannot resume
    async fn resume_session(&self) -> Result<()>;
}
