//! Error types for the wallet manager

use thiserror::Error;

use crate::wallets::WalletId;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the wallet manager
///
/// State mutations never produce errors (unknown keys are no-ops); this
/// type serves the persistence boundary and the wallet adapter layer.
#[derive(Error, Debug)]
pub enum Error {
    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Identifier parsing errors
    #[error("Unknown network identifier: {0}")]
    UnknownNetwork(String),

    #[error("Unknown wallet identifier: {0}")]
    UnknownWallet(String),

    // Adapter errors
    #[error("Wallet not registered: {0}")]
    WalletNotRegistered(WalletId),

    #[error("Wallet connect failed: {0}")]
    Connect(String),

    #[error("Provider reported no accounts")]
    NoAccounts,

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
