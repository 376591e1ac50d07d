//! Wallet connection state manager
//!
//! Keeps a consistent, serializable view of which wallets are connected,
//! which accounts each exposes, and which wallet/account pair is active,
//! while leaving key custody, signing, and provider handshakes to the
//! wallet adapters. State only changes through a fixed set of pure
//! transitions applied via the shared [`Store`]; persisted state is
//! validated before it is trusted on reload.

pub mod error;
pub mod manager;
pub mod network;
pub mod state;
pub mod store;
pub mod wallets;

// Re-export commonly used types
pub use error::{Error, Result};
pub use manager::{WalletManager, WalletManagerConfig};
pub use network::NetworkId;
pub use state::{State, WalletAccount, WalletMap, WalletState};
pub use store::{Store, SubscriptionId};
pub use wallets::{WalletAdapter, WalletId, WalletMetadata};
