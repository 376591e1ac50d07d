//! Canonical state tree for wallet connections
//!
//! One [`State`] value describes everything the manager knows: which
//! wallets are connected, which accounts each exposes, and which
//! wallet/account pair is active. Mutations never edit a snapshot in
//! place; see [`crate::state::mutations`].

use serde::{Deserialize, Serialize};

use crate::network::NetworkId;
use crate::wallets::WalletId;

/// A single account exposed by a connected wallet
///
/// Immutable value; identity is `address`. Produced by a wallet adapter,
/// never constructed inside the state layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    /// Human-readable account label
    pub name: String,

    /// Account address (unique within a wallet)
    pub address: String,
}

/// Connection state for a single wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    /// Accounts the provider reported, in provider order
    pub accounts: Vec<WalletAccount>,

    /// The selected account; must be present in `accounts` when non-empty
    pub active_account: Option<WalletAccount>,
}

/// Insertion-ordered map from [`WalletId`] to [`WalletState`]
///
/// Keys are unique; replacing an existing key keeps its original position.
/// Lookups are linear scans, which is fine for the handful of supported
/// providers. Serialized via the tagged-map envelope in
/// [`crate::state::codec`] so order survives a JSON round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletMap {
    pub(super) entries: Vec<(WalletId, WalletState)>,
}

impl WalletMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a wallet's state
    pub fn get(&self, wallet_id: &WalletId) -> Option<&WalletState> {
        self.entries
            .iter()
            .find(|(id, _)| id == wallet_id)
            .map(|(_, wallet)| wallet)
    }

    /// Insert or replace an entry, returning the previous value
    ///
    /// A replaced key keeps its original position in iteration order.
    pub fn insert(&mut self, wallet_id: WalletId, wallet: WalletState) -> Option<WalletState> {
        for (id, existing) in &mut self.entries {
            if *id == wallet_id {
                return Some(std::mem::replace(existing, wallet));
            }
        }
        self.entries.push((wallet_id, wallet));
        None
    }

    /// Remove an entry, returning it if present
    pub fn remove(&mut self, wallet_id: &WalletId) -> Option<WalletState> {
        let index = self.entries.iter().position(|(id, _)| id == wallet_id)?;
        Some(self.entries.remove(index).1)
    }

    /// Check whether a wallet is present
    pub fn contains_key(&self, wallet_id: &WalletId) -> bool {
        self.entries.iter().any(|(id, _)| id == wallet_id)
    }

    /// Number of connected wallets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&WalletId, &WalletState)> {
        self.entries.iter().map(|(id, wallet)| (id, wallet))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &WalletId> {
        self.entries.iter().map(|(id, _)| id)
    }
}

impl FromIterator<(WalletId, WalletState)> for WalletMap {
    /// Duplicate keys resolve last-wins, matching `new Map(entries)`
    fn from_iter<I: IntoIterator<Item = (WalletId, WalletState)>>(iter: I) -> Self {
        let mut map = WalletMap::new();
        for (id, wallet) in iter {
            map.insert(id, wallet);
        }
        map
    }
}

/// The full wallet connection state tree
///
/// Created once per session, either from [`State::default`] or from a
/// validated deserialization of persisted state. Field names serialize as
/// camelCase to match the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Connection state per wallet, insertion-ordered
    pub wallets: WalletMap,

    /// The wallet the user is currently acting through
    ///
    /// Not required to be a key of `wallets`; see
    /// [`crate::state::mutations::set_active_wallet`].
    pub active_wallet: Option<WalletId>,

    /// The selected network environment
    pub active_network: NetworkId,
}

impl Default for State {
    fn default() -> Self {
        Self {
            wallets: WalletMap::new(),
            active_wallet: None,
            active_network: NetworkId::Testnet,
        }
    }
}
