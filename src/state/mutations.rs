//! Pure state transitions
//!
//! Each operation maps `(current state, payload)` to a next snapshot.
//! Operations are total: acting on an unknown wallet or address is a
//! no-op that returns an equivalent snapshot, never an error. The wallets
//! map is copy-on-write, so snapshots handed out earlier stay valid.
//!
//! Apply these through [`crate::store::Store::apply`] so observers see
//! every published snapshot.

use crate::network::NetworkId;
use crate::state::model::{State, WalletAccount, WalletState};
use crate::wallets::WalletId;

/// Record a freshly connected wallet and make it the active one
///
/// Inserts or replaces the entry for `wallet_id`. The most recent
/// successful connection is assumed to be the one the user wants active,
/// so `active_wallet` is set unconditionally. Other wallets' account
/// selections are left untouched.
pub fn add_wallet(state: &State, wallet_id: WalletId, wallet: WalletState) -> State {
    let mut wallets = state.wallets.clone();
    wallets.insert(wallet_id, wallet);

    State {
        wallets,
        active_wallet: Some(wallet_id),
        active_network: state.active_network,
    }
}

/// Forget a disconnected wallet
///
/// If the removed wallet was active, `active_wallet` becomes `None`;
/// otherwise it is unchanged. No-op if `wallet_id` is absent.
pub fn remove_wallet(state: &State, wallet_id: WalletId) -> State {
    if !state.wallets.contains_key(&wallet_id) {
        return state.clone();
    }

    let mut wallets = state.wallets.clone();
    wallets.remove(&wallet_id);

    State {
        wallets,
        active_wallet: match state.active_wallet {
            Some(active) if active == wallet_id => None,
            other => other,
        },
        active_network: state.active_network,
    }
}

/// Select which wallet is active, or clear the selection
///
/// Deliberately does not require `wallet_id` to be a key of the wallets
/// map: a caller may pre-declare the active wallet before its adapter
/// finishes connecting. The selection is reconciled when the wallet
/// connects ([`add_wallet`]) or disconnects ([`remove_wallet`]).
pub fn set_active_wallet(state: &State, wallet_id: Option<WalletId>) -> State {
    State {
        wallets: state.wallets.clone(),
        active_wallet: wallet_id,
        active_network: state.active_network,
    }
}

/// Select the active account within a wallet by address
///
/// No-op if the wallet is not connected or no account with the given
/// address exists in it. Matching is a linear scan by address equality;
/// first match wins (addresses are expected unique).
pub fn set_active_account(state: &State, wallet_id: WalletId, address: &str) -> State {
    let Some(wallet) = state.wallets.get(&wallet_id) else {
        return state.clone();
    };
    let Some(account) = wallet.accounts.iter().find(|a| a.address == address) else {
        return state.clone();
    };

    let updated = WalletState {
        accounts: wallet.accounts.clone(),
        active_account: Some(account.clone()),
    };

    let mut wallets = state.wallets.clone();
    wallets.insert(wallet_id, updated);

    State {
        wallets,
        active_wallet: state.active_wallet,
        active_network: state.active_network,
    }
}

/// Replace a wallet's account list, reconciling the active account
///
/// If the current active account's address is still present in the new
/// list, the matching element of the new list becomes active; otherwise
/// the first new account does, or `None` when the list is empty. This
/// restores the active-account invariant after a provider reports a
/// changed account set. No-op if `wallet_id` is absent.
pub fn set_accounts(state: &State, wallet_id: WalletId, accounts: Vec<WalletAccount>) -> State {
    let Some(wallet) = state.wallets.get(&wallet_id) else {
        return state.clone();
    };

    let active_account = wallet
        .active_account
        .as_ref()
        .and_then(|active| accounts.iter().find(|a| a.address == active.address))
        .or_else(|| accounts.first())
        .cloned();

    let updated = WalletState {
        accounts,
        active_account,
    };

    let mut wallets = state.wallets.clone();
    wallets.insert(wallet_id, updated);

    State {
        wallets,
        active_wallet: state.active_wallet,
        active_network: state.active_network,
    }
}

/// Switch the active network environment
pub fn set_active_network(state: &State, network_id: NetworkId) -> State {
    State {
        wallets: state.wallets.clone(),
        active_wallet: state.active_wallet,
        active_network: network_id,
    }
}
