//! Validation of persisted or externally supplied state
//!
//! Persisted state is untrusted until it passes through here. Shape and
//! enum-membership checks (wallets is a tagged map, wallet and network
//! identifiers are recognized) are carried by the typed serde decode;
//! the semantic invariant that an active account belongs to its own
//! account list is checked explicitly, bottom-up from each wallet.
//!
//! Callers at the trust boundary discard anything that fails here and
//! fall back to [`State::default`]; see [`crate::store::persist`].

use thiserror::Error;

use crate::state::model::{State, WalletState};
use crate::wallets::WalletId;

/// Why a candidate state was rejected
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The raw value does not decode into the state shape: not JSON, a
    /// wallets value that is not a tagged map, an unrecognized wallet or
    /// network identifier, or a missing field.
    #[error("state does not match the expected shape: {0}")]
    Shape(String),

    /// A wallet's selected account is absent from its own account list
    #[error("wallet {wallet_id}: active account {address} is not in the accounts list")]
    ActiveAccountNotConnected {
        wallet_id: WalletId,
        address: String,
    },
}

/// Validate a single wallet entry
///
/// The active account, when set, must reference an address present in the
/// wallet's account list. An empty account list therefore requires the
/// active account to be `None`.
pub fn validate_wallet(wallet_id: WalletId, wallet: &WalletState) -> Result<(), ValidationError> {
    if let Some(active) = &wallet.active_account {
        let connected = wallet.accounts.iter().any(|a| a.address == active.address);
        if !connected {
            return Err(ValidationError::ActiveAccountNotConnected {
                wallet_id,
                address: active.address.clone(),
            });
        }
    }
    Ok(())
}

/// Validate a full state tree
///
/// Composes [`validate_wallet`] over every entry. `active_wallet` is not
/// required to be a key of the wallets map: it may legitimately point at
/// a wallet that has not finished connecting (see
/// [`crate::state::mutations::set_active_wallet`]).
pub fn validate_state(state: &State) -> Result<(), ValidationError> {
    for (wallet_id, wallet) in state.wallets.iter() {
        validate_wallet(*wallet_id, wallet)?;
    }
    Ok(())
}

/// Decode and validate a persisted JSON blob into a trusted [`State`]
pub fn decode_state(raw: &str) -> Result<State, ValidationError> {
    let state: State =
        serde_json::from_str(raw).map_err(|e| ValidationError::Shape(e.to_string()))?;
    validate_state(&state)?;
    Ok(state)
}
