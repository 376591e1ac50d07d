//! Wallet connection state: model, mutations, validation, codec
//!
//! The state tree ([`State`]) is the single source of truth for which
//! wallets are connected and which wallet/account pair is active. It only
//! changes through the pure transitions in [`mutations`], applied via the
//! store; [`validate`] guards the persistence trust boundary, and the
//! codec (serde impls on [`WalletMap`]) keeps the ordered map survivable
//! in JSON.

pub mod mutations;
pub mod validate;

mod codec;
mod model;

pub use model::{State, WalletAccount, WalletMap, WalletState};
pub use validate::{decode_state, validate_state, validate_wallet, ValidationError};
