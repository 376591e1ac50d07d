//! Mnemonic wallet adapter (development and testing)
//!
//! The one adapter that ships in-tree. It has no provider SDK: the host
//! supplies a resolver callback that produces the account address (for
//! example by prompting the user), so no key material ever enters this
//! crate. Not intended for mainnet use.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{Error, Result};
use crate::state::{mutations, WalletAccount, WalletState};
use crate::store::Store;

use super::{WalletAdapter, WalletId, WalletMetadata};

/// Host-supplied callback producing the account address for a session
pub type AddressResolver = Box<dyn Fn() -> anyhow::Result<String> + Send + Sync>;

/// Development wallet backed by a host-supplied address resolver
pub struct MnemonicWallet {
    store: Arc<Store>,
    resolve_address: AddressResolver,
    session: Mutex<Option<WalletAccount>>,
}

impl MnemonicWallet {
    /// Create a mnemonic wallet bound to the given store
    pub fn new(store: Arc<Store>, resolve_address: AddressResolver) -> Self {
        Self {
            store,
            resolve_address,
            session: Mutex::new(None),
        }
    }
}

#[async_trait]
impl WalletAdapter for MnemonicWallet {
    fn id(&self) -> WalletId {
        WalletId::Mnemonic
    }

    fn metadata(&self) -> WalletMetadata {
        WalletMetadata {
            name: "Mnemonic".to_string(),
        }
    }

    async fn connect(&self) -> Result<Vec<WalletAccount>> {
        info!("[{}] Connecting...", self.id());

        let address = (self.resolve_address)().map_err(|e| Error::Connect(e.to_string()))?;
        if address.is_empty() {
            return Err(Error::NoAccounts);
        }
        let account = WalletAccount {
            name: "Mnemonic Account".to_string(),
            address,
        };

        *self.session.lock().await = Some(account.clone());

        let wallet = WalletState {
            accounts: vec![account.clone()],
            active_account: Some(account.clone()),
        };
        self.store
            .apply(|state| mutations::add_wallet(state, WalletId::Mnemonic, wallet));

        Ok(vec![account])
    }

    async fn disconnect(&self) -> Result<()> {
        info!("[{}] Disconnecting...", self.id());

        self.session.lock().await.take();
        self.store
            .apply(|state| mutations::remove_wallet(state, WalletId::Mnemonic));

        Ok(())
    }

    async fn resume_session(&self) -> Result<()> {
        // A mnemonic session is never resumable; a rehydrated entry is
        // stale and gets disconnected instead.
        let has_entry = self
            .store
            .snapshot()
            .wallets
            .contains_key(&WalletId::Mnemonic);

        if has_entry {
            self.disconnect().await?;
        }
        Ok(())
    }
}
