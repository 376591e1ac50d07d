//! Wallet manager - facade over the store, adapters, and persistence
//!
//! Owns the injectable [`Store`] handle, rehydrates persisted state
//! through the validators, keeps the registered adapters, and persists
//! every published snapshot through a store subscription.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::network::NetworkId;
use crate::state::{mutations, State, WalletAccount};
use crate::store::persist::{self, StorageAdapter};
use crate::store::Store;
use crate::wallets::{WalletAdapter, WalletId};

/// Wallet manager configuration
#[derive(Debug, Clone)]
pub struct WalletManagerConfig {
    /// Network selected when no persisted state exists
    pub network: NetworkId,
}

impl Default for WalletManagerConfig {
    fn default() -> Self {
        Self {
            network: NetworkId::Testnet,
        }
    }
}

/// Coordinates the state store, wallet adapters, and persistence
pub struct WalletManager {
    store: Arc<Store>,
    adapters: HashMap<WalletId, Box<dyn WalletAdapter>>,
    storage: Option<Arc<dyn StorageAdapter>>,
}

impl WalletManager {
    /// Create a manager, rehydrating persisted state when available
    ///
    /// Malformed persisted state is discarded (with a warning) and the
    /// session starts from the default state on the configured network.
    pub fn new(config: WalletManagerConfig, storage: Option<Arc<dyn StorageAdapter>>) -> Self {
        let initial = storage
            .as_deref()
            .and_then(persist::load_state)
            .unwrap_or_else(|| State {
                active_network: config.network,
                ..State::default()
            });

        let store = Arc::new(Store::new(initial));

        // Persist every published snapshot
        if let Some(adapter) = &storage {
            let adapter = Arc::clone(adapter);
            store.subscribe(move |state| {
                if let Err(e) = persist::save_state(adapter.as_ref(), state) {
                    warn!("Failed to persist wallet state: {}", e);
                }
            });
        }

        Self {
            store,
            adapters: HashMap::new(),
            storage,
        }
    }

    /// The shared state handle, for injection into adapters and observers
    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    /// Register a wallet adapter
    pub fn register(&mut self, adapter: Box<dyn WalletAdapter>) {
        info!("Registered {} wallet adapter", adapter.id());
        self.adapters.insert(adapter.id(), adapter);
    }

    /// Registered wallet identifiers
    pub fn wallet_ids(&self) -> Vec<WalletId> {
        self.adapters.keys().copied().collect()
    }

    /// Look up a registered adapter
    pub fn adapter(&self, wallet_id: WalletId) -> Option<&dyn WalletAdapter> {
        self.adapters
            .get(&wallet_id)
            .map(|adapter| adapter.as_ref())
    }

    /// Connect a registered wallet
    pub async fn connect(&self, wallet_id: WalletId) -> Result<Vec<WalletAccount>> {
        let adapter = self
            .adapters
            .get(&wallet_id)
            .ok_or(Error::WalletNotRegistered(wallet_id))?;
        adapter.connect().await
    }

    /// Disconnect a registered wallet
    pub async fn disconnect(&self, wallet_id: WalletId) -> Result<()> {
        let adapter = self
            .adapters
            .get(&wallet_id)
            .ok_or(Error::WalletNotRegistered(wallet_id))?;
        adapter.disconnect().await
    }

    /// Give every registered adapter a chance to resume its session
    ///
    /// One adapter failing does not stop the others; failures are logged
    /// and skipped.
    pub async fn resume_sessions(&self) {
        for (wallet_id, adapter) in &self.adapters {
            if let Err(e) = adapter.resume_session().await {
                warn!("[{}] Failed to resume session: {}", wallet_id, e);
            }
        }
    }

    /// The currently active wallet, if any
    pub fn active_wallet(&self) -> Option<WalletId> {
        self.store.snapshot().active_wallet
    }

    /// The active account of the active wallet, if any
    pub fn active_account(&self) -> Option<WalletAccount> {
        let state = self.store.snapshot();
        let active = state.active_wallet?;
        state.wallets.get(&active)?.active_account.clone()
    }

    /// The selected network environment
    pub fn active_network(&self) -> NetworkId {
        self.store.snapshot().active_network
    }

    /// Accounts reported by a connected wallet (empty if not connected)
    pub fn accounts(&self, wallet_id: WalletId) -> Vec<WalletAccount> {
        self.store
            .snapshot()
            .wallets
            .get(&wallet_id)
            .map(|wallet| wallet.accounts.clone())
            .unwrap_or_default()
    }

    /// Whether a wallet currently has an entry in the state
    pub fn is_connected(&self, wallet_id: WalletId) -> bool {
        self.store.snapshot().wallets.contains_key(&wallet_id)
    }

    /// Select the active wallet (permissive, see state mutations)
    pub fn set_active_wallet(&self, wallet_id: Option<WalletId>) {
        self.store
            .apply(|state| mutations::set_active_wallet(state, wallet_id));
    }

    /// Select the active account within a wallet by address
    pub fn set_active_account(&self, wallet_id: WalletId, address: &str) {
        self.store
            .apply(|state| mutations::set_active_account(state, wallet_id, address));
    }

    /// Switch the active network environment
    pub fn set_active_network(&self, network_id: NetworkId) {
        info!("Switching active network to {}", network_id);
        self.store
            .apply(|state| mutations::set_active_network(state, network_id));
    }

    /// Force a save of the current snapshot (no-op without storage)
    pub fn persist(&self) -> Result<()> {
        if let Some(storage) = &self.storage {
            persist::save_state(storage.as_ref(), &self.store.snapshot())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persist::{MemoryStorage, STORAGE_KEY};
    use crate::wallets::MnemonicWallet;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("wallet_manager=debug")
            .with_test_writer()
            .try_init();
    }

    fn mnemonic_adapter(store: Arc<Store>, address: &str) -> Box<dyn WalletAdapter> {
        let address = address.to_string();
        Box::new(MnemonicWallet::new(
            store,
            Box::new(move || Ok(address.clone())),
        ))
    }

    #[test]
    fn test_starts_from_default_on_configured_network() {
        let config = WalletManagerConfig {
            network: NetworkId::Mainnet,
        };
        let manager = WalletManager::new(config, None);

        assert_eq!(manager.active_network(), NetworkId::Mainnet);
        assert_eq!(manager.active_wallet(), None);
    }

    #[tokio::test]
    async fn test_connect_through_manager() {
        let mut manager = WalletManager::new(WalletManagerConfig::default(), None);
        manager.register(mnemonic_adapter(manager.store(), "ADDR1"));

        let accounts = manager.connect(WalletId::Mnemonic).await.unwrap();
        assert_eq!(accounts[0].address, "ADDR1");

        assert_eq!(manager.active_wallet(), Some(WalletId::Mnemonic));
        assert_eq!(manager.active_account().unwrap().address, "ADDR1");
        assert!(manager.is_connected(WalletId::Mnemonic));

        manager.disconnect(WalletId::Mnemonic).await.unwrap();
        assert!(!manager.is_connected(WalletId::Mnemonic));
        assert_eq!(manager.active_wallet(), None);
    }

    #[tokio::test]
    async fn test_connect_unregistered_wallet_fails() {
        let manager = WalletManager::new(WalletManagerConfig::default(), None);

        let err = manager.connect(WalletId::Pera).await.unwrap_err();
        assert!(matches!(err, Error::WalletNotRegistered(WalletId::Pera)));
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = WalletManager::new(
            WalletManagerConfig::default(),
            Some(Arc::clone(&storage) as Arc<dyn StorageAdapter>),
        );

        manager.set_active_network(NetworkId::Mainnet);

        let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("mainnet"));
    }

    #[tokio::test]
    async fn test_state_survives_a_restart() {
        init_tracing();
        let storage = Arc::new(MemoryStorage::new());

        {
            let mut manager = WalletManager::new(
                WalletManagerConfig::default(),
                Some(Arc::clone(&storage) as Arc<dyn StorageAdapter>),
            );
            manager.register(mnemonic_adapter(manager.store(), "ADDR1"));
            manager.connect(WalletId::Mnemonic).await.unwrap();
            manager.set_active_network(NetworkId::Betanet);
        }

        let manager = WalletManager::new(
            WalletManagerConfig::default(),
            Some(Arc::clone(&storage) as Arc<dyn StorageAdapter>),
        );
        assert_eq!(manager.active_network(), NetworkId::Betanet);
        assert_eq!(manager.active_wallet(), Some(WalletId::Mnemonic));
        assert_eq!(manager.accounts(WalletId::Mnemonic).len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_persisted_state_falls_back_to_default() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(STORAGE_KEY, "{\"corrupt\": true}").unwrap();

        let config = WalletManagerConfig {
            network: NetworkId::Localnet,
        };
        let manager = WalletManager::new(config, Some(Arc::clone(&storage) as Arc<dyn StorageAdapter>));

        assert_eq!(manager.active_network(), NetworkId::Localnet);
        assert_eq!(manager.active_wallet(), None);
    }

    #[tokio::test]
    async fn test_resume_sessions_cleans_up_mnemonic() {
        let storage = Arc::new(MemoryStorage::new());

        {
            let mut manager = WalletManager::new(
                WalletManagerConfig::default(),
                Some(Arc::clone(&storage) as Arc<dyn StorageAdapter>),
            );
            manager.register(mnemonic_adapter(manager.store(), "ADDR1"));
            manager.connect(WalletId::Mnemonic).await.unwrap();
        }

        let mut manager = WalletManager::new(
            WalletManagerConfig::default(),
            Some(Arc::clone(&storage) as Arc<dyn StorageAdapter>),
        );
        manager.register(mnemonic_adapter(manager.store(), "ADDR1"));
        assert!(manager.is_connected(WalletId::Mnemonic));

        // Mnemonic sessions never resume; the stale entry is dropped
        manager.resume_sessions().await;
        assert!(!manager.is_connected(WalletId::Mnemonic));
    }

    #[tokio::test]
    async fn test_selection_dispatchers() {
        let mut manager = WalletManager::new(WalletManagerConfig::default(), None);
        manager.register(mnemonic_adapter(manager.store(), "ADDR1"));
        manager.connect(WalletId::Mnemonic).await.unwrap();

        manager.set_active_wallet(None);
        assert_eq!(manager.active_wallet(), None);
        assert_eq!(manager.active_account(), None);

        manager.set_active_wallet(Some(WalletId::Mnemonic));
        assert_eq!(manager.active_account().unwrap().address, "ADDR1");

        // Unknown address is a silent no-op
        manager.set_active_account(WalletId::Mnemonic, "nope");
        assert_eq!(manager.active_account().unwrap().address, "ADDR1");
    }
}
