//! Shared state container
//!
//! [`Store`] owns the current [`State`] snapshot and is the single entry
//! point for publishing new ones. It is an explicitly owned handle: share
//! it with `Arc`, inject it into adapters and the manager, never a global.
//!
//! Single-writer cooperative model: transitions are expected to arrive
//! one at a time from the host's event dispatch. Each [`Store::apply`]
//! reads the latest snapshot, runs one pure transition to completion, and
//! notifies subscribers synchronously. There is no lost-update protection
//! beyond each transition re-reading the snapshot current at the moment
//! it runs.

pub mod persist;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::state::State;

/// Handle returned by [`Store::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(&State) + Send + Sync>;

/// Owns the state snapshot and its observers
pub struct Store {
    state: RwLock<State>,
    subscribers: Mutex<Vec<(u64, Subscriber)>>,
    next_subscriber_id: AtomicU64,
}

impl Store {
    /// Create a store holding the given initial snapshot
    pub fn new(initial: State) -> Self {
        Self {
            state: RwLock::new(initial),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber_id: AtomicU64::new(0),
        }
    }

    /// Clone the current snapshot
    pub fn snapshot(&self) -> State {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Apply a pure transition to the current snapshot and publish it
    ///
    /// The transition runs under the write lock so updates serialize;
    /// subscribers are then notified synchronously with the new snapshot.
    /// Both locks are released before callbacks run, so a subscriber may
    /// re-enter the store (dispatch a mutation, subscribe, unsubscribe).
    /// Store operations are total: a poisoned lock is absorbed rather
    /// than propagated.
    pub fn apply<F>(&self, transition: F)
    where
        F: FnOnce(&State) -> State,
    {
        let next = {
            let mut guard = self
                .state
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let next = transition(&guard);
            *guard = next.clone();
            next
        };

        // Clone the subscriber list out so notification runs without
        // holding the registry lock.
        let subscribers: Vec<Subscriber> = {
            let guard = self
                .subscribers
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.iter().map(|(_, callback)| Arc::clone(callback)).collect()
        };
        for callback in subscribers {
            callback(&next);
        }
    }

    /// Register an observer called after every published snapshot
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::SeqCst);
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.push((id, Arc::new(callback)));
        SubscriptionId(id)
    }

    /// Remove an observer; returns true if it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id.0);
        subscribers.len() != before
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}
