//! Attempt counting for retry simulations.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use common::OrderRequest;

/// Identifies the logical operation whose attempts are counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttemptKey {
    pub customer: String,
    pub transaction_ref: String,
}

impl AttemptKey {
    /// Builds the key for an order.
    pub fn for_order(order: &OrderRequest) -> Self {
        Self {
            customer: order.customer.clone(),
            transaction_ref: order.transaction_ref.clone(),
        }
    }
}

/// Thread-safe attempt counter shared by clones.
///
/// Only keys in the middle of a retry cycle are held; a key is forgotten as
/// soon as its cycle completes.
#[derive(Debug, Clone, Default)]
pub struct AttemptTracker {
    attempts: Arc<Mutex<HashMap<AttemptKey, u32>>>,
}

impl AttemptTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<AttemptKey, u32>> {
        self.attempts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one attempt in a cycle of `cycle` attempts and returns its
    /// 1-based position in that cycle.
    ///
    /// The attempt reaching `cycle` completes the cycle and drops the key, so
    /// the next attempt starts over at 1.
    pub fn record(&self, key: AttemptKey, cycle: u32) -> u32 {
        match self.lock().entry(key) {
            Entry::Occupied(mut entry) => {
                let attempt = entry.get().saturating_add(1);
                if attempt >= cycle {
                    entry.remove();
                } else {
                    entry.insert(attempt);
                }
                attempt
            }
            Entry::Vacant(entry) => {
                if cycle > 1 {
                    entry.insert(1);
                }
                1
            }
        }
    }

    /// Returns how many attempts of the current cycle have been recorded.
    pub fn attempts(&self, key: &AttemptKey) -> u32 {
        self.lock().get(key).copied().unwrap_or(0)
    }

    /// Returns the number of keys with an unfinished cycle.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no cycle is in progress.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
