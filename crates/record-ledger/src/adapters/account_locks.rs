//! # Account Locks
//!
//! Write locks keyed by address. An instruction locks every address it writes
//! before reading them, so read-modify-write transitions on one address are
//! serialized while instructions on disjoint addresses proceed in parallel.
//!
//! Acquisition is all-or-nothing: a caller waits until none of its addresses
//! are held, then takes them all at once. No caller ever holds some addresses
//! while waiting for others, so lock order cannot deadlock.

use crate::domain::Address;
use parking_lot::{Condvar, Mutex};
use std::collections::HashSet;

/// Table of currently locked addresses.
#[derive(Debug, Default)]
pub struct AccountLocks {
    held: Mutex<HashSet<Address>>,
    released: Condvar,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until every address is free, then locks them together.
    pub fn lock(&self, addresses: &[Address]) -> AccountLockGuard<'_> {
        let mut wanted = addresses.to_vec();
        wanted.sort_unstable();
        wanted.dedup();

        let mut held = self.held.lock();
        while wanted.iter().any(|address| held.contains(address)) {
            self.released.wait(&mut held);
        }
        held.extend(wanted.iter().copied());

        AccountLockGuard {
            locks: self,
            addresses: wanted,
        }
    }

    #[cfg(test)]
    fn is_locked(&self, address: &Address) -> bool {
        self.held.lock().contains(address)
    }
}

/// Releases its addresses on drop.
#[derive(Debug)]
pub struct AccountLockGuard<'a> {
    locks: &'a AccountLocks,
    addresses: Vec<Address>,
}

impl AccountLockGuard<'_> {
    #[cfg(test)]
    fn addresses(&self) -> &[Address] {
        &self.addresses
    }
}

impl Drop for AccountLockGuard<'_> {
    fn drop(&mut self) {
        let mut held = self.locks.held.lock();
        for address in &self.addresses {
            held.remove(address);
        }
        self.locks.released.notify_all();
    }
}
