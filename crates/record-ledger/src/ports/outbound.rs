//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the programs depend on: account storage and wall-clock time.
//! Both are injected into the service so handlers can be tested in isolation.

use crate::domain::{Account, Address, LedgerError, ProgramId, Pubkey, Record};

// =============================================================================
// ACCOUNT STORE
// =============================================================================

/// Storage for accounts keyed by derived address.
///
/// ## Implementation Notes
///
/// Each method is atomic: it is fully applied or fails with no observable
/// effect. `create` on a missing address must admit exactly one winner when
/// called concurrently; the losers see `DuplicateAccount`.
pub trait AccountStore: Send + Sync {
    /// Returns true if an account exists at `address`.
    fn exists(&self, address: &Address) -> Result<bool, LedgerError>;

    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// * `DuplicateAccount` - an account already exists at `address`
    fn create(
        &self,
        address: Address,
        program_id: ProgramId,
        owner: Pubkey,
        record: Record,
    ) -> Result<Account, LedgerError>;

    /// Reads the account at `address`.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - nothing stored at `address`
    fn fetch(&self, address: &Address) -> Result<Account, LedgerError>;

    /// Replaces the record, keeping owner and program.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - nothing stored at `address`
    fn update(&self, address: &Address, record: Record) -> Result<Account, LedgerError>;

    /// Removes the account; the address becomes free for a later `create`.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - nothing stored at `address`
    fn delete(&self, address: &Address) -> Result<Account, LedgerError>;

    /// Number of stored accounts.
    fn len(&self) -> usize;

    /// Returns true if the store holds no accounts.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All accounts, ordered by address.
    fn snapshot(&self) -> Vec<Account>;

    /// Reads the account if present.
    fn get(&self, address: &Address) -> Result<Option<Account>, LedgerError> {
        match self.fetch(address) {
            Ok(account) => Ok(Some(account)),
            Err(LedgerError::AccountNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Source of the current unix timestamp, in seconds.
pub trait Clock: Send + Sync {
    /// Current unix time in seconds.
    fn unix_timestamp(&self) -> i64;
}
