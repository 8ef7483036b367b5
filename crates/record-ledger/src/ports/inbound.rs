//! # Driving Ports (API - Inbound)
//!
//! The surface callers use: submit a transaction, read back accounts.

use crate::domain::{
    Account, Address, Candidate, Favorites, JournalEntry, LedgerError, Poll, Pubkey, SignerSet,
};
use crate::transaction::{Instruction, Receipt, SignedTransaction};

/// Transaction processing.
///
/// ## Usage
///
/// ```ignore
/// let receipt = ledger.submit(&SignedTransaction::sign(tx, &[&alice])?)?;
/// let account = ledger.fetch_account(&receipt.addresses[0])?;
/// ```
pub trait LedgerApi: Send + Sync {
    /// Verify signatures, then apply the instruction atomically.
    ///
    /// # Returns
    ///
    /// * `Receipt` - slot and written addresses on success
    fn submit(&self, transaction: &SignedTransaction) -> Result<Receipt, LedgerError>;

    /// Apply an instruction for an already-verified signer set.
    fn process(&self, signers: &SignerSet, instruction: &Instruction)
        -> Result<Receipt, LedgerError>;

    /// Read the account at `address`.
    fn fetch_account(&self, address: &Address) -> Result<Account, LedgerError>;
}

/// Typed reads by record key instead of raw address.
pub trait RecordQueries: Send + Sync {
    /// Favorites of `owner`.
    fn favorites(&self, owner: &Pubkey) -> Result<Favorites, LedgerError>;

    /// Poll by id.
    fn poll(&self, poll_id: u64) -> Result<Poll, LedgerError>;

    /// Candidate by poll id and name.
    fn candidate(&self, poll_id: u64, name: &str) -> Result<Candidate, LedgerError>;

    /// Journal entry by owner and title.
    fn journal_entry(&self, owner: &Pubkey, title: &str) -> Result<JournalEntry, LedgerError>;
}
