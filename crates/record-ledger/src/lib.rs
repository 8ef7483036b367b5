//! # Record Ledger - Program-Derived Account Storage
//!
//! An account store keyed by deterministic, program-derived addresses, with
//! three record programs on top: favorites, voting and journal.
//!
//! ## Purpose
//!
//! Every record lives at an address computed from the owning program id and
//! an ordered list of seeds. Callers never choose addresses; they name the
//! record (owner, poll id, title) and the program derives where it lives.
//! Mutations are signed with ed25519 and applied atomically: either every
//! write of an instruction lands or none does.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | One account per address | `AccountStore::create` - `DuplicateAccount` |
//! | Owner must co-sign owner-scoped writes | `domain/authorization.rs` - `authorize()` |
//! | Poll window is ordered | `domain/entities.rs` - `Poll::validate()` |
//! | Tally grows by exactly one per vote | `domain/invariants.rs` - `next_tally()` |
//! | Addresses have no private key | `domain/address.rs` - off-curve bump search |
//!
//! ## Address Seeds
//!
//! | Record | Seeds |
//! |--------|-------|
//! | Favorites | `["favorites", owner]` |
//! | Poll | `["poll", poll_id_le]` |
//! | Candidate | `[poll_id_le, name]` |
//! | JournalEntry | `[title, owner]` |
//!
//! ## Known Limitations
//!
//! Votes are not deduplicated per voter. The tally on a candidate counts
//! accepted vote transactions, not distinct voters.
//!
//! ## Usage Example
//!
//! ```ignore
//! use record_ledger::prelude::*;
//!
//! let ledger = create_test_service();
//! let alice = Keypair::generate();
//! let tx = Transaction::new(Instruction::SetFavorites {
//!     owner: alice.pubkey(),
//!     number: 7,
//!     color: "teal".into(),
//!     hobbies: vec!["chess".into()],
//! });
//! let receipt = ledger.submit(&SignedTransaction::sign(tx, &[&alice])?)?;
//! let favorites = ledger.favorites(&alice.pubkey())?;
//! ```

// Crate-level lints
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod programs;
pub mod service;
pub mod transaction;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        authorize, create_address, derive_address, find_address, limits, u64_seed, Account,
        Address, Candidate, Favorites, JournalEntry, LedgerError, Poll, ProgramId, Pubkey, Record,
        SignerSet, MAX_SEEDS, MAX_SEED_LEN,
    };

    // Ports
    pub use crate::ports::{AccountStore, Clock, LedgerApi, RecordQueries};

    // Adapters
    pub use crate::adapters::{AccountLocks, FixedClock, InMemoryAccountStore, SystemClock};

    // Transactions
    pub use crate::transaction::{
        Instruction, Keypair, ProgramKind, Receipt, SignedTransaction, Transaction,
    };

    // Service
    pub use crate::service::{create_test_service, LedgerService, ServiceConfig, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
