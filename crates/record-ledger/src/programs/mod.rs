//! # Programs
//!
//! One handler module per record family. Every handler follows the same
//! order: authorize, validate, derive, lock, then touch the store. Nothing is
//! written until every check has passed, so a failed instruction leaves no
//! trace.
//!
//! | Program | Instructions | Address seeds |
//! |---------|--------------|---------------|
//! | favorites | `set_favorites` | `["favorites", owner]` |
//! | voting | `initialize_poll` | `["poll", poll_id_le]` |
//! | voting | `initialize_candidate`, `vote` | `[poll_id_le, name]` |
//! | journal | `create/update/delete_journal_entry` | `[title, owner]` |

pub mod favorites;
pub mod journal;
pub mod voting;

use crate::adapters::AccountLocks;
use crate::domain::{ProgramId, SignerSet};
use crate::ports::{AccountStore, Clock};

/// Everything a handler may touch while executing one instruction.
pub struct ProgramContext<'a> {
    /// Program the instruction targets; scopes address derivation.
    pub program_id: ProgramId,
    /// Verified signers of the transaction.
    pub signers: &'a SignerSet,
    pub store: &'a dyn AccountStore,
    pub locks: &'a AccountLocks,
    pub clock: &'a dyn Clock,
    /// Reject votes outside the poll window.
    pub enforce_voting_window: bool,
}
