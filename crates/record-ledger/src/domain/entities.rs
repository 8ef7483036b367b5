//! # Domain Entities
//!
//! The four record families and the account envelope that stores them.
//!
//! ## Storage Bounds
//!
//! | Record | Field | Max |
//! |--------|-------|-----|
//! | `Favorites` | color | 50 bytes |
//! | `Favorites` | hobbies | 5 entries of 50 bytes |
//! | `Poll` | name / description | 32 / 280 bytes |
//! | `Candidate` | name | 32 bytes |
//! | `JournalEntry` | title / message | 50 / 200 bytes |

use super::errors::LedgerError;
use super::value_objects::{Address, ProgramId, Pubkey};
use serde::{Deserialize, Serialize};

/// Field bounds for every record type.
pub mod limits {
    /// Max favorite color length.
    pub const MAX_COLOR_LEN: usize = 50;
    /// Max number of hobbies.
    pub const MAX_HOBBIES: usize = 5;
    /// Max length of one hobby.
    pub const MAX_HOBBY_LEN: usize = 50;
    /// Max poll name length.
    pub const MAX_POLL_NAME_LEN: usize = 32;
    /// Max poll description length.
    pub const MAX_POLL_DESCRIPTION_LEN: usize = 280;
    /// Max candidate name length.
    pub const MAX_CANDIDATE_NAME_LEN: usize = 32;
    /// Max journal title length.
    pub const MAX_TITLE_LEN: usize = 50;
    /// Max journal message length.
    pub const MAX_MESSAGE_LEN: usize = 200;
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), LedgerError> {
    if len > max {
        return Err(LedgerError::FieldTooLong { field, len, max });
    }
    Ok(())
}

// =============================================================================
// RECORDS
// =============================================================================

/// One favorites record per owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
    pub owner: Pubkey,
    pub number: u64,
    pub color: String,
    pub hobbies: Vec<String>,
}

impl Favorites {
    /// Checks color and hobby bounds.
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_len("color", self.color.len(), limits::MAX_COLOR_LEN)?;
        check_len("hobbies", self.hobbies.len(), limits::MAX_HOBBIES)?;
        for hobby in &self.hobbies {
            check_len("hobby", hobby.len(), limits::MAX_HOBBY_LEN)?;
        }
        Ok(())
    }
}

/// A poll with a voting window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub poll_id: u64,
    pub voting_start: u64,
    pub voting_end: u64,
    pub name: String,
    pub description: String,
    /// Number of candidates registered under this poll.
    pub candidate_count: u64,
}

impl Poll {
    /// Checks the window and the text bounds.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.voting_end < self.voting_start {
            return Err(LedgerError::InvalidRange {
                start: self.voting_start,
                end: self.voting_end,
            });
        }
        check_len("name", self.name.len(), limits::MAX_POLL_NAME_LEN)?;
        check_len(
            "description",
            self.description.len(),
            limits::MAX_POLL_DESCRIPTION_LEN,
        )
    }
}

/// A candidate and its running tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub poll_id: u64,
    pub name: String,
    /// Never decremented.
    pub votes: u64,
}

impl Candidate {
    /// A fresh candidate with zero votes.
    #[must_use]
    pub fn new(poll_id: u64, name: impl Into<String>) -> Self {
        Self {
            poll_id,
            name: name.into(),
            votes: 0,
        }
    }

    /// Checks the name bound.
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_len("name", self.name.len(), limits::MAX_CANDIDATE_NAME_LEN)
    }
}

/// A titled journal entry. The title is part of the address and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub owner: Pubkey,
    pub title: String,
    pub message: String,
}

impl JournalEntry {
    /// Checks title and message bounds.
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_len("title", self.title.len(), limits::MAX_TITLE_LEN)?;
        check_len("message", self.message.len(), limits::MAX_MESSAGE_LEN)
    }
}

/// The closed set of payloads an account can hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Record {
    Favorites(Favorites),
    Poll(Poll),
    Candidate(Candidate),
    JournalEntry(JournalEntry),
}

impl Record {
    /// Record type name, used in errors and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Favorites(_) => "favorites",
            Self::Poll(_) => "poll",
            Self::Candidate(_) => "candidate",
            Self::JournalEntry(_) => "journal_entry",
        }
    }

    /// Encoded size of the payload.
    pub fn encoded_len(&self) -> Result<u64, LedgerError> {
        Ok(bincode::serialized_size(self)?)
    }
}

// =============================================================================
// ACCOUNT ENVELOPE
// =============================================================================

/// An account as held by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    /// Program that derived the address and owns the data.
    pub program_id: ProgramId,
    /// Identity that must co-sign owner-scoped mutations.
    pub owner: Pubkey,
    pub record: Record,
}

macro_rules! typed_view {
    ($name:ident, $into:ident, $variant:ident, $ty:ty, $kind:literal) => {
        /// Borrows the record if it has the expected type.
        pub fn $name(&self) -> Result<&$ty, LedgerError> {
            match &self.record {
                Record::$variant(inner) => Ok(inner),
                other => Err(self.mismatch($kind, other)),
            }
        }

        /// Takes the record if it has the expected type.
        pub fn $into(self) -> Result<$ty, LedgerError> {
            match self.record {
                Record::$variant(inner) => Ok(inner),
                other => Err(LedgerError::AccountTypeMismatch {
                    address: self.address,
                    expected: $kind,
                    actual: other.kind(),
                }),
            }
        }
    };
}

impl Account {
    typed_view!(as_favorites, into_favorites, Favorites, Favorites, "favorites");
    typed_view!(as_poll, into_poll, Poll, Poll, "poll");
    typed_view!(as_candidate, into_candidate, Candidate, Candidate, "candidate");
    typed_view!(
        as_journal_entry,
        into_journal_entry,
        JournalEntry,
        JournalEntry,
        "journal_entry"
    );

    fn mismatch(&self, expected: &'static str, actual: &Record) -> LedgerError {
        LedgerError::AccountTypeMismatch {
            address: self.address,
            expected,
            actual: actual.kind(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
