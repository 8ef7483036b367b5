//! # Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Poll window is ordered | `check_poll_range_invariant()` |
//! | Votes land inside the window | `check_voting_window()` |
//! | Tally never decreases | `next_tally()` |
//! | Record owner matches the signing owner | `check_owner_invariant()` |

use super::entities::Poll;
use super::errors::LedgerError;
use super::value_objects::Pubkey;

/// `voting_end >= voting_start`.
#[must_use]
pub fn check_poll_range_invariant(poll: &Poll) -> bool {
    poll.voting_end >= poll.voting_start
}

/// Rejects votes at or before the start, or after the end.
///
/// `now` is a unix timestamp and may be negative.
pub fn check_voting_window(poll: &Poll, now: i64) -> Result<(), LedgerError> {
    let now = i128::from(now);
    if now <= i128::from(poll.voting_start) {
        return Err(LedgerError::VotingNotStarted);
    }
    if now > i128::from(poll.voting_end) {
        return Err(LedgerError::VotingEnded);
    }
    Ok(())
}

/// Tally after one more vote.
pub fn next_tally(votes: u64) -> Result<u64, LedgerError> {
    votes.checked_add(1).ok_or(LedgerError::TallyOverflow)
}

/// The stored owner must be the identity that signed for it.
pub fn check_owner_invariant(stored: &Pubkey, claimed: &Pubkey) -> Result<(), LedgerError> {
    if stored == claimed {
        Ok(())
    } else {
        Err(LedgerError::UnauthorizedSigner { required: *stored })
    }
}
