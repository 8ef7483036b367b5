//! # Error Types
//!
//! Every failure a ledger operation can raise. All variants are terminal for
//! the attempted operation; nothing is retried inside the engine.

use super::value_objects::{Address, Pubkey};
use thiserror::Error;

/// Errors raised by address derivation, the account store, and the programs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Create on an address that already holds an account.
    #[error("account already exists: {address}")]
    DuplicateAccount { address: Address },

    /// Fetch, update or delete on an address with no account.
    #[error("account not found: {address}")]
    AccountNotFound { address: Address },

    /// The required owner did not sign the transaction.
    #[error("unauthorized signer: {required} did not sign")]
    UnauthorizedSigner { required: Pubkey },

    /// Poll window ends before it starts.
    #[error("invalid voting range: end {end} is before start {start}")]
    InvalidRange { start: u64, end: u64 },

    /// A derivation seed exceeds the per-seed bound.
    #[error("seed {index} too long: {len} > {max} bytes")]
    SeedTooLong { index: usize, len: usize, max: usize },

    /// Too many derivation seeds.
    #[error("too many seeds: {count} > {max}")]
    TooManySeeds { count: usize, max: usize },

    /// The candidate digest is a valid curve point and cannot be used.
    #[error("derived address lies on the ed25519 curve")]
    AddressOnCurve,

    /// No bump seed produced an off-curve address.
    #[error("no viable bump seed")]
    NoViableBump,

    /// A string or list field exceeds its storage bound.
    #[error("field `{field}` too long: {len} > {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// The account at the address holds a different record type.
    #[error("account {address} holds a {actual} record, expected {expected}")]
    AccountTypeMismatch {
        address: Address,
        expected: &'static str,
        actual: &'static str,
    },

    /// Vote submitted at or before the poll's start time.
    #[error("voting has not started yet")]
    VotingNotStarted,

    /// Vote submitted after the poll's end time.
    #[error("voting has ended")]
    VotingEnded,

    /// Candidate tally would overflow `u64`.
    #[error("vote tally overflow")]
    TallyOverflow,

    /// A signature failed verification.
    #[error("invalid signature for {signer}")]
    InvalidSignature { signer: Pubkey },

    /// A transaction carried no signatures at all.
    #[error("transaction has no signatures")]
    MissingSignature,

    /// Message encoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl LedgerError {
    /// Stable numeric code, numbered from 6000 like custom program errors.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::DuplicateAccount { .. } => 6000,
            Self::AccountNotFound { .. } => 6001,
            Self::UnauthorizedSigner { .. } => 6002,
            Self::InvalidRange { .. } => 6003,
            Self::SeedTooLong { .. } => 6004,
            Self::TooManySeeds { .. } => 6005,
            Self::AddressOnCurve => 6006,
            Self::NoViableBump => 6007,
            Self::FieldTooLong { .. } => 6008,
            Self::AccountTypeMismatch { .. } => 6009,
            Self::VotingNotStarted => 6010,
            Self::VotingEnded => 6011,
            Self::TallyOverflow => 6012,
            Self::InvalidSignature { .. } => 6013,
            Self::MissingSignature => 6014,
            Self::Serialization(_) => 6015,
        }
    }

    /// Returns true for failures caused by missing or bad signatures.
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            Self::UnauthorizedSigner { .. } | Self::InvalidSignature { .. } | Self::MissingSignature
        )
    }
}

impl From<bincode::Error> for LedgerError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
