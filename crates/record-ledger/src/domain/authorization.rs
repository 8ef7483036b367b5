//! # Authorization Guard
//!
//! Owner-scoped mutations require the owner among the transaction's verified
//! signers. The check is side-effect free and runs before any store access.

use super::errors::LedgerError;
use super::value_objects::Pubkey;
use std::collections::BTreeSet;

/// Verified signer identities of one transaction.
pub type SignerSet = BTreeSet<Pubkey>;

/// Fails with `UnauthorizedSigner` unless `required` signed.
pub fn authorize(signers: &SignerSet, required: &Pubkey) -> Result<(), LedgerError> {
    if signers.contains(required) {
        Ok(())
    } else {
        Err(LedgerError::UnauthorizedSigner {
            required: *required,
        })
    }
}
