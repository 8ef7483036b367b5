//! # Address Derivation
//!
//! Program-derived addresses: a pure function of a program id and an ordered
//! list of byte seeds.
//!
//! ```text
//! address = sha256(seed_0 || ... || seed_n || bump || program_id || "ProgramDerivedAddress")
//! ```
//!
//! The bump byte is searched from 255 downwards until the digest is not a
//! valid compressed ed25519 point, so no private key exists for the address.

use super::errors::LedgerError;
use super::value_objects::{Address, ProgramId};
use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};
use tracing::trace;

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, bump included.
pub const MAX_SEEDS: usize = 16;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Derives the canonical address for `seeds` under `program_id`.
///
/// Same inputs always yield the same address; reordering seeds changes it.
pub fn derive_address(program_id: &ProgramId, seeds: &[&[u8]]) -> Result<Address, LedgerError> {
    find_address(program_id, seeds).map(|(address, _)| address)
}

/// Derives the canonical address and the bump that produced it.
pub fn find_address(
    program_id: &ProgramId,
    seeds: &[&[u8]],
) -> Result<(Address, u8), LedgerError> {
    check_seeds(seeds, 1)?;

    for bump in (0..=u8::MAX).rev() {
        let digest = hash_seeds(program_id, seeds, Some(bump));
        if !is_on_curve(&digest) {
            trace!(bump, "derived off-curve address");
            return Ok((Address::new(digest), bump));
        }
    }

    Err(LedgerError::NoViableBump)
}

/// Recomputes an address from seeds that already include the bump.
///
/// Fails with `AddressOnCurve` if the seeds do not yield a valid address.
pub fn create_address(program_id: &ProgramId, seeds: &[&[u8]]) -> Result<Address, LedgerError> {
    check_seeds(seeds, 0)?;
    let digest = hash_seeds(program_id, seeds, None);
    if is_on_curve(&digest) {
        return Err(LedgerError::AddressOnCurve);
    }
    Ok(Address::new(digest))
}

/// Encodes a numeric seed as 8 little-endian bytes.
#[must_use]
pub fn u64_seed(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

fn check_seeds(seeds: &[&[u8]], reserved: usize) -> Result<(), LedgerError> {
    if seeds.len() + reserved > MAX_SEEDS {
        return Err(LedgerError::TooManySeeds {
            count: seeds.len() + reserved,
            max: MAX_SEEDS,
        });
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(LedgerError::SeedTooLong {
            index,
            len: seed.len(),
            max: MAX_SEED_LEN,
        });
    }
    Ok(())
}

fn hash_seeds(program_id: &ProgramId, seeds: &[&[u8]], bump: Option<u8>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    if let Some(bump) = bump {
        hasher.update([bump]);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);
    hasher.finalize().into()
}

fn is_on_curve(bytes: &[u8; 32]) -> bool {
    VerifyingKey::from_bytes(bytes).is_ok()
}

// =============================================================================
// TESTS
// =============================================================================
