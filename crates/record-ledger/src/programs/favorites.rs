//! Favorites: one record per owner, written by upsert.

use super::ProgramContext;
use crate::domain::{authorize, derive_address, Address, Favorites, LedgerError, Pubkey, Record};
use tracing::info;

/// Tag seed for favorites addresses.
pub const FAVORITES_SEED: &[u8] = b"favorites";

/// `derive(["favorites", owner])`.
pub fn favorites_address(program_id: &Pubkey, owner: &Pubkey) -> Result<Address, LedgerError> {
    derive_address(program_id, &[FAVORITES_SEED, owner.as_ref()])
}

/// Creates the owner's favorites, or overwrites them if already set.
///
/// Replaying with different arguments replaces the stored payload; no
/// history is kept.
pub fn set_favorites(
    ctx: &ProgramContext<'_>,
    owner: Pubkey,
    number: u64,
    color: String,
    hobbies: Vec<String>,
) -> Result<Vec<Address>, LedgerError> {
    authorize(ctx.signers, &owner)?;

    let favorites = Favorites {
        owner,
        number,
        color,
        hobbies,
    };
    favorites.validate()?;

    let address = favorites_address(&ctx.program_id, &owner)?;
    let _guard = ctx.locks.lock(&[address]);

    match ctx.store.get(&address)? {
        Some(existing) => {
            existing.as_favorites()?;
            ctx.store.update(&address, Record::Favorites(favorites))?;
            info!(%owner, number, "favorites updated");
        }
        None => {
            ctx.store
                .create(address, ctx.program_id, owner, Record::Favorites(favorites))?;
            info!(%owner, number, "favorites created");
        }
    }

    Ok(vec![address])
}
