//! Journal: titled entries scoped to their owner.
//!
//! The title is a seed, so it is fixed once the entry exists. Titles longer
//! than 50 bytes fail validation; titles of 33 to 50 bytes pass validation
//! but cannot be used as a seed and fail with `SeedTooLong`.

use super::ProgramContext;
use crate::domain::{
    authorize, check_owner_invariant, derive_address, Address, JournalEntry, LedgerError,
    ProgramId, Pubkey, Record,
};
use tracing::info;

/// `derive([title, owner])`.
pub fn journal_address(
    program_id: &ProgramId,
    owner: &Pubkey,
    title: &str,
) -> Result<Address, LedgerError> {
    derive_address(program_id, &[title.as_bytes(), owner.as_ref()])
}

pub fn create_journal_entry(
    ctx: &ProgramContext<'_>,
    owner: Pubkey,
    title: String,
    message: String,
) -> Result<Vec<Address>, LedgerError> {
    authorize(ctx.signers, &owner)?;

    let entry = JournalEntry {
        owner,
        title,
        message,
    };
    entry.validate()?;

    let address = journal_address(&ctx.program_id, &owner, &entry.title)?;
    let title = entry.title.clone();
    ctx.store
        .create(address, ctx.program_id, owner, Record::JournalEntry(entry))?;

    info!(%owner, title = %title, "journal entry created");
    Ok(vec![address])
}

/// Replaces the message of an existing entry.
pub fn update_journal_entry(
    ctx: &ProgramContext<'_>,
    owner: Pubkey,
    title: String,
    message: String,
) -> Result<Vec<Address>, LedgerError> {
    authorize(ctx.signers, &owner)?;

    let address = journal_address(&ctx.program_id, &owner, &title)?;
    let _guard = ctx.locks.lock(&[address]);

    let account = ctx.store.fetch(&address)?;
    check_owner_invariant(&account.owner, &owner)?;
    let mut entry = account.into_journal_entry()?;
    entry.message = message;
    entry.validate()?;

    ctx.store.update(&address, Record::JournalEntry(entry))?;

    info!(%owner, title = %title, "journal entry updated");
    Ok(vec![address])
}

/// Removes an entry; its address can be reused by a later create.
pub fn delete_journal_entry(
    ctx: &ProgramContext<'_>,
    owner: Pubkey,
    title: &str,
) -> Result<Vec<Address>, LedgerError> {
    authorize(ctx.signers, &owner)?;

    let address = journal_address(&ctx.program_id, &owner, title)?;
    let _guard = ctx.locks.lock(&[address]);

    let account = ctx.store.fetch(&address)?;
    check_owner_invariant(&account.owner, &owner)?;
    account.as_journal_entry()?;
    ctx.store.delete(&address)?;

    info!(%owner, title, "journal entry deleted");
    Ok(vec![address])
}
