//! # Voting
//!
//! Polls with a voting window, candidates registered under a poll, and a
//! per-candidate tally.
//!
//! A vote is counted once per accepted transaction. No per-voter record is
//! kept, so the same voter can vote repeatedly and the tally is a
//! transaction count rather than a count of distinct voters.

use super::ProgramContext;
use crate::domain::{
    authorize, check_voting_window, derive_address, next_tally, u64_seed, Address, Candidate,
    LedgerError, Poll, ProgramId, Pubkey, Record,
};
use tracing::{debug, info};

/// Tag seed for poll addresses.
pub const POLL_SEED: &[u8] = b"poll";

/// `derive(["poll", poll_id_le])`.
pub fn poll_address(program_id: &ProgramId, poll_id: u64) -> Result<Address, LedgerError> {
    derive_address(program_id, &[POLL_SEED, &u64_seed(poll_id)])
}

/// `derive([poll_id_le, name])`.
pub fn candidate_address(
    program_id: &ProgramId,
    poll_id: u64,
    name: &str,
) -> Result<Address, LedgerError> {
    derive_address(program_id, &[&u64_seed(poll_id), name.as_bytes()])
}

/// Creates a poll. The id can be used once.
pub fn initialize_poll(
    ctx: &ProgramContext<'_>,
    payer: Pubkey,
    poll_id: u64,
    voting_start: u64,
    voting_end: u64,
    name: String,
    description: String,
) -> Result<Vec<Address>, LedgerError> {
    authorize(ctx.signers, &payer)?;

    let address = poll_address(&ctx.program_id, poll_id)?;
    if ctx.store.exists(&address)? {
        return Err(LedgerError::DuplicateAccount { address });
    }

    let poll = Poll {
        poll_id,
        voting_start,
        voting_end,
        name,
        description,
        candidate_count: 0,
    };
    poll.validate()?;

    ctx.store
        .create(address, ctx.program_id, payer, Record::Poll(poll))?;

    info!(poll_id, voting_start, voting_end, "poll initialized");
    Ok(vec![address])
}

/// Registers a candidate with zero votes under an existing poll.
///
/// Writes the candidate and bumps the poll's `candidate_count`; both
/// addresses are locked for the duration.
pub fn initialize_candidate(
    ctx: &ProgramContext<'_>,
    payer: Pubkey,
    poll_id: u64,
    name: String,
) -> Result<Vec<Address>, LedgerError> {
    authorize(ctx.signers, &payer)?;

    let candidate = Candidate::new(poll_id, name);
    candidate.validate()?;

    let poll_addr = poll_address(&ctx.program_id, poll_id)?;
    let candidate_addr = candidate_address(&ctx.program_id, poll_id, &candidate.name)?;
    let _guard = ctx.locks.lock(&[poll_addr, candidate_addr]);

    let mut poll = ctx.store.fetch(&poll_addr)?.into_poll()?;
    if ctx.store.exists(&candidate_addr)? {
        return Err(LedgerError::DuplicateAccount {
            address: candidate_addr,
        });
    }
    poll.candidate_count = poll
        .candidate_count
        .checked_add(1)
        .ok_or(LedgerError::TallyOverflow)?;

    let candidate_name = candidate.name.clone();
    ctx.store.create(
        candidate_addr,
        ctx.program_id,
        payer,
        Record::Candidate(candidate),
    )?;
    let candidate_count = poll.candidate_count;
    ctx.store.update(&poll_addr, Record::Poll(poll))?;

    info!(poll_id, candidate = %candidate_name, candidate_count, "candidate initialized");
    Ok(vec![candidate_addr, poll_addr])
}

/// Adds one vote to a candidate.
pub fn vote(
    ctx: &ProgramContext<'_>,
    voter: Pubkey,
    poll_id: u64,
    candidate: &str,
) -> Result<Vec<Address>, LedgerError> {
    authorize(ctx.signers, &voter)?;

    let poll_addr = poll_address(&ctx.program_id, poll_id)?;
    let candidate_addr = candidate_address(&ctx.program_id, poll_id, candidate)?;

    if ctx.enforce_voting_window {
        let poll = ctx.store.fetch(&poll_addr)?.into_poll()?;
        check_voting_window(&poll, ctx.clock.unix_timestamp())?;
    }

    let _guard = ctx.locks.lock(&[candidate_addr]);
    let mut tally = ctx.store.fetch(&candidate_addr)?.into_candidate()?;
    tally.votes = next_tally(tally.votes)?;
    let votes = tally.votes;
    ctx.store.update(&candidate_addr, Record::Candidate(tally))?;

    debug!(%voter, "vote accepted without per-voter dedup");
    info!(poll_id, candidate, votes, "vote recorded");
    Ok(vec![candidate_addr])
}
