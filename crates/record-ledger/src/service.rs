//! # Ledger Service
//!
//! Dispatches verified instructions to the three programs and keeps
//! per-service statistics.
//!
//! ## Security
//!
//! - Signer identity comes only from verified ed25519 signatures
//! - Owner-scoped instructions are authorized before any store access
//! - Authorization rejections are counted and logged at `warn`

use crate::adapters::{AccountLocks, InMemoryAccountStore, SystemClock};
use crate::domain::{
    Account, Address, Candidate, Favorites, JournalEntry, LedgerError, Poll, ProgramId, Pubkey,
    SignerSet,
};
use crate::ports::inbound::{LedgerApi, RecordQueries};
use crate::ports::outbound::{AccountStore, Clock};
use crate::programs::{favorites, journal, voting, ProgramContext};
use crate::transaction::{Instruction, ProgramKind, Receipt, SignedTransaction};

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Ledger service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Reject votes outside the poll's voting window. Off by default.
    pub enforce_voting_window: bool,
    /// Program id that scopes favorites addresses.
    pub favorites_program: ProgramId,
    /// Program id that scopes poll and candidate addresses.
    pub voting_program: ProgramId,
    /// Program id that scopes journal addresses.
    pub journal_program: ProgramId,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enforce_voting_window: false,
            favorites_program: Pubkey::from_label("favorites"),
            voting_program: Pubkey::from_label("voting"),
            journal_program: Pubkey::from_label("journal"),
        }
    }
}

impl ServiceConfig {
    /// Program id for `kind`.
    #[must_use]
    pub fn program_id(&self, kind: ProgramKind) -> ProgramId {
        match kind {
            ProgramKind::Favorites => self.favorites_program,
            ProgramKind::Voting => self.voting_program,
            ProgramKind::Journal => self.journal_program,
        }
    }
}

/// Statistics for the ledger service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Transactions submitted, whatever the outcome.
    pub processed: u64,
    /// Transactions applied.
    pub succeeded: u64,
    /// Transactions rejected for any reason.
    pub failed: u64,
    /// Subset of `failed` caused by missing or bad signatures.
    pub rejected_unauthorized: u64,
    /// Votes added to any tally.
    pub votes_cast: u64,
}

/// The ledger: three programs over one shared account store.
pub struct LedgerService {
    config: ServiceConfig,
    store: Arc<dyn AccountStore>,
    clock: Arc<dyn Clock>,
    locks: AccountLocks,
    /// Last assigned slot.
    slot: AtomicU64,
    stats: RwLock<ServiceStats>,
}

impl LedgerService {
    /// Create a service over the given store and clock.
    pub fn new(store: Arc<dyn AccountStore>, clock: Arc<dyn Clock>, config: ServiceConfig) -> Self {
        Self {
            config,
            store,
            clock,
            locks: AccountLocks::new(),
            slot: AtomicU64::new(0),
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// In-memory store, wall clock.
    #[must_use]
    pub fn in_memory(config: ServiceConfig) -> Self {
        Self::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(SystemClock),
            config,
        )
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Get current service statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    /// Slot of the most recently applied transaction; 0 before the first.
    #[must_use]
    pub fn current_slot(&self) -> u64 {
        self.slot.load(Ordering::SeqCst)
    }

    /// Every stored account, ordered by address.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Account> {
        self.store.snapshot()
    }

    pub fn favorites_address(&self, owner: &Pubkey) -> Result<Address, LedgerError> {
        favorites::favorites_address(&self.config.favorites_program, owner)
    }

    pub fn poll_address(&self, poll_id: u64) -> Result<Address, LedgerError> {
        voting::poll_address(&self.config.voting_program, poll_id)
    }

    pub fn candidate_address(&self, poll_id: u64, name: &str) -> Result<Address, LedgerError> {
        voting::candidate_address(&self.config.voting_program, poll_id, name)
    }

    pub fn journal_address(&self, owner: &Pubkey, title: &str) -> Result<Address, LedgerError> {
        journal::journal_address(&self.config.journal_program, owner, title)
    }

    /// Runs one instruction and turns its written addresses into a receipt.
    #[instrument(skip(self, signers, instruction), fields(instruction = instruction.name()))]
    fn execute(
        &self,
        signers: &SignerSet,
        instruction: &Instruction,
    ) -> Result<Receipt, LedgerError> {
        let result = self.dispatch(signers, instruction);
        self.record_outcome(instruction, result.as_ref().map(|_| ()));

        let addresses = result?;
        let slot = self.slot.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(slot, written = addresses.len(), "transaction applied");

        Ok(Receipt {
            id: Uuid::new_v4(),
            slot,
            instruction: instruction.name().to_string(),
            addresses,
        })
    }

    fn dispatch(
        &self,
        signers: &SignerSet,
        instruction: &Instruction,
    ) -> Result<Vec<Address>, LedgerError> {
        let ctx = ProgramContext {
            program_id: self.config.program_id(instruction.program()),
            signers,
            store: self.store.as_ref(),
            locks: &self.locks,
            clock: self.clock.as_ref(),
            enforce_voting_window: self.config.enforce_voting_window,
        };

        match instruction.clone() {
            Instruction::SetFavorites {
                owner,
                number,
                color,
                hobbies,
            } => favorites::set_favorites(&ctx, owner, number, color, hobbies),
            Instruction::InitializePoll {
                payer,
                poll_id,
                voting_start,
                voting_end,
                name,
                description,
            } => voting::initialize_poll(
                &ctx,
                payer,
                poll_id,
                voting_start,
                voting_end,
                name,
                description,
            ),
            Instruction::InitializeCandidate {
                payer,
                poll_id,
                name,
            } => voting::initialize_candidate(&ctx, payer, poll_id, name),
            Instruction::Vote {
                voter,
                poll_id,
                candidate,
            } => voting::vote(&ctx, voter, poll_id, &candidate),
            Instruction::CreateJournalEntry {
                owner,
                title,
                message,
            } => journal::create_journal_entry(&ctx, owner, title, message),
            Instruction::UpdateJournalEntry {
                owner,
                title,
                message,
            } => journal::update_journal_entry(&ctx, owner, title, message),
            Instruction::DeleteJournalEntry { owner, title } => {
                journal::delete_journal_entry(&ctx, owner, &title)
            }
        }
    }

    fn record_outcome(&self, instruction: &Instruction, outcome: Result<(), &LedgerError>) {
        let mut stats = self.stats.write();
        stats.processed += 1;
        match outcome {
            Ok(()) => {
                stats.succeeded += 1;
                if matches!(instruction, Instruction::Vote { .. }) {
                    stats.votes_cast += 1;
                }
            }
            Err(err) => {
                stats.failed += 1;
                if err.is_authorization_failure() {
                    stats.rejected_unauthorized += 1;
                    warn!(error = %err, code = err.code(), "instruction rejected: unauthorized");
                } else {
                    debug!(error = %err, code = err.code(), "instruction failed");
                }
            }
        }
    }
}

/// Create a service with an in-memory store and default config (for testing).
#[must_use]
pub fn create_test_service() -> LedgerService {
    LedgerService::in_memory(ServiceConfig::default())
}

// =============================================================================
// LedgerApi Implementation
// =============================================================================

impl LedgerApi for LedgerService {
    fn submit(&self, transaction: &SignedTransaction) -> Result<Receipt, LedgerError> {
        let signers = match transaction.verify() {
            Ok(signers) => signers,
            Err(err) => {
                self.record_outcome(&transaction.transaction.instruction, Err(&err));
                return Err(err);
            }
        };
        self.execute(&signers, &transaction.transaction.instruction)
    }

    fn process(
        &self,
        signers: &SignerSet,
        instruction: &Instruction,
    ) -> Result<Receipt, LedgerError> {
        self.execute(signers, instruction)
    }

    fn fetch_account(&self, address: &Address) -> Result<Account, LedgerError> {
        self.store.fetch(address)
    }
}

// =============================================================================
// RecordQueries Implementation
// =============================================================================

impl RecordQueries for LedgerService {
    fn favorites(&self, owner: &Pubkey) -> Result<Favorites, LedgerError> {
        self.store
            .fetch(&self.favorites_address(owner)?)?
            .into_favorites()
    }

    fn poll(&self, poll_id: u64) -> Result<Poll, LedgerError> {
        self.store.fetch(&self.poll_address(poll_id)?)?.into_poll()
    }

    fn candidate(&self, poll_id: u64, name: &str) -> Result<Candidate, LedgerError> {
        self.store
            .fetch(&self.candidate_address(poll_id, name)?)?
            .into_candidate()
    }

    fn journal_entry(&self, owner: &Pubkey, title: &str) -> Result<JournalEntry, LedgerError> {
        self.store
            .fetch(&self.journal_address(owner, title)?)?
            .into_journal_entry()
    }
}

// =============================================================================
// TESTS
// =============================================================================
