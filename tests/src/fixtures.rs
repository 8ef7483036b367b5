//! Shared setup for integration flows.

use record_ledger::prelude::*;
use std::sync::Arc;

/// Poll fixture values.
pub const POLL_ID: u64 = 1;
pub const POLL_START: u64 = 0;
pub const POLL_END: u64 = 1_773_311_998;
pub const POLL_NAME: &str = "Test-Poll-123";
pub const POLL_DESCRIPTION: &str = "Description-Test--123";
pub const MODI: &str = "Howdy Modi";
pub const TRUMP: &str = "Namaste Trump";

/// Inside the fixture poll's window.
pub const NOW: i64 = 1_700_000_000;

/// A ledger with a controllable clock.
pub struct TestLedger {
    pub ledger: LedgerService,
    pub clock: Arc<FixedClock>,
}

impl TestLedger {
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    /// A ledger that rejects votes outside the poll window.
    pub fn with_voting_window() -> Self {
        Self::with_config(ServiceConfig {
            enforce_voting_window: true,
            ..ServiceConfig::default()
        })
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        init_tracing();
        let clock = Arc::new(FixedClock::new(NOW));
        let ledger = LedgerService::new(
            Arc::new(InMemoryAccountStore::new()),
            clock.clone(),
            config,
        );
        Self { ledger, clock }
    }

    /// Sign `instruction` with `signers` and submit it.
    pub fn submit(
        &self,
        instruction: Instruction,
        signers: &[&Keypair],
    ) -> Result<Receipt, LedgerError> {
        let tx = SignedTransaction::sign(Transaction::new(instruction), signers)?;
        self.ledger.submit(&tx)
    }

    /// Creates the fixture poll with both fixture candidates.
    pub fn seed_poll(&self, admin: &Keypair) -> Result<(), LedgerError> {
        self.submit(initialize_poll(admin.pubkey(), POLL_ID), &[admin])?;
        for name in [MODI, TRUMP] {
            self.submit(
                Instruction::InitializeCandidate {
                    payer: admin.pubkey(),
                    poll_id: POLL_ID,
                    name: name.to_string(),
                },
                &[admin],
            )?;
        }
        Ok(())
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}

pub fn initialize_poll(payer: Pubkey, poll_id: u64) -> Instruction {
    Instruction::InitializePoll {
        payer,
        poll_id,
        voting_start: POLL_START,
        voting_end: POLL_END,
        name: POLL_NAME.to_string(),
        description: POLL_DESCRIPTION.to_string(),
    }
}

pub fn vote(voter: Pubkey, candidate: &str) -> Instruction {
    Instruction::Vote {
        voter,
        poll_id: POLL_ID,
        candidate: candidate.to_string(),
    }
}

pub fn set_favorites(owner: Pubkey, number: u64, color: &str, hobbies: &[&str]) -> Instruction {
    Instruction::SetFavorites {
        owner,
        number,
        color: color.to_string(),
        hobbies: hobbies.iter().map(|h| (*h).to_string()).collect(),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("record_ledger=debug")
        .try_init();
}
