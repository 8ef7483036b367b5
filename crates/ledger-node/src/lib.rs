//! # Ledger Node
//!
//! Scenario runner for the record ledger.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging from `LEDGER_*` environment variables
//! 2. Load and validate `NodeConfig`
//! 3. Parse the scenario file
//! 4. Run every step against a fresh in-memory ledger, one JSON line per step
//! 5. Print the final account snapshot

pub mod config;
pub mod scenario;

pub use config::{ConfigError, NodeConfig};
pub use scenario::{
    identity_keypair, Scenario, ScenarioError, ScenarioRunner, Step, StepOutcome, StepReport,
};
