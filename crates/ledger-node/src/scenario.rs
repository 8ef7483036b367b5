//! # Scenarios
//!
//! A scenario is a JSON document naming a set of identities and a list of
//! steps. Each step is signed by the listed identities and submitted to a
//! fresh in-memory ledger.
//!
//! ```json
//! {
//!   "identities": ["alice"],
//!   "steps": [
//!     {
//!       "signers": ["alice"],
//!       "instruction": {
//!         "set_favorites": { "owner": "alice", "number": 7, "color": "teal", "hobbies": [] }
//!       },
//!       "expect_ok": true
//!     }
//!   ]
//! }
//! ```
//!
//! Identity keys are `Keypair::from_seed(sha256(name))`, so the same name
//! always signs with the same key. In `owner`, `payer` and `voter` fields an
//! identity name may stand in for the hex key.

use crate::config::{ConfigError, NodeConfig};
use record_ledger::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Instruction fields that hold an identity.
const IDENTITY_FIELDS: [&str; 3] = ["owner", "payer", "voter"];

/// A scripted run.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub identities: Vec<String>,
    pub steps: Vec<Step>,
}

/// One transaction in a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Identity names that sign the transaction.
    pub signers: Vec<String>,
    /// Externally tagged instruction, e.g. `{"vote": {...}}`.
    pub instruction: serde_json::Value,
    /// Abort the run if this step fails.
    #[serde(default)]
    pub expect_ok: bool,
    /// Set the clock to this unix time before submitting.
    #[serde(default)]
    pub now: Option<i64>,
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied { receipt: Receipt },
    Rejected { code: u32, error: String },
}

/// One JSON line of runner output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub instruction: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Scenario errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("step {step}: unknown identity '{name}'")]
    UnknownIdentity { step: usize, name: String },

    #[error("duplicate identity '{0}'")]
    DuplicateIdentity(String),

    #[error("step {step}: invalid instruction: {reason}")]
    InvalidInstruction { step: usize, reason: String },

    #[error("step {step} was expected to succeed: {error}")]
    UnexpectedFailure { step: usize, error: LedgerError },

    #[error("step {step}: signing failed: {error}")]
    Signing { step: usize, error: LedgerError },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output failed: {0}")]
    Output(#[from] std::io::Error),
}

/// Deterministic keypair for a named identity.
#[must_use]
pub fn identity_keypair(name: &str) -> Keypair {
    Keypair::from_seed(Sha256::digest(name.as_bytes()).into())
}

/// Runs scenarios against one ledger.
pub struct ScenarioRunner {
    ledger: LedgerService,
    clock: Arc<FixedClock>,
}

impl ScenarioRunner {
    /// Build a runner with an in-memory store.
    pub fn new(config: &NodeConfig) -> Result<Self, ScenarioError> {
        let service_config = config.service_config()?;
        let now = config
            .fixed_now()?
            .unwrap_or_else(|| SystemClock.unix_timestamp());
        let clock = Arc::new(FixedClock::new(now));
        let ledger = LedgerService::new(
            Arc::new(InMemoryAccountStore::new()),
            clock.clone(),
            service_config,
        );
        Ok(Self { ledger, clock })
    }

    #[must_use]
    pub fn ledger(&self) -> &LedgerService {
        &self.ledger
    }

    /// Execute every step, handing each report to `on_step` as it completes.
    ///
    /// A failing step is reported and the run continues, unless the step has
    /// `expect_ok` set.
    pub fn run(
        &self,
        scenario: &Scenario,
        mut on_step: impl FnMut(&StepReport) -> std::io::Result<()>,
    ) -> Result<(), ScenarioError> {
        let mut identities = BTreeMap::new();
        for name in &scenario.identities {
            if identities
                .insert(name.clone(), identity_keypair(name))
                .is_some()
            {
                return Err(ScenarioError::DuplicateIdentity(name.clone()));
            }
        }
        info!(
            identities = identities.len(),
            steps = scenario.steps.len(),
            "running scenario"
        );

        for (index, step) in scenario.steps.iter().enumerate() {
            let (report, failure) = self.run_step(index, step, &identities)?;
            on_step(&report)?;

            if let Some(error) = failure {
                if step.expect_ok {
                    return Err(ScenarioError::UnexpectedFailure { step: index, error });
                }
            }
        }
        Ok(())
    }

    fn run_step(
        &self,
        index: usize,
        step: &Step,
        identities: &BTreeMap<String, Keypair>,
    ) -> Result<(StepReport, Option<LedgerError>), ScenarioError> {
        if let Some(now) = step.now {
            self.clock.set(now);
        }

        let instruction = resolve_instruction(index, &step.instruction, identities)?;
        let signers = step
            .signers
            .iter()
            .map(|name| {
                identities
                    .get(name)
                    .ok_or_else(|| ScenarioError::UnknownIdentity {
                        step: index,
                        name: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let name = instruction.name().to_string();
        let transaction = SignedTransaction::sign(
            Transaction::new(instruction).with_nonce(index as u64),
            &signers,
        )
        .map_err(|error| ScenarioError::Signing { step: index, error })?;

        let (outcome, failure) = match self.ledger.submit(&transaction) {
            Ok(receipt) => (StepOutcome::Applied { receipt }, None),
            Err(error) => {
                warn!(step = index, code = error.code(), %error, "step rejected");
                let outcome = StepOutcome::Rejected {
                    code: error.code(),
                    error: error.to_string(),
                };
                (outcome, Some(error))
            }
        };

        let report = StepReport {
            step: index,
            instruction: name,
            outcome,
        };
        Ok((report, failure))
    }
}

/// Parse a step's instruction, replacing identity names with their keys.
pub fn resolve_instruction(
    step: usize,
    raw: &serde_json::Value,
    identities: &BTreeMap<String, Keypair>,
) -> Result<Instruction, ScenarioError> {
    let mut value = raw.clone();
    if let Some(body) = value
        .as_object_mut()
        .and_then(|tagged| tagged.values_mut().next())
        .and_then(serde_json::Value::as_object_mut)
    {
        for field in IDENTITY_FIELDS {
            let resolved = match body.get(field) {
                Some(serde_json::Value::String(name)) => {
                    identities.get(name).map(|keypair| keypair.pubkey().to_hex())
                }
                _ => None,
            };
            if let Some(key) = resolved {
                body.insert(field.to_string(), serde_json::Value::String(key));
            }
        }
    }

    serde_json::from_value(value).map_err(|e| ScenarioError::InvalidInstruction {
        step,
        reason: e.to_string(),
    })
}
