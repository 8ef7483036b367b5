//! # Node Configuration
//!
//! Runtime parameters read from the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LEDGER_ENFORCE_VOTING_WINDOW` | `false` | Reject votes outside the poll window |
//! | `LEDGER_NOW` | wall clock | Fixed unix time for the run, in seconds |
//! | `LEDGER_FAVORITES_PROGRAM_ID` | `sha256("favorites")` | 32-byte hex program id |
//! | `LEDGER_VOTING_PROGRAM_ID` | `sha256("voting")` | 32-byte hex program id |
//! | `LEDGER_JOURNAL_PROGRAM_ID` | `sha256("journal")` | 32-byte hex program id |

use record_ledger::domain::Pubkey;
use record_ledger::service::ServiceConfig;
use std::env;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConfig {
    /// Unset means enforced.
    pub enforce_voting_window: Option<String>,
    /// Fixed clock value; unset means wall clock at startup.
    pub now: Option<String>,
    pub favorites_program: Option<String>,
    pub voting_program: Option<String>,
    pub journal_program: Option<String>,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be 64 hex characters, got '{value}'")]
    InvalidProgramId { var: &'static str, value: String },

    #[error("LEDGER_NOW must be a unix timestamp in seconds, got '{0}'")]
    InvalidTimestamp(String),

    #[error("LEDGER_ENFORCE_VOTING_WINDOW must be true/false/1/0, got '{0}'")]
    InvalidFlag(String),

    #[error("program ids must be distinct")]
    DuplicateProgramId,
}

impl NodeConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            enforce_voting_window: lookup("LEDGER_ENFORCE_VOTING_WINDOW"),
            now: lookup("LEDGER_NOW"),
            favorites_program: lookup("LEDGER_FAVORITES_PROGRAM_ID"),
            voting_program: lookup("LEDGER_VOTING_PROGRAM_ID"),
            journal_program: lookup("LEDGER_JOURNAL_PROGRAM_ID"),
        }
    }

    /// Validate every field without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service_config()?;
        self.fixed_now()?;
        Ok(())
    }

    /// Fixed clock value, if one was configured.
    pub fn fixed_now(&self) -> Result<Option<i64>, ConfigError> {
        self.now
            .as_deref()
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| ConfigError::InvalidTimestamp(raw.to_string()))
            })
            .transpose()
    }

    /// Service configuration with overrides applied on top of the defaults.
    pub fn service_config(&self) -> Result<ServiceConfig, ConfigError> {
        let mut config = ServiceConfig::default();

        if let Some(raw) = &self.enforce_voting_window {
            config.enforce_voting_window = match raw.trim().to_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return Err(ConfigError::InvalidFlag(raw.clone())),
            };
        }

        let overrides = [
            (
                "LEDGER_FAVORITES_PROGRAM_ID",
                &self.favorites_program,
                &mut config.favorites_program,
            ),
            (
                "LEDGER_VOTING_PROGRAM_ID",
                &self.voting_program,
                &mut config.voting_program,
            ),
            (
                "LEDGER_JOURNAL_PROGRAM_ID",
                &self.journal_program,
                &mut config.journal_program,
            ),
        ];
        for (var, raw, slot) in overrides {
            if let Some(value) = raw {
                *slot = Pubkey::from_hex(value.trim()).ok_or_else(|| {
                    ConfigError::InvalidProgramId {
                        var,
                        value: value.clone(),
                    }
                })?;
            }
        }

        if config.favorites_program == config.voting_program
            || config.favorites_program == config.journal_program
            || config.voting_program == config.journal_program
        {
            return Err(ConfigError::DuplicateProgramId);
        }

        Ok(config)
    }
}
