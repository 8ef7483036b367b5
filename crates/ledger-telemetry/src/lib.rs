//! # Ledger Telemetry
//!
//! Structured logging for the record ledger, built on `tracing`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LEDGER_SERVICE_NAME` | `record-ledger` | Service name attached to the startup event |
//! | `LEDGER_LOG_LEVEL` | `info` | Log filter directives; falls back to `RUST_LOG` |
//! | `LEDGER_JSON_LOGS` | `false` | Emit one JSON object per event |
//! | `LEDGER_CONSOLE_OUTPUT` | `true` | Write events to stderr at all |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directives}': {reason}")]
    Filter { directives: String, reason: String },

    #[error("Failed to install global subscriber: {0}")]
    SubscriberInit(String),
}
