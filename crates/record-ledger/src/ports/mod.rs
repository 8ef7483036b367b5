//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `LedgerApi`, `RecordQueries`
//! - **Driven Ports (Outbound)**: `AccountStore`, `Clock`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
