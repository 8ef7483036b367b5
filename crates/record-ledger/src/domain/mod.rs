//! # Domain Layer (Inner Hexagon)
//!
//! Pure ledger logic: address derivation, records, authorization, invariants.
//! No I/O and no locking; the store and clock are reached through ports.

pub mod address;
pub mod authorization;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use address::*;
pub use authorization::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
