//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports plus the lock table the
//! service uses to serialize writes per address.

pub mod account_locks;
pub mod clock;
pub mod memory_store;

pub use account_locks::*;
pub use clock::*;
pub use memory_store::*;
