//! # Record-Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared ledger and keypair setup
//! └── integration/      # Cross-program flows
//!     ├── favorites_flow.rs
//!     ├── voting_flow.rs
//!     ├── journal_flow.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ledger-tests
//! cargo test -p ledger-tests integration::concurrency::
//! ```

pub mod fixtures;
