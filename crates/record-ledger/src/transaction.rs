//! # Transactions
//!
//! The closed set of instructions the three programs accept, the signed
//! envelope that carries one of them, and the receipt returned on success.
//!
//! Signatures are ed25519 over the `bincode` encoding of the [`Transaction`].
//! A verified signature set is the only source of signer identity.

use crate::domain::{Address, LedgerError, Pubkey, SignerSet};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// INSTRUCTIONS
// =============================================================================

/// Which program handles an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    Favorites,
    Voting,
    Journal,
}

/// One operation against the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    /// Create or overwrite the owner's favorites.
    SetFavorites {
        owner: Pubkey,
        number: u64,
        color: String,
        hobbies: Vec<String>,
    },
    /// Create a poll; fails if the id is taken.
    InitializePoll {
        payer: Pubkey,
        poll_id: u64,
        voting_start: u64,
        voting_end: u64,
        name: String,
        description: String,
    },
    /// Register a candidate under an existing poll.
    InitializeCandidate {
        payer: Pubkey,
        poll_id: u64,
        name: String,
    },
    /// Add one vote to a candidate.
    Vote {
        voter: Pubkey,
        poll_id: u64,
        candidate: String,
    },
    CreateJournalEntry {
        owner: Pubkey,
        title: String,
        message: String,
    },
    UpdateJournalEntry {
        owner: Pubkey,
        title: String,
        message: String,
    },
    DeleteJournalEntry {
        owner: Pubkey,
        title: String,
    },
}

impl Instruction {
    /// Operation name as exposed to callers.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetFavorites { .. } => "set_favorites",
            Self::InitializePoll { .. } => "initialize_poll",
            Self::InitializeCandidate { .. } => "initialize_candidate",
            Self::Vote { .. } => "vote",
            Self::CreateJournalEntry { .. } => "create_journal_entry",
            Self::UpdateJournalEntry { .. } => "update_journal_entry",
            Self::DeleteJournalEntry { .. } => "delete_journal_entry",
        }
    }

    /// Program that handles this instruction.
    #[must_use]
    pub fn program(&self) -> ProgramKind {
        match self {
            Self::SetFavorites { .. } => ProgramKind::Favorites,
            Self::InitializePoll { .. }
            | Self::InitializeCandidate { .. }
            | Self::Vote { .. } => ProgramKind::Voting,
            Self::CreateJournalEntry { .. }
            | Self::UpdateJournalEntry { .. }
            | Self::DeleteJournalEntry { .. } => ProgramKind::Journal,
        }
    }
}

// =============================================================================
// TRANSACTION ENVELOPE
// =============================================================================

/// Unsigned transaction message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub instruction: Instruction,
    /// Distinguishes otherwise identical transactions.
    pub nonce: u64,
}

impl Transaction {
    #[must_use]
    pub fn new(instruction: Instruction) -> Self {
        Self {
            instruction,
            nonce: 0,
        }
    }

    #[must_use]
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Bytes covered by the signatures.
    pub fn message_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        Ok(bincode::serialize(self)?)
    }
}

/// One signer's signature over a transaction message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    pub signer: Pubkey,
    /// 64-byte ed25519 signature.
    pub signature: Vec<u8>,
}

/// A transaction plus the signatures authorizing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signatures: Vec<TransactionSignature>,
}

impl SignedTransaction {
    /// Signs `transaction` with every keypair in `signers`.
    pub fn sign(transaction: Transaction, signers: &[&Keypair]) -> Result<Self, LedgerError> {
        let message = transaction.message_bytes()?;
        let signatures = signers
            .iter()
            .map(|keypair| TransactionSignature {
                signer: keypair.pubkey(),
                signature: keypair.sign(&message),
            })
            .collect();
        Ok(Self {
            transaction,
            signatures,
        })
    }

    /// Verifies every signature and returns the signer set.
    ///
    /// A single bad signature rejects the whole transaction.
    pub fn verify(&self) -> Result<SignerSet, LedgerError> {
        if self.signatures.is_empty() {
            return Err(LedgerError::MissingSignature);
        }
        let message = self.transaction.message_bytes()?;

        let mut signers = SignerSet::new();
        for entry in &self.signatures {
            let invalid = || LedgerError::InvalidSignature {
                signer: entry.signer,
            };
            let key = VerifyingKey::from_bytes(entry.signer.as_bytes()).map_err(|_| invalid())?;
            let signature = Signature::from_slice(&entry.signature).map_err(|_| invalid())?;
            key.verify(&message, &signature).map_err(|_| invalid())?;
            signers.insert(entry.signer);
        }
        Ok(signers)
    }
}

// =============================================================================
// KEYPAIR
// =============================================================================

/// Ed25519 signing identity.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a random keypair.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Create from a 32-byte secret seed.
    #[must_use]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Public identity.
    #[must_use]
    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair").field("pubkey", &self.pubkey()).finish()
    }
}

// =============================================================================
// RECEIPT
// =============================================================================

/// Result of a successfully applied transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    /// Ledger slot the transaction landed in; one slot per applied transaction.
    pub slot: u64,
    pub instruction: String,
    /// Addresses written by the transaction.
    pub addresses: Vec<Address>,
}

// =============================================================================
// TESTS
// =============================================================================
