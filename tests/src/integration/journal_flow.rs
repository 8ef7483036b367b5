//! # Journal Flow

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use record_ledger::prelude::*;

    fn create(owner: Pubkey, title: &str, message: &str) -> Instruction {
        Instruction::CreateJournalEntry {
            owner,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn update(owner: Pubkey, title: &str, message: &str) -> Instruction {
        Instruction::UpdateJournalEntry {
            owner,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn delete(owner: Pubkey, title: &str) -> Instruction {
        Instruction::DeleteJournalEntry {
            owner,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_delete_then_recreate_reuses_address() {
        let t = TestLedger::new();
        let alice = Keypair::generate();

        let created = t
            .submit(create(alice.pubkey(), "my day", "sunny"), &[&alice])
            .unwrap();
        let address = created.addresses[0];
        assert_eq!(
            address,
            t.ledger.journal_address(&alice.pubkey(), "my day").unwrap()
        );

        t.submit(delete(alice.pubkey(), "my day"), &[&alice])
            .unwrap();
        assert_eq!(
            t.ledger.fetch_account(&address),
            Err(LedgerError::AccountNotFound { address })
        );

        let recreated = t
            .submit(create(alice.pubkey(), "my day", "rainy"), &[&alice])
            .unwrap();
        assert_eq!(recreated.addresses, vec![address]);
        assert_eq!(
            t.ledger
                .journal_entry(&alice.pubkey(), "my day")
                .unwrap()
                .message,
            "rainy"
        );
    }

    #[test]
    fn test_update_replaces_message_only() {
        let t = TestLedger::new();
        let alice = Keypair::generate();
        t.submit(create(alice.pubkey(), "notes", "v1"), &[&alice])
            .unwrap();
        t.submit(update(alice.pubkey(), "notes", "v2"), &[&alice])
            .unwrap();

        let entry = t.ledger.journal_entry(&alice.pubkey(), "notes").unwrap();
        assert_eq!(
            entry,
            JournalEntry {
                owner: alice.pubkey(),
                title: "notes".to_string(),
                message: "v2".to_string(),
            }
        );
    }

    #[test]
    fn test_other_signer_cannot_touch_entry() {
        let t = TestLedger::new();
        let alice = Keypair::generate();
        let mallory = Keypair::generate();
        t.submit(create(alice.pubkey(), "private", "secret"), &[&alice])
            .unwrap();
        let before = t.ledger.snapshot();

        for instruction in [
            update(alice.pubkey(), "private", "defaced"),
            delete(alice.pubkey(), "private"),
            create(alice.pubkey(), "forged", "not mine"),
        ] {
            let err = t.submit(instruction, &[&mallory]).unwrap_err();
            assert_eq!(
                err,
                LedgerError::UnauthorizedSigner {
                    required: alice.pubkey()
                }
            );
        }
        assert_eq!(t.ledger.snapshot(), before);
    }

    #[test]
    fn test_update_and_delete_missing_entry() {
        let t = TestLedger::new();
        let alice = Keypair::generate();
        assert!(matches!(
            t.submit(update(alice.pubkey(), "ghost", "boo"), &[&alice]),
            Err(LedgerError::AccountNotFound { .. })
        ));
        assert!(matches!(
            t.submit(delete(alice.pubkey(), "ghost"), &[&alice]),
            Err(LedgerError::AccountNotFound { .. })
        ));
    }

    #[test]
    fn test_co_signed_transaction_covers_both_owners() {
        let t = TestLedger::new();
        let alice = Keypair::generate();
        let bob = Keypair::generate();

        t.submit(create(alice.pubkey(), "shared", "from alice"), &[&alice, &bob])
            .unwrap();
        t.submit(create(bob.pubkey(), "shared", "from bob"), &[&alice, &bob])
            .unwrap();

        assert_ne!(
            t.ledger.journal_address(&alice.pubkey(), "shared").unwrap(),
            t.ledger.journal_address(&bob.pubkey(), "shared").unwrap()
        );
        assert_eq!(t.ledger.snapshot().len(), 2);
    }

    #[test]
    fn test_unsigned_transaction_rejected() {
        let t = TestLedger::new();
        let alice = Keypair::generate();
        assert_eq!(
            t.submit(create(alice.pubkey(), "t", "m"), &[]),
            Err(LedgerError::MissingSignature)
        );
    }
}
