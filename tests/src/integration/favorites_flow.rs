//! # Favorites Flow
//!
//! Repeated upserts by one owner, and rejection of foreign signers.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use record_ledger::prelude::*;

    #[test]
    fn test_upserts_keep_one_account_with_latest_payload() {
        let t = TestLedger::new();
        let user = Keypair::generate();

        let first = t
            .submit(
                set_favorites(user.pubkey(), 51, "neelam", &["singing", "cricket", "audi-S5", "yoga"]),
                &[&user],
            )
            .unwrap();
        let second = t
            .submit(
                set_favorites(user.pubkey(), 21, "panna", &["medation", "teaching", "coding", "swimming"]),
                &[&user],
            )
            .unwrap();
        let third = t
            .submit(set_favorites(user.pubkey(), 7, "teal", &[]), &[&user])
            .unwrap();

        let address = t.ledger.favorites_address(&user.pubkey()).unwrap();
        for receipt in [&first, &second, &third] {
            assert_eq!(receipt.addresses, vec![address]);
        }
        assert_eq!(t.ledger.snapshot().len(), 1);

        let account = t.ledger.fetch_account(&address).unwrap();
        assert_eq!(account.owner, user.pubkey());
        assert_eq!(
            account.into_favorites().unwrap(),
            Favorites {
                owner: user.pubkey(),
                number: 7,
                color: "teal".to_string(),
                hobbies: vec![],
            }
        );
    }

    #[test]
    fn test_owners_do_not_share_favorites() {
        let t = TestLedger::new();
        let alice = Keypair::generate();
        let bob = Keypair::generate();

        t.submit(set_favorites(alice.pubkey(), 1, "red", &[]), &[&alice])
            .unwrap();
        t.submit(set_favorites(bob.pubkey(), 2, "blue", &[]), &[&bob])
            .unwrap();

        assert_eq!(t.ledger.favorites(&alice.pubkey()).unwrap().color, "red");
        assert_eq!(t.ledger.favorites(&bob.pubkey()).unwrap().color, "blue");
        assert_eq!(t.ledger.snapshot().len(), 2);
    }

    #[test]
    fn test_foreign_signer_leaves_favorites_unchanged() {
        let t = TestLedger::new();
        let owner = Keypair::generate();
        let attacker = Keypair::generate();

        t.submit(set_favorites(owner.pubkey(), 51, "neelam", &["yoga"]), &[&owner])
            .unwrap();
        let before = t.ledger.snapshot();

        let err = t
            .submit(set_favorites(owner.pubkey(), 0, "hacked", &[]), &[&attacker])
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::UnauthorizedSigner {
                required: owner.pubkey()
            }
        );
        assert_eq!(t.ledger.snapshot(), before);
    }

    #[test]
    fn test_hobby_limits() {
        let t = TestLedger::new();
        let user = Keypair::generate();

        let six = ["a", "b", "c", "d", "e", "f"];
        let err = t
            .submit(set_favorites(user.pubkey(), 1, "red", &six), &[&user])
            .unwrap_err();
        assert!(matches!(err, LedgerError::FieldTooLong { field: "hobbies", .. }));

        let long = "h".repeat(limits::MAX_HOBBY_LEN + 1);
        let err = t
            .submit(set_favorites(user.pubkey(), 1, "red", &[long.as_str()]), &[&user])
            .unwrap_err();
        assert!(matches!(err, LedgerError::FieldTooLong { field: "hobby", .. }));

        assert!(t.ledger.snapshot().is_empty());
    }

    #[test]
    fn test_account_serializes_with_hex_keys() {
        let t = TestLedger::new();
        let user = Keypair::generate();
        t.submit(set_favorites(user.pubkey(), 3, "green", &[]), &[&user])
            .unwrap();

        let snapshot = t.ledger.snapshot();
        let json = serde_json::to_value(&snapshot[0]).unwrap();
        assert_eq!(json["owner"], user.pubkey().to_hex());
        assert_eq!(json["record"]["favorites"]["number"], 3);
    }
}
