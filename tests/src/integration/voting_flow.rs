//! # Voting Flow
//!
//! Poll and candidate setup followed by repeated votes. Votes are not
//! deduplicated per voter; the tallies below count transactions.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use record_ledger::prelude::*;

    #[test]
    fn test_initialize_poll_once() {
        let t = TestLedger::new();
        let admin = Keypair::generate();

        let receipt = t
            .submit(initialize_poll(admin.pubkey(), POLL_ID), &[&admin])
            .unwrap();
        assert_eq!(receipt.instruction, "initialize_poll");
        assert_eq!(
            receipt.addresses,
            vec![t.ledger.poll_address(POLL_ID).unwrap()]
        );

        let poll = t.ledger.poll(POLL_ID).unwrap();
        assert_eq!(poll.name, POLL_NAME);
        assert_eq!(poll.description, POLL_DESCRIPTION);
        assert!(poll.voting_end >= poll.voting_start);

        let err = t
            .submit(initialize_poll(admin.pubkey(), POLL_ID), &[&admin])
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateAccount { .. }));
    }

    #[test]
    fn test_candidates_distinct_and_start_at_zero() {
        let t = TestLedger::new();
        let admin = Keypair::generate();
        t.seed_poll(&admin).unwrap();

        let modi = t.ledger.candidate_address(POLL_ID, MODI).unwrap();
        let trump = t.ledger.candidate_address(POLL_ID, TRUMP).unwrap();
        assert_ne!(modi, trump);

        assert_eq!(t.ledger.candidate(POLL_ID, MODI).unwrap().votes, 0);
        assert_eq!(t.ledger.candidate(POLL_ID, TRUMP).unwrap().votes, 0);
        assert_eq!(t.ledger.poll(POLL_ID).unwrap().candidate_count, 2);
    }

    #[test]
    fn test_same_voter_counted_every_time() {
        let t = TestLedger::new();
        let admin = Keypair::generate();
        let voter = Keypair::generate();
        t.seed_poll(&admin).unwrap();

        t.submit(vote(voter.pubkey(), MODI), &[&voter]).unwrap();
        t.submit(vote(voter.pubkey(), MODI), &[&voter]).unwrap();
        assert_eq!(t.ledger.candidate(POLL_ID, MODI).unwrap().votes, 2);

        // A third vote by the same signer is accepted as well.
        t.submit(vote(voter.pubkey(), MODI), &[&voter]).unwrap();
        assert_eq!(t.ledger.candidate(POLL_ID, MODI).unwrap().votes, 3);

        t.submit(vote(voter.pubkey(), TRUMP), &[&voter]).unwrap();
        assert_eq!(t.ledger.candidate(POLL_ID, TRUMP).unwrap().votes, 1);
        assert_eq!(t.ledger.candidate(POLL_ID, MODI).unwrap().votes, 3);

        assert_eq!(t.ledger.stats().votes_cast, 4);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let t = TestLedger::new();
        let admin = Keypair::generate();
        let err = t
            .submit(
                Instruction::InitializePoll {
                    payer: admin.pubkey(),
                    poll_id: 5,
                    voting_start: 10,
                    voting_end: 9,
                    name: "backwards".to_string(),
                    description: String::new(),
                },
                &[&admin],
            )
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidRange { start: 10, end: 9 });
        assert!(t.ledger.snapshot().is_empty());
    }

    #[test]
    fn test_candidate_under_missing_poll_rejected() {
        let t = TestLedger::new();
        let admin = Keypair::generate();
        let err = t
            .submit(
                Instruction::InitializeCandidate {
                    payer: admin.pubkey(),
                    poll_id: 77,
                    name: MODI.to_string(),
                },
                &[&admin],
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound { .. }));
        assert!(t.ledger.snapshot().is_empty());
    }

    #[test]
    fn test_window_boundaries() {
        let t = TestLedger::with_voting_window();
        let admin = Keypair::generate();
        t.seed_poll(&admin).unwrap();

        t.clock.set(POLL_START as i64);
        assert_eq!(
            t.submit(vote(admin.pubkey(), MODI), &[&admin]),
            Err(LedgerError::VotingNotStarted)
        );
        t.clock.set(POLL_END as i64 + 1);
        assert_eq!(
            t.submit(vote(admin.pubkey(), MODI), &[&admin]),
            Err(LedgerError::VotingEnded)
        );
        t.clock.set(POLL_END as i64);
        t.submit(vote(admin.pubkey(), MODI), &[&admin]).unwrap();
        assert_eq!(t.ledger.candidate(POLL_ID, MODI).unwrap().votes, 1);
    }

    #[test]
    fn test_window_not_enforced_by_default() {
        let t = TestLedger::new();
        let admin = Keypair::generate();
        t.seed_poll(&admin).unwrap();

        t.clock.set(POLL_END as i64 + 1_000);
        t.submit(vote(admin.pubkey(), TRUMP), &[&admin]).unwrap();
        assert_eq!(t.ledger.candidate(POLL_ID, TRUMP).unwrap().votes, 1);
    }

    #[test]
    fn test_vote_signed_by_someone_else_rejected() {
        let t = TestLedger::new();
        let admin = Keypair::generate();
        let voter = Keypair::generate();
        t.seed_poll(&admin).unwrap();
        let before = t.ledger.candidate(POLL_ID, MODI).unwrap();

        let err = t
            .submit(vote(voter.pubkey(), MODI), &[&admin])
            .unwrap_err();
        assert!(err.is_authorization_failure());
        assert_eq!(t.ledger.candidate(POLL_ID, MODI).unwrap(), before);
        assert_eq!(t.ledger.stats().rejected_unauthorized, 1);
    }
}
