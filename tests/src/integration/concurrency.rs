//! # Concurrency
//!
//! Many threads against one service. Writes to the same address must be
//! serialized; creates on the same address must have exactly one winner.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use record_ledger::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const THREADS: usize = 8;

    #[test]
    fn test_concurrent_poll_creation_has_one_winner() {
        let t = TestLedger::new();
        let admins: Vec<Keypair> = (0..THREADS).map(|_| Keypair::generate()).collect();
        let wins = AtomicUsize::new(0);
        let duplicates = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for admin in &admins {
                let t = &t;
                let wins = &wins;
                let duplicates = &duplicates;
                scope.spawn(move || {
                    match t.submit(initialize_poll(admin.pubkey(), 42), &[admin]) {
                        Ok(_) => wins.fetch_add(1, Ordering::SeqCst),
                        Err(LedgerError::DuplicateAccount { .. }) => {
                            duplicates.fetch_add(1, Ordering::SeqCst)
                        }
                        Err(other) => panic!("unexpected error: {other}"),
                    };
                });
            }
        });

        assert_eq!(wins.load(Ordering::SeqCst), 1);
        assert_eq!(duplicates.load(Ordering::SeqCst), THREADS - 1);
        assert_eq!(t.ledger.snapshot().len(), 1);
    }

    #[test]
    fn test_concurrent_votes_are_all_counted() {
        const VOTES_PER_THREAD: u64 = 50;

        let t = TestLedger::new();
        let admin = Keypair::generate();
        t.seed_poll(&admin).unwrap();
        let voters: Vec<Keypair> = (0..THREADS).map(|_| Keypair::generate()).collect();

        std::thread::scope(|scope| {
            for voter in &voters {
                let t = &t;
                scope.spawn(move || {
                    for _ in 0..VOTES_PER_THREAD {
                        t.submit(vote(voter.pubkey(), MODI), &[voter]).unwrap();
                    }
                });
            }
        });

        let expected = THREADS as u64 * VOTES_PER_THREAD;
        assert_eq!(t.ledger.candidate(POLL_ID, MODI).unwrap().votes, expected);
        assert_eq!(t.ledger.candidate(POLL_ID, TRUMP).unwrap().votes, 0);
        assert_eq!(t.ledger.stats().votes_cast, expected);
        // Seed transactions plus every vote, one slot each.
        assert_eq!(t.ledger.current_slot(), 3 + expected);
    }

    #[test]
    fn test_concurrent_candidate_registration_counts_each_once() {
        let t = TestLedger::new();
        let admin = Keypair::generate();
        t.submit(initialize_poll(admin.pubkey(), POLL_ID), &[&admin])
            .unwrap();

        std::thread::scope(|scope| {
            for i in 0..THREADS {
                let t = &t;
                let admin = &admin;
                scope.spawn(move || {
                    // Two threads race for each name.
                    let name = format!("candidate-{}", i / 2);
                    let _ = t.submit(
                        Instruction::InitializeCandidate {
                            payer: admin.pubkey(),
                            poll_id: POLL_ID,
                            name,
                        },
                        &[admin],
                    );
                });
            }
        });

        let poll = t.ledger.poll(POLL_ID).unwrap();
        assert_eq!(poll.candidate_count, (THREADS / 2) as u64);
        assert_eq!(t.ledger.snapshot().len(), 1 + THREADS / 2);
    }

    #[test]
    fn test_disjoint_owners_write_in_parallel() {
        let t = TestLedger::new();
        let owners: Vec<Keypair> = (0..THREADS).map(|_| Keypair::generate()).collect();

        std::thread::scope(|scope| {
            for (i, owner) in owners.iter().enumerate() {
                let t = &t;
                scope.spawn(move || {
                    for round in 0..20u64 {
                        t.submit(
                            set_favorites(owner.pubkey(), i as u64 * 100 + round, "blue", &[]),
                            &[owner],
                        )
                        .unwrap();
                    }
                });
            }
        });

        assert_eq!(t.ledger.snapshot().len(), THREADS);
        for (i, owner) in owners.iter().enumerate() {
            assert_eq!(
                t.ledger.favorites(&owner.pubkey()).unwrap().number,
                i as u64 * 100 + 19
            );
        }
    }
}
