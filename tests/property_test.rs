//! Property-based tests for the wait-queue invariants.

use proptest::prelude::*;
use shiftd::core::state::{AddOutcome, QueueEntry, WaitQueue};
use std::collections::HashSet;

proptest! {
    /// For any sequence of `add` calls, the queue holds at most one entry
    /// per username, in first-call order. Fixed-length names keep the
    /// prefix-match duplicate check equivalent to an exact match.
    #[test]
    fn at_most_one_entry_per_username(names in proptest::collection::vec("[a-z]{4}", 1..64)) {
        let mut queue = WaitQueue::default();
        let mut first_seen = Vec::new();
        let mut seen = HashSet::new();

        for name in &names {
            let outcome = queue.add(name);
            if seen.insert(name.clone()) {
                prop_assert_eq!(outcome, AddOutcome::Added);
                first_seen.push(name.clone());
            } else {
                prop_assert_eq!(outcome, AddOutcome::AlreadyQueued);
            }
        }

        let rendered = queue.render();
        prop_assert_eq!(rendered.len(), first_seen.len());
        for (line, name) in rendered.iter().zip(&first_seen) {
            prop_assert!(line.starts_with(name.as_str()));
        }
    }

    /// `del` succeeds exactly when the index is within the current queue
    /// length, and only then shrinks the queue.
    #[test]
    fn del_succeeds_iff_index_in_range(len in 0usize..16, pos in 0usize..32) {
        let mut queue = WaitQueue::default();
        for i in 0..len {
            queue.add(&format!("user{i:02}"));
        }

        let removed = queue.remove_at(pos);
        prop_assert_eq!(removed, pos < len);
        prop_assert_eq!(queue.len(), if removed { len - 1 } else { len });
    }

    /// Display strings survive a parse round trip for any username and
    /// non-negative timestamp, including usernames containing dashes.
    #[test]
    fn entry_display_round_trips(username in "[a-z-]{1,12}", enqueued_at in 0i64..4_000_000_000) {
        let entry = QueueEntry { username, enqueued_at };
        prop_assert_eq!(QueueEntry::parse(&entry.display()), entry);
    }
}
