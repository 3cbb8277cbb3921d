//! Property-based tests for progress aggregation.
//!
//! The summary is a pure function of the attempt multiset: reordering the
//! input must not change a single bit of the output, and the counters must
//! stay consistent with each other.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use uuid::Uuid;

use crate::{GradedAttempt, GroupKey, summarize_progress};

fn group() -> impl Strategy<Value = GroupKey> {
    prop_oneof![
        Just(GroupKey::Ungrouped),
        prop::sample::select(vec!["A", "B", "C", "Chemistry"]).prop_map(GroupKey::from),
    ]
}

fn attempt() -> impl Strategy<Value = GradedAttempt> {
    (
        group(),
        prop::option::of((any::<bool>(), 0i64..100_000)),
        prop::option::of(0u32..7_200),
    )
        .prop_map(|(group, outcome, seconds)| {
            let attempt = match outcome {
                Some((is_correct, offset)) => GradedAttempt::completed(
                    Uuid::from_u128(offset as u128),
                    group,
                    is_correct,
                    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                        + Duration::seconds(offset),
                ),
                None => GradedAttempt::pending(Uuid::nil(), group),
            };
            match seconds {
                Some(seconds) => attempt.with_response_time(seconds),
                None => attempt,
            }
        })
}

proptest! {
    /// Shuffling the input leaves every field unchanged.
    #[test]
    fn summary_is_order_independent(
        attempts in prop::collection::vec(attempt(), 0..60),
        seed in any::<u64>(),
    ) {
        let mut shuffled = attempts.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

        let original = summarize_progress(&attempts);
        let reordered = summarize_progress(&shuffled);

        prop_assert_eq!(original.accuracy_percent.to_bits(), reordered.accuracy_percent.to_bits());
        prop_assert_eq!(original.completion_percent.to_bits(), reordered.completion_percent.to_bits());
        prop_assert_eq!(original, reordered);
    }

    /// Counters add up and ratios stay within bounds.
    #[test]
    fn counters_are_consistent(attempts in prop::collection::vec(attempt(), 0..60)) {
        let summary = summarize_progress(&attempts);

        prop_assert_eq!(summary.total, attempts.len());
        prop_assert_eq!(summary.completed + summary.not_completed, summary.total);
        prop_assert_eq!(summary.correct + summary.incorrect, summary.completed);
        prop_assert!((0.0..=100.0).contains(&summary.accuracy_percent));
        prop_assert!((0.0..=100.0).contains(&summary.completion_percent));
        prop_assert_eq!(
            summary.groups.iter().map(|g| g.total).sum::<usize>(),
            summary.total
        );
        prop_assert!(summary.groups.windows(2).all(|pair| pair[0].total >= pair[1].total));
        prop_assert!(summary.timing.min_seconds <= summary.timing.average_seconds);
        prop_assert!(summary.timing.average_seconds <= summary.timing.max_seconds);
    }
}
