//! Property-based tests for the review scheduler.
//!
//! These check the invariants every scheduled state must satisfy regardless
//! of the (valid) input it was computed from:
//!
//! - The easiness factor never leaves `[1.3, 2.5]`
//! - The interval is never below one day
//! - Lapses, graduation and growth follow their interval rules
//! - The due date lies exactly `interval` days after the review day

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use crate::{
    GRADUATION_INTERVAL_DAYS, MAX_EASINESS, MIN_EASINESS, ReviewQuality, next_easiness,
    schedule_next_review,
};

fn quality() -> impl Strategy<Value = ReviewQuality> {
    prop::sample::select(ReviewQuality::ALL.to_vec())
}

fn easiness() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(MIN_EASINESS),
        Just(MAX_EASINESS),
        MIN_EASINESS..=MAX_EASINESS,
    ]
}

fn interval() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1u32), 1u32..=36_500]
}

fn review_time() -> impl Strategy<Value = DateTime<Utc>> {
    // 2020-01-01 plus up to ~10 years, at second granularity
    (0i64..315_360_000).prop_map(|offset| {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    /// Easiness stays in range for any valid input.
    #[test]
    fn easiness_stays_in_range(
        interval in interval(),
        easiness in easiness(),
        quality in quality(),
        now in review_time(),
    ) {
        let scheduled = schedule_next_review(interval, easiness, quality, now);
        prop_assert!(scheduled.easiness >= MIN_EASINESS);
        prop_assert!(scheduled.easiness <= MAX_EASINESS);
        prop_assert!(scheduled.interval_days >= 1);
    }

    /// Any number of chained reviews keeps the invariants.
    #[test]
    fn chained_reviews_keep_invariants(
        qualities in prop::collection::vec(quality(), 1..40),
        now in review_time(),
    ) {
        let mut interval = 1u32;
        let mut easiness = MAX_EASINESS;

        for quality in qualities {
            let scheduled = schedule_next_review(interval, easiness, quality, now);
            prop_assert!((MIN_EASINESS..=MAX_EASINESS).contains(&scheduled.easiness));
            prop_assert!(scheduled.interval_days >= 1);
            interval = scheduled.interval_days;
            easiness = scheduled.easiness;
        }
    }

    /// A lapse always resets the interval to one day.
    #[test]
    fn lapse_resets_interval(
        interval in interval(),
        easiness in easiness(),
        lapse in prop::sample::select(vec![ReviewQuality::Forgot, ReviewQuality::Hard]),
        now in review_time(),
    ) {
        let scheduled = schedule_next_review(interval, easiness, lapse, now);
        prop_assert_eq!(scheduled.interval_days, 1);
    }

    /// The first success after a reset graduates to the fixed step.
    #[test]
    fn success_from_one_day_graduates(
        easiness in easiness(),
        success in prop::sample::select(vec![ReviewQuality::Good, ReviewQuality::Easy]),
        now in review_time(),
    ) {
        let scheduled = schedule_next_review(1, easiness, success, now);
        prop_assert_eq!(scheduled.interval_days, GRADUATION_INTERVAL_DAYS);
    }

    /// Later successes compound by the updated easiness.
    #[test]
    fn success_compounds_by_new_easiness(
        interval in 2u32..=36_500,
        easiness in easiness(),
        success in prop::sample::select(vec![ReviewQuality::Good, ReviewQuality::Easy]),
        now in review_time(),
    ) {
        let scheduled = schedule_next_review(interval, easiness, success, now);
        let expected = (f64::from(interval) * next_easiness(easiness, success)).round() as u32;
        prop_assert_eq!(scheduled.interval_days, expected);
        prop_assert!(scheduled.interval_days > interval);
    }

    /// The due date is midnight UTC, `interval` days after the review day.
    #[test]
    fn due_date_matches_interval(
        interval in interval(),
        easiness in easiness(),
        quality in quality(),
        now in review_time(),
    ) {
        let scheduled = schedule_next_review(interval, easiness, quality, now);
        let review_day = now.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();

        prop_assert_eq!(
            scheduled.next_review_at - review_day,
            Duration::days(i64::from(scheduled.interval_days))
        );
        prop_assert!(scheduled.next_review_at > now);
    }
}
