//! SRS (Spaced Repetition System) library for the study tracker
//!
//! This crate provides the forgetting-curve scheduler used to plan recurring
//! reviews of memorization items. Everything here is pure: the caller supplies
//! the current state, the rating and the current time, and persists the result.

mod clock;
mod item;
mod quality;

#[cfg(test)]
mod properties;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

pub use clock::{Clock, FixedClock, SystemClock};
pub use item::MemorizationItem;
pub use quality::{InvalidQuality, ReviewQuality};

/// Lower bound of the easiness factor.
pub const MIN_EASINESS: f64 = 1.3;
/// Upper bound of the easiness factor, also the value of a fresh item.
pub const MAX_EASINESS: f64 = 2.5;
/// Easiness of a newly created item.
pub const INITIAL_EASINESS: f64 = MAX_EASINESS;
/// Interval of a newly created item and of any item after a lapse.
pub const INITIAL_INTERVAL_DAYS: u32 = 1;
/// Fixed interval of the first successful review after creation or a lapse.
pub const GRADUATION_INTERVAL_DAYS: u32 = 6;

/// Rating at which the easiness factor would grow by its full step.
const REFERENCE_QUALITY: f64 = 3.0;

/// Result of scheduling one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReview {
    /// Days until the next review
    pub interval_days: u32,
    /// Updated easiness factor
    pub easiness: f64,
    /// Start of the UTC day on which the item becomes due again
    pub next_review_at: DateTime<Utc>,
}

/// Compute the next scheduling state of an item.
///
/// # Arguments
///
/// * `current_interval_days` - Current interval of the item (>= 1)
/// * `current_easiness` - Current easiness factor (within `MIN_EASINESS..=MAX_EASINESS`)
/// * `quality` - Rating of the review that just happened
/// * `now` - When the review happened
///
/// # Algorithm
///
/// The easiness factor moves by
/// `0.1 - (3 - q) * (0.08 + (3 - q) * 0.02)` and is clamped to
/// `[1.3, 2.5]` on every update:
///
/// * Forgot: -0.32
/// * Hard: -0.14
/// * Good: unchanged
/// * Easy: +0.1
///
/// The new interval is then:
///
/// * Forgot or Hard (lapse): 1 day
/// * First success at interval 1 (graduation): 6 days
/// * Otherwise: `round(current_interval_days * new_easiness)`
///
/// The due date is the start of the UTC day that lies `interval` days after `now`.
pub fn schedule_next_review(
    current_interval_days: u32,
    current_easiness: f64,
    quality: ReviewQuality,
    now: DateTime<Utc>,
) -> ScheduledReview {
    let easiness = next_easiness(current_easiness, quality);

    let interval_days = if quality.is_lapse() {
        INITIAL_INTERVAL_DAYS
    } else if current_interval_days <= INITIAL_INTERVAL_DAYS {
        GRADUATION_INTERVAL_DAYS
    } else {
        // `as` saturates, large intervals cap at u32::MAX
        ((f64::from(current_interval_days) * easiness).round() as u32).max(INITIAL_INTERVAL_DAYS)
    };

    ScheduledReview {
        interval_days,
        easiness,
        next_review_at: due_date(now, interval_days),
    }
}

/// Apply the easiness update for one rating, clamped to the allowed range.
pub fn next_easiness(current_easiness: f64, quality: ReviewQuality) -> f64 {
    let distance = REFERENCE_QUALITY - f64::from(quality.value());
    let delta = 0.1 - distance * (0.08 + distance * 0.02);

    (current_easiness + delta).clamp(MIN_EASINESS, MAX_EASINESS)
}

/// Start of the UTC day `interval_days` after `now`.
fn due_date(now: DateTime<Utc>, interval_days: u32) -> DateTime<Utc> {
    now.date_naive()
        .checked_add_days(Days::new(u64::from(interval_days)))
        .unwrap_or(NaiveDate::MAX)
        .and_time(NaiveTime::MIN)
        .and_utc()
}
