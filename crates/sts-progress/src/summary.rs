use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    attempt::{AttemptOutcome, GradedAttempt, GroupKey},
    duration::format_duration,
};

/// Aggregated progress over a set of attempts. Always recomputed, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressSummary {
    /// Number of attempts
    pub total: usize,
    /// Attempts that have been answered
    pub completed: usize,
    /// Attempts still pending
    pub not_completed: usize,
    /// Answered correctly
    pub correct: usize,
    /// Answered incorrectly (pending attempts excluded)
    pub incorrect: usize,
    /// `correct / completed` in percent, two decimals
    pub accuracy_percent: f64,
    /// `completed / total` in percent, two decimals
    pub completion_percent: f64,
    /// Every attempt has been answered (false for an empty set)
    pub is_complete: bool,
    /// Per-group breakdown, largest group first
    pub groups: Vec<GroupBreakdown>,
    /// Response time aggregates over completed, timed attempts
    pub timing: TimingStats,
    /// Most recent answer time
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// Progress of a single group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBreakdown {
    /// Group label
    pub key: GroupKey,
    /// Number of attempts in the group
    pub total: usize,
    /// Answered attempts in the group
    pub completed: usize,
    /// Answered correctly
    pub correct: usize,
    /// Answered incorrectly
    pub incorrect: usize,
    /// `correct / completed` in percent, two decimals
    pub accuracy_percent: f64,
    /// Mean response time in whole seconds, 0 when nothing was timed
    pub average_response_seconds: u64,
}

/// Response time aggregates, all zero when no completed attempt was timed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimingStats {
    /// Number of completed attempts with a response time
    pub samples: usize,
    /// Sum of response times
    pub total_seconds: u64,
    /// Mean response time, rounded to the nearest second
    pub average_seconds: u64,
    /// Fastest response
    pub min_seconds: u64,
    /// Slowest response
    pub max_seconds: u64,
}

impl TimingStats {
    /// Total time as `"1h 2m 5s"` text.
    pub fn formatted_total(&self) -> String {
        format_duration(self.total_seconds)
    }

    /// Mean time as `"1h 2m 5s"` text.
    pub fn formatted_average(&self) -> String {
        format_duration(self.average_seconds)
    }
}

#[derive(Default)]
struct Tally {
    total: usize,
    completed: usize,
    correct: usize,
    incorrect: usize,
    timed: usize,
    timed_sum: u64,
}

impl Tally {
    fn add(&mut self, attempt: &GradedAttempt) {
        self.total += 1;

        let AttemptOutcome::Completed { is_correct, .. } = attempt.outcome else {
            return;
        };

        self.completed += 1;
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }

        if let Some(seconds) = attempt.response_time_seconds {
            self.timed += 1;
            self.timed_sum += u64::from(seconds);
        }
    }
}

/// Reduce a set of attempts to a [`ProgressSummary`].
///
/// The result does not depend on the order of `attempts`. Ratios over an
/// empty denominator are reported as `0`.
pub fn summarize_progress(attempts: &[GradedAttempt]) -> ProgressSummary {
    let mut overall = Tally::default();
    let mut by_group: BTreeMap<&GroupKey, Tally> = BTreeMap::new();
    let mut min_seconds: Option<u64> = None;
    let mut max_seconds: Option<u64> = None;
    let mut last_activity_at: Option<DateTime<Utc>> = None;

    for attempt in attempts {
        overall.add(attempt);
        by_group.entry(&attempt.group).or_default().add(attempt);

        if let AttemptOutcome::Completed { answered_at, .. } = attempt.outcome {
            last_activity_at = last_activity_at.max(Some(answered_at));

            if let Some(seconds) = attempt.response_time_seconds.map(u64::from) {
                min_seconds = Some(min_seconds.map_or(seconds, |min| min.min(seconds)));
                max_seconds = Some(max_seconds.map_or(seconds, |max| max.max(seconds)));
            }
        }
    }

    // BTreeMap iteration is key-ordered, so the stable sort breaks ties by key
    let mut groups: Vec<GroupBreakdown> = by_group
        .into_iter()
        .map(|(key, tally)| GroupBreakdown {
            key: key.clone(),
            total: tally.total,
            completed: tally.completed,
            correct: tally.correct,
            incorrect: tally.incorrect,
            accuracy_percent: percent(tally.correct, tally.completed),
            average_response_seconds: rounded_mean(tally.timed_sum, tally.timed),
        })
        .collect();
    groups.sort_by(|a, b| b.total.cmp(&a.total));

    ProgressSummary {
        total: overall.total,
        completed: overall.completed,
        not_completed: overall.total - overall.completed,
        correct: overall.correct,
        incorrect: overall.incorrect,
        accuracy_percent: percent(overall.correct, overall.completed),
        completion_percent: percent(overall.completed, overall.total),
        is_complete: overall.total > 0 && overall.completed == overall.total,
        groups,
        timing: TimingStats {
            samples: overall.timed,
            total_seconds: overall.timed_sum,
            average_seconds: rounded_mean(overall.timed_sum, overall.timed),
            min_seconds: min_seconds.unwrap_or(0),
            max_seconds: max_seconds.unwrap_or(0),
        },
        last_activity_at,
    }
}

/// `part / whole * 100` rounded to two decimals, 0 when `whole` is 0.
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let ratio = part as f64 / whole as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

fn rounded_mean(sum: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u64
}
