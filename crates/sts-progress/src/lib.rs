//! Progress aggregation for the study tracker
//!
//! Reduces the answer history of a collection into the counts, ratios,
//! per-group breakdowns and timing figures shown on dashboards and
//! answer-key views. The reduction is pure and order-independent.

mod attempt;
mod duration;
mod summary;

#[cfg(test)]
mod properties;

pub use attempt::{AttemptOutcome, GradedAttempt, GroupKey};
pub use duration::format_duration;
pub use summary::{GroupBreakdown, ProgressSummary, TimingStats, summarize_progress};
