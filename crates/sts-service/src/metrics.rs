//! Metrics for review scheduling and progress reporting.
//!
//! Installing a recorder/exporter is up to the host application; without
//! one these calls are no-ops.

use metrics::{counter, histogram};
use sts_srs::ReviewQuality;

/// Record a completed review and the interval it produced.
pub fn record_review(quality: ReviewQuality, interval_days: u32) {
    let outcome = if quality.is_lapse() { "lapse" } else { "recalled" };

    counter!(
        "reviews_total",
        "quality" => quality.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!("review_interval_days", "outcome" => outcome).record(f64::from(interval_days));
}

/// Record a rejected review submission.
pub fn record_rejected_review(reason: &'static str) {
    counter!("reviews_rejected_total", "reason" => reason).increment(1);
}

/// Record a progress summary computation over `attempts` records.
pub fn record_summary(attempts: usize) {
    counter!("progress_summaries_total").increment(1);
    histogram!("progress_summary_attempts").record(attempts as f64);
}

/// Record a stored answer.
pub fn record_answer(completed: bool) {
    let status = if completed { "completed" } else { "pending" };
    counter!("answers_recorded_total", "status" => status).increment(1);
}
