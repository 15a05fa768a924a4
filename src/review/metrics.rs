use std::sync::Arc;

use super::correlate::correlate_reviews;
use super::types::{PullRequest, ReviewMetrics, ReviewOutcome};

/// Combine a pull request's lifecycle with its review outcome. Durations are
/// measured from the baseline and are not clamped at zero.
pub fn calculate_metrics(pr: Arc<PullRequest>, outcome: ReviewOutcome) -> ReviewMetrics {
    let baseline = pr.baseline();

    let time_to_review = outcome.first_review_at.map(|t| t - baseline);
    let time_to_approve = outcome.first_approval_at.map(|t| t - baseline);
    let total_duration = pr.finished_at().map(|t| t - baseline);

    ReviewMetrics {
        pull_request: pr,
        time_to_review,
        time_to_approve,
        total_duration,
    }
}

impl PullRequest {
    /// Run the full review pipeline over this pull request's own reviews.
    pub fn measure(self: Arc<Self>) -> ReviewMetrics {
        let outcome = correlate_reviews(&self.reviews, self.first_review_request_at);
        calculate_metrics(self, outcome)
    }
}
