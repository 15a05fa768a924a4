use chrono::{DateTime, Utc};

use super::filter::is_eligible;
use super::types::{ReviewOutcome, ReviewState, ReviewSubmission};

/// Reduce a pull request's review submissions to the first eligible review
/// and the first eligible approval.
pub fn correlate_reviews(
    reviews: &[ReviewSubmission],
    baseline: Option<DateTime<Utc>>,
) -> ReviewOutcome {
    let mut eligible: Vec<&ReviewSubmission> = reviews
        .iter()
        .filter(|review| is_eligible(review, baseline))
        .collect();

    // Stable: same-instant submissions keep fetch order
    eligible.sort_by_key(|review| review.submitted_at);

    let first_review_at = eligible.first().map(|review| review.submitted_at);
    let first_approval_at = eligible
        .iter()
        .find(|review| review.state == Some(ReviewState::Approved))
        .map(|review| review.submitted_at);

    ReviewOutcome {
        first_review_at,
        first_approval_at,
    }
}
