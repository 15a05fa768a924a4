use chrono::{DateTime, Utc};

use super::types::{ReviewState, ReviewSubmission};

/// Why a review submission was or was not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Eligible,
    Unsubmitted,
    Bot,
    BeforeBaseline,
}

/// Classify a review submission against the optional baseline. Rules are
/// checked in order: missing/pending state, bot author, then submitted
/// strictly before the baseline.
pub fn evaluate(review: &ReviewSubmission, baseline: Option<DateTime<Utc>>) -> Verdict {
    match review.state {
        None | Some(ReviewState::Pending) => return Verdict::Unsubmitted,
        Some(_) => {}
    }

    if review.author.is_bot() {
        return Verdict::Bot;
    }

    match baseline {
        Some(baseline) if review.submitted_at < baseline => Verdict::BeforeBaseline,
        _ => Verdict::Eligible,
    }
}

pub fn is_eligible(review: &ReviewSubmission, baseline: Option<DateTime<Utc>>) -> bool {
    evaluate(review, baseline) == Verdict::Eligible
}
