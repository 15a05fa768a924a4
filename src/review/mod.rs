pub mod correlate;
pub mod filter;
pub mod metrics;
pub mod timeline;
pub mod types;

pub use correlate::correlate_reviews;
pub use filter::{evaluate, is_eligible, Verdict};
pub use metrics::calculate_metrics;
pub use timeline::first_review_request;
pub use types::{
    Actor, ActorKind, EventKind, LifecycleEvent, PullRequest, PullRequestState, ReviewMetrics,
    ReviewOutcome, ReviewState, ReviewSubmission,
};
