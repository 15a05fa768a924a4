use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRequestState {
    Open,
    Closed,
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PullRequestState::Open => write!(f, "open"),
            PullRequestState::Closed => write!(f, "closed"),
        }
    }
}

/// A pull request with its lifecycle timestamps and raw review submissions,
/// as delivered by a repository collaborator.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub author: String,
    pub state: PullRequestState,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub first_review_request_at: Option<DateTime<Utc>>,
    pub reviews: Vec<ReviewSubmission>,
}

impl PullRequest {
    /// Reference instant for every duration: the first review request,
    /// falling back to creation time.
    pub fn baseline(&self) -> DateTime<Utc> {
        self.first_review_request_at.unwrap_or(self.created_at)
    }

    /// Merge time if merged, otherwise close time if closed.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.merged_at.or(self.closed_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    Other(String),
}

impl ReviewState {
    /// Parse a state as the REST API spells it. An empty string means the
    /// review carries no state at all.
    pub fn from_api(s: &str) -> Option<Self> {
        let state = match s.trim().to_ascii_uppercase().as_str() {
            "" => return None,
            "APPROVED" => ReviewState::Approved,
            "CHANGES_REQUESTED" => ReviewState::ChangesRequested,
            "COMMENTED" => ReviewState::Commented,
            "DISMISSED" => ReviewState::Dismissed,
            "PENDING" => ReviewState::Pending,
            other => ReviewState::Other(other.to_string()),
        };
        Some(state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub login: String,
    pub kind: ActorKind,
}

impl Actor {
    pub fn is_bot(&self) -> bool {
        self.kind == ActorKind::Bot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub state: Option<ReviewState>,
    pub submitted_at: DateTime<Utc>,
    pub author: Actor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ReviewRequested,
    Other,
}

/// One entry of a pull request's event history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub kind: EventKind,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub first_review_at: Option<DateTime<Utc>>,
    pub first_approval_at: Option<DateTime<Utc>>,
}

/// Latency figures for one pull request. Durations are signed: inconsistent
/// upstream data can put a terminal timestamp before the baseline.
#[derive(Debug, Clone)]
pub struct ReviewMetrics {
    pub pull_request: Arc<PullRequest>,
    pub time_to_review: Option<Duration>,
    pub time_to_approve: Option<Duration>,
    pub total_duration: Option<Duration>,
}
