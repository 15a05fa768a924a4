use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::review::{Actor, ActorKind, EventKind, LifecycleEvent, ReviewState, ReviewSubmission};

/// Timeline entry as returned by `GET /repos/{owner}/{repo}/issues/{number}/timeline`.
/// Only the fields needed for review-request detection are decoded.
#[derive(Debug, Deserialize)]
pub struct TimelineItem {
    pub event: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TimelineItem {
    /// Entries without a timestamp (commits, cross-references) carry nothing
    /// to measure and are dropped.
    pub fn into_event(self) -> Option<LifecycleEvent> {
        let at = self.created_at?;
        let kind = match self.event.as_deref() {
            Some("review_requested") => EventKind::ReviewRequested,
            _ => EventKind::Other,
        };
        Some(LifecycleEvent { kind, at })
    }
}

/// Hit from `GET /search/issues`. Issues and pull requests share the
/// endpoint; only pull requests carry a `pull_request` object.
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub number: u64,
    pub pull_request: Option<serde_json::Value>,
}

impl SearchItem {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Review as returned by `GET /repos/{owner}/{repo}/pulls/{number}/reviews`
#[derive(Debug, Deserialize)]
pub struct ReviewItem {
    pub state: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub user: Option<UserItem>,
}

#[derive(Debug, Deserialize)]
pub struct UserItem {
    pub login: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
}

impl ReviewItem {
    /// Returns None for reviews that were never submitted.
    pub fn into_submission(self, bots: &[String]) -> Option<ReviewSubmission> {
        let submitted_at = self.submitted_at?;
        let author = match self.user {
            Some(user) => classify_actor(&user.login, &user.account_type, bots),
            // Deleted accounts come back as null users
            None => Actor {
                login: "ghost".to_string(),
                kind: ActorKind::User,
            },
        };

        Some(ReviewSubmission {
            state: self.state.as_deref().and_then(ReviewState::from_api),
            submitted_at,
            author,
        })
    }
}

/// Decide whether an account is automated: GitHub App accounts report type
/// `Bot` and log in as `name[bot]`; `bots` adds extra logins, matched
/// case-insensitively, for service accounts registered as users.
pub fn classify_actor(login: &str, account_type: &str, bots: &[String]) -> Actor {
    let is_bot = account_type.eq_ignore_ascii_case("bot")
        || login.ends_with("[bot]")
        || bots.iter().any(|b| b.eq_ignore_ascii_case(login));

    Actor {
        login: login.to_string(),
        kind: if is_bot { ActorKind::Bot } else { ActorKind::User },
    }
}
