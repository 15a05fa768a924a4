use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use octocrab::models::IssueState;
use octocrab::{Octocrab, Page};
use tokio_retry::Retry;
use tracing::{debug, warn};

use super::search::{describe_api_error, retry_strategy};
use super::types::{ReviewItem, TimelineItem};
use crate::repository::RepoId;
use crate::review::{
    first_review_request, evaluate, LifecycleEvent, PullRequest, PullRequestState,
    ReviewSubmission, Verdict,
};

const PER_PAGE: [(&str, &str); 1] = [("per_page", "100")];

/// Fetch a pull request's detail record and convert its lifecycle fields.
/// Reviews and the first review request are filled in by the caller.
async fn fetch_pull_request(
    client: &Octocrab,
    repo: &RepoId,
    number: u64,
) -> Result<PullRequest> {
    let pr = Retry::spawn(retry_strategy(), move || async move {
        client
            .pulls(repo.owner.as_str(), repo.name.as_str())
            .get(number)
            .await
            .map_err(describe_api_error)
    })
    .await?;

    let created_at = pr
        .created_at
        .with_context(|| format!("{}#{} has no creation time", repo, number))?;

    let state = match pr.state {
        Some(IssueState::Open) => PullRequestState::Open,
        Some(_) => PullRequestState::Closed,
        None if pr.closed_at.is_some() => PullRequestState::Closed,
        None => PullRequestState::Open,
    };

    Ok(PullRequest {
        id: pr.id.0,
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        author: pr.user.map(|u| u.login).unwrap_or_default(),
        state,
        created_at,
        merged_at: pr.merged_at,
        closed_at: pr.closed_at,
        first_review_request_at: None,
        reviews: Vec::new(),
    })
}

/// Fetch every page of a pull request's timeline.
async fn fetch_timeline(
    client: &Octocrab,
    repo: &RepoId,
    number: u64,
) -> Result<Vec<LifecycleEvent>> {
    let route = format!("/repos/{}/{}/issues/{}/timeline", repo.owner, repo.name, number);
    let first: Page<TimelineItem> = client
        .get(route, Some(&PER_PAGE[..]))
        .await
        .map_err(describe_api_error)?;
    let items = client.all_pages(first).await.map_err(describe_api_error)?;

    Ok(items.into_iter().filter_map(TimelineItem::into_event).collect())
}

/// Resolve the first review request, degrading to None when the timeline
/// cannot be read.
async fn resolve_first_review_request(
    client: &Octocrab,
    repo: &RepoId,
    number: u64,
) -> Option<DateTime<Utc>> {
    let events = match fetch_timeline(client, repo, number).await {
        Ok(events) => events,
        Err(e) => {
            warn!(repo = %repo, number, error = %e, "Failed to get review request time");
            return None;
        }
    };

    let first = first_review_request(&events);
    match first {
        Some(at) => debug!(
            repo = %repo,
            number,
            review_requested_at = %at,
            "Found first review request time"
        ),
        None => debug!(
            repo = %repo,
            number,
            total_events = events.len(),
            "No review request events found"
        ),
    }
    first
}

async fn fetch_reviews(
    client: &Octocrab,
    repo: &RepoId,
    number: u64,
    bots: &[String],
) -> Result<Vec<ReviewSubmission>> {
    let route = format!("/repos/{}/{}/pulls/{}/reviews", repo.owner, repo.name, number);
    let first: Page<ReviewItem> = client
        .get(route, Some(&PER_PAGE[..]))
        .await
        .map_err(describe_api_error)?;
    let items = client.all_pages(first).await.map_err(describe_api_error)?;

    Ok(items
        .into_iter()
        .filter_map(|item| item.into_submission(bots))
        .collect())
}

/// Log each review the correlator will discard, with the reason.
fn trace_skipped_reviews(
    repo: &RepoId,
    number: u64,
    reviews: &[ReviewSubmission],
    baseline: Option<DateTime<Utc>>,
) {
    for review in reviews {
        match evaluate(review, baseline) {
            Verdict::Eligible | Verdict::Unsubmitted => {}
            Verdict::Bot => debug!(
                repo = %repo,
                number,
                user = %review.author.login,
                "Skipping review from bot account"
            ),
            Verdict::BeforeBaseline => debug!(
                repo = %repo,
                number,
                review_time = %review.submitted_at,
                request_time = ?baseline,
                "Skipping review before review request"
            ),
        }
    }
}

/// Build a fully enriched pull request: detail record, first review request
/// and review submissions. Detail and review failures are fatal; timeline
/// failures are not.
pub async fn enrich_pull_request(
    client: &Octocrab,
    repo: &RepoId,
    number: u64,
    bots: &[String],
) -> Result<PullRequest> {
    let mut pr = fetch_pull_request(client, repo, number)
        .await
        .with_context(|| format!("Failed to fetch PR details for {}#{}", repo, number))?;

    pr.first_review_request_at = resolve_first_review_request(client, repo, number).await;

    let reviews = fetch_reviews(client, repo, number, bots)
        .await
        .with_context(|| format!("Failed to fetch reviews for {}#{}", repo, number))?;
    trace_skipped_reviews(repo, number, &reviews, pr.first_review_request_at);
    debug!(repo = %repo, number, review_count = reviews.len(), "Fetched reviews");
    pr.reviews = reviews;

    Ok(pr)
}
