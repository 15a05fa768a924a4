use anyhow::{bail, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};

use pr_review_time::review::{
    first_review_request, Actor, ActorKind, EventKind, LifecycleEvent, PullRequestState,
    ReviewState, ReviewSubmission,
};
use pr_review_time::{
    ListOptions, MeasureOptions, PullRequest, PullRequestRepository, RepoId, ReviewTimeUseCase,
};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn submission(
    state: ReviewState,
    submitted_at: DateTime<Utc>,
    kind: ActorKind,
) -> ReviewSubmission {
    ReviewSubmission {
        state: Some(state),
        submitted_at,
        author: Actor {
            login: match kind {
                ActorKind::Bot => "lint-bot[bot]".to_string(),
                ActorKind::User => "alice".to_string(),
            },
            kind,
        },
    }
}

/// Created Jan 1, review requested Jan 2, commented Jan 3, approved Jan 4,
/// merged Jan 5.
fn scenario_pr(number: u64, comment_kind: ActorKind) -> PullRequest {
    let timeline = vec![
        LifecycleEvent {
            kind: EventKind::Other,
            at: at(1, 0),
        },
        LifecycleEvent {
            kind: EventKind::ReviewRequested,
            at: at(2, 0),
        },
    ];

    PullRequest {
        id: number,
        number,
        title: format!("Scenario {}", number),
        author: "octocat".to_string(),
        state: PullRequestState::Closed,
        created_at: at(1, 0),
        merged_at: Some(at(5, 0)),
        closed_at: Some(at(5, 0)),
        first_review_request_at: first_review_request(&timeline),
        reviews: vec![
            submission(ReviewState::Commented, at(3, 0), comment_kind),
            submission(ReviewState::Approved, at(4, 0), ActorKind::User),
        ],
    }
}

struct InMemoryRepository {
    prs: Vec<PullRequest>,
}

impl PullRequestRepository for InMemoryRepository {
    async fn list(&self, _repo: &RepoId, _opts: &ListOptions) -> Result<Vec<PullRequest>> {
        Ok(self.prs.clone())
    }

    async fn get(&self, repo: &RepoId, number: u64) -> Result<PullRequest> {
        match self.prs.iter().find(|pr| pr.number == number) {
            Some(pr) => Ok(pr.clone()),
            None => bail!("{}#{} not found", repo, number),
        }
    }
}

fn options() -> MeasureOptions {
    MeasureOptions::new(RepoId::new("owner", "repo"))
}

#[tokio::test]
async fn test_full_review_timeline() {
    let usecase = ReviewTimeUseCase::new(InMemoryRepository {
        prs: vec![scenario_pr(1, ActorKind::User)],
    });

    let metrics = usecase.execute(&options()).await.unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].time_to_review, Some(Duration::hours(24)));
    assert_eq!(metrics[0].time_to_approve, Some(Duration::hours(48)));
    assert_eq!(metrics[0].total_duration, Some(Duration::hours(72)));
}

#[tokio::test]
async fn test_bot_comment_does_not_count_as_review() {
    let usecase = ReviewTimeUseCase::new(InMemoryRepository {
        prs: vec![scenario_pr(1, ActorKind::Bot)],
    });

    let metrics = usecase.execute(&options()).await.unwrap();
    assert_eq!(metrics[0].time_to_review, Some(Duration::hours(48)));
    assert_eq!(metrics[0].time_to_approve, Some(Duration::hours(48)));
}

#[tokio::test]
async fn test_review_before_request_is_excluded() {
    let mut pr = scenario_pr(1, ActorKind::User);
    pr.reviews = vec![
        submission(ReviewState::Approved, at(1, 12), ActorKind::User),
        submission(ReviewState::Commented, at(3, 0), ActorKind::User),
    ];
    let usecase = ReviewTimeUseCase::new(InMemoryRepository { prs: vec![pr] });

    let metrics = usecase.execute(&options()).await.unwrap();
    assert_eq!(metrics[0].time_to_review, Some(Duration::hours(24)));
    assert_eq!(metrics[0].time_to_approve, None);
}

#[tokio::test]
async fn test_open_pr_without_reviews() {
    let mut pr = scenario_pr(1, ActorKind::User);
    pr.state = PullRequestState::Open;
    pr.merged_at = None;
    pr.closed_at = None;
    pr.reviews.clear();
    let usecase = ReviewTimeUseCase::new(InMemoryRepository { prs: vec![pr] });

    let metrics = usecase.execute(&options()).await.unwrap();
    assert_eq!(metrics[0].time_to_review, None);
    assert_eq!(metrics[0].time_to_approve, None);
    assert_eq!(metrics[0].total_duration, None);
}

#[tokio::test]
async fn test_missing_review_request_falls_back_to_creation() {
    let mut pr = scenario_pr(1, ActorKind::User);
    pr.first_review_request_at = None;
    let usecase = ReviewTimeUseCase::new(InMemoryRepository { prs: vec![pr] });

    let metrics = usecase.execute(&options()).await.unwrap();
    assert_eq!(metrics[0].time_to_review, Some(Duration::hours(48)));
    assert_eq!(metrics[0].time_to_approve, Some(Duration::hours(72)));
    assert_eq!(metrics[0].total_duration, Some(Duration::hours(96)));
}

#[tokio::test]
async fn test_single_pull_request() {
    let usecase = ReviewTimeUseCase::new(InMemoryRepository {
        prs: vec![scenario_pr(1, ActorKind::User), scenario_pr(2, ActorKind::Bot)],
    });
    let repo = RepoId::new("owner", "repo");

    let metrics = usecase.execute_one(&repo, 2).await.unwrap();
    assert_eq!(metrics.pull_request.number, 2);
    assert_eq!(metrics.time_to_review, Some(Duration::hours(48)));

    let err = usecase.execute_one(&repo, 3).await.unwrap_err();
    assert!(format!("{:#}", err).contains("owner/repo#3 not found"));
}
