use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::repository::{ListOptions, PullRequestRepository, RepoId, StateFilter};
use crate::review::ReviewMetrics;

/// What to measure: one repository, a lifecycle state and an optional
/// creation-date window.
#[derive(Debug, Clone)]
pub struct MeasureOptions {
    pub repo: RepoId,
    pub state: StateFilter,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub per_page: u8,
}

impl MeasureOptions {
    pub fn new(repo: RepoId) -> Self {
        Self {
            repo,
            state: StateFilter::Closed,
            since: None,
            until: None,
            per_page: 100,
        }
    }

    fn list_options(&self) -> ListOptions {
        ListOptions {
            state: self.state,
            since: self.since,
            until: self.until,
            per_page: self.per_page,
            ..ListOptions::default()
        }
    }
}

/// Fetches pull requests through a repository and turns each one into
/// review metrics, keeping the repository's ordering.
pub struct ReviewTimeUseCase<R> {
    repo: R,
}

impl<R: PullRequestRepository> ReviewTimeUseCase<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, opts: &MeasureOptions) -> Result<Vec<ReviewMetrics>> {
        let prs = self
            .repo
            .list(&opts.repo, &opts.list_options())
            .await
            .context("failed to list pull requests")?;

        Ok(prs.into_iter().map(|pr| Arc::new(pr).measure()).collect())
    }

    pub async fn execute_one(&self, repo: &RepoId, number: u64) -> Result<ReviewMetrics> {
        let pr = self
            .repo
            .get(repo, number)
            .await
            .with_context(|| format!("failed to fetch pull request {}#{}", repo, number))?;

        Ok(Arc::new(pr).measure())
    }
}
