use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use octocrab::Octocrab;
use tracing::{info, info_span, Instrument, Span};

use super::enrich::enrich_pull_request;
use super::search::search_pull_request_numbers;
use crate::repository::{ListOptions, PullRequestRepository, RepoId};
use crate::review::PullRequest;

/// Default number of pull requests enriched at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Create an authenticated GitHub client using a personal access token
pub fn create_client(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .context("Failed to create GitHub client")
}

/// Pull request repository backed by the GitHub REST API.
///
/// Every request runs inside `span`, so callers decide where the adapter's
/// log lines go and what fields they carry.
#[derive(Clone)]
pub struct GitHubRepository {
    client: Octocrab,
    bots: Vec<String>,
    concurrency: usize,
    span: Span,
}

impl GitHubRepository {
    pub fn new(client: Octocrab) -> Self {
        Self {
            client,
            bots: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
            span: info_span!("github_client"),
        }
    }

    /// Extra logins to treat as automated accounts
    pub fn with_bots(mut self, bots: Vec<String>) -> Self {
        self.bots = bots;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl GitHubRepository {
    async fn list_enriched(&self, repo: &RepoId, opts: &ListOptions) -> Result<Vec<PullRequest>> {
        let numbers = search_pull_request_numbers(&self.client, repo, opts).await?;
        let total = numbers.len();

        // `buffered` keeps search order while enriching concurrently
        stream::iter(numbers.into_iter().enumerate())
            .map(|(i, number)| {
                info!(
                    progress = %format!("{}/{}", i + 1, total),
                    number,
                    "Processing pull request"
                );
                enrich_pull_request(&self.client, repo, number, &self.bots)
            })
            .buffered(self.concurrency)
            .try_collect::<Vec<PullRequest>>()
            .await
    }

    async fn get_enriched(&self, repo: &RepoId, number: u64) -> Result<PullRequest> {
        info!(repo = %repo, number, "Fetching single pull request");
        let pr = enrich_pull_request(&self.client, repo, number, &self.bots).await?;
        info!(repo = %repo, number, "Successfully fetched pull request");
        Ok(pr)
    }
}

impl PullRequestRepository for GitHubRepository {
    async fn list(&self, repo: &RepoId, opts: &ListOptions) -> Result<Vec<PullRequest>> {
        self.list_enriched(repo, opts)
            .instrument(self.span.clone())
            .await
    }

    async fn get(&self, repo: &RepoId, number: u64) -> Result<PullRequest> {
        self.get_enriched(repo, number)
            .instrument(self.span.clone())
            .await
    }
}
