use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::review::PullRequest;

/// An "owner/repo" pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepoId::new(owner, name))
            }
            _ => Err(anyhow!("Invalid repository '{}', expected OWNER/REPO", s)),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    Open,
    #[default]
    Closed,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub state: StateFilter,
    pub sort: String,
    pub direction: String,
    /// Inclusive lower bound on creation time
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time
    pub until: Option<DateTime<Utc>>,
    pub per_page: u8,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            state: StateFilter::default(),
            sort: "created".to_string(),
            direction: "desc".to_string(),
            since: None,
            until: None,
            per_page: 100,
        }
    }
}

/// Source of enriched pull requests: lifecycle timestamps, resolved first
/// review request and raw review submissions already attached.
#[allow(async_fn_in_trait)]
pub trait PullRequestRepository {
    async fn list(&self, repo: &RepoId, opts: &ListOptions) -> Result<Vec<PullRequest>>;

    async fn get(&self, repo: &RepoId, number: u64) -> Result<PullRequest>;
}
