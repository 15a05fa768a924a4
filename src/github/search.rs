use anyhow::{anyhow, Result};
use octocrab::{Octocrab, Page};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, info};

use super::types::SearchItem;
use crate::repository::{ListOptions, RepoId, StateFilter};

/// Exponential backoff shared by the search and detail requests: 3 attempts,
/// starting at 100ms and capped at 5s.
pub(crate) fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .take(3)
}

/// Rewrite well-known API failures into actionable messages. Anything else
/// keeps the octocrab error as its cause.
pub(crate) fn describe_api_error(e: octocrab::Error) -> anyhow::Error {
    let error_str = format!("{:?}", e);
    if error_str.contains("do not have permission")
        || error_str.contains("resources do not exist")
        || error_str.contains("Not Found")
    {
        anyhow!(
            "Repository not found or no access. \
             Check repo name and token permissions (needs 'repo' scope for private repos)."
        )
    } else if error_str.contains("401") || error_str.contains("Bad credentials") {
        anyhow!("Authentication failed. Your GitHub token may be invalid or expired.")
    } else if error_str.contains("rate limit") || error_str.contains("403") {
        anyhow!("GitHub API rate limit exceeded. Wait a few minutes and try again.")
    } else {
        anyhow::Error::new(e).context("GitHub API error")
    }
}

/// Build the issue-search query selecting a repository's pull requests by
/// state and creation-date window.
pub fn build_search_query(repo: &RepoId, opts: &ListOptions) -> String {
    let mut query = format!("repo:{} is:pr", repo);

    match opts.state {
        StateFilter::Open => query.push_str(" is:open"),
        StateFilter::Closed => query.push_str(" is:closed"),
        StateFilter::All => {}
    }

    const DATE: &str = "%Y-%m-%d";
    match (opts.since, opts.until) {
        (Some(since), Some(until)) => {
            query.push_str(&format!(" created:{}..{}", since.format(DATE), until.format(DATE)))
        }
        (Some(since), None) => query.push_str(&format!(" created:>={}", since.format(DATE))),
        (None, Some(until)) => query.push_str(&format!(" created:<={}", until.format(DATE))),
        (None, None) => {}
    }

    query
}

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    sort: &'a str,
    order: &'a str,
    per_page: u8,
    page: u32,
}

/// Run the search and follow every result page, returning pull request
/// numbers in the order GitHub ranked them.
pub async fn search_pull_request_numbers(
    client: &Octocrab,
    repo: &RepoId,
    opts: &ListOptions,
) -> Result<Vec<u64>> {
    let query = build_search_query(repo, opts);
    info!(
        repo = %repo,
        query = %query,
        per_page = opts.per_page,
        since = ?opts.since,
        until = ?opts.until,
        "Searching pull requests"
    );

    let params = SearchParams {
        q: &query,
        sort: &opts.sort,
        order: &opts.direction,
        per_page: opts.per_page,
        page: 1,
    };
    let params = &params;
    let first: Page<SearchItem> = Retry::spawn(retry_strategy(), move || async move {
        client
            .get::<Page<SearchItem>, _, _>("/search/issues", Some(params))
            .await
            .map_err(describe_api_error)
    })
    .await?;

    info!(
        repo = %repo,
        count = first.items.len(),
        total_count = first.total_count.unwrap_or(0),
        "Fetched first search page"
    );

    let mut numbers: Vec<u64> = Vec::new();
    let mut page = first;
    let mut page_no = 1;
    loop {
        numbers.extend(
            page.items
                .iter()
                .filter(|item| item.is_pull_request()) // Only PRs, not issues
                .map(|item| item.number),
        );

        let next = client
            .get_page::<SearchItem>(&page.next)
            .await
            .map_err(describe_api_error)?;
        match next {
            Some(next) => {
                page_no += 1;
                debug!(
                    repo = %repo,
                    page = page_no,
                    count = next.items.len(),
                    "Fetched search page"
                );
                page = next;
            }
            None => break,
        }
    }

    // Pages can shift while being walked; keep the first occurrence only
    let mut seen = HashSet::new();
    numbers.retain(|n| seen.insert(*n));

    info!(repo = %repo, total = numbers.len(), "Fetched all pull requests");
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo() -> RepoId {
        RepoId::new("owner", "repo")
    }

    #[test]
    fn test_query_closed_no_window() {
        let opts = ListOptions::default();
        assert_eq!(build_search_query(&repo(), &opts), "repo:owner/repo is:pr is:closed");
    }

    #[test]
    fn test_query_open() {
        let opts = ListOptions {
            state: StateFilter::Open,
            ..ListOptions::default()
        };
        assert_eq!(build_search_query(&repo(), &opts), "repo:owner/repo is:pr is:open");
    }

    #[test]
    fn test_query_all_states() {
        let opts = ListOptions {
            state: StateFilter::All,
            ..ListOptions::default()
        };
        assert_eq!(build_search_query(&repo(), &opts), "repo:owner/repo is:pr");
    }

    #[test]
    fn test_query_since_only() {
        let opts = ListOptions {
            since: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            ..ListOptions::default()
        };
        assert_eq!(
            build_search_query(&repo(), &opts),
            "repo:owner/repo is:pr is:closed created:>=2024-03-01"
        );
    }

    #[test]
    fn test_query_until_only() {
        let opts = ListOptions {
            until: Some(Utc.with_ymd_and_hms(2024, 3, 31, 23, 0, 0).unwrap()),
            ..ListOptions::default()
        };
        assert_eq!(
            build_search_query(&repo(), &opts),
            "repo:owner/repo is:pr is:closed created:<=2024-03-31"
        );
    }

    #[test]
    fn test_query_range() {
        let opts = ListOptions {
            state: StateFilter::All,
            since: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            until: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            ..ListOptions::default()
        };
        assert_eq!(
            build_search_query(&repo(), &opts),
            "repo:owner/repo is:pr created:2024-01-01..2024-02-01"
        );
    }

    #[test]
    fn test_retry_strategy_is_bounded() {
        let delays: Vec<Duration> = retry_strategy().collect();
        assert_eq!(delays.len(), 3);
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(5)));
    }
}
