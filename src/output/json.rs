use anyhow::{Context, Result};
use chrono::Duration;
use serde::Serialize;

use super::formatter::format_duration;
use super::Printer;
use crate::repository::RepoId;
use crate::review::ReviewMetrics;

#[derive(Debug, Serialize)]
struct Report<'a> {
    repository: String,
    pull_requests: Vec<PullRequestEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct PullRequestEntry<'a> {
    number: u64,
    title: &'a str,
    author: &'a str,
    state: String,
    created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_to_review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_to_review_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_to_approve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_to_approve_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_duration_seconds: Option<i64>,
}

impl<'a> From<&'a ReviewMetrics> for PullRequestEntry<'a> {
    fn from(m: &'a ReviewMetrics) -> Self {
        let pr = &m.pull_request;
        let seconds = |d: Option<Duration>| d.map(|d| d.num_seconds());
        Self {
            number: pr.number,
            title: &pr.title,
            author: &pr.author,
            state: pr.state.to_string(),
            created_at: pr.created_at.to_rfc3339(),
            time_to_review: m.time_to_review.map(format_duration),
            time_to_review_seconds: seconds(m.time_to_review),
            time_to_approve: m.time_to_approve.map(format_duration),
            time_to_approve_seconds: seconds(m.time_to_approve),
            total_duration: m.total_duration.map(format_duration),
            total_duration_seconds: seconds(m.total_duration),
        }
    }
}

/// Pretty-printed JSON document keyed by repository.
pub struct JsonPrinter;

impl Printer for JsonPrinter {
    fn render(&self, repo: &RepoId, metrics: &[ReviewMetrics]) -> Result<String> {
        let report = Report {
            repository: repo.to_string(),
            pull_requests: metrics.iter().map(PullRequestEntry::from).collect(),
        };
        serde_json::to_string_pretty(&report).context("Failed to encode JSON report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{PullRequest, PullRequestState};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    #[test]
    fn test_empty_report() {
        let out = JsonPrinter.render(&RepoId::new("owner", "repo"), &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["repository"], "owner/repo");
        assert_eq!(value["pull_requests"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_report_fields() {
        let metrics = ReviewMetrics {
            pull_request: Arc::new(PullRequest {
                id: 99,
                number: 5,
                title: "Speed up indexer".to_string(),
                author: "octocat".to_string(),
                state: PullRequestState::Closed,
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                merged_at: None,
                closed_at: None,
                first_review_request_at: None,
                reviews: vec![],
            }),
            time_to_review: Some(Duration::hours(24)),
            time_to_approve: None,
            total_duration: Some(Duration::hours(-2)),
        };

        let out = JsonPrinter
            .render(&RepoId::new("owner", "repo"), &[metrics])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let entry = &value["pull_requests"][0];

        assert_eq!(entry["number"], 5);
        assert_eq!(entry["title"], "Speed up indexer");
        assert_eq!(entry["state"], "closed");
        assert_eq!(entry["created_at"], "2024-01-01T00:00:00+00:00");
        assert_eq!(entry["time_to_review"], "1d 0h");
        assert_eq!(entry["time_to_review_seconds"], 86400);
        assert!(entry.get("time_to_approve").is_none());
        assert!(entry.get("time_to_approve_seconds").is_none());
        assert_eq!(entry["total_duration"], "-2h 0m");
        assert_eq!(entry["total_duration_seconds"], -7200);
    }
}
