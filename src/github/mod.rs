pub mod client;
pub mod enrich;
pub mod search;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use client::{create_client, GitHubRepository, DEFAULT_CONCURRENCY};
pub use enrich::enrich_pull_request;
pub use search::{build_search_query, search_pull_request_numbers};
