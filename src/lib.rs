pub mod config;
pub mod credentials;
pub mod github;
pub mod measure;
pub mod output;
pub mod repository;
pub mod review;
pub mod window;

pub use measure::{MeasureOptions, ReviewTimeUseCase};
pub use repository::{ListOptions, PullRequestRepository, RepoId, StateFilter};
pub use review::{PullRequest, ReviewMetrics};
