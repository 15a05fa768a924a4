use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::repository::StateFilter;

/// Optional settings file. Every field may be omitted; command-line flags
/// take precedence over values set here.
///
/// Example YAML:
/// ```yaml
/// state: closed
/// format: table
/// per_page: 100
/// concurrency: 8
/// bots:
///   - ci-robot
///   - release-train
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub state: Option<StateFilter>,

    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Search page size (1-100)
    #[serde(default)]
    pub per_page: Option<u8>,

    /// Pull requests enriched in parallel
    #[serde(default)]
    pub concurrency: Option<usize>,

    /// Logins to treat as automated accounts in addition to GitHub Apps
    #[serde(default)]
    pub bots: Vec<String>,
}
