pub mod csv;
pub mod formatter;
pub mod json;
pub mod table;

pub use self::csv::CsvPrinter;
pub use formatter::{format_duration, should_use_colors, truncate};
pub use json::JsonPrinter;
pub use table::TablePrinter;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::repository::RepoId;
use crate::review::ReviewMetrics;

/// Renders a batch of review metrics for one repository.
pub trait Printer {
    fn render(&self, repo: &RepoId, metrics: &[ReviewMetrics]) -> Result<String>;

    fn print(&self, repo: &RepoId, metrics: &[ReviewMetrics]) -> Result<()> {
        let output = self.render(repo, metrics)?;
        println!("{}", output);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn printer_for(format: OutputFormat) -> Box<dyn Printer> {
    match format {
        OutputFormat::Table => Box::new(TablePrinter::new()),
        OutputFormat::Json => Box::new(JsonPrinter),
        OutputFormat::Csv => Box::new(CsvPrinter),
    }
}
