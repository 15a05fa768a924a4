use anyhow::Result;
use owo_colors::OwoColorize;

use super::formatter::{format_optional_duration, get_terminal_width, should_use_colors, truncate};
use super::Printer;
use crate::repository::RepoId;
use crate::review::ReviewMetrics;

const HEADERS: [&str; 7] = [
    "PR #",
    "Author",
    "Created",
    "Time to Review",
    "Time to Approve",
    "Total",
    "Title",
];
const SEPARATOR: &str = "  ";
const MAX_AUTHOR: usize = 20;
const MAX_TITLE: usize = 60;

/// Aligned, human-readable report. Colors are applied only when writing to
/// a terminal.
pub struct TablePrinter {
    use_colors: bool,
    term_width: Option<usize>,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self {
            use_colors: should_use_colors(),
            term_width: get_terminal_width(),
        }
    }

    pub fn plain() -> Self {
        Self {
            use_colors: false,
            term_width: None,
        }
    }

    fn rows(&self, metrics: &[ReviewMetrics]) -> Vec<[String; 7]> {
        metrics
            .iter()
            .map(|m| {
                let pr = &m.pull_request;
                [
                    pr.number.to_string(),
                    truncate(&pr.author, MAX_AUTHOR),
                    pr.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    format_optional_duration(m.time_to_review, "N/A"),
                    format_optional_duration(m.time_to_approve, "N/A"),
                    format_optional_duration(m.total_duration, "N/A"),
                    pr.title.clone(),
                ]
            })
            .collect()
    }
}

impl Default for TablePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer for TablePrinter {
    fn render(&self, repo: &RepoId, metrics: &[ReviewMetrics]) -> Result<String> {
        if metrics.is_empty() {
            return Ok("No pull requests found".to_string());
        }

        let mut rows = self.rows(metrics);

        // Width of every column except the trailing title
        let mut widths: Vec<usize> = HEADERS[..6].iter().map(|h| h.len()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let fixed_width: usize = widths.iter().sum::<usize>() + SEPARATOR.len() * widths.len();
        let title_width = match self.term_width {
            Some(w) if w > fixed_width + 20 => (w - fixed_width).min(MAX_TITLE),
            Some(_) => 20,
            None => MAX_TITLE,
        };
        for row in &mut rows {
            row[6] = truncate(&row[6], title_width);
        }

        let pad = |cells: &[String]| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(w) => format!("{:<width$}", cell, width = *w),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(SEPARATOR)
        };

        let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        let rule: Vec<String> = HEADERS.iter().map(|h| "-".repeat(h.len())).collect();

        let title = format!("=== PR Review Time Report for {} ===", repo);
        let mut lines = vec![String::new()];
        if self.use_colors {
            lines.push(title.bold().to_string());
            lines.push(String::new());
            lines.push(pad(&header[..]).bold().to_string());
        } else {
            lines.push(title);
            lines.push(String::new());
            lines.push(pad(&header[..]));
        }
        lines.push(pad(&rule[..]));

        for row in &rows {
            lines.push(pad(&row[..]).trim_end().to_string());
        }
        lines.push(String::new());

        Ok(lines.join("\n"))
    }
}
