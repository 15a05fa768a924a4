use anyhow::Result;

use super::formatter::format_optional_duration;
use super::Printer;
use crate::repository::RepoId;
use crate::review::ReviewMetrics;

const HEADER: &str =
    "PR_Number,Title,Author,Created_At,Time_To_Review,Time_To_Approve,Total_Duration";

/// Comma-separated report with a header row. Missing durations are empty
/// fields.
pub struct CsvPrinter;

/// Quote a field when it contains a delimiter, quote or line break,
/// doubling embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl Printer for CsvPrinter {
    fn render(&self, _repo: &RepoId, metrics: &[ReviewMetrics]) -> Result<String> {
        let mut out = String::from(HEADER);
        out.push('\n');

        for m in metrics {
            let pr = &m.pull_request;
            let fields = [
                pr.number.to_string(),
                escape_field(&pr.title),
                escape_field(&pr.author),
                pr.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                format_optional_duration(m.time_to_review, ""),
                format_optional_duration(m.time_to_approve, ""),
                format_optional_duration(m.total_duration, ""),
            ];
            out.push_str(&fields.join(","));
            out.push('\n');
        }

        Ok(out)
    }
}
