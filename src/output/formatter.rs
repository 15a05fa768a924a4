use chrono::Duration;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

/// Format a duration for reports: "2d 3h", "5h 12m" or "42m".
/// Negative durations keep their sign.
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::zero() {
        return format!("-{}", format_duration(-duration));
    }

    let days = duration.num_days();
    let hours = duration.num_hours() % 24;
    let minutes = duration.num_minutes() % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", duration.num_minutes())
    }
}

pub fn format_optional_duration(duration: Option<Duration>, missing: &str) -> String {
    duration
        .map(format_duration)
        .unwrap_or_else(|| missing.to_string())
}

/// Truncate to `max_width` characters, accounting for Unicode
pub fn truncate(s: &str, max_width: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
pub fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}
