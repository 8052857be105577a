use chrono::{Datelike, Utc};

/// `YYYY-MM` caption for a zero-based month.
pub fn format_month_label(year: i32, month0: u32) -> String {
    format!("{:04}-{:02}", year, month0 + 1)
}

/// Current UTC year, used as the last year band of the calendar.
pub fn current_year() -> i32 {
    Utc::now().year()
}
