//! Human-readable repository age formatting
//!
//! Converts a repository creation date into a bucketed age label for display:
//! `"N year(s) ago"`, `"N month(s) ago"`, `"N day(s) ago"`, `"Today"`, or
//! `"Unknown"` when the date is absent. Whole-unit truncation, largest unit
//! first. The reference date is a parameter so callers and tests control the
//! clock.

use chrono::{Datelike, NaiveDate};

/// Format the age of `created` relative to `today`.
pub fn recency_label(created: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(created) = created else {
        return "Unknown".to_string();
    };

    if created >= today {
        return "Today".to_string();
    }

    let years = whole_years_between(created, today);
    if years > 0 {
        return pluralize(years, "year");
    }

    let months = whole_months_between(created, today);
    if months > 0 {
        return pluralize(months, "month");
    }

    let days = (today - created).num_days();
    if days > 0 {
        pluralize(days, "day")
    } else {
        "Today".to_string()
    }
}

fn pluralize(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Completed calendar years from `from` to `to` (`from` < `to`).
fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut years = i64::from(to.year() - from.year());
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years.max(0)
}

/// Completed calendar months from `from` to `to` (`from` < `to`).
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = i64::from(to.year() - from.year()) * 12
        + i64::from(to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0)
}
