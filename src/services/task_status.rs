//! Task tallies and per-task due-date enrichment.
//!
//! Pure functions: the caller supplies "today", nothing here reads the clock.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::task::{TaskRecord, TaskStatus};

pub const NO_DATE: &str = "No date";
pub const INVALID_DATE: &str = "Invalid date";

const DISPLAY_FORMAT: &str = "%b %d, %Y";

/// Bucketed task counts. `total == completed + pending + other` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskTally {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    /// Statuses outside the known taxonomy.
    pub other: i64,
    pub overdue: i64,
}

impl TaskTally {
    fn record(&mut self, status: Option<TaskStatus>) {
        self.total += 1;
        match status {
            Some(TaskStatus::Completed) => self.completed += 1,
            Some(s) if s.is_pending() => self.pending += 1,
            _ => self.other += 1,
        }
    }
}

/// Tally `tasks` and fill in `due_date_formatted` / `is_overdue` on each one.
pub fn summarize(tasks: &mut [TaskRecord], today: NaiveDate) -> TaskTally {
    let mut tally = TaskTally::default();
    for task in tasks.iter_mut() {
        let status = task.parsed_status();
        tally.record(status);

        let (formatted, overdue) = due_date_view(task.due_date.as_deref(), status, today);
        task.due_date_formatted = formatted;
        task.is_overdue = overdue;
        if overdue {
            tally.overdue += 1;
        }
    }
    tally
}

/// Display text and overdue flag for one task.
pub fn due_date_view(
    raw: Option<&str>,
    status: Option<TaskStatus>,
    today: NaiveDate,
) -> (String, bool) {
    let raw = match raw.map(str::trim) {
        None | Some("") => return (NO_DATE.to_string(), false),
        Some(raw) => raw,
    };
    match parse_due_date(raw) {
        Some(due) => {
            let overdue = due < today && status != Some(TaskStatus::Completed);
            (due.format(DISPLAY_FORMAT).to_string(), overdue)
        }
        None => {
            tracing::debug!(due_date = raw, "Unparsable task due date");
            (INVALID_DATE.to_string(), false)
        }
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339 timestamps.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn buckets_and_other_statuses() {
        let mut tasks = vec![
            TaskRecord::new(1, "Design", "Not Started", "High", None),
            TaskRecord::new(2, "Build", "In Progress", "High", None),
            TaskRecord::new(3, "QA", "Testing", "Medium", None),
            TaskRecord::new(4, "Ship", "Completed", "Low", None),
            TaskRecord::new(5, "Wait", "Blocked", "Low", None),
        ];
        let tally = summarize(&mut tasks, today());
        assert_eq!(tally.total, 5);
        assert_eq!(tally.completed, 1);
        assert_eq!(tally.pending, 3);
        assert_eq!(tally.other, 1);
        assert_eq!(tally.total, tally.completed + tally.pending + tally.other);
    }

    #[test]
    fn yesterday_in_progress_is_overdue_but_completed_is_not() {
        let mut tasks = vec![
            TaskRecord::new(1, "Late", "InProgress", "High", Some("2026-03-09")),
            TaskRecord::new(2, "Done", "Completed", "High", Some("2026-03-09")),
        ];
        let tally = summarize(&mut tasks, today());
        assert!(tasks[0].is_overdue);
        assert!(!tasks[1].is_overdue);
        assert_eq!(tally.overdue, 1);
        assert_eq!(tasks[0].due_date_formatted, "Mar 09, 2026");
    }

    #[test]
    fn due_today_is_not_overdue() {
        let mut tasks = vec![TaskRecord::new(1, "Today", "In Progress", "High", Some("2026-03-10"))];
        summarize(&mut tasks, today());
        assert!(!tasks[0].is_overdue);
    }

    #[test]
    fn unknown_status_can_still_be_overdue() {
        let mut tasks = vec![TaskRecord::new(1, "Stuck", "Blocked", "High", Some("2026-01-01"))];
        let tally = summarize(&mut tasks, today());
        assert!(tasks[0].is_overdue);
        assert_eq!(tally.other, 1);
    }

    #[test]
    fn missing_and_invalid_dates_use_sentinels() {
        let mut tasks = vec![
            TaskRecord::new(1, "No date", "In Progress", "Low", None),
            TaskRecord::new(2, "Blank", "In Progress", "Low", Some("   ")),
            TaskRecord::new(3, "Garbage", "In Progress", "Low", Some("next tuesday")),
        ];
        let tally = summarize(&mut tasks, today());
        assert_eq!(tasks[0].due_date_formatted, NO_DATE);
        assert_eq!(tasks[1].due_date_formatted, NO_DATE);
        assert_eq!(tasks[2].due_date_formatted, INVALID_DATE);
        assert!(tasks.iter().all(|t| !t.is_overdue));
        assert_eq!(tally.overdue, 0);
    }

    #[test]
    fn parses_timestamp_shapes() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 23);
        assert_eq!(parse_due_date("2026-02-23"), expected);
        assert_eq!(parse_due_date("2026-02-23 17:45:00"), expected);
        assert_eq!(parse_due_date("2026-02-23T08:00:00+00:00"), expected);
        assert_eq!(parse_due_date("23/02/2026"), None);
    }

    #[test]
    fn unknown_statuses_land_in_other() {
        let mut tasks = vec![
            TaskRecord::new(1, "Ship", "Completed", "High", None),
            TaskRecord::new(2, "Plan", "not_started", "Low", None),
            TaskRecord::new(3, "QA", "Testing", "Medium", None),
            TaskRecord::new(4, "Drop", "Cancelled", "Low", None),
        ];
        let tally = summarize(&mut tasks, today());
        assert_eq!(tally.total, 4);
        assert_eq!(tally.completed, 1);
        assert_eq!(tally.pending, 2);
        assert_eq!(tally.other, 1);
        assert_eq!(tally.total, tally.completed + tally.pending + tally.other);
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(summarize(&mut [], today()), TaskTally::default());
    }
}
