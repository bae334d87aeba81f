//! Temporal classification of tasks into kanban buckets

use super::frame::ReferenceFrame;
use super::task::Task;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the "this week" window after today, inclusive
pub const THIS_WEEK_DAYS: u64 = 7;

/// Time bucket a task falls into relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Overdue,
    Today,
    ThisWeek,
    Later,
}

impl Bucket {
    /// Buckets in board column order
    pub const ALL: [Bucket; 4] = [Bucket::Overdue, Bucket::Today, Bucket::ThisWeek, Bucket::Later];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Overdue => "overdue",
            Bucket::Today => "today",
            Bucket::ThisWeek => "thisWeek",
            Bucket::Later => "later",
        }
    }

    /// Column heading shown on the board
    pub fn title(&self) -> &'static str {
        match self {
            Bucket::Overdue => "Overdue",
            Bucket::Today => "Today",
            Bucket::ThisWeek => "This Week",
            Bucket::Later => "Later",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a calendar due date against today's calendar date
pub fn classify_date(due: Option<NaiveDate>, today: NaiveDate) -> Bucket {
    let Some(due) = due else {
        return Bucket::Later;
    };

    if due < today {
        return Bucket::Overdue;
    }
    if due == today {
        return Bucket::Today;
    }
    // An unrepresentable window end lies beyond every valid date.
    let within_week = today
        .checked_add_days(Days::new(THIS_WEEK_DAYS))
        .is_none_or(|week_end| due <= week_end);
    if within_week {
        Bucket::ThisWeek
    } else {
        Bucket::Later
    }
}

/// Classify `task` relative to `now`, truncating both to dates in `frame`
pub fn classify(task: &Task, now: DateTime<Utc>, frame: &ReferenceFrame) -> Bucket {
    classify_date(task.due_date.map(|due| frame.date(due)), frame.date(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::task::{ListId, Priority, TaskId, UserId};
    use chrono::TimeZone;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_due(due: Option<DateTime<Utc>>) -> Task {
        Task {
            id: TaskId(1),
            title: "Task".to_string(),
            description: String::new(),
            due_date: due,
            priority: Priority::None,
            is_completed: false,
            owner_id: UserId::from("alice"),
            list_id: ListId::from("alice"),
        }
    }

    #[rstest]
    #[case::yesterday(date(2024, 6, 9), Bucket::Overdue)]
    #[case::last_year(date(2023, 12, 31), Bucket::Overdue)]
    #[case::same_day(date(2024, 6, 10), Bucket::Today)]
    #[case::tomorrow(date(2024, 6, 11), Bucket::ThisWeek)]
    #[case::seven_days(date(2024, 6, 17), Bucket::ThisWeek)]
    #[case::eight_days(date(2024, 6, 18), Bucket::Later)]
    #[case::next_month(date(2024, 7, 1), Bucket::Later)]
    fn test_classify_date_boundaries(#[case] due: NaiveDate, #[case] expected: Bucket) {
        assert_eq!(classify_date(Some(due), date(2024, 6, 10)), expected);
    }

    #[test]
    fn test_undated_is_later() {
        assert_eq!(classify_date(None, date(2024, 6, 10)), Bucket::Later);
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 23, 59, 0).unwrap();
        let early = task_due(Some(Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap()));
        let late = task_due(Some(Utc.with_ymd_and_hms(2024, 6, 17, 23, 59, 59).unwrap()));
        let frame = ReferenceFrame::utc();

        assert_eq!(classify(&early, now, &frame), Bucket::Today);
        assert_eq!(classify(&late, now, &frame), Bucket::ThisWeek);
    }

    #[test]
    fn test_frame_moves_the_day_boundary() {
        // 23:00 UTC on the 9th is already the 10th in UTC+02:00
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let task = task_due(Some(Utc.with_ymd_and_hms(2024, 6, 9, 23, 0, 0).unwrap()));

        assert_eq!(classify(&task, now, &ReferenceFrame::utc()), Bucket::Overdue);
        let plus_two: ReferenceFrame = "+02:00".parse().unwrap();
        assert_eq!(classify(&task, now, &plus_two), Bucket::Today);
    }

    #[test]
    fn test_window_end_near_date_max() {
        assert_eq!(classify_date(Some(NaiveDate::MAX), NaiveDate::MAX), Bucket::Today);
        let almost_max = NaiveDate::MAX.pred_opt().unwrap();
        assert_eq!(
            classify_date(Some(NaiveDate::MAX), almost_max),
            Bucket::ThisWeek
        );
    }
}
