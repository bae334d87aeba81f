//! Timeline positions and projection

mod common;

use common::{at, date, task};
use cleartask::ReferenceFrame;
use cleartask::planner::{Granularity, TaskId, position, timeline};

#[test]
fn test_june_month_view() {
    let tasks = vec![
        task(1, "End of month", Some(at(2024, 6, 30, 18, 0))),
        task(2, "First", Some(at(2024, 6, 1, 0, 0))),
        task(3, "Next month", Some(at(2024, 7, 1, 0, 0))),
        task(4, "Undated", None),
    ];
    let view = timeline(
        &tasks,
        date(2024, 6, 10),
        Granularity::Month,
        &ReferenceFrame::utc(),
    );

    let ids: Vec<TaskId> = view.entries.iter().map(|e| e.task.id).collect();
    assert_eq!(ids, vec![TaskId(2), TaskId(1)]);

    assert_eq!(view.entries[0].percent, 0.0);
    assert_eq!(view.entries[0].label, "1 Jun");
    assert_eq!(view.entries[1].percent, 100.0);
    assert_eq!(view.entries[1].label, "30 Jun");

    assert_eq!(view.ticks.len(), 30);
    assert_eq!(view.ticks.first().unwrap().percent, 0.0);
    assert_eq!(view.ticks.last().unwrap().percent, 100.0);
}

#[test]
fn test_mid_month_position() {
    let placed = position(
        Some(date(2024, 6, 15).and_hms_opt(0, 0, 0).unwrap()),
        Granularity::Month,
    );
    assert!((placed.percent - 48.275).abs() < 0.01);
}

#[test]
fn test_day_position_is_monotonic() {
    let day = date(2024, 6, 10);
    let mut previous = -1.0;
    for minute in (0..24 * 60).step_by(17) {
        let t = day.and_hms_opt(minute / 60, minute % 60, 0).unwrap();
        let placed = position(Some(t), Granularity::Day);
        assert!(placed.percent >= previous);
        assert!((0.0..100.0).contains(&placed.percent));
        previous = placed.percent;
    }

    let midnight = position(Some(day.and_hms_opt(0, 0, 0).unwrap()), Granularity::Day);
    assert_eq!(midnight.percent, 0.0);
    let late = position(Some(day.and_hms_opt(23, 59, 0).unwrap()), Granularity::Day);
    assert!(late.percent > 99.9);
}

#[test]
fn test_day_view_filters_to_reference_day() {
    let tasks = vec![
        task(1, "Lunch", Some(at(2024, 6, 10, 12, 0))),
        task(2, "Tomorrow", Some(at(2024, 6, 11, 9, 0))),
        task(3, "Breakfast", Some(at(2024, 6, 10, 7, 30))),
    ];
    let view = timeline(
        &tasks,
        date(2024, 6, 10),
        Granularity::Day,
        &ReferenceFrame::utc(),
    );

    let labels: Vec<&str> = view.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["07:30", "12:00"]);
    assert_eq!(view.entries[1].percent, 50.0);
    assert_eq!(view.ticks.len(), 25);
}

#[test]
fn test_year_view_spans_the_calendar_year() {
    let tasks = vec![
        task(1, "New year", Some(at(2024, 1, 1, 0, 0))),
        task(2, "Mid year", Some(at(2024, 7, 1, 0, 0))),
        task(3, "Last year", Some(at(2023, 12, 31, 0, 0))),
    ];
    let view = timeline(
        &tasks,
        date(2024, 6, 10),
        Granularity::Year,
        &ReferenceFrame::utc(),
    );

    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].percent, 0.0);
    assert_eq!(view.entries[0].label, "Jan 1");
    assert!((view.entries[1].percent - 50.0).abs() < 1e-9);
    assert_eq!(view.ticks.len(), 13);
}

#[test]
fn test_frame_decides_the_window() {
    // 2024-06-30 20:00 UTC is 2024-07-01 in Tokyo.
    let tasks = vec![task(1, "Boundary", Some(at(2024, 6, 30, 20, 0)))];
    let tokyo: ReferenceFrame = "+09:00".parse().unwrap();

    let utc_view = timeline(
        &tasks,
        date(2024, 6, 10),
        Granularity::Month,
        &ReferenceFrame::utc(),
    );
    assert_eq!(utc_view.entries.len(), 1);

    let tokyo_view = timeline(&tasks, date(2024, 6, 10), Granularity::Month, &tokyo);
    assert!(tokyo_view.entries.is_empty());
}

#[test]
fn test_equal_due_dates_keep_source_order() {
    let due = Some(at(2024, 6, 10, 9, 0));
    let tasks = vec![task(7, "B", due), task(3, "A", due)];
    let view = timeline(
        &tasks,
        date(2024, 6, 10),
        Granularity::Day,
        &ReferenceFrame::utc(),
    );
    let ids: Vec<TaskId> = view.entries.iter().map(|e| e.task.id).collect();
    assert_eq!(ids, vec![TaskId(7), TaskId(3)]);
}
