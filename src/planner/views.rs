//! Read-only projections over a task snapshot
//!
//! Every projection is pure: it borrows the snapshot, clones what it returns,
//! and gives identical output for identical input. An empty snapshot yields
//! empty views.

use super::bucket::{Bucket, classify};
use super::frame::ReferenceFrame;
use super::task::{ListId, Task, UserId};
use super::timeline::{Granularity, Tick, position, timeline_labels};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One kanban column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanColumn {
    pub bucket: Bucket,
    pub title: String,
    pub count: usize,
    pub tasks: Vec<Task>,
}

/// Tasks partitioned into the four time buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanBoard {
    /// Calendar date the buckets were computed against
    pub reference_date: NaiveDate,
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    pub fn column(&self, bucket: Bucket) -> &KanbanColumn {
        // Columns are always built from Bucket::ALL, in that order.
        &self.columns[bucket as usize]
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.column(bucket).count
    }
}

/// A task placed on the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub task: Task,
    pub percent: f64,
    pub label: String,
}

/// Tasks inside one timeline window, sorted by due date, plus the axis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub granularity: Granularity,
    pub reference_date: NaiveDate,
    pub entries: Vec<TimelineEntry>,
    pub ticks: Vec<Tick>,
}

/// Task list view split by completion
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskListView {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

/// Partition `tasks` into kanban columns relative to `now`
pub fn kanban(tasks: &[Task], now: DateTime<Utc>, frame: &ReferenceFrame) -> KanbanBoard {
    let mut columns: Vec<KanbanColumn> = Bucket::ALL
        .iter()
        .map(|bucket| KanbanColumn {
            bucket: *bucket,
            title: bucket.title().to_string(),
            count: 0,
            tasks: Vec::new(),
        })
        .collect();

    for task in tasks {
        let column = &mut columns[classify(task, now, frame) as usize];
        column.tasks.push(task.clone());
        column.count += 1;
    }

    KanbanBoard {
        reference_date: frame.date(now),
        columns,
    }
}

/// Dated tasks inside the `granularity` window at `reference`, placed on the axis
pub fn timeline(
    tasks: &[Task],
    reference: NaiveDate,
    granularity: Granularity,
    frame: &ReferenceFrame,
) -> Timeline {
    let mut dated: Vec<(DateTime<Utc>, &Task)> = tasks
        .iter()
        .filter_map(|task| task.due_date.map(|due| (due, task)))
        .filter(|(due, _)| granularity.contains(frame.date(*due), reference))
        .collect();

    // Stable: equal due dates keep their source order.
    dated.sort_by_key(|(due, _)| *due);

    let entries = dated
        .into_iter()
        .map(|(due, task)| {
            let placed = position(Some(frame.local(due)), granularity);
            TimelineEntry {
                task: task.clone(),
                percent: placed.percent,
                label: placed.label,
            }
        })
        .collect();

    Timeline {
        granularity,
        reference_date: reference,
        entries,
        ticks: timeline_labels(granularity, reference),
    }
}

/// Tasks belonging to exactly `owner` and `list`
pub fn tasks_in_list(tasks: &[Task], owner: &UserId, list: &ListId) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| &task.owner_id == owner && &task.list_id == list)
        .cloned()
        .collect()
}

/// Tasks due on calendar `date` in `frame`
pub fn due_on(tasks: &[Task], date: NaiveDate, frame: &ReferenceFrame) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.due_date.is_some_and(|due| frame.date(due) == date))
        .cloned()
        .collect()
}

/// Split `tasks` into pending and completed, keeping source order
pub fn split_by_completion(tasks: &[Task]) -> TaskListView {
    let (completed, pending): (Vec<Task>, Vec<Task>) =
        tasks.iter().cloned().partition(|task| task.is_completed);
    TaskListView { pending, completed }
}
