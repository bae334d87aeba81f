//! Planner domain models and scheduling views
//!
//! This module contains the core task-planner data structures and the pure
//! scheduling kernel. It is split into submodules:
//! - `task`: Task, TaskList, ids and priority
//! - `frame`: the fixed-offset reference frame for all date truncation
//! - `bucket`: temporal classification (overdue / today / this week / later)
//! - `timeline`: proportional timeline positions and axis ticks
//! - `views`: kanban, timeline and list-scoped projections
//! - `planner_data`: the owned collection with all CRUD and ownership rules

pub mod bucket;
pub mod frame;
mod planner_data;
pub mod task;
pub mod timeline;
pub mod views;

// Re-export all public types
pub use bucket::{Bucket, THIS_WEEK_DAYS, classify, classify_date};
pub use frame::ReferenceFrame;
pub use planner_data::{Credential, DEFAULT_LIST_NAME, FORMAT_VERSION, PlannerData};
pub use task::{ListId, NewTask, Priority, Task, TaskId, TaskList, TaskPatch, User, UserId};
pub use timeline::{
    Granularity, Position, Tick, days_in_month, month_abbreviation, position, timeline_labels,
};
pub use views::{
    KanbanBoard, KanbanColumn, TaskListView, Timeline, TimelineEntry, due_on, kanban,
    split_by_completion, tasks_in_list, timeline,
};
