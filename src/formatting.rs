//! Formatting helper functions for the planner MCP server
//!
//! Data answers are pretty-printed JSON; acknowledgements are plain sentences.

use crate::error::PlannerError;
use crate::planner::{Task, TaskList};
use mcp_attr::Result as McpResult;
use serde::Serialize;

/// Render any view or record as pretty JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> McpResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        crate::validation::to_mcp_error(PlannerError::Storage(
            anyhow::Error::new(e).context("Failed to serialize response"),
        ))
    })
}

pub fn task_created(task: &Task) -> String {
    format!(
        "Task created with ID: {} (list: {})",
        task.id, task.list_id
    )
}

pub fn task_status_changed(task: &Task) -> String {
    let status = if task.is_completed {
        "completed"
    } else {
        "pending"
    };
    format!("Task {} marked as {}", task.id, status)
}

pub fn task_deleted(task: &Task) -> String {
    format!("Deleted task {}: {}", task.id, task.title)
}

pub fn list_created(list: &TaskList) -> String {
    format!("List created with ID: {} ({})", list.id, list.name)
}

pub fn list_deleted(list_id: &str, deleted_tasks: usize) -> String {
    format!(
        "Deleted list {} and {} task(s) in it",
        list_id, deleted_tasks
    )
}
