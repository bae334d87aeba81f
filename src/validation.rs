//! Validation helper functions for the planner MCP server
//!
//! Tool arguments arrive as strings. This module parses them into planner
//! types and converts planner errors into MCP errors.

use crate::error::PlannerError;
use crate::planner::{Granularity, Priority, ReferenceFrame, TaskId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mcp_attr::{ErrorCode, Result as McpResult};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Convert a planner error into an MCP error
///
/// Storage failures are server faults; everything else is the caller's. The
/// message is prefixed with the reason code and is shown to the client.
pub fn to_mcp_error(e: PlannerError) -> mcp_attr::Error {
    let code = if e.is_storage() {
        ErrorCode::INTERNAL_ERROR
    } else {
        ErrorCode::INVALID_PARAMS
    };
    mcp_attr::Error::new(code).with_message(format!("[{}] {}", e.reason(), e), true)
}

fn invalid(message: String) -> mcp_attr::Error {
    to_mcp_error(PlannerError::InvalidInput(message))
}

/// Parse a due date
///
/// Accepts RFC 3339 (`2024-06-10T14:30:00Z`), a naive date-time
/// (`2024-06-10T14:30[:00]`) or a bare date (`2024-06-10`). Naive values are
/// wall time in `frame`; a bare date means local midnight.
pub fn parse_due_date(date_str: &str, frame: &ReferenceFrame) -> McpResult<DateTime<Utc>> {
    let trimmed = date_str.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(frame.to_utc(local));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(frame.start_of_day(date));
    }

    Err(invalid(format!(
        "Invalid date '{}'. Use YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339 (e.g., '2025-03-15T09:30:00Z')",
        date_str
    )))
}

/// Parse an optional due date for an update: `None` leaves it alone, an
/// empty string clears it
pub fn parse_due_date_patch(
    date_str: Option<String>,
    frame: &ReferenceFrame,
) -> McpResult<Option<Option<DateTime<Utc>>>> {
    match date_str {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(Some(None)),
        Some(s) => parse_due_date(&s, frame).map(|due| Some(Some(due))),
    }
}

/// Parse a calendar date in YYYY-MM-DD format
pub fn parse_reference_date(date_str: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        invalid(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

pub fn parse_priority(priority_str: &str) -> McpResult<Priority> {
    priority_str.parse().map_err(invalid)
}

pub fn parse_granularity(granularity_str: &str) -> McpResult<Granularity> {
    granularity_str.parse().map_err(invalid)
}

pub fn parse_task_id(task_id: &str) -> McpResult<TaskId> {
    task_id.parse().map_err(invalid)
}
