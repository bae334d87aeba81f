//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use cleartask::planner::{ListId, Priority, Task, TaskId, UserId};
use cleartask::{
    Credential, FileTaskStore, FixedClock, MemoryTaskStore, PlannerServerHandler, ReferenceFrame,
    TaskStore,
};
use std::path::Path;

pub const OWNER: &str = "alice";

/// Reference instant used throughout: 2024-06-10 09:00 UTC
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// A pending task owned by [`OWNER`] in the default list
pub fn task(id: u64, title: &str, due_date: Option<DateTime<Utc>>) -> Task {
    Task {
        id: TaskId(id),
        title: title.to_string(),
        description: String::new(),
        due_date,
        priority: Priority::None,
        is_completed: false,
        owner_id: UserId::from(OWNER),
        list_id: ListId::from(OWNER),
    }
}

pub fn credential() -> Credential {
    Credential::user(OWNER)
}

pub fn memory_store() -> MemoryTaskStore {
    let store = MemoryTaskStore::new();
    store.register_user(&UserId::from(OWNER), "Alice").unwrap();
    store
}

pub fn file_store(path: &Path) -> FileTaskStore {
    let store = FileTaskStore::open(path).unwrap();
    store.register_user(&UserId::from(OWNER), "Alice").unwrap();
    store
}

/// Handler for [`OWNER`] over `store`, with the clock frozen at [`reference_now`]
pub fn handler_with(store: Box<dyn TaskStore>) -> PlannerServerHandler {
    PlannerServerHandler::with_parts(
        store,
        Box::new(FixedClock(reference_now())),
        ReferenceFrame::utc(),
        credential(),
    )
}

/// Extract the id from a "... created with ID: <id> (...)" response
pub fn extract_id_from_response(response: &str) -> String {
    if let Some(start) = response.find("ID: ") {
        let id_part = &response[start + 4..];
        if let Some(end) = id_part.find(" (") {
            return id_part[..end].trim().to_string();
        }
    }
    response
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_end_matches(')')
        .to_string()
}
