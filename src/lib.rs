//! cleartask MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for personal
//! task planning. Tasks live in lists, carry an optional due date and a
//! priority, and can be viewed as a kanban board of due-date buckets or laid
//! out on a day, month or year timeline.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `PlannerServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `planner` module - Task model, classification and views
//! - **Persistence Layer**: `store` module - `TaskStore` with file and memory adapters
//!
//! # Example
//!
//! ```no_run
//! use cleartask::{Config, PlannerServerHandler};
//! use cleartask::planner::UserId;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::file("tasks.toml", UserId::from("alice"));
//!     let handler = PlannerServerHandler::new(&config)?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod logging;
pub mod planner;
pub mod storage;
pub mod store;
pub mod validation;

use chrono::NaiveDate;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use tracing::warn;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, LogSettings, StoreBackend};
pub use error::{PlannerError, PlannerResult};
pub use planner::{Credential, ReferenceFrame};
pub use storage::Storage;
pub use store::{FileTaskStore, MemoryTaskStore, TaskStore};

use planner::UserId;

/// MCP Server handler for task planning
///
/// Every tool call runs as the configured session credential against the
/// injected [`TaskStore`]. Dates are truncated in the configured
/// [`ReferenceFrame`] and "now" comes from the injected [`Clock`].
pub struct PlannerServerHandler {
    pub(crate) store: Box<dyn TaskStore>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) frame: ReferenceFrame,
    pub(crate) credential: Credential,
}

impl PlannerServerHandler {
    /// Create a handler from configuration, opening the configured store
    ///
    /// # Example
    /// ```no_run
    /// # use cleartask::{Config, PlannerServerHandler};
    /// # fn main() -> anyhow::Result<()> {
    /// let handler = PlannerServerHandler::new(&Config::demo())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: &Config) -> PlannerResult<Self> {
        let clock = SystemClock;
        let store = config.open_store(&clock)?;
        Ok(Self::with_parts(
            store,
            Box::new(clock),
            config.frame,
            config.credential(),
        ))
    }

    /// Assemble a handler from already-built parts
    pub fn with_parts(
        store: Box<dyn TaskStore>,
        clock: Box<dyn Clock>,
        frame: ReferenceFrame,
        credential: Credential,
    ) -> Self {
        Self {
            store,
            clock,
            frame,
            credential,
        }
    }

    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Today's date in the reference frame
    pub(crate) fn today(&self) -> NaiveDate {
        self.frame.date(self.clock.now())
    }

    /// Owner whose tasks the views project
    pub(crate) fn session_owner(&self) -> McpResult<UserId> {
        match &self.credential {
            Credential::User(id) => Ok(id.clone()),
            Credential::Anonymous => Err(self.report(
                "session",
                PlannerError::unauthorized("No session user configured"),
            )),
        }
    }

    /// Log a failed tool call and convert the error for the client
    pub(crate) fn report(&self, tool: &str, e: PlannerError) -> mcp_attr::Error {
        warn!(tool, reason = e.reason(), error = %e, "tool call failed");
        validation::to_mcp_error(e)
    }
}

/// Personal task planner with due-date scheduling views.
///
/// Tasks belong to lists. Every user has a default list (id = user id) that cannot be deleted;
/// further lists can be created and deleted (deleting a list deletes its tasks).
///
/// Key concepts:
/// - **priority**: none, low, medium, high (or 0..3)
/// - **due_date**: YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339
/// - **kanban**: pending and completed tasks grouped into overdue / today / thisWeek / later
/// - **timeline**: tasks due in one day, month or year, placed at a 0-100 percent position
///
/// Task IDs are positive integers: 1, 2, 3
#[mcp_server]
impl McpServer for PlannerServerHandler {
    /// **Lists**: Show all your task lists, default list included.
    #[tool]
    async fn get_lists(&self) -> McpResult<String> {
        self.handle_get_lists().await
    }

    /// **Lists**: Create a task list.
    #[tool]
    async fn create_list(
        &self,
        /// Name: display name of the list (e.g., "Work")
        name: String,
        /// List ID: any unique string. Omit for a generated ID (optional)
        list_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_create_list(name, list_id).await
    }

    /// **Lists**: Delete a list and every task in it. The default list cannot be deleted.
    #[tool]
    async fn delete_list(
        &self,
        /// List ID to delete
        list_id: String,
    ) -> McpResult<String> {
        self.handle_delete_list(list_id).await
    }

    /// **Capture**: Create a task. Without list_id it goes to your default list.
    #[tool]
    async fn create_task(
        &self,
        /// Title: brief description
        title: String,
        /// Description: longer details (optional)
        description: Option<String>,
        /// Due date: YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339 (optional)
        due_date: Option<String>,
        /// Priority: none/low/medium/high or 0-3 (optional, default none)
        priority: Option<String>,
        /// List ID: target list (optional)
        list_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_create_task(title, description, due_date, priority, list_id)
            .await
    }

    /// **Inspect**: Show one task as JSON.
    #[tool]
    async fn get_task(
        &self,
        /// Task ID (e.g., "3")
        task_id: String,
    ) -> McpResult<String> {
        self.handle_get_task(task_id).await
    }

    /// **Organize**: Update task fields. Only the given fields change.
    /// **Tip**: Pass due_date="" to remove the due date.
    #[tool]
    async fn update_task(
        &self,
        /// Task ID to update
        task_id: String,
        /// New title (optional)
        title: Option<String>,
        /// New description (optional)
        description: Option<String>,
        /// New due date, "" clears it (optional)
        due_date: Option<String>,
        /// New priority: none/low/medium/high or 0-3 (optional)
        priority: Option<String>,
        /// Move to this list (optional)
        list_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(task_id, title, description, due_date, priority, list_id)
            .await
    }

    /// **Do**: Mark a task completed, or back to pending.
    #[tool]
    async fn set_task_status(
        &self,
        /// Task ID
        task_id: String,
        /// true = completed, false = pending
        is_completed: bool,
    ) -> McpResult<String> {
        self.handle_set_task_status(task_id, is_completed).await
    }

    /// **Purge**: Permanently delete a task.
    #[tool]
    async fn delete_task(
        &self,
        /// Task ID to delete
        task_id: String,
    ) -> McpResult<String> {
        self.handle_delete_task(task_id).await
    }

    /// **Review**: List tasks split into pending and completed.
    /// **Use**: No filter = all your tasks; list_id = one list; date = only tasks due that day.
    #[tool]
    async fn list_tasks(
        &self,
        /// List ID filter (optional)
        list_id: Option<String>,
        /// Due date filter: YYYY-MM-DD (optional)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_tasks(list_id, date).await
    }

    /// **Plan**: Kanban board of your tasks by due date: overdue, today, this week (next 7 days), later.
    /// Tasks without a due date are in "later".
    #[tool]
    async fn kanban(&self) -> McpResult<String> {
        self.handle_kanban().await
    }

    /// **Plan**: Timeline of tasks due within one day, month or year around a reference date.
    /// Each entry has a 0-100 percent position and a label; ticks describe the axis.
    #[tool]
    async fn timeline(
        &self,
        /// Granularity: day/month/year
        granularity: String,
        /// Reference date: YYYY-MM-DD (optional, default today)
        reference_date: Option<String>,
    ) -> McpResult<String> {
        self.handle_timeline(granularity, reference_date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{Priority, TaskId};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn get_test_handler() -> PlannerServerHandler {
        let store = MemoryTaskStore::new();
        store.register_user(&UserId::from("alice"), "Alice").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
        PlannerServerHandler::with_parts(
            Box::new(store),
            Box::new(FixedClock(now)),
            ReferenceFrame::utc(),
            Credential::user("alice"),
        )
    }

    #[tokio::test]
    async fn test_create_and_get_task() {
        let handler = get_test_handler();
        let result = handler
            .create_task(
                "Write report".to_string(),
                Some("Quarterly numbers".to_string()),
                Some("2024-06-12".to_string()),
                Some("high".to_string()),
                None,
            )
            .await
            .unwrap();
        assert_eq!(result, "Task created with ID: 1 (list: alice)");

        let json: Value = serde_json::from_str(&handler.get_task("1".to_string()).await.unwrap())
            .unwrap();
        assert_eq!(json["title"], "Write report");
        assert_eq!(json["priority"], 3);
        assert_eq!(json["dueDate"], "2024-06-12T00:00:00Z");
        assert_eq!(json["ownerId"], "alice");
    }

    #[tokio::test]
    async fn test_create_task_invalid_inputs() {
        let handler = get_test_handler();
        assert!(
            handler
                .create_task("x".to_string(), None, Some("soon".to_string()), None, None)
                .await
                .is_err()
        );
        assert!(
            handler
                .create_task("x".to_string(), None, None, Some("urgent".to_string()), None)
                .await
                .is_err()
        );
        assert!(
            handler
                .create_task("   ".to_string(), None, None, None, None)
                .await
                .is_err()
        );
        let tasks = handler
            .store
            .fetch_tasks_for_owner(&handler.credential, &UserId::from("alice"))
            .unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_update_task_clears_due_date() {
        let handler = get_test_handler();
        handler
            .create_task(
                "Dentist".to_string(),
                None,
                Some("2024-06-11T15:00".to_string()),
                None,
                None,
            )
            .await
            .unwrap();

        handler
            .update_task(
                "1".to_string(),
                None,
                None,
                Some(String::new()),
                Some("1".to_string()),
                None,
            )
            .await
            .unwrap();

        let task = handler
            .store
            .get_task(&handler.credential, TaskId(1))
            .unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Low);
    }

    #[tokio::test]
    async fn test_list_id_arguments_are_trimmed() {
        let handler = get_test_handler();
        handler
            .create_list("Work".to_string(), Some("work".to_string()))
            .await
            .unwrap();

        let result = handler
            .create_task("Slides".to_string(), None, None, None, Some(" work ".to_string()))
            .await
            .unwrap();
        assert_eq!(result, "Task created with ID: 1 (list: work)");

        // A blank list id leaves the task where it is.
        handler
            .update_task(
                "1".to_string(),
                Some("Slides v2".to_string()),
                None,
                None,
                None,
                Some(String::new()),
            )
            .await
            .unwrap();
        let task = handler.store.get_task(&handler.credential, TaskId(1)).unwrap();
        assert_eq!(task.list_id.as_str(), "work");

        handler
            .update_task("1".to_string(), None, None, None, None, Some(" alice ".to_string()))
            .await
            .unwrap();
        let task = handler.store.get_task(&handler.credential, TaskId(1)).unwrap();
        assert_eq!(task.list_id.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_update_task_requires_a_field() {
        let handler = get_test_handler();
        handler
            .create_task("Dentist".to_string(), None, None, None, None)
            .await
            .unwrap();
        let result = handler
            .update_task("1".to_string(), None, None, None, None, None)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_set_status_and_delete() {
        let handler = get_test_handler();
        handler
            .create_task("Laundry".to_string(), None, None, None, None)
            .await
            .unwrap();

        let result = handler
            .set_task_status("1".to_string(), true)
            .await
            .unwrap();
        assert_eq!(result, "Task 1 marked as completed");

        let result = handler.delete_task("1".to_string()).await.unwrap();
        assert_eq!(result, "Deleted task 1: Laundry");
        assert!(handler.get_task("1".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn test_kanban_uses_injected_clock() {
        let handler = get_test_handler();
        for (title, due) in [
            ("Late", "2024-06-09"),
            ("Now", "2024-06-10T18:00"),
            ("Soon", "2024-06-17"),
            ("Someday", "2024-06-18"),
        ] {
            handler
                .create_task(title.to_string(), None, Some(due.to_string()), None, None)
                .await
                .unwrap();
        }

        let json: Value = serde_json::from_str(&handler.kanban().await.unwrap()).unwrap();
        assert_eq!(json["referenceDate"], "2024-06-10");
        let titles: Vec<&str> = json["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["tasks"][0]["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Late", "Now", "Soon", "Someday"]);
    }

    #[tokio::test]
    async fn test_timeline_defaults_to_today() {
        let handler = get_test_handler();
        handler
            .create_task(
                "Standup".to_string(),
                None,
                Some("2024-06-10T12:00".to_string()),
                None,
                None,
            )
            .await
            .unwrap();

        let json: Value =
            serde_json::from_str(&handler.timeline("day".to_string(), None).await.unwrap())
                .unwrap();
        assert_eq!(json["referenceDate"], "2024-06-10");
        assert_eq!(json["entries"][0]["percent"], 50.0);
        assert_eq!(json["entries"][0]["label"], "12:00");
        assert_eq!(json["ticks"].as_array().unwrap().len(), 25);

        assert!(handler.timeline("week".to_string(), None).await.is_err());
    }

    #[tokio::test]
    async fn test_anonymous_session_is_rejected() {
        let store = MemoryTaskStore::new();
        let handler = PlannerServerHandler::with_parts(
            Box::new(store),
            Box::new(SystemClock),
            ReferenceFrame::utc(),
            Credential::Anonymous,
        );
        assert!(handler.kanban().await.is_err());
        assert!(handler.get_lists().await.is_err());
        assert!(
            handler
                .create_task("x".to_string(), None, None, None, None)
                .await
                .is_err()
        );
    }
}
