//! Task Store interface and adapters
//!
//! The handler talks to persistence only through [`TaskStore`]. Two adapters
//! exist, selected by configuration:
//! - [`FileTaskStore`]: a TOML document on disk, rewritten after every change
//! - [`MemoryTaskStore`]: process-local state, used for the demo account
//!
//! Both wrap a [`PlannerData`] behind a mutex, so every call sees and returns
//! an internally consistent snapshot.

mod file;
mod memory;

pub use file::FileTaskStore;
pub use memory::{DEMO_LIST_IDS, DEMO_USER_ID, MemoryTaskStore};

use crate::error::{PlannerError, PlannerResult};
use crate::planner::{
    Credential, ListId, NewTask, PlannerData, Task, TaskId, TaskList, TaskPatch, UserId,
};
use std::sync::{Mutex, MutexGuard};

/// Persistence capability for users, lists and tasks
///
/// Every operation except [`TaskStore::register_user`] authorizes the
/// credential first and fails with `Unauthorized` when it names no
/// registered user.
pub trait TaskStore: Send + Sync {
    /// Short name of the adapter, for logs
    fn backend(&self) -> &'static str;

    /// Create an account and its default list; no-op for an existing account
    fn register_user(&self, id: &UserId, name: &str) -> PlannerResult<TaskList>;

    fn lists_for_owner(&self, credential: &Credential) -> PlannerResult<Vec<TaskList>>;

    fn create_list(
        &self,
        credential: &Credential,
        name: &str,
        id: Option<ListId>,
    ) -> PlannerResult<TaskList>;

    /// Delete a non-default list with its tasks; returns the deleted task count
    fn delete_list(&self, credential: &Credential, list_id: &ListId) -> PlannerResult<usize>;

    fn create_task(&self, credential: &Credential, new_task: NewTask) -> PlannerResult<Task>;

    fn get_task(&self, credential: &Credential, id: TaskId) -> PlannerResult<Task>;

    fn update_task(&self, credential: &Credential, id: TaskId, patch: TaskPatch)
    -> PlannerResult<Task>;

    fn set_completed(
        &self,
        credential: &Credential,
        id: TaskId,
        is_completed: bool,
    ) -> PlannerResult<Task>;

    fn delete_task(&self, credential: &Credential, id: TaskId) -> PlannerResult<Task>;

    /// Every task of `owner`; empty when the owner has none
    fn fetch_tasks_for_owner(&self, credential: &Credential, owner: &UserId)
    -> PlannerResult<Vec<Task>>;

    /// Tasks of `owner` in `list`; empty when there are none
    fn fetch_tasks_for_owner_and_list(
        &self,
        credential: &Credential,
        owner: &UserId,
        list: &ListId,
    ) -> PlannerResult<Vec<Task>>;
}

/// Lock planner state, turning a poisoned lock into a storage error
pub(crate) fn lock(data: &Mutex<PlannerData>) -> PlannerResult<MutexGuard<'_, PlannerData>> {
    data.lock()
        .map_err(|_| PlannerError::Storage(anyhow::anyhow!("planner state lock poisoned")))
}
