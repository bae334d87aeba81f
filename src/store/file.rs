use super::{TaskStore, lock};
use crate::error::PlannerResult;
use crate::planner::{
    Credential, ListId, NewTask, PlannerData, Task, TaskId, TaskList, TaskPatch, UserId,
};
use crate::storage::Storage;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Task store persisted as a TOML file
///
/// The whole document is loaded at open and rewritten after each successful
/// change. If the write fails the in-memory state is rolled back, so memory
/// never runs ahead of the file.
pub struct FileTaskStore {
    data: Mutex<PlannerData>,
    storage: Storage,
}

impl FileTaskStore {
    /// Open the store at `path`; a missing file starts an empty planner
    pub fn open(path: impl AsRef<Path>) -> PlannerResult<Self> {
        let storage = Storage::new(path);
        let data = storage.load()?;
        info!(
            path = %storage.file_path().display(),
            users = data.user_count(),
            tasks = data.task_count(),
            "opened task file"
        );
        Ok(Self {
            data: Mutex::new(data),
            storage,
        })
    }

    pub fn file_path(&self) -> &Path {
        self.storage.file_path()
    }

    fn read<R>(&self, f: impl FnOnce(&PlannerData) -> PlannerResult<R>) -> PlannerResult<R> {
        let data = lock(&self.data)?;
        f(&data)
    }

    /// Apply `f` and persist; rejected or unsaved changes leave no trace
    fn mutate<R>(
        &self,
        action: &str,
        f: impl FnOnce(&mut PlannerData) -> PlannerResult<R>,
    ) -> PlannerResult<R> {
        let mut data = lock(&self.data)?;
        let before = data.clone();

        let result = match f(&mut data) {
            Ok(result) => result,
            Err(e) => {
                *data = before;
                return Err(e);
            }
        };

        if let Err(e) = self.storage.save(&data) {
            *data = before;
            warn!(action, error = %format!("{:#}", e), "failed to save task file");
            return Err(e.into());
        }
        debug!(action, path = %self.storage.file_path().display(), "saved task file");
        Ok(result)
    }
}

impl TaskStore for FileTaskStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    fn register_user(&self, id: &UserId, name: &str) -> PlannerResult<TaskList> {
        let list = self.mutate("register user", |data| data.register_user(id, name))?;
        info!(user = %id, "registered user");
        Ok(list)
    }

    fn lists_for_owner(&self, credential: &Credential) -> PlannerResult<Vec<TaskList>> {
        self.read(|data| data.lists_for_owner(credential))
    }

    fn create_list(
        &self,
        credential: &Credential,
        name: &str,
        id: Option<ListId>,
    ) -> PlannerResult<TaskList> {
        let list = self.mutate("create list", |data| data.create_list(credential, name, id))?;
        info!(list = %list.id, "created list");
        Ok(list)
    }

    fn delete_list(&self, credential: &Credential, list_id: &ListId) -> PlannerResult<usize> {
        let deleted = self.mutate("delete list", |data| data.delete_list(credential, list_id))?;
        info!(list = %list_id, deleted_tasks = deleted, "deleted list");
        Ok(deleted)
    }

    fn create_task(&self, credential: &Credential, new_task: NewTask) -> PlannerResult<Task> {
        let task = self.mutate("create task", |data| data.create_task(credential, new_task))?;
        debug!(task = %task.id, list = %task.list_id, "created task");
        Ok(task)
    }

    fn get_task(&self, credential: &Credential, id: TaskId) -> PlannerResult<Task> {
        self.read(|data| data.get_task(credential, id))
    }

    fn update_task(
        &self,
        credential: &Credential,
        id: TaskId,
        patch: TaskPatch,
    ) -> PlannerResult<Task> {
        self.mutate("update task", |data| data.update_task(credential, id, patch))
    }

    fn set_completed(
        &self,
        credential: &Credential,
        id: TaskId,
        is_completed: bool,
    ) -> PlannerResult<Task> {
        self.mutate("set task status", |data| {
            data.set_completed(credential, id, is_completed)
        })
    }

    fn delete_task(&self, credential: &Credential, id: TaskId) -> PlannerResult<Task> {
        let task = self.mutate("delete task", |data| data.delete_task(credential, id))?;
        debug!(task = %task.id, "deleted task");
        Ok(task)
    }

    fn fetch_tasks_for_owner(
        &self,
        credential: &Credential,
        owner: &UserId,
    ) -> PlannerResult<Vec<Task>> {
        self.read(|data| data.tasks_for_owner(credential, owner))
    }

    fn fetch_tasks_for_owner_and_list(
        &self,
        credential: &Credential,
        owner: &UserId,
        list: &ListId,
    ) -> PlannerResult<Vec<Task>> {
        self.read(|data| data.tasks_for_owner_and_list(credential, owner, list))
    }
}
