use super::{TaskStore, lock};
use crate::error::{PlannerError, PlannerResult};
use crate::planner::{
    Credential, ListId, NewTask, PlannerData, Priority, Task, TaskId, TaskList, TaskPatch, UserId,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use tracing::{debug, info};

/// Account served by the demo store
pub const DEMO_USER_ID: &str = "demo-user";

/// Lists seeded for the demo account; they cannot be deleted
pub const DEMO_LIST_IDS: [&str; 2] = ["demo-list-1", "demo-list-2"];

/// Task store that keeps everything in process memory
///
/// Nothing survives a restart. Besides tests, this backs demo mode, where
/// [`MemoryTaskStore::demo`] seeds a ready-made account.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    data: Mutex<PlannerData>,
    protected_lists: Vec<ListId>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: PlannerData) -> Self {
        Self {
            data: Mutex::new(data),
            protected_lists: Vec::new(),
        }
    }

    /// Store seeded with the demo account, two lists and two tasks due
    /// relative to `now`
    pub fn demo(now: DateTime<Utc>) -> PlannerResult<Self> {
        let mut data = PlannerData::new();
        let user = UserId::from(DEMO_USER_ID);
        let credential = Credential::User(user.clone());

        data.register_user(&user, "Demo User")?;
        let [personal_id, work_id] = DEMO_LIST_IDS;
        let personal =
            data.create_list(&credential, "Personal Tasks", Some(ListId::from(personal_id)))?;
        data.create_list(&credential, "Work Tasks", Some(ListId::from(work_id)))?;

        data.create_task(
            &credential,
            NewTask {
                title: "Complete Project Presentation".to_string(),
                description: "Prepare slides for the quarterly review".to_string(),
                due_date: Some(now + Duration::days(7)),
                priority: Priority::High,
                is_completed: false,
                list_id: Some(personal.id.clone()),
            },
        )?;
        data.create_task(
            &credential,
            NewTask {
                title: "Buy Groceries".to_string(),
                description: "Get milk, eggs, and bread".to_string(),
                due_date: Some(now + Duration::days(2)),
                priority: Priority::Low,
                is_completed: false,
                list_id: Some(personal.id),
            },
        )?;

        info!(user = DEMO_USER_ID, tasks = data.task_count(), "seeded demo store");
        Ok(Self {
            data: Mutex::new(data),
            protected_lists: DEMO_LIST_IDS.into_iter().map(ListId::from).collect(),
        })
    }

    fn read<R>(&self, f: impl FnOnce(&PlannerData) -> PlannerResult<R>) -> PlannerResult<R> {
        let data = lock(&self.data)?;
        f(&data)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut PlannerData) -> PlannerResult<R>) -> PlannerResult<R> {
        let mut data = lock(&self.data)?;
        f(&mut data)
    }
}

impl TaskStore for MemoryTaskStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn register_user(&self, id: &UserId, name: &str) -> PlannerResult<TaskList> {
        let list = self.mutate(|data| data.register_user(id, name))?;
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
        let list = self.mutate(|data| data.create_list(credential, name, id))?;
        info!(list = %list.id, "created list");
        Ok(list)
    }

    fn delete_list(&self, credential: &Credential, list_id: &ListId) -> PlannerResult<usize> {
        let deleted = self.mutate(|data| {
            if self.protected_lists.contains(list_id)
                && data
                    .lists_for_owner(credential)?
                    .iter()
                    .any(|l| &l.id == list_id)
            {
                return Err(PlannerError::ProtectedList(list_id.clone()));
            }
            data.delete_list(credential, list_id)
        })?;
        info!(list = %list_id, deleted_tasks = deleted, "deleted list");
        Ok(deleted)
    }

    fn create_task(&self, credential: &Credential, new_task: NewTask) -> PlannerResult<Task> {
        let task = self.mutate(|data| data.create_task(credential, new_task))?;
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
        self.mutate(|data| data.update_task(credential, id, patch))
    }

    fn set_completed(
        &self,
        credential: &Credential,
        id: TaskId,
        is_completed: bool,
    ) -> PlannerResult<Task> {
        self.mutate(|data| data.set_completed(credential, id, is_completed))
    }

    fn delete_task(&self, credential: &Credential, id: TaskId) -> PlannerResult<Task> {
        let task = self.mutate(|data| data.delete_task(credential, id))?;
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
