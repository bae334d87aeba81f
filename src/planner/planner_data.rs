use super::task::{ListId, NewTask, Task, TaskId, TaskList, TaskPatch, User, UserId};
use super::views;
use crate::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};

/// Name given to the list created alongside every account
pub const DEFAULT_LIST_NAME: &str = "Home";

/// Current version of the persisted document layout
pub const FORMAT_VERSION: u32 = 1;

/// Identity presented by the caller of a store operation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    /// No credential at all
    #[default]
    Anonymous,
    /// A session for the given user
    User(UserId),
}

impl Credential {
    pub fn user(id: impl Into<String>) -> Self {
        Credential::User(UserId::new(id))
    }
}

/// All users, lists and tasks of one planner instance
///
/// This is the single owner of planner state. Stores wrap it behind a lock and
/// decide where it lives; every rule about ownership, default lists and
/// cascades is enforced here so all stores behave the same.
///
/// Vecs keep insertion order, which is the order every projection preserves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerData {
    /// Format version of the persisted document
    pub format_version: u32,

    /// Last task id handed out
    pub task_counter: u64,

    pub(crate) users: Vec<User>,
    pub(crate) lists: Vec<TaskList>,
    pub(crate) tasks: Vec<Task>,
}

impl Default for PlannerData {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            task_counter: 0,
            users: Vec::new(),
            lists: Vec::new(),
            tasks: Vec::new(),
        }
    }
}

impl PlannerData {
    /// Create a new empty PlannerData instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `credential` to a registered user
    ///
    /// # Errors
    /// `Unauthorized` for an anonymous credential or an unknown user
    pub fn authorize(&self, credential: &Credential) -> PlannerResult<UserId> {
        match credential {
            Credential::Anonymous => Err(PlannerError::unauthorized(
                "No credential presented. Configure a session user first",
            )),
            Credential::User(id) if self.find_user(id).is_some() => Ok(id.clone()),
            Credential::User(id) => Err(PlannerError::unauthorized(format!(
                "Unknown user '{}'",
                id
            ))),
        }
    }

    pub fn find_user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Create a user account together with its default list
    ///
    /// Registering an existing user changes nothing and returns its default list.
    ///
    /// # Errors
    /// `DuplicateList` if another owner already holds a list with the user's id
    pub fn register_user(&mut self, id: &UserId, name: &str) -> PlannerResult<TaskList> {
        if id.as_str().trim().is_empty() {
            return Err(PlannerError::invalid_input("User ID must not be empty"));
        }

        let default_id = ListId::default_for(id);
        let existing = self.find_list(&default_id).cloned();
        if existing.as_ref().is_some_and(|list| &list.owner_id != id) {
            return Err(PlannerError::DuplicateList(default_id));
        }

        if self.find_user(id).is_none() {
            let name = if name.trim().is_empty() {
                id.as_str()
            } else {
                name.trim()
            };
            self.users.push(User {
                id: id.clone(),
                name: name.to_string(),
            });
        }

        if let Some(list) = existing {
            return Ok(list);
        }

        let list = TaskList {
            id: default_id,
            name: DEFAULT_LIST_NAME.to_string(),
            owner_id: id.clone(),
        };
        self.lists.push(list.clone());
        Ok(list)
    }

    fn find_list(&self, id: &ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| &l.id == id)
    }

    /// Lists owned by the caller, default list included
    pub fn lists_for_owner(&self, credential: &Credential) -> PlannerResult<Vec<TaskList>> {
        let user = self.authorize(credential)?;
        Ok(self
            .lists
            .iter()
            .filter(|l| l.owner_id == user)
            .cloned()
            .collect())
    }

    /// Create a list for the caller
    ///
    /// A missing or blank `id` gets a fresh random id.
    pub fn create_list(
        &mut self,
        credential: &Credential,
        name: &str,
        id: Option<ListId>,
    ) -> PlannerResult<TaskList> {
        let user = self.authorize(credential)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::invalid_input("List name must not be empty"));
        }

        let id = match id {
            Some(id) if !id.as_str().trim().is_empty() => ListId::new(id.as_str().trim()),
            _ => ListId::generate(),
        };
        // List ids equal to a user id are that user's default list.
        let is_user_id = self.find_user(&UserId::new(id.as_str())).is_some();
        if is_user_id || self.find_list(&id).is_some() {
            return Err(PlannerError::DuplicateList(id));
        }

        let list = TaskList {
            id,
            name: name.to_string(),
            owner_id: user,
        };
        self.lists.push(list.clone());
        Ok(list)
    }

    /// Delete one of the caller's lists and every task in it
    ///
    /// # Returns
    /// The number of tasks deleted along with the list
    ///
    /// # Errors
    /// - `ListNotFound` if the caller owns no such list
    /// - `DefaultListProtected` for the caller's default list
    pub fn delete_list(&mut self, credential: &Credential, list_id: &ListId) -> PlannerResult<usize> {
        let user = self.authorize(credential)?;

        let pos = self
            .lists
            .iter()
            .position(|l| &l.id == list_id && l.owner_id == user)
            .ok_or_else(|| PlannerError::ListNotFound(list_id.clone()))?;
        if self.lists[pos].is_default() {
            return Err(PlannerError::DefaultListProtected(list_id.clone()));
        }

        let before = self.tasks.len();
        self.tasks
            .retain(|t| !(&t.list_id == list_id && t.owner_id == user));
        let deleted = before - self.tasks.len();

        self.lists.remove(pos);
        Ok(deleted)
    }

    /// Resolve the list a task of `owner` should live in
    fn resolve_list(&self, owner: &UserId, list_id: Option<&ListId>) -> PlannerResult<ListId> {
        let Some(list_id) = list_id else {
            return Ok(ListId::default_for(owner));
        };

        let list = self
            .find_list(list_id)
            .ok_or_else(|| PlannerError::ListNotFound(list_id.clone()))?;
        if &list.owner_id != owner {
            return Err(PlannerError::CrossOwner {
                list: list_id.clone(),
                owner: owner.clone(),
            });
        }
        Ok(list.id.clone())
    }

    /// Generate a new unique task ID
    fn next_task_id(&mut self) -> PlannerResult<TaskId> {
        // Documents edited by hand may carry ids beyond the counter.
        let highest = self.tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
        let next = self
            .task_counter
            .max(highest)
            .checked_add(1)
            .ok_or_else(|| PlannerError::Storage(anyhow::anyhow!("task id space exhausted")))?;
        self.task_counter = next;
        Ok(TaskId(next))
    }

    fn validate_title(title: &str) -> PlannerResult<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PlannerError::invalid_input("Task title must not be empty"));
        }
        Ok(title.to_string())
    }

    /// Create a task owned by the caller
    pub fn create_task(&mut self, credential: &Credential, new_task: NewTask) -> PlannerResult<Task> {
        let user = self.authorize(credential)?;
        let title = Self::validate_title(&new_task.title)?;
        let list_id = self.resolve_list(&user, new_task.list_id.as_ref())?;
        let id = self.next_task_id()?;

        let task = Task {
            id,
            title,
            description: new_task.description,
            due_date: new_task.due_date,
            priority: new_task.priority,
            is_completed: new_task.is_completed,
            owner_id: user,
            list_id,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn owned_task_index(&self, user: &UserId, id: TaskId) -> PlannerResult<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id && &t.owner_id == user)
            .ok_or(PlannerError::TaskNotFound(id))
    }

    /// Fetch one of the caller's tasks
    pub fn get_task(&self, credential: &Credential, id: TaskId) -> PlannerResult<Task> {
        let user = self.authorize(credential)?;
        let pos = self.owned_task_index(&user, id)?;
        Ok(self.tasks[pos].clone())
    }

    /// Apply `patch` to one of the caller's tasks
    ///
    /// The patch is validated as a whole before anything changes.
    pub fn update_task(
        &mut self,
        credential: &Credential,
        id: TaskId,
        patch: TaskPatch,
    ) -> PlannerResult<Task> {
        let user = self.authorize(credential)?;
        let pos = self.owned_task_index(&user, id)?;

        let title = patch.title.as_deref().map(Self::validate_title).transpose()?;
        let list_id = match patch.list_id.as_ref() {
            Some(list_id) => Some(self.resolve_list(&user, Some(list_id))?),
            None => None,
        };

        let task = &mut self.tasks[pos];
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(list_id) = list_id {
            task.list_id = list_id;
        }
        Ok(task.clone())
    }

    /// Mark one of the caller's tasks completed or pending
    pub fn set_completed(
        &mut self,
        credential: &Credential,
        id: TaskId,
        is_completed: bool,
    ) -> PlannerResult<Task> {
        let user = self.authorize(credential)?;
        let pos = self.owned_task_index(&user, id)?;
        self.tasks[pos].is_completed = is_completed;
        Ok(self.tasks[pos].clone())
    }

    /// Delete one of the caller's tasks and return it
    pub fn delete_task(&mut self, credential: &Credential, id: TaskId) -> PlannerResult<Task> {
        let user = self.authorize(credential)?;
        let pos = self.owned_task_index(&user, id)?;
        Ok(self.tasks.remove(pos))
    }

    fn ensure_owner(user: &UserId, owner: &UserId) -> PlannerResult<()> {
        if user != owner {
            return Err(PlannerError::unauthorized(format!(
                "User '{}' may not read tasks of '{}'",
                user, owner
            )));
        }
        Ok(())
    }

    /// Snapshot of every task of `owner`, in insertion order
    pub fn tasks_for_owner(&self, credential: &Credential, owner: &UserId) -> PlannerResult<Vec<Task>> {
        let user = self.authorize(credential)?;
        Self::ensure_owner(&user, owner)?;
        Ok(self
            .tasks
            .iter()
            .filter(|t| &t.owner_id == owner)
            .cloned()
            .collect())
    }

    /// Snapshot of the tasks of `owner` in `list`, in insertion order
    pub fn tasks_for_owner_and_list(
        &self,
        credential: &Credential,
        owner: &UserId,
        list: &ListId,
    ) -> PlannerResult<Vec<Task>> {
        let user = self.authorize(credential)?;
        Self::ensure_owner(&user, owner)?;
        Ok(views::tasks_in_list(&self.tasks, owner, list))
    }
}
