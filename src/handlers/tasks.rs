//! Task handlers for the planner MCP server

use crate::PlannerServerHandler;
use crate::formatting;
use crate::planner::{ListId, NewTask, TaskPatch};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

/// Trimmed list id; blank means not given
fn list_id_arg(list_id: Option<String>) -> Option<ListId> {
    list_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(ListId::new)
}

impl PlannerServerHandler {
    pub async fn handle_create_task(
        &self,
        title: String,
        description: Option<String>,
        due_date: Option<String>,
        priority: Option<String>,
        list_id: Option<String>,
    ) -> McpResult<String> {
        let due_date = due_date
            .filter(|s| !s.trim().is_empty())
            .map(|s| validation::parse_due_date(&s, &self.frame))
            .transpose()?;
        let priority = priority
            .map(|s| validation::parse_priority(&s))
            .transpose()?
            .unwrap_or_default();

        let new_task = NewTask {
            title,
            description: description.unwrap_or_default(),
            due_date,
            priority,
            is_completed: false,
            list_id: list_id_arg(list_id),
        };

        let task = self
            .store
            .create_task(&self.credential, new_task)
            .map_err(|e| self.report("create_task", e))?;
        Ok(formatting::task_created(&task))
    }

    pub async fn handle_get_task(&self, task_id: String) -> McpResult<String> {
        let id = validation::parse_task_id(&task_id)?;
        let task = self
            .store
            .get_task(&self.credential, id)
            .map_err(|e| self.report("get_task", e))?;
        formatting::to_json(&task)
    }

    pub async fn handle_update_task(
        &self,
        task_id: String,
        title: Option<String>,
        description: Option<String>,
        due_date: Option<String>,
        priority: Option<String>,
        list_id: Option<String>,
    ) -> McpResult<String> {
        let id = validation::parse_task_id(&task_id)?;
        let patch = TaskPatch {
            title,
            description,
            due_date: validation::parse_due_date_patch(due_date, &self.frame)?,
            priority: priority
                .map(|s| validation::parse_priority(&s))
                .transpose()?,
            list_id: list_id_arg(list_id),
        };
        if patch.is_empty() {
            bail_public!(
                _,
                "[invalid_input] Nothing to update. Provide at least one of: title, description, due_date, priority, list_id"
            );
        }

        let task = self
            .store
            .update_task(&self.credential, id, patch)
            .map_err(|e| self.report("update_task", e))?;
        formatting::to_json(&task)
    }

    pub async fn handle_set_task_status(
        &self,
        task_id: String,
        is_completed: bool,
    ) -> McpResult<String> {
        let id = validation::parse_task_id(&task_id)?;
        let task = self
            .store
            .set_completed(&self.credential, id, is_completed)
            .map_err(|e| self.report("set_task_status", e))?;
        Ok(formatting::task_status_changed(&task))
    }

    pub async fn handle_delete_task(&self, task_id: String) -> McpResult<String> {
        let id = validation::parse_task_id(&task_id)?;
        let task = self
            .store
            .delete_task(&self.credential, id)
            .map_err(|e| self.report("delete_task", e))?;
        Ok(formatting::task_deleted(&task))
    }
}
