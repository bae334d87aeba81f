//! Scheduling view handlers for the planner MCP server
//!
//! Each view fetches one snapshot of the session owner's tasks and projects
//! it with the pure kernel in [`crate::planner`].

use crate::PlannerServerHandler;
use crate::formatting;
use crate::planner::{self, ListId};
use crate::validation;
use mcp_attr::Result as McpResult;

impl PlannerServerHandler {
    pub async fn handle_list_tasks(
        &self,
        list_id: Option<String>,
        date: Option<String>,
    ) -> McpResult<String> {
        let owner = self.session_owner()?;
        let date = date
            .filter(|s| !s.trim().is_empty())
            .map(|s| validation::parse_reference_date(&s))
            .transpose()?;

        let tasks = match list_id.filter(|s| !s.trim().is_empty()) {
            Some(list_id) => self.store.fetch_tasks_for_owner_and_list(
                &self.credential,
                &owner,
                &ListId::new(list_id.trim()),
            ),
            None => self.store.fetch_tasks_for_owner(&self.credential, &owner),
        }
        .map_err(|e| self.report("list_tasks", e))?;

        let tasks = match date {
            Some(date) => planner::due_on(&tasks, date, &self.frame),
            None => tasks,
        };
        formatting::to_json(&planner::split_by_completion(&tasks))
    }

    pub async fn handle_kanban(&self) -> McpResult<String> {
        let owner = self.session_owner()?;
        let tasks = self
            .store
            .fetch_tasks_for_owner(&self.credential, &owner)
            .map_err(|e| self.report("kanban", e))?;
        let board = planner::kanban(&tasks, self.clock.now(), &self.frame);
        formatting::to_json(&board)
    }

    pub async fn handle_timeline(
        &self,
        granularity: String,
        reference_date: Option<String>,
    ) -> McpResult<String> {
        let owner = self.session_owner()?;
        let granularity = validation::parse_granularity(&granularity)?;
        let reference = match reference_date.filter(|s| !s.trim().is_empty()) {
            Some(s) => validation::parse_reference_date(&s)?,
            None => self.today(),
        };

        let tasks = self
            .store
            .fetch_tasks_for_owner(&self.credential, &owner)
            .map_err(|e| self.report("timeline", e))?;
        let view = planner::timeline(&tasks, reference, granularity, &self.frame);
        formatting::to_json(&view)
    }
}
