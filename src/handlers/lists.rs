//! List handlers for the planner MCP server

use crate::PlannerServerHandler;
use crate::formatting;
use crate::planner::ListId;
use mcp_attr::Result as McpResult;

impl PlannerServerHandler {
    pub async fn handle_get_lists(&self) -> McpResult<String> {
        let lists = self
            .store
            .lists_for_owner(&self.credential)
            .map_err(|e| self.report("get_lists", e))?;
        formatting::to_json(&lists)
    }

    pub async fn handle_create_list(
        &self,
        name: String,
        list_id: Option<String>,
    ) -> McpResult<String> {
        let list = self
            .store
            .create_list(&self.credential, &name, list_id.map(ListId::new))
            .map_err(|e| self.report("create_list", e))?;
        Ok(formatting::list_created(&list))
    }

    pub async fn handle_delete_list(&self, list_id: String) -> McpResult<String> {
        let list_id = ListId::new(list_id.trim());
        let deleted = self
            .store
            .delete_list(&self.credential, &list_id)
            .map_err(|e| self.report("delete_list", e))?;
        Ok(formatting::list_deleted(list_id.as_str(), deleted))
    }
}
