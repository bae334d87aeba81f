//! MCP tool handlers for the planner server
//!
//! This module contains the implementation of all MCP tool handlers,
//! grouped by what they operate on.

pub mod lists;
pub mod tasks;
pub mod views;
