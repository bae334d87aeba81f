//! cleartask MCP Server - Main Entry Point
//!
//! This is the main entry point for the cleartask MCP server application.
//! The actual implementation is in the `cleartask` library.

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};
use cleartask::config::DEFAULT_USER_ID;
use cleartask::planner::{ReferenceFrame, UserId};
use cleartask::{Config, LogSettings, PlannerServerHandler, logging};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use tracing::info;

/// cleartask MCP Server - task lists, kanban and timeline views via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task data file (TOML)
    #[arg(env = "CLEARTASK_FILE")]
    file: Option<PathBuf>,

    /// Session user; registered on first use
    #[arg(long, env = "CLEARTASK_USER", default_value = DEFAULT_USER_ID)]
    user: String,

    /// UTC offset used to decide calendar days (e.g., "+09:00", "Z")
    #[arg(long, env = "CLEARTASK_UTC_OFFSET", default_value = "Z")]
    utc_offset: ReferenceFrame,

    /// Serve an in-memory demo account instead of a data file
    #[arg(long, env = "CLEARTASK_DEMO")]
    demo: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let config = if self.demo {
            Config::demo()
        } else {
            let Some(file) = self.file else {
                bail!("A data file path is required unless --demo is given");
            };
            Config::file(file, UserId::new(self.user))
        };
        Ok(config.with_frame(self.utc_offset).with_log(LogSettings {
            level: self.log_level,
            json: self.log_json,
        }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1
        && std::env::var_os("CLEARTASK_FILE").is_none()
        && std::env::var_os("CLEARTASK_DEMO").is_none()
    {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let config = Args::parse().into_config()?;
    logging::init_logging(&config.log)?;

    let handler = PlannerServerHandler::new(&config)?;
    info!(user = %config.user, demo = config.is_demo(), "serving MCP over stdio");
    serve_stdio(handler).await?;
    Ok(())
}
