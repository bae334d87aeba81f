//! Runtime configuration
//!
//! The binary turns its command line and environment into a [`Config`];
//! the library only ever sees this resolved form.

use crate::clock::Clock;
use crate::error::PlannerResult;
use crate::planner::{Credential, ReferenceFrame, UserId};
use crate::store::{DEMO_USER_ID, FileTaskStore, MemoryTaskStore, TaskStore};
use std::path::PathBuf;
use tracing::info;

/// Session user when none is configured
pub const DEFAULT_USER_ID: &str = "local";

/// Which [`TaskStore`] adapter backs the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// TOML document at the given path
    File(PathBuf),
    /// In-memory store seeded with the demo account
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Default filter directive, used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: StoreBackend,
    pub user: UserId,
    pub frame: ReferenceFrame,
    pub log: LogSettings,
}

impl Config {
    /// File-backed configuration for `user`
    pub fn file(path: impl Into<PathBuf>, user: UserId) -> Self {
        Self {
            backend: StoreBackend::File(path.into()),
            user,
            frame: ReferenceFrame::default(),
            log: LogSettings::default(),
        }
    }

    /// Demo configuration; the session always belongs to the demo account
    pub fn demo() -> Self {
        Self {
            backend: StoreBackend::Demo,
            user: UserId::from(DEMO_USER_ID),
            frame: ReferenceFrame::default(),
            log: LogSettings::default(),
        }
    }

    pub fn with_frame(mut self, frame: ReferenceFrame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_log(mut self, log: LogSettings) -> Self {
        self.log = log;
        self
    }

    pub fn is_demo(&self) -> bool {
        self.backend == StoreBackend::Demo
    }

    /// Credential presented to the store for every tool call
    pub fn credential(&self) -> Credential {
        Credential::User(self.user.clone())
    }

    /// Open the configured store and make sure the session user exists
    pub fn open_store(&self, clock: &dyn Clock) -> PlannerResult<Box<dyn TaskStore>> {
        let store: Box<dyn TaskStore> = match &self.backend {
            StoreBackend::File(path) => {
                let store = FileTaskStore::open(path)?;
                store.register_user(&self.user, self.user.as_str())?;
                Box::new(store)
            }
            StoreBackend::Demo => Box::new(MemoryTaskStore::demo(clock.now())?),
        };
        info!(
            backend = store.backend(),
            user = %self.user,
            frame = %self.frame,
            "task store ready"
        );
        Ok(store)
    }
}
