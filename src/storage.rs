use crate::planner::{FORMAT_VERSION, PlannerData};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// TOML file holding one serialized [`PlannerData`] document
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the document; a missing or empty file is an empty planner
    pub fn load(&self) -> Result<PlannerData> {
        if !self.file_path.exists() {
            return Ok(PlannerData::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        if content.trim().is_empty() {
            return Ok(PlannerData::new());
        }

        let data: PlannerData = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        if data.format_version > FORMAT_VERSION {
            bail!(
                "{} has format version {}, newer than supported version {}",
                self.file_path.display(),
                data.format_version,
                FORMAT_VERSION
            );
        }
        Ok(data)
    }

    /// Write the document, replacing the file only once the new content is on disk
    pub fn save(&self, data: &PlannerData) -> Result<()> {
        let content = toml::to_string_pretty(data).context("Failed to serialize planner data")?;

        let mut tmp_path = self.file_path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("Failed to replace {}", self.file_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{Credential, NewTask, UserId};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("absent.toml"));
        assert_eq!(storage.load().unwrap(), PlannerData::new());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.toml"));

        let mut data = PlannerData::new();
        data.register_user(&UserId::from("alice"), "Alice").unwrap();
        let due = Utc.with_ymd_and_hms(2024, 6, 14, 17, 30, 0).unwrap();
        data.create_task(
            &Credential::user("alice"),
            NewTask {
                title: "Ship release".to_string(),
                due_date: Some(due),
                ..Default::default()
            },
        )
        .unwrap();

        storage.save(&data).unwrap();
        assert!(storage.file_path().exists());
        assert_eq!(storage.load().unwrap(), data);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.toml");
        fs::write(&path, "tasks = 'not an array'").unwrap();
        let err = Storage::new(&path).load().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn test_newer_format_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.toml");
        fs::write(&path, format!("format_version = {}\n", FORMAT_VERSION + 1)).unwrap();
        assert!(Storage::new(&path).load().is_err());
    }
}
