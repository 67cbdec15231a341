//! JSON file storage implementation.
//!
//! The whole task list lives in a single JSON array, one record per task,
//! indented with four spaces.

use std::path::{Path, PathBuf};

use serde::Serialize;
use taskman_core::Task;
use tokio::fs;
use tracing::debug;

use super::{Result, Storage};

/// File-based JSON storage backend.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Create storage backed by the file at `path`. Nothing is touched on disk
    /// until the first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "tasks.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn load(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = read_json(&self.path).await?.unwrap_or_default();
        debug!("Loaded {} tasks from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    async fn save(&mut self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = to_json_pretty(tasks)?;

        // Write a sibling file first so a failed write never truncates the store.
        let tmp = self.temp_path();
        fs::write(&tmp, &json).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}

fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) if json.trim().is_empty() => Ok(None),
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("A", 2, "2024-01-10", vec![]).unwrap().with_completed(true),
            Task::new("B", 1, "2024-01-05", vec!["A".into()]).unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("tasks.json"));
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("tasks.json"));

        let tasks = sample_tasks();
        storage.save(&tasks).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, tasks);
        assert!(!storage.temp_path().exists());
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("tasks.json");
        let mut storage = JsonStorage::new(&path);

        storage.save(&sample_tasks()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut storage = JsonStorage::new(&path);
        storage.save(&sample_tasks()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    {\n        \"name\": \"A\""));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[1]["due_date"], "2024-01-05");
        assert_eq!(value[1]["dependencies"], serde_json::json!(["A"]));
        assert_eq!(value[0]["completed"], true);
    }

    #[tokio::test]
    async fn test_empty_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "  \n").unwrap();

        let storage = JsonStorage::new(&path);
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_record_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"name": "A", "priority": 1, "due_date": "2024-02-30"}]"#,
        )
        .unwrap();

        let storage = JsonStorage::new(&path);
        let err = storage.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[tokio::test]
    async fn test_save_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let mut storage = JsonStorage::new(blocker.join("tasks.json"));
        let err = storage.save(&sample_tasks()).await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
