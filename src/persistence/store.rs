use super::files::{atomic_write, read_file};
use super::integrity::{check_content, IntegrityReport};
use super::parser::{decode, is_recognizable};
use super::serializer::encode;
use super::snapshot::{list_snapshots, take_daily_snapshot};
use crate::domain::AppState;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub const DEFAULT_FILE_NAME: &str = "daybook.md";
pub const DEFAULT_BACKUP_DIR_NAME: &str = "daily_backup";

/// Where the data file and its daily snapshots live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    pub backup_dir_name: String,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            backup_dir_name: DEFAULT_BACKUP_DIR_NAME.to_string(),
        }
    }

    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.data_dir.join(&self.backup_dir_name)
    }
}

/// The data file. Share one `Store` (behind an `Arc`) between everything
/// that writes the same file: saves are serialized by its lock.
#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        let path = config.file_path();
        Self {
            config,
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load state; `None` when the file is missing, unreadable or not ours
    pub async fn load(&self) -> Option<AppState> {
        let content = self.read_raw().await?;
        if !is_recognizable(&content) {
            tracing::warn!(path = %self.path.display(), "file is not a daybook document, ignoring");
            return None;
        }
        Some(decode(&content))
    }

    /// Write state atomically, then take today's snapshot if there is none yet.
    /// Returns `false` if the file could not be written.
    pub async fn save(&self, state: &AppState) -> bool {
        let _guard = self.write_lock.lock().await;

        let content = encode(state);
        if let Err(err) = atomic_write(&self.path, &content).await {
            tracing::warn!(error = %err, "save failed");
            return false;
        }

        let today = Local::now().date_naive();
        if let Err(err) = take_daily_snapshot(&self.path, &self.config.backup_dir(), today).await {
            tracing::warn!(error = %err, "daily snapshot failed");
        }
        true
    }

    /// Last modification time of the data file
    pub async fn timestamp(&self) -> Option<DateTime<Local>> {
        let metadata = tokio::fs::metadata(&self.path).await.ok()?;
        let modified = metadata.modified().ok()?;
        Some(DateTime::<Local>::from(modified))
    }

    /// File content as stored, for export
    pub async fn read_raw(&self) -> Option<String> {
        match read_file(&self.path).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(error = %err, "read failed");
                None
            }
        }
    }

    /// Decode the file and report everything that had to be repaired
    pub async fn integrity_check(&self) -> IntegrityReport {
        match read_file(&self.path).await {
            Ok(content) => check_content(content.as_deref()),
            Err(err) => IntegrityReport::failed(err.to_string()),
        }
    }

    /// Daily snapshots on disk, oldest first
    pub async fn snapshots(&self) -> Vec<PathBuf> {
        match list_snapshots(&self.config.backup_dir()).await {
            Ok(paths) => paths,
            Err(err) => {
                tracing::warn!(error = %err, "could not list snapshots");
                Vec::new()
            }
        }
    }
}
