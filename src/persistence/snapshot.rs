//! One copy of the data file per calendar day, kept under the backup directory.

use super::files::{atomic_write, read_file};
use crate::error::{StoreError, StoreResult};
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Snapshot path for a date (YYYY-MM-DD.md)
pub fn snapshot_path(backup_dir: &Path, date: NaiveDate) -> PathBuf {
    backup_dir.join(format!("{}.md", date.format("%Y-%m-%d")))
}

/// Copy `canonical` to the snapshot for `date` unless that snapshot already
/// exists. Returns the path written, `None` if nothing was done.
pub async fn take_daily_snapshot(
    canonical: &Path,
    backup_dir: &Path,
    date: NaiveDate,
) -> StoreResult<Option<PathBuf>> {
    let target = snapshot_path(backup_dir, date);
    if fs::try_exists(&target).await.unwrap_or(false) {
        return Ok(None);
    }

    let Some(content) = read_file(canonical).await? else {
        return Ok(None);
    };

    atomic_write(&target, &content).await?;
    tracing::debug!(path = %target.display(), "daily snapshot written");
    Ok(Some(target))
}

/// All dated snapshots, oldest first
pub async fn list_snapshots(backup_dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let mut entries = match fs::read_dir(backup_dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: backup_dir.to_path_buf(),
                source,
            })
        }
    };

    let mut files = Vec::new();
    loop {
        let entry = entries.next_entry().await.map_err(|source| StoreError::Read {
            path: backup_dir.to_path_buf(),
            source,
        })?;
        let Some(entry) = entry else { break };
        let path = entry.path();

        let is_snapshot = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(".md"))
            .map_or(false, |stem| NaiveDate::parse_from_str(stem, "%Y-%m-%d").is_ok());
        if is_snapshot {
            files.push(path);
        }
    }

    // Sort by filename (which naturally sorts by date)
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    #[tokio::test]
    async fn test_first_snapshot_of_the_day_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let canonical = temp_dir.path().join("daybook.md");
        let backups = temp_dir.path().join("daily_backup");

        std::fs::write(&canonical, "morning").unwrap();
        let written = take_daily_snapshot(&canonical, &backups, day(12)).await.unwrap();
        assert_eq!(written, Some(backups.join("2025-11-12.md")));

        std::fs::write(&canonical, "evening").unwrap();
        let again = take_daily_snapshot(&canonical, &backups, day(12)).await.unwrap();
        assert_eq!(again, None);
        assert_eq!(std::fs::read_to_string(backups.join("2025-11-12.md")).unwrap(), "morning");

        take_daily_snapshot(&canonical, &backups, day(13)).await.unwrap();
        assert_eq!(std::fs::read_to_string(backups.join("2025-11-13.md")).unwrap(), "evening");
    }

    #[tokio::test]
    async fn test_missing_canonical_is_noop() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backups = temp_dir.path().join("daily_backup");
        let written = take_daily_snapshot(&temp_dir.path().join("absent.md"), &backups, day(1))
            .await
            .unwrap();
        assert_eq!(written, None);
        assert!(!backups.exists());
    }

    #[tokio::test]
    async fn test_list_snapshots_sorted_and_filtered() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backups = temp_dir.path();
        for name in ["2025-11-13.md", "2025-11-02.md", "notes.md", "2025-13-40.md", "2025-11-05.txt"] {
            std::fs::write(backups.join(name), "x").unwrap();
        }

        let listed = list_snapshots(backups).await.unwrap();
        assert_eq!(listed, vec![backups.join("2025-11-02.md"), backups.join("2025-11-13.md")]);
    }

    #[tokio::test]
    async fn test_list_missing_dir_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(list_snapshots(&temp_dir.path().join("nope")).await.unwrap().is_empty());
    }
}
