use crate::error::{StoreError, StoreResult};
use anyhow::{Context, Result};
use std::env;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;

/// Name of the data directory, both local and in the home directory
pub const DATA_DIR_NAME: &str = ".daybook";

/// Get the data directory - checks for a local .daybook first, then falls back to global ~/.daybook
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;

    if let Some(local_dir) = find_local_data_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find local .daybook directory by walking up the directory tree
pub fn find_local_data_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let data_dir = current.join(DATA_DIR_NAME);
        if data_dir.is_dir() {
            return Some(data_dir);
        }

        current = current.parent()?;
    }
}

/// Create a .daybook directory inside `dir`
pub fn init_local_data_dir(dir: &Path) -> Result<PathBuf> {
    let data_dir = dir.join(DATA_DIR_NAME);

    if data_dir.exists() {
        anyhow::bail!("Data directory already exists: {}", data_dir.display());
    }

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Atomically write content to a file using temp file + fsync + rename.
///
/// Readers see either the old file or the new one. The temp file is removed
/// when the write fails.
pub async fn atomic_write(path: &Path, content: &str) -> StoreResult<()> {
    let target = path.to_path_buf();
    let bytes = content.as_bytes().to_vec();
    tokio::task::spawn_blocking(move || replace_file(&target, &bytes))
        .await
        .map_err(|err| StoreError::Write {
            path: path.to_path_buf(),
            source: io::Error::new(ErrorKind::Other, err),
        })??;

    tracing::debug!(path = %path.display(), bytes = content.len(), "file replaced");
    Ok(())
}

fn replace_file(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let dir = path.parent().ok_or_else(|| StoreError::NoParent {
        path: path.to_path_buf(),
    })?;
    std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let to_error = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    // Same directory as the target, so the rename never crosses filesystems
    let mut temp_file = NamedTempFile::new_in(dir).map_err(to_error)?;
    temp_file.write_all(bytes).map_err(to_error)?;
    temp_file.as_file().sync_all().map_err(to_error)?;

    // Dropping the returned handle on failure deletes the temp file
    temp_file.persist(path).map_err(|err| StoreError::Replace {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}

/// Read file content, `None` if the file doesn't exist
pub async fn read_file(path: &Path) -> StoreResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
