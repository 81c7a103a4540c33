use std::path::{Path, PathBuf};

use crate::error::{MjError, Result};

/// Scratch directory for images in transit between the remote API and the
/// host framework. Created on first use; every file handed out is wrapped
/// in a [`ScratchFile`] guard so nothing is left behind.
#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reserve a uniquely named scratch path. The directory is created if
    /// missing; the file itself is written later by the caller.
    pub async fn scratch(&self, file_name: &str) -> Result<ScratchFile> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| MjError::Storage(format!("Failed to create cache dir: {}", e)))?;
        Ok(ScratchFile {
            path: self.root.join(file_name),
        })
    }

    pub fn grid_file_name(task_id: &str) -> String {
        format!("mj_grid_{}.webp", task_id)
    }

    pub fn single_file_name(message_id: &str, code: &str) -> String {
        format!("mj_single_{}_{}.png", message_id, code)
    }
}

/// Owned scratch path, removed on drop whatever the exit path was.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        // The file may never have been written; a missing file is fine.
        let _ = std::fs::remove_file(&self.path);
    }
}
