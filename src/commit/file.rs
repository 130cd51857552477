//! File-backed committer
//!
//! Persists committed cursors to a JSON file with atomic writes.

use super::PartitionCommitter;
use crate::error::{Error, Result};
use crate::types::{Offset, PartitionId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Contents of a cursor file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CursorFile {
    /// Committed cursor per partition
    #[serde(default)]
    pub cursors: BTreeMap<PartitionId, CommittedCursor>,
}

impl CursorFile {
    /// Create an empty cursor file
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the committed offset for a partition
    pub fn offset(&self, partition: &PartitionId) -> Option<Offset> {
        self.cursors.get(partition).map(|c| c.offset)
    }
}

/// A committed cursor entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedCursor {
    /// Committed offset
    pub offset: Offset,
    /// When the offset was committed
    pub committed_at: DateTime<Utc>,
}

/// Committer that writes every acknowledgment to a cursor file
#[derive(Debug, Clone)]
pub struct FileCommitter {
    /// Path to the cursor file
    path: PathBuf,
    /// Current contents (cached)
    state: Arc<RwLock<CursorFile>>,
}

impl FileCommitter {
    /// Create a committer for `path`, loading existing cursors if present
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| Error::state(format!("Failed to read cursor file: {e}")))?;
            serde_json::from_str(&contents).map_err(|e| Error::state(format!("Failed to parse cursor file: {e}")))?
        } else {
            CursorFile::new()
        };

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Read a cursor file without opening a committer
    pub fn read(path: impl AsRef<Path>) -> Result<CursorFile> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| Error::state(format!("Failed to parse cursor file: {e}")))
    }

    /// Save current cursors to file
    pub async fn save(&self) -> Result<()> {
        let state = self.state.read().await;
        persist(&self.path, &state).await
    }

    /// Committed offset for a partition
    pub async fn committed_offset(&self, partition: &PartitionId) -> Option<Offset> {
        self.state.read().await.offset(partition)
    }

    /// Snapshot of all committed cursors
    pub async fn cursors(&self) -> CursorFile {
        self.state.read().await.clone()
    }

    /// Get the cursor file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PartitionCommitter for FileCommitter {
    async fn commit(&self, partition: &PartitionId, offset: Offset) -> Result<()> {
        let mut state = self.state.write().await;

        // The cache only changes once the file is written
        let mut updated = state.clone();
        updated.cursors.insert(
            partition.clone(),
            CommittedCursor {
                offset,
                committed_at: Utc::now(),
            },
        );
        persist(&self.path, &updated)
            .await
            .map_err(|e| Error::commit(partition.clone(), e.to_string()))?;

        *state = updated;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Write `file` to `path` via a temp file and rename
async fn persist(path: &Path, file: &CursorFile) -> Result<()> {
    let contents = serde_json::to_string_pretty(file)
        .map_err(|e| Error::state(format!("Failed to serialize cursors: {e}")))?;

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, &contents)
        .await
        .map_err(|e| Error::state(format!("Failed to write cursor file: {e}")))?;

    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| Error::state(format!("Failed to rename cursor file: {e}")))?;

    Ok(())
}
