//! スナップショットファイル
//!
//! 最後に書き出したリリースIDを10進数テキストで保持し、次回実行のシードにする。
//! 書き出しは末尾改行なし、読み込みは前後の空白を除去してからパースする。

use crate::error::{ReleaseError, Result};
use crate::model::ReleaseId;
use std::path::{Path, PathBuf};

pub const DEFAULT_SNAPSHOT_FILE: &str = "release.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存済みのリリースIDを読み込む（ファイルが無ければ `None`）
    pub fn read(&self) -> Result<Option<ReleaseId>> {
        let exists = self
            .path
            .try_exists()
            .map_err(|e| ReleaseError::io(&self.path, e))?;
        if !exists {
            tracing::debug!("Snapshot not found: {}", self.path.display());
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ReleaseError::io(&self.path, e))?;
        let trimmed = content.trim();
        let id = trimmed
            .parse::<ReleaseId>()
            .map_err(|e| ReleaseError::Snapshot {
                path: self.path.clone(),
                message: format!("'{}' は10進数のリリースIDではありません ({})", trimmed, e),
            })?;

        tracing::debug!("Loaded snapshot {} from {}", id, self.path.display());
        Ok(Some(id))
    }

    /// リリースIDを書き出す（既存の内容は上書き）
    pub fn write(&self, id: ReleaseId) -> Result<()> {
        if let Some(parent) = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && !p.exists())
        {
            std::fs::create_dir_all(parent).map_err(|e| ReleaseError::io(parent, e))?;
        }

        std::fs::write(&self.path, id.to_string()).map_err(|e| ReleaseError::io(&self.path, e))?;
        tracing::debug!("Saved snapshot {} to {}", id, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_snapshot() {
        let temp_dir = tempdir().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join(DEFAULT_SNAPSHOT_FILE));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_write_exact_text() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(DEFAULT_SNAPSHOT_FILE);
        let store = SnapshotStore::new(&path);

        std::fs::write(&path, "123456\n").unwrap();
        store.write(ReleaseId::new(7)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7");
        assert_eq!(store.read().unwrap(), Some(ReleaseId::new(7)));
    }

    #[test]
    fn test_read_tolerates_surrounding_whitespace() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(DEFAULT_SNAPSHOT_FILE);
        std::fs::write(&path, "  41\n").unwrap();

        assert_eq!(SnapshotStore::new(&path).read().unwrap(), Some(ReleaseId::new(41)));
    }

    #[test]
    fn test_read_garbage_snapshot() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(DEFAULT_SNAPSHOT_FILE);
        std::fs::write(&path, "seven").unwrap();

        let err = SnapshotStore::new(&path).read().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Snapshot);
    }

    #[test]
    fn test_write_creates_parent_dir() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state").join(DEFAULT_SNAPSHOT_FILE);

        SnapshotStore::new(&path).write(ReleaseId::new(1)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");
    }
}
