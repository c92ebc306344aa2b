// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the app model on disk.
//!
//! The core never touches the filesystem; it only sees the two contracts below. The workspace
//! folder implements both: one snapshot file plus a `backups/` directory of point-in-time
//! archives.

use std::fmt;
use std::time::SystemTime;

use crate::model::AppModel;

mod auto_backup;
pub mod workspace_folder;

pub use auto_backup::{AutoBackup, AUTO_BACKUP_INTERVAL};
pub use workspace_folder::{StoreError, WorkspaceFolder, WriteDurability};

/// Read/write access to the full-model snapshot.
pub trait SnapshotStore {
    /// Returns `Ok(None)` when no snapshot has been saved yet.
    fn load(&self) -> Result<Option<AppModel>, StoreError>;

    fn save(&self, model: &AppModel) -> Result<(), StoreError>;
}

/// Point-in-time copies of the model.
pub trait SnapshotArchive {
    fn create(&self, model: &AppModel) -> Result<ArchiveInfo, StoreError>;

    /// Newest first.
    fn list(&self) -> Result<Vec<ArchiveInfo>, StoreError>;

    fn fetch(&self, archive_id: &ArchiveId) -> Result<AppModel, StoreError>;
}

/// Name of an archive file inside the backups directory, e.g. `backup-20260101-120000.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchiveId(String);

impl ArchiveId {
    pub const EXTENSION: &'static str = ".json";

    /// Accepts a plain `*.json` file name; anything that could escape the backups directory is
    /// rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, StoreError> {
        let value = value.into();
        let stem = value.strip_suffix(Self::EXTENSION).unwrap_or_default();
        let valid = !stem.is_empty()
            && !value.starts_with('.')
            && !value
                .chars()
                .any(|ch| matches!(ch, '/' | '\\' | ':') || ch.is_control());
        if !valid {
            return Err(StoreError::InvalidArchiveId { value });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveInfo {
    archive_id: ArchiveId,
    size: u64,
    modified: SystemTime,
}

impl ArchiveInfo {
    pub fn new(archive_id: ArchiveId, size: u64, modified: SystemTime) -> Self {
        Self {
            archive_id,
            size,
            modified,
        }
    }

    pub fn archive_id(&self) -> &ArchiveId {
        &self.archive_id
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ArchiveId;

    #[rstest]
    #[case("backup-20260101-120000.json", true)]
    #[case("backup-20260101-120000-2.json", true)]
    #[case("manual copy.json", true)]
    #[case(".json", false)]
    #[case(".hidden.json", false)]
    #[case("backup.txt", false)]
    #[case("../workspace.todo.json", false)]
    #[case("nested/backup.json", false)]
    #[case("c:backup.json", false)]
    fn archive_ids_are_plain_json_file_names(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(ArchiveId::new(value).is_ok(), valid, "{value}");
    }
}
