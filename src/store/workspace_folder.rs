// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{ArchiveId, ArchiveInfo, SnapshotArchive, SnapshotStore};
use crate::model::factory::initial_model;
use crate::model::{
    AppModel, CellValue, Column, ColumnKind, CommandSeparator, Cursor, Id, IdError, Row,
    Settings, Table, ViewMode, Workspace, MIN_COLUMN_WIDTH,
};

const SNAPSHOT_FILENAME: &str = "workspace.todo.json";
const BACKUPS_DIRNAME: &str = "backups";
const BACKUP_PREFIX: &str = "backup-";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: Box<IdError>,
    },
    InvalidArchiveId {
        value: String,
    },
    ArchiveNotFound {
        archive_id: ArchiveId,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id for {field}: {value:?}: {source}"),
            Self::InvalidArchiveId { value } => {
                write!(f, "invalid backup name {value:?} (expected a plain *.json file name)")
            }
            Self::ArchiveNotFound { archive_id } => write!(f, "backup not found: {archive_id}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::InvalidArchiveId { .. } => None,
            Self::ArchiveNotFound { .. } => None,
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// A directory holding `workspace.todo.json` and a `backups/` directory of archives.
#[derive(Debug, Clone)]
pub struct WorkspaceFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl WorkspaceFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILENAME)
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.root.join(BACKUPS_DIRNAME)
    }

    pub fn archive_path(&self, archive_id: &ArchiveId) -> PathBuf {
        self.backups_dir().join(archive_id.as_str())
    }

    /// Loads the snapshot, or writes and returns the initial model when there is none yet.
    pub fn load_or_init(&self) -> Result<AppModel, StoreError> {
        if let Some(model) = self.load()? {
            return Ok(model);
        }
        let model = initial_model();
        self.save(&model)?;
        Ok(model)
    }

    /// Replaces the snapshot with the contents of an archive and returns the restored model.
    pub fn restore(&self, archive_id: &ArchiveId) -> Result<AppModel, StoreError> {
        let model = self.fetch(archive_id)?;
        self.save(&model)?;
        Ok(model)
    }

    fn create_archive_at(
        &self,
        model: &AppModel,
        now: SystemTime,
    ) -> Result<ArchiveInfo, StoreError> {
        create_dir_safe(&self.backups_dir())?;

        let stem = format!("{BACKUP_PREFIX}{}", utc_timestamp_name(now));
        let mut sequence = 1_u32;
        let archive_id = loop {
            let name = if sequence == 1 {
                format!("{stem}{}", ArchiveId::EXTENSION)
            } else {
                format!("{stem}-{sequence}{}", ArchiveId::EXTENSION)
            };
            let archive_id = ArchiveId::new(name)?;
            if !self.archive_path(&archive_id).exists() {
                break archive_id;
            }
            sequence += 1;
        };

        let path = self.archive_path(&archive_id);
        let contents = encode_model(model, &path)?;
        write_atomic(&self.backups_dir(), &path, contents.as_bytes(), self.durability)?;
        archive_info(archive_id, &path)
    }
}

impl SnapshotStore for WorkspaceFolder {
    fn load(&self) -> Result<Option<AppModel>, StoreError> {
        let path = self.snapshot_path();
        match fs::read_to_string(&path) {
            Ok(text) => decode_model(&text, &path).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn save(&self, model: &AppModel) -> Result<(), StoreError> {
        let path = self.snapshot_path();
        let contents = encode_model(model, &path)?;
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        write_atomic(&self.root, &path, contents.as_bytes(), self.durability)
    }
}

impl SnapshotArchive for WorkspaceFolder {
    fn create(&self, model: &AppModel) -> Result<ArchiveInfo, StoreError> {
        self.create_archive_at(model, SystemTime::now())
    }

    fn list(&self) -> Result<Vec<ArchiveInfo>, StoreError> {
        let dir = self.backups_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: dir, source }),
        };

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let Ok(archive_id) = ArchiveId::new(name) else {
                continue;
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            out.push(archive_info(archive_id, &path)?);
        }

        out.sort_by(|a, b| {
            b.modified()
                .cmp(&a.modified())
                .then_with(|| {
                    archive_order_key(b.archive_id()).cmp(&archive_order_key(a.archive_id()))
                })
        });
        Ok(out)
    }

    fn fetch(&self, archive_id: &ArchiveId) -> Result<AppModel, StoreError> {
        let path = self.archive_path(archive_id);
        match fs::read_to_string(&path) {
            Ok(text) => decode_model(&text, &path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(StoreError::ArchiveNotFound {
                archive_id: archive_id.clone(),
            }),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

include!("workspace_folder/helpers.rs");
