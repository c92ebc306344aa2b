// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Workspace folder persistence helpers:
/// json conversion, backup naming, and safe filesystem writes.

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppModelJson {
    #[serde(default)]
    dbs: Vec<WorkspaceJson>,
    #[serde(rename = "currentDBId", default, skip_serializing_if = "Option::is_none")]
    current_db_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_table_id: Option<String>,
    #[serde(default)]
    view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kanban_group_by_column_id: Option<String>,
    #[serde(default)]
    cursor: CursorJson,
    #[serde(default)]
    settings: SettingsJson,
}

#[derive(Debug, Serialize, Deserialize)]
struct WorkspaceJson {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tables: Vec<TableJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TableJson {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    columns: Vec<ColumnJson>,
    #[serde(default)]
    rows: Vec<RowJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<TableMetaJson>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableMetaJson {
    #[serde(default, deserialize_with = "deserialize_widths")]
    column_widths: BTreeMap<String, u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ColumnJson {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
    #[serde(default)]
    order: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RowJson {
    id: String,
    #[serde(default)]
    values: BTreeMap<String, CellValue>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CursorJson {
    #[serde(default)]
    row: Option<u64>,
    #[serde(default)]
    col: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsJson {
    #[serde(default = "default_sidebar_open")]
    is_sidebar_open: bool,
    #[serde(default)]
    command_separator: String,
}

impl Default for SettingsJson {
    fn default() -> Self {
        Self {
            is_sidebar_open: default_sidebar_open(),
            command_separator: String::new(),
        }
    }
}

fn default_sidebar_open() -> bool {
    true
}

/// Widths written by other front ends may be fractional pixels.
fn deserialize_widths<'de, D>(deserializer: D) -> Result<BTreeMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter(|(_, width)| width.is_finite())
        .map(|(column_id, width)| (column_id, width.max(0.0).round() as u32))
        .collect())
}

fn encode_model(model: &AppModel, path: &Path) -> Result<String, StoreError> {
    let json = model_to_json(model);
    let mut text = serde_json::to_string_pretty(&json).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    Ok(text)
}

fn decode_model(text: &str, path: &Path) -> Result<AppModel, StoreError> {
    let json: AppModelJson = serde_json::from_str(text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    model_from_json(json)
}

fn model_to_json(model: &AppModel) -> AppModelJson {
    let nav = model.navigation();
    let cursor = nav.cursor();
    AppModelJson {
        dbs: model.workspaces().iter().map(workspace_to_json).collect(),
        current_db_id: nav.current_workspace_id().map(ToString::to_string),
        current_table_id: nav.current_table_id().map(ToString::to_string),
        view: nav.view().as_str().to_owned(),
        kanban_group_by_column_id: nav.group_by_column_id().map(ToString::to_string),
        cursor: CursorJson {
            row: cursor.row.map(|row| row.get() as u64),
            col: cursor.col.map(|col| col.get() as u64),
        },
        settings: SettingsJson {
            is_sidebar_open: model.settings().sidebar_open(),
            command_separator: model.settings().command_separator().to_string(),
        },
    }
}

fn workspace_to_json(workspace: &Workspace) -> WorkspaceJson {
    WorkspaceJson {
        id: workspace.workspace_id().to_string(),
        name: workspace.name().to_owned(),
        tables: workspace.tables().iter().map(table_to_json).collect(),
    }
}

fn table_to_json(table: &Table) -> TableJson {
    let meta = (!table.column_widths().is_empty()).then(|| TableMetaJson {
        column_widths: table
            .column_widths()
            .iter()
            .map(|(column_id, width)| (column_id.to_string(), *width))
            .collect(),
    });

    TableJson {
        id: table.table_id().to_string(),
        name: table.name().to_owned(),
        columns: table
            .columns()
            .iter()
            .map(|column| ColumnJson {
                id: column.column_id().to_string(),
                name: column.name().to_owned(),
                kind: column.kind().as_str().to_owned(),
                options: column.options().to_vec(),
                order: column.display_order(),
            })
            .collect(),
        rows: table
            .rows()
            .iter()
            .map(|row| RowJson {
                id: row.row_id().to_string(),
                values: row
                    .values()
                    .iter()
                    .map(|(column_id, value)| (column_id.to_string(), value.clone()))
                    .collect(),
            })
            .collect(),
        meta,
    }
}

fn model_from_json(json: AppModelJson) -> Result<AppModel, StoreError> {
    let workspaces = json
        .dbs
        .into_iter()
        .map(workspace_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    let mut model = AppModel::new(workspaces);

    let nav = model.navigation_mut();
    nav.select_workspace(optional_id("currentDBId", json.current_db_id)?);
    nav.select_table(optional_id("currentTableId", json.current_table_id)?);
    nav.set_cursor(Cursor::new(
        position(json.cursor.row),
        position(json.cursor.col),
    ));
    nav.set_view(ViewMode::parse_keyword(&json.view).unwrap_or_default());
    nav.set_group_by_column_id(optional_id(
        "kanbanGroupByColumnId",
        json.kanban_group_by_column_id,
    )?);

    let separator = json
        .settings
        .command_separator
        .chars()
        .next()
        .and_then(CommandSeparator::from_char)
        .unwrap_or_default();
    model.set_settings(Settings::new(json.settings.is_sidebar_open, separator));

    model.repair_navigation();
    Ok(model)
}

fn workspace_from_json(json: WorkspaceJson) -> Result<Workspace, StoreError> {
    let mut workspace = Workspace::new(parse_id("dbs[].id", json.id)?, json.name);
    for table in json.tables {
        workspace.tables_mut().push(table_from_json(table)?);
    }
    Ok(workspace)
}

fn table_from_json(json: TableJson) -> Result<Table, StoreError> {
    let mut table = Table::new(parse_id("tables[].id", json.id)?, json.name);

    for column_json in json.columns {
        let kind = column_json.kind.parse::<ColumnKind>().unwrap_or_default();
        let mut column = Column::new(
            parse_id("columns[].id", column_json.id)?,
            column_json.name,
            kind,
            column_json.order,
        );
        column.set_options(column_json.options);
        table.columns_mut().push(column);
    }

    for row_json in json.rows {
        let mut row = Row::new(parse_id("rows[].id", row_json.id)?);
        for (column_id, value) in row_json.values {
            row.set_value(parse_id("rows[].values", column_id)?, value);
        }
        table.rows_mut().push(row);
    }

    for (column_id, width) in json.meta.unwrap_or_default().column_widths {
        table.column_widths_mut().insert(
            parse_id("meta.columnWidths", column_id)?,
            width.max(MIN_COLUMN_WIDTH),
        );
    }

    Ok(table)
}

fn parse_id<T>(field: &'static str, value: String) -> Result<Id<T>, StoreError> {
    Id::new(value.clone()).map_err(|source| StoreError::InvalidId {
        field,
        value,
        source: Box::new(source),
    })
}

/// Absent and empty pointers both mean "unset".
fn optional_id<T>(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<Id<T>>, StoreError> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| parse_id(field, value))
        .transpose()
}

fn position(value: Option<u64>) -> Option<NonZeroUsize> {
    value
        .and_then(|value| usize::try_from(value).ok())
        .and_then(NonZeroUsize::new)
}

fn archive_info(archive_id: ArchiveId, path: &Path) -> Result<ArchiveInfo, StoreError> {
    let metadata = fs::metadata(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
    Ok(ArchiveInfo::new(archive_id, metadata.len(), modified))
}

/// Orders archives with the same timestamp by their collision suffix (`-2` after the bare name).
fn archive_order_key(archive_id: &ArchiveId) -> (&str, u32) {
    let stem = archive_id
        .as_str()
        .strip_suffix(ArchiveId::EXTENSION)
        .unwrap_or(archive_id.as_str());
    let timestamp_len = BACKUP_PREFIX.len() + "YYYYMMDD-HHMMSS".len();
    if stem.len() > timestamp_len && stem.is_char_boundary(timestamp_len) {
        let (base, suffix) = stem.split_at(timestamp_len);
        if let Some(sequence) = suffix.strip_prefix('-').and_then(|s| s.parse::<u32>().ok()) {
            return (base, sequence);
        }
    }
    (stem, 1)
}

/// `YYYYMMDD-HHMMSS` in UTC.
fn utc_timestamp_name(at: SystemTime) -> String {
    DateTime::<Utc>::from(at)
        .format(BACKUP_TIMESTAMP_FORMAT)
        .to_string()
}

/// Creates `dir` (one level) unless it already exists; refuses symlinks and non-directories.
fn create_dir_safe(dir: &Path) -> Result<(), StoreError> {
    match fs::symlink_metadata(dir) {
        Ok(md) => {
            if md.file_type().is_symlink() {
                return Err(StoreError::SymlinkRefused {
                    path: dir.to_path_buf(),
                });
            }
            if !md.is_dir() {
                return Err(StoreError::Io {
                    path: dir.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::AlreadyExists, "expected directory"),
                });
            }
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        Err(source) => Err(StoreError::Io {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

/// Writes `contents` to `path` (a direct child of `dir`) via temp file + rename.
fn write_atomic(
    dir: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = dir.join(format!(
        ".tablane.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let handle = fs::File::open(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            handle.sync_all().map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
