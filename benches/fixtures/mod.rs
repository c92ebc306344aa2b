// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tablane::model::{
    AppModel, Column, ColumnId, ColumnKind, Row, RowId, Table, TableId, Workspace, WorkspaceId,
};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("tablane_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// `(workspaces, tables per workspace, rows per table)`.
    fn shape(self) -> (usize, usize, usize) {
        match self {
            Self::Small => (2, 3, 20),
            Self::Medium => (8, 8, 200),
            Self::Large => (24, 16, 1_000),
        }
    }

    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];
}

const STATUSES: [&str; 3] = ["Todo", "Doing", "Done"];

/// Workspaces `Workspace 1..`, each with tables `Table 1..` of Title/Status/Points columns.
///
/// Nothing is selected, so relative commands need a `/s` first.
pub fn model(case: Case) -> AppModel {
    let (workspaces, tables, rows) = case.shape();
    AppModel::new(
        (1..=workspaces)
            .map(|w| workspace(w, tables, rows))
            .collect(),
    )
}

fn workspace(index: usize, tables: usize, rows: usize) -> Workspace {
    let mut workspace = Workspace::new(
        WorkspaceId::new(format!("w{index}")).expect("valid workspace id"),
        format!("Workspace {index}"),
    );
    workspace
        .tables_mut()
        .extend((1..=tables).map(|t| table(index, t, rows)));
    workspace
}

fn table(workspace: usize, index: usize, rows: usize) -> Table {
    let mut table = Table::new(
        TableId::new(format!("w{workspace}-t{index}")).expect("valid table id"),
        format!("Table {index}"),
    );

    let title = ColumnId::new("title").expect("valid column id");
    let status = ColumnId::new("status").expect("valid column id");
    let points = ColumnId::new("points").expect("valid column id");

    let mut status_column = Column::new(status.clone(), "Status", ColumnKind::Select, 1);
    status_column.set_options(STATUSES.iter().map(|s| (*s).to_owned()).collect());
    table.columns_mut().extend([
        Column::new(title.clone(), "Title", ColumnKind::Text, 0),
        status_column,
        Column::new(points.clone(), "Points", ColumnKind::Number, 2),
    ]);

    for r in 1..=rows {
        let row_id = RowId::new(format!("w{workspace}-t{index}-r{r}")).expect("valid row id");
        let mut row = Row::new(row_id);
        row.set_value(title.clone(), format!("Task {r} of table {index}").into());
        if r % 7 != 0 {
            row.set_value(status.clone(), STATUSES[r % STATUSES.len()].into());
        }
        row.set_value(points.clone(), ((r * 13) % 8).into());
        table.rows_mut().push(row);
    }

    table
}

/// A mixed command script touching every path form, valid for every [`Case`].
pub fn command_script() -> Vec<&'static str> {
    vec![
        "/s Workspace 2:Table 3:4:2",
        "/s :5:1",
        "/s :_:3",
        "/s :Table 1",
        "/s :Table 2:3:1",
        "/s ::",
        "/s 1:2",
        "/s :9",
        "/v kanban by:Status",
        "/v table",
        "/s",
        "/s nowhere:at:all",
        "/v Workspace 1:Table 1 kanban by:2",
        "/s :::",
    ]
}
