// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command language and state transitions.
//!
//! `parse` turns typed input into an [`Action`]; `execute` applies an action to an [`AppModel`]
//! and returns the next model. Both are pure: no I/O, no panics on malformed input, and a failed
//! lookup leaves navigation where it was.
//!
//! [`AppModel`]: crate::model::AppModel

use std::fmt;
use std::num::NonZeroUsize;

use crate::model::{
    CellValue, ColumnId, ColumnKind, CommandSeparator, Level, Row, RowId, Table, TableId,
    ViewMode, Workspace, WorkspaceId,
};

mod execute;
mod parse;
pub mod path;
mod resolve;

pub use execute::{execute, try_apply_edit};
pub use parse::{parse, parse_with_separator};
pub use path::{PathFragment, PathSyntaxError, RelativeTarget};
pub use resolve::{resolve, resolve_group_by};

/// A fully parsed command, exhaustively handled by [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Navigate to `path`; `None` goes home (every pointer unset).
    Select { path: Option<PathFragment> },
    /// Optionally navigate, then switch the view. `group_by` only applies to kanban.
    ChangeView {
        mode: ViewMode,
        path: Option<PathFragment>,
        group_by: Option<String>,
    },
    /// Structural edits and direct (non-path) navigation.
    Edit(EditOp),
    Unknown,
}

impl From<EditOp> for Action {
    fn from(op: EditOp) -> Self {
        Self::Edit(op)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    AddWorkspace {
        workspace: Workspace,
    },
    RenameWorkspace {
        workspace_id: WorkspaceId,
        name: String,
    },
    RemoveWorkspace {
        workspace_id: WorkspaceId,
    },
    AddTable {
        workspace_id: WorkspaceId,
        table: Table,
    },
    RenameTable {
        table_id: TableId,
        name: String,
    },
    RemoveTable {
        table_id: TableId,
    },
    AddRow {
        table_id: TableId,
        row: Row,
    },
    RemoveRow {
        table_id: TableId,
        row_id: RowId,
    },
    AddColumn {
        table_id: TableId,
        column_id: ColumnId,
        name: String,
        kind: ColumnKind,
        options: Vec<String>,
    },
    RenameColumn {
        table_id: TableId,
        column_id: ColumnId,
        name: String,
    },
    /// Moves a column to a 1-based display position (clamped to the column count).
    MoveColumn {
        table_id: TableId,
        column_id: ColumnId,
        position: NonZeroUsize,
    },
    RemoveColumn {
        table_id: TableId,
        column_id: ColumnId,
    },
    /// A `null` value empties the cell.
    EditCell {
        table_id: TableId,
        row_id: RowId,
        column_id: ColumnId,
        value: CellValue,
    },
    ResizeColumn {
        table_id: TableId,
        column_id: ColumnId,
        width: u32,
    },
    SelectWorkspace {
        workspace_id: WorkspaceId,
    },
    SelectTable {
        workspace_id: WorkspaceId,
        table_id: TableId,
    },
    SetGroupBy {
        column_id: Option<ColumnId>,
    },
    GoToLevel {
        level: Level,
    },
    ToggleSidebar,
    SetCommandSeparator {
        separator: CommandSeparator,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Workspace,
    Table,
    Column,
    Row,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Workspace => "workspace",
            Self::Table => "table",
            Self::Column => "column",
            Self::Row => "row",
        })
    }
}

/// Why an [`EditOp`] was rejected. [`execute`] swallows these; [`try_apply_edit`] reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    NotFound { kind: EntityKind, id: String },
    AlreadyExists { kind: EntityKind, id: String },
    NoCurrentTable,
}

impl EditError {
    fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    fn already_exists(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::AlreadyExists {
            kind,
            id: id.to_string(),
        }
    }
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found (id={id})"),
            Self::AlreadyExists { kind, id } => write!(f, "{kind} already exists (id={id})"),
            Self::NoCurrentTable => f.write_str("no table is selected"),
        }
    }
}

impl std::error::Error for EditError {}
