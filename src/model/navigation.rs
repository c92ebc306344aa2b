// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::num::NonZeroUsize;

use super::ids::{ColumnId, TableId, WorkspaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Kanban,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Kanban => "kanban",
        }
    }

    pub fn parse_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("table") {
            Some(Self::Table)
        } else if word.eq_ignore_ascii_case("kanban") {
            Some(Self::Kanban)
        } else {
            None
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Depth of the navigation hierarchy, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Workspace,
    Table,
    Row,
    Column,
}

/// Positional (1-based) pointer into the current table.
///
/// The two fields are independent: neither is validated against the table's actual size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub row: Option<NonZeroUsize>,
    pub col: Option<NonZeroUsize>,
}

impl Cursor {
    pub const EMPTY: Self = Self { row: None, col: None };

    pub fn new(row: Option<NonZeroUsize>, col: Option<NonZeroUsize>) -> Self {
        Self { row, col }
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_none() && self.col.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    current_workspace_id: Option<WorkspaceId>,
    current_table_id: Option<TableId>,
    cursor: Cursor,
    view: ViewMode,
    group_by_column_id: Option<ColumnId>,
}

impl NavigationState {
    pub fn current_workspace_id(&self) -> Option<&WorkspaceId> {
        self.current_workspace_id.as_ref()
    }

    pub fn current_table_id(&self) -> Option<&TableId> {
        self.current_table_id.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn group_by_column_id(&self) -> Option<&ColumnId> {
        self.group_by_column_id.as_ref()
    }

    /// Selects a workspace. The table pointer and the cursor always reset.
    pub fn select_workspace(&mut self, workspace_id: Option<WorkspaceId>) {
        self.current_workspace_id = workspace_id;
        self.current_table_id = None;
        self.cursor = Cursor::EMPTY;
    }

    /// Selects a table inside the current workspace. The cursor always resets.
    pub fn select_table(&mut self, table_id: Option<TableId>) {
        self.current_table_id = table_id;
        self.cursor = Cursor::EMPTY;
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn set_cursor_row(&mut self, row: Option<NonZeroUsize>) {
        self.cursor.row = row;
    }

    pub fn set_cursor_col(&mut self, col: Option<NonZeroUsize>) {
        self.cursor.col = col;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn set_group_by_column_id(&mut self, column_id: Option<ColumnId>) {
        self.group_by_column_id = column_id;
    }

    /// Clears every pointer and the cursor ("go home"). View mode and group-by survive.
    pub fn reset_to_root(&mut self) {
        self.current_workspace_id = None;
        self.current_table_id = None;
        self.cursor = Cursor::EMPTY;
    }

    /// Deepest level that currently has a value, or `None` at the root.
    pub fn depth(&self) -> Option<Level> {
        if self.cursor.col.is_some() {
            Some(Level::Column)
        } else if self.cursor.row.is_some() {
            Some(Level::Row)
        } else if self.current_table_id.is_some() {
            Some(Level::Table)
        } else if self.current_workspace_id.is_some() {
            Some(Level::Workspace)
        } else {
            None
        }
    }

    /// Clears exactly one field: the deepest one that is set.
    ///
    /// Returns `false` when already at the root.
    pub fn ascend_one(&mut self) -> bool {
        if self.cursor.col.is_some() {
            self.cursor.col = None;
        } else if self.cursor.row.is_some() {
            self.cursor.row = None;
        } else if self.current_table_id.is_some() {
            self.current_table_id = None;
        } else if self.current_workspace_id.is_some() {
            self.current_workspace_id = None;
        } else {
            return false;
        }
        true
    }

    /// Keeps pointers down to `level` and clears everything deeper.
    pub fn truncate_to(&mut self, level: Level) {
        match level {
            Level::Workspace => {
                self.current_table_id = None;
                self.cursor = Cursor::EMPTY;
            }
            Level::Table => self.cursor = Cursor::EMPTY,
            Level::Row => self.cursor.col = None,
            Level::Column => {}
        }
    }
}
