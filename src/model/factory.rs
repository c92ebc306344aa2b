// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Constructors that mint fresh ids.
//!
//! These are the only places that call [`Id::generate`](super::Id::generate); the command
//! executor receives ready-made entities so that it stays deterministic.

use super::app::AppModel;
use super::ids::{ColumnId, RowId, TableId, WorkspaceId};
use super::workspace::{Column, ColumnKind, Row, Table, Workspace};

pub const DEFAULT_WORKSPACE_NAME: &str = "My Workspace";
pub const DEFAULT_TABLE_NAME: &str = "Tasks";

pub fn new_workspace(name: impl Into<String>) -> Workspace {
    Workspace::new(WorkspaceId::generate(), name)
}

pub fn new_table(name: impl Into<String>) -> Table {
    Table::new(TableId::generate(), name)
}

pub fn new_row() -> Row {
    Row::new(RowId::generate())
}

pub fn new_column(
    name: impl Into<String>,
    kind: ColumnKind,
    options: Vec<String>,
    display_order: i64,
) -> Column {
    let mut column = Column::new(ColumnId::generate(), name, kind, display_order);
    if kind == ColumnKind::Select {
        column.set_options(options);
    }
    column
}

/// A "Tasks" table with Title/Status/Priority columns and one sample row.
pub fn default_table(name: impl Into<String>) -> Table {
    let mut table = new_table(name);

    let title = new_column("Title", ColumnKind::Text, Vec::new(), 0);
    let status = new_column(
        "Status",
        ColumnKind::Select,
        vec!["Todo".to_owned(), "Doing".to_owned(), "Done".to_owned()],
        1,
    );
    let priority = new_column(
        "Priority",
        ColumnKind::Select,
        vec!["Low".to_owned(), "Med".to_owned(), "High".to_owned()],
        2,
    );

    let mut row = new_row();
    row.set_value(title.column_id().clone(), "Sample task".into());
    row.set_value(status.column_id().clone(), "Todo".into());
    row.set_value(priority.column_id().clone(), "Med".into());

    table.columns_mut().extend([title, status, priority]);
    table.rows_mut().push(row);
    table
}

pub fn default_workspace(name: impl Into<String>) -> Workspace {
    let mut workspace = new_workspace(name);
    workspace
        .tables_mut()
        .push(default_table(DEFAULT_TABLE_NAME));
    workspace
}

/// Model used when no snapshot exists yet: one default workspace, nothing selected.
pub fn initial_model() -> AppModel {
    AppModel::new(vec![default_workspace(DEFAULT_WORKSPACE_NAME)])
}

#[cfg(test)]
mod tests {
    use super::{default_table, initial_model, new_column};
    use crate::model::ColumnKind;

    #[test]
    fn default_table_has_ordered_seed_columns() {
        let table = default_table("Tasks");
        let names = table
            .ordered_columns()
            .into_iter()
            .map(|c| c.name().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Title", "Status", "Priority"]);
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn initial_model_selects_nothing() {
        let model = initial_model();
        assert_eq!(model.workspaces().len(), 1);
        assert!(model.navigation().current_workspace_id().is_none());
        assert!(model.settings().sidebar_open());
    }

    #[test]
    fn options_are_dropped_for_non_select_columns() {
        let column = new_column("Due", ColumnKind::Date, vec!["x".to_owned()], 0);
        assert!(column.options().is_empty());
    }
}
