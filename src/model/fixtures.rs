// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::app::AppModel;
use super::ids::{ColumnId, RowId, TableId, WorkspaceId};
use super::workspace::{Column, ColumnKind, Row, Table, Workspace};

pub(crate) fn wid(value: &str) -> WorkspaceId {
    WorkspaceId::new(value).expect("workspace id")
}

pub(crate) fn tid(value: &str) -> TableId {
    TableId::new(value).expect("table id")
}

pub(crate) fn cid(value: &str) -> ColumnId {
    ColumnId::new(value).expect("column id")
}

pub(crate) fn rid(value: &str) -> RowId {
    RowId::new(value).expect("row id")
}

/// Tasks table: Title (text), Status (select Todo/Doing/Done), Priority (select), three rows.
pub(crate) fn tasks_table() -> Table {
    let mut table = Table::new(tid("t:tasks"), "Tasks");

    let mut status = Column::new(cid("c:status"), "Status", ColumnKind::Select, 1);
    status.set_options(vec!["Todo".to_owned(), "Doing".to_owned(), "Done".to_owned()]);
    let mut priority = Column::new(cid("c:priority"), "Priority", ColumnKind::Select, 2);
    priority.set_options(vec!["Low".to_owned(), "High".to_owned()]);

    table.columns_mut().extend([
        Column::new(cid("c:title"), "Title", ColumnKind::Text, 0),
        status,
        priority,
    ]);

    for (row_id, title, state) in [
        ("r:1", "Write parser", Some("Done")),
        ("r:2", "Write resolver", Some("Doing")),
        ("r:3", "Ship it", None),
    ] {
        let mut row = Row::new(rid(row_id));
        row.set_value(cid("c:title"), title.into());
        if let Some(state) = state {
            row.set_value(cid("c:status"), state.into());
        }
        table.rows_mut().push(row);
    }

    table
}

/// `Alpha` = [Tasks, Bugs, Notes], `Beta` = [Roadmap]. Nothing selected.
pub(crate) fn sample_model() -> AppModel {
    let mut alpha = Workspace::new(wid("w:alpha"), "Alpha");
    alpha.tables_mut().extend([
        tasks_table(),
        Table::new(tid("t:bugs"), "Bugs"),
        Table::new(tid("t:notes"), "Notes"),
    ]);

    let mut beta = Workspace::new(wid("w:beta"), "Beta");
    beta.tables_mut()
        .push(Table::new(tid("t:roadmap"), "Roadmap"));

    AppModel::new(vec![alpha, beta])
}

/// [`sample_model`] with `Alpha:Tasks` selected.
pub(crate) fn sample_model_at_tasks() -> AppModel {
    let mut model = sample_model();
    model
        .navigation_mut()
        .select_workspace(Some(wid("w:alpha")));
    model.navigation_mut().select_table(Some(tid("t:tasks")));
    model
}
