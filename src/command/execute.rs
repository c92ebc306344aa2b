// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::path::PathFragment;
use super::resolve::{resolve, resolve_group_by};
use super::{Action, EditError, EditOp, EntityKind};
use crate::model::{AppModel, Column, ViewMode, MIN_COLUMN_WIDTH};

/// Applies `action` to a copy of `model` and returns the copy.
///
/// Total: rejected edits and unresolvable paths return an unchanged copy.
pub fn execute(model: &AppModel, action: &Action) -> AppModel {
    let mut next = model.clone();

    match action {
        Action::Select { path: None } => next.navigation_mut().reset_to_root(),
        Action::Select { path: Some(path) } => navigate(&mut next, path),
        Action::ChangeView {
            mode,
            path,
            group_by,
        } => {
            if let Some(path) = path {
                navigate(&mut next, path);
            }
            next.navigation_mut().set_view(*mode);
            if *mode == ViewMode::Kanban {
                let column_id = group_by
                    .as_deref()
                    .zip(next.current_table())
                    .and_then(|(token, table)| resolve_group_by(table, token));
                if let Some(column_id) = column_id {
                    next.navigation_mut()
                        .set_group_by_column_id(Some(column_id));
                }
            }
        }
        Action::Edit(op) => {
            if try_apply_edit(&mut next, op).is_err() {
                return model.clone();
            }
        }
        Action::Unknown => {}
    }

    next
}

fn navigate(model: &mut AppModel, path: &PathFragment) {
    if let Some(navigation) = resolve(model.workspaces(), model.navigation(), path) {
        model.set_navigation(navigation);
    }
}

/// Applies one edit in place, reporting why it was rejected.
///
/// Every lookup happens before the first mutation, so an `Err` leaves `model` untouched.
pub fn try_apply_edit(model: &mut AppModel, op: &EditOp) -> Result<(), EditError> {
    match op {
        EditOp::AddWorkspace { workspace } => {
            if model.workspace(workspace.workspace_id()).is_some() {
                return Err(EditError::already_exists(
                    EntityKind::Workspace,
                    workspace.workspace_id(),
                ));
            }
            model.workspaces_mut().push(workspace.clone());
            Ok(())
        }
        EditOp::RenameWorkspace { workspace_id, name } => {
            let workspace = model
                .workspace_mut(workspace_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Workspace, workspace_id))?;
            workspace.set_name(name.clone());
            Ok(())
        }
        EditOp::RemoveWorkspace { workspace_id } => {
            let index = model
                .workspaces()
                .iter()
                .position(|w| w.workspace_id() == workspace_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Workspace, workspace_id))?;
            model.workspaces_mut().remove(index);

            if model.navigation().current_workspace_id() == Some(workspace_id) {
                let fallback = model.workspaces().first().map(|w| {
                    (
                        w.workspace_id().clone(),
                        w.tables().first().map(|t| t.table_id().clone()),
                    )
                });
                let navigation = model.navigation_mut();
                match fallback {
                    Some((workspace_id, table_id)) => {
                        navigation.select_workspace(Some(workspace_id));
                        navigation.select_table(table_id);
                    }
                    None => navigation.select_workspace(None),
                }
            }
            clear_removed_group_by(model);
            Ok(())
        }
        EditOp::AddTable {
            workspace_id,
            table,
        } => {
            if model.find_table(table.table_id()).is_some() {
                return Err(EditError::already_exists(EntityKind::Table, table.table_id()));
            }
            let workspace = model
                .workspace_mut(workspace_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Workspace, workspace_id))?;
            workspace.tables_mut().push(table.clone());

            if model.navigation().current_workspace_id() == Some(workspace_id) {
                model
                    .navigation_mut()
                    .select_table(Some(table.table_id().clone()));
            }
            Ok(())
        }
        EditOp::RenameTable { table_id, name } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            table.set_name(name.clone());
            Ok(())
        }
        EditOp::RemoveTable { table_id } => {
            let workspace_id = model
                .find_table(table_id)
                .map(|(workspace_id, _)| workspace_id.clone())
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            let Some(workspace) = model.workspace_mut(&workspace_id) else {
                return Err(EditError::not_found(EntityKind::Workspace, &workspace_id));
            };
            workspace.tables_mut().retain(|t| t.table_id() != table_id);
            let fallback = workspace.tables().first().map(|t| t.table_id().clone());

            if model.navigation().current_table_id() == Some(table_id) {
                model.navigation_mut().select_table(fallback);
            }
            clear_removed_group_by(model);
            Ok(())
        }
        EditOp::AddRow { table_id, row } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            if table.row(row.row_id()).is_some() {
                return Err(EditError::already_exists(EntityKind::Row, row.row_id()));
            }
            table.rows_mut().push(row.clone());
            Ok(())
        }
        EditOp::RemoveRow { table_id, row_id } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            let before_len = table.rows().len();
            table.rows_mut().retain(|r| r.row_id() != row_id);
            if table.rows().len() == before_len {
                return Err(EditError::not_found(EntityKind::Row, row_id));
            }
            Ok(())
        }
        EditOp::AddColumn {
            table_id,
            column_id,
            name,
            kind,
            options,
        } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            if table.column(column_id).is_some() {
                return Err(EditError::already_exists(EntityKind::Column, column_id));
            }
            let mut column =
                Column::new(column_id.clone(), name.clone(), *kind, table.next_display_order());
            column.set_options(options.clone());
            table.columns_mut().push(column);
            Ok(())
        }
        EditOp::RenameColumn {
            table_id,
            column_id,
            name,
        } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            let column = table
                .columns_mut()
                .iter_mut()
                .find(|c| c.column_id() == column_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Column, column_id))?;
            column.set_name(name.clone());
            Ok(())
        }
        EditOp::MoveColumn {
            table_id,
            column_id,
            position,
        } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            let mut order = table
                .ordered_columns()
                .into_iter()
                .map(|c| c.column_id().clone())
                .collect::<Vec<_>>();
            let from = order
                .iter()
                .position(|id| id == column_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Column, column_id))?;
            let moved = order.remove(from);
            let to = (position.get() - 1).min(order.len());
            order.insert(to, moved);

            for column in table.columns_mut() {
                if let Some(index) = order.iter().position(|id| id == column.column_id()) {
                    column.set_display_order(index as i64);
                }
            }
            Ok(())
        }
        EditOp::RemoveColumn {
            table_id,
            column_id,
        } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            if table.column(column_id).is_none() {
                return Err(EditError::not_found(EntityKind::Column, column_id));
            }
            table.columns_mut().retain(|c| c.column_id() != column_id);
            for row in table.rows_mut() {
                row.values_mut().remove(column_id);
            }
            table.column_widths_mut().remove(column_id);

            if model.navigation().group_by_column_id() == Some(column_id) {
                model.navigation_mut().set_group_by_column_id(None);
            }
            Ok(())
        }
        EditOp::EditCell {
            table_id,
            row_id,
            column_id,
            value,
        } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            if table.column(column_id).is_none() {
                return Err(EditError::not_found(EntityKind::Column, column_id));
            }
            let row = table
                .rows_mut()
                .iter_mut()
                .find(|r| r.row_id() == row_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Row, row_id))?;
            row.set_value(column_id.clone(), value.clone());
            Ok(())
        }
        EditOp::ResizeColumn {
            table_id,
            column_id,
            width,
        } => {
            let table = model
                .table_mut(table_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Table, table_id))?;
            if table.column(column_id).is_none() {
                return Err(EditError::not_found(EntityKind::Column, column_id));
            }
            table
                .column_widths_mut()
                .insert(column_id.clone(), (*width).max(MIN_COLUMN_WIDTH));
            Ok(())
        }
        EditOp::SelectWorkspace { workspace_id } => {
            let first_table = model
                .workspace(workspace_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Workspace, workspace_id))?
                .tables()
                .first()
                .map(|t| t.table_id().clone());
            let navigation = model.navigation_mut();
            navigation.select_workspace(Some(workspace_id.clone()));
            navigation.select_table(first_table);
            Ok(())
        }
        EditOp::SelectTable {
            workspace_id,
            table_id,
        } => {
            let workspace = model
                .workspace(workspace_id)
                .ok_or_else(|| EditError::not_found(EntityKind::Workspace, workspace_id))?;
            if !workspace.contains_table(table_id) {
                return Err(EditError::not_found(EntityKind::Table, table_id));
            }
            let navigation = model.navigation_mut();
            navigation.select_workspace(Some(workspace_id.clone()));
            navigation.select_table(Some(table_id.clone()));
            Ok(())
        }
        EditOp::SetGroupBy { column_id } => {
            if let Some(column_id) = column_id {
                let table = model.current_table().ok_or(EditError::NoCurrentTable)?;
                if table.column(column_id).is_none() {
                    return Err(EditError::not_found(EntityKind::Column, column_id));
                }
            }
            model
                .navigation_mut()
                .set_group_by_column_id(column_id.clone());
            Ok(())
        }
        EditOp::GoToLevel { level } => {
            model.navigation_mut().truncate_to(*level);
            Ok(())
        }
        EditOp::ToggleSidebar => {
            let open = model.settings().sidebar_open();
            model.settings_mut().set_sidebar_open(!open);
            Ok(())
        }
        EditOp::SetCommandSeparator { separator } => {
            model.settings_mut().set_command_separator(*separator);
            Ok(())
        }
    }
}

/// Drops the group-by pointer once no table holds that column any more.
fn clear_removed_group_by(model: &mut AppModel) {
    let Some(column_id) = model.navigation().group_by_column_id() else {
        return;
    };
    let exists = model
        .workspaces()
        .iter()
        .flat_map(|workspace| workspace.tables())
        .any(|table| table.column(column_id).is_some());
    if !exists {
        model.navigation_mut().set_group_by_column_id(None);
    }
}
