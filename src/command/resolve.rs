// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Path resolution against the workspace list and the current navigation state.
//!
//! Tokens are either case-insensitive names or 1-based positions (ASCII digits only). Resolution
//! returns `None` when nothing should change; callers keep their current state in that case.

use std::num::NonZeroUsize;

use super::path::{PathFragment, RelativeTarget};
use crate::model::{ColumnId, Cursor, NavigationState, Table, Workspace};

/// Computes the navigation state `path` leads to, or `None` if it leads nowhere.
///
/// Absolute multi-segment paths commit the workspace even when the table segment does not
/// resolve; every other failure is all-or-nothing.
pub fn resolve(
    workspaces: &[Workspace],
    nav: &NavigationState,
    path: &PathFragment,
) -> Option<NavigationState> {
    match path {
        PathFragment::Absolute(segments) => resolve_absolute(workspaces, nav, segments),
        PathFragment::Ascend(levels) => Some(ascend(nav, *levels)),
        PathFragment::Descend(target) => resolve_relative(workspaces, nav, target),
    }
}

/// Resolves a kanban group-by token against `table`: a 1-based position in display order, or a
/// case-insensitive column name.
pub fn resolve_group_by(table: &Table, token: &str) -> Option<ColumnId> {
    let token = token.trim();
    let columns = table.ordered_columns();
    let column = if is_positional(token) {
        positional_index(token).and_then(|index| columns.get(index.get() - 1).copied())
    } else {
        columns.into_iter().find(|c| names_match(c.name(), token))
    };
    column.map(|c| c.column_id().clone())
}

fn resolve_absolute(
    workspaces: &[Workspace],
    nav: &NavigationState,
    segments: &[String],
) -> Option<NavigationState> {
    let mut next = nav.clone();

    // Inside a workspace a lone token prefers a workspace *name* over a table in the current
    // workspace.
    if let ([token], Some(current_id)) = (segments, nav.current_workspace_id()) {
        if let Some(workspace) = workspace_by_name(workspaces, token) {
            next.select_workspace(Some(workspace.workspace_id().clone()));
            return Some(next);
        }
        let current = workspaces.iter().find(|w| w.workspace_id() == current_id)?;
        let table = find_table(current, token)?;
        next.select_table(Some(table.table_id().clone()));
        return Some(next);
    }

    let (workspace_token, rest) = segments.split_first()?;
    let workspace = find_workspace(workspaces, workspace_token)?;
    next.select_workspace(Some(workspace.workspace_id().clone()));

    let Some(table_token) = rest.first() else {
        return Some(next);
    };
    let Some(table) = find_table(workspace, table_token) else {
        return Some(next);
    };
    next.select_table(Some(table.table_id().clone()));

    let row = rest.get(1).and_then(|token| positional_index(token));
    let col = rest.get(2).and_then(|token| positional_index(token));
    next.set_cursor(Cursor::new(row, col));
    Some(next)
}

fn ascend(nav: &NavigationState, levels: usize) -> NavigationState {
    let mut next = nav.clone();
    for _ in 0..levels {
        if !next.ascend_one() {
            break;
        }
    }
    next
}

fn resolve_relative(
    workspaces: &[Workspace],
    nav: &NavigationState,
    target: &RelativeTarget,
) -> Option<NavigationState> {
    let current_id = nav.current_workspace_id()?;
    let workspace = workspaces.iter().find(|w| w.workspace_id() == current_id)?;
    let mut next = nav.clone();

    match target {
        RelativeTarget::One(token) if is_positional(token) => {
            next.set_cursor_row(Some(positional_index(token)?));
        }
        RelativeTarget::One(token) => {
            let table = find_table(workspace, token)?;
            next.select_table(Some(table.table_id().clone()));
        }
        RelativeTarget::Two(row, col) => {
            let row = positional_index(row)?;
            let col = positional_index(col)?;
            next.set_cursor(Cursor::new(Some(row), Some(col)));
        }
        RelativeTarget::ColumnOnly(col) => {
            next.set_cursor_col(Some(positional_index(col)?));
        }
        RelativeTarget::Three(table, row, col) => {
            let table = find_table(workspace, table)?;
            next.select_table(Some(table.table_id().clone()));
            next.set_cursor(Cursor::new(positional_index(row), positional_index(col)));
        }
    }

    Some(next)
}

fn find_workspace<'a>(workspaces: &'a [Workspace], token: &str) -> Option<&'a Workspace> {
    if is_positional(token) {
        return positional_index(token).and_then(|index| workspaces.get(index.get() - 1));
    }
    workspace_by_name(workspaces, token)
}

fn workspace_by_name<'a>(workspaces: &'a [Workspace], name: &str) -> Option<&'a Workspace> {
    workspaces.iter().find(|w| names_match(w.name(), name))
}

fn find_table<'a>(workspace: &'a Workspace, token: &str) -> Option<&'a Table> {
    let tables = workspace.tables();
    if is_positional(token) {
        return positional_index(token).and_then(|index| tables.get(index.get() - 1));
    }
    tables.iter().find(|t| names_match(t.name(), token))
}

fn names_match(name: &str, token: &str) -> bool {
    name == token || name.to_lowercase() == token.to_lowercase()
}

fn is_positional(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a 1-based position. `0`, overflow and non-digits are out of range.
fn positional_index(token: &str) -> Option<NonZeroUsize> {
    if !is_positional(token) {
        return None;
    }
    token.parse::<NonZeroUsize>().ok()
}

#[cfg(test)]
mod tests {
    use super::{is_positional, positional_index, resolve_group_by};
    use crate::model::fixtures::{cid, tasks_table};

    #[test]
    fn positional_tokens_are_ascii_digits_only() {
        assert!(is_positional("12"));
        assert!(!is_positional("+1"));
        assert!(!is_positional("1a"));
        assert!(!is_positional(""));
        assert_eq!(positional_index("007").map(|n| n.get()), Some(7));
        assert_eq!(positional_index("0"), None);
        assert_eq!(positional_index("99999999999999999999999999"), None);
    }

    #[test]
    fn group_by_resolves_position_in_display_order() {
        let table = tasks_table();
        assert_eq!(resolve_group_by(&table, "2"), Some(cid("c:status")));
        assert_eq!(resolve_group_by(&table, "3"), Some(cid("c:priority")));
        assert_eq!(resolve_group_by(&table, "4"), None);
        assert_eq!(resolve_group_by(&table, "0"), None);
    }

    #[test]
    fn group_by_resolves_name_case_insensitively() {
        let table = tasks_table();
        assert_eq!(resolve_group_by(&table, "status"), Some(cid("c:status")));
        assert_eq!(resolve_group_by(&table, "PRIORITY"), Some(cid("c:priority")));
        assert_eq!(resolve_group_by(&table, "Owner"), None);
    }
}
