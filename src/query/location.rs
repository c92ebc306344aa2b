// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{AppModel, Level, Table, Workspace};

const UNSET: &str = "–";

pub fn current_workspace(model: &AppModel) -> Option<&Workspace> {
    model.current_workspace()
}

pub fn current_table(model: &AppModel) -> Option<&Table> {
    model.current_table()
}

/// One clickable segment of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    level: Level,
    label: String,
    enabled: bool,
}

impl Breadcrumb {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Disabled crumbs have nothing selected at their level.
    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Workspace, table, row and column crumbs, always four, shallowest first.
pub fn breadcrumbs(model: &AppModel) -> [Breadcrumb; 4] {
    let cursor = model.navigation().cursor();
    let workspace = current_workspace(model).map(|w| w.name().to_owned());
    let table = current_table(model).map(|t| t.name().to_owned());

    [
        Breadcrumb {
            level: Level::Workspace,
            enabled: workspace.is_some(),
            label: workspace.unwrap_or_else(|| "(no ws)".to_owned()),
        },
        Breadcrumb {
            level: Level::Table,
            enabled: table.is_some(),
            label: table.unwrap_or_else(|| "(no table)".to_owned()),
        },
        Breadcrumb {
            level: Level::Row,
            enabled: cursor.row.is_some(),
            label: format!("Row: {}", cursor.row.map_or("—".to_owned(), |r| r.to_string())),
        },
        Breadcrumb {
            level: Level::Column,
            enabled: cursor.col.is_some(),
            label: format!("Col: {}", cursor.col.map_or("—".to_owned(), |c| c.to_string())),
        },
    ]
}

/// Compact address `ws : table : row : col`, with `–` for unset levels.
pub fn path_label(model: &AppModel) -> String {
    let cursor = model.navigation().cursor();
    let workspace = current_workspace(model).map_or(UNSET, |w| w.name());
    let table = current_table(model).map_or(UNSET, |t| t.name());
    let row = cursor.row.map_or(UNSET.to_owned(), |r| r.to_string());
    let col = cursor.col.map_or(UNSET.to_owned(), |c| c.to_string());
    format!("{workspace} : {table} : {row} : {col}")
}
