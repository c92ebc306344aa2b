// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Workspaces own tables; tables own columns and rows. Navigation state points into this
//! hierarchy by id (workspace/table) and by 1-based position (cursor row/col).

pub mod app;
pub mod factory;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod navigation;
pub mod workspace;

pub use app::{AppModel, CommandSeparator, Settings};
pub use ids::{ColumnId, Id, IdError, RowId, TableId, WorkspaceId};
pub use navigation::{Cursor, Level, NavigationState, ViewMode};
pub use workspace::{
    CellValue, Column, ColumnKind, ParseColumnKindError, Row, Table, Workspace, MIN_COLUMN_WIDTH,
};
