// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the app model.
//!
//! Queries provide derived views (kanban lanes, breadcrumbs, the compact path label) that power
//! the UI and the `--exec` report.

pub mod kanban;
pub mod location;

pub use kanban::{card_title, cell_text, kanban_lanes, KanbanLane, NO_VALUE_LANE};
pub use location::{breadcrumbs, current_table, current_workspace, path_label, Breadcrumb};
