// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tablane: a local-first table/kanban editor driven by a colon-path command language.
//!
//! `model` and `command` form the pure core (parse, resolve, execute); `query` derives read-only
//! views, `store` persists snapshots and backups, and `tui` is the terminal front end.

pub mod command;
pub mod model;
pub mod query;
pub mod store;
pub mod tui;
