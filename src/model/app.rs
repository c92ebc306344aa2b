// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::{TableId, WorkspaceId};
use super::navigation::NavigationState;
use super::workspace::{Table, Workspace};

/// Leading character of command words (`/s`, `\s`, `|s`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommandSeparator {
    #[default]
    Slash,
    Backslash,
    Pipe,
}

impl CommandSeparator {
    pub fn as_char(self) -> char {
        match self {
            Self::Slash => '/',
            Self::Backslash => '\\',
            Self::Pipe => '|',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '/' => Some(Self::Slash),
            '\\' => Some(Self::Backslash),
            '|' => Some(Self::Pipe),
            _ => None,
        }
    }
}

impl fmt::Display for CommandSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    sidebar_open: bool,
    command_separator: CommandSeparator,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            command_separator: CommandSeparator::default(),
        }
    }
}

impl Settings {
    pub fn new(sidebar_open: bool, command_separator: CommandSeparator) -> Self {
        Self {
            sidebar_open,
            command_separator,
        }
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn set_sidebar_open(&mut self, sidebar_open: bool) {
        self.sidebar_open = sidebar_open;
    }

    pub fn command_separator(&self) -> CommandSeparator {
        self.command_separator
    }

    pub fn set_command_separator(&mut self, command_separator: CommandSeparator) {
        self.command_separator = command_separator;
    }
}

/// The whole editor state: every workspace plus navigation and user settings.
///
/// This is the value the command executor consumes and produces; it is cheap enough to clone per
/// command at interactive scale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppModel {
    workspaces: Vec<Workspace>,
    navigation: NavigationState,
    settings: Settings,
}

impl AppModel {
    pub fn new(workspaces: Vec<Workspace>) -> Self {
        Self {
            workspaces,
            navigation: NavigationState::default(),
            settings: Settings::default(),
        }
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn workspaces_mut(&mut self) -> &mut Vec<Workspace> {
        &mut self.workspaces
    }

    pub fn workspace(&self, workspace_id: &WorkspaceId) -> Option<&Workspace> {
        self.workspaces
            .iter()
            .find(|w| w.workspace_id() == workspace_id)
    }

    pub fn workspace_mut(&mut self, workspace_id: &WorkspaceId) -> Option<&mut Workspace> {
        self.workspaces
            .iter_mut()
            .find(|w| w.workspace_id() == workspace_id)
    }

    /// Finds a table by id in any workspace, returning the owning workspace id as well.
    pub fn find_table(&self, table_id: &TableId) -> Option<(&WorkspaceId, &Table)> {
        self.workspaces.iter().find_map(|w| {
            w.table(table_id)
                .map(|table| (w.workspace_id(), table))
        })
    }

    pub fn table_mut(&mut self, table_id: &TableId) -> Option<&mut Table> {
        self.workspaces
            .iter_mut()
            .flat_map(|w| w.tables_mut().iter_mut())
            .find(|t| t.table_id() == table_id)
    }

    pub fn current_workspace(&self) -> Option<&Workspace> {
        self.navigation
            .current_workspace_id()
            .and_then(|id| self.workspace(id))
    }

    /// The current table, looked up inside the current workspace only.
    pub fn current_table(&self) -> Option<&Table> {
        let workspace = self.current_workspace()?;
        self.navigation
            .current_table_id()
            .and_then(|id| workspace.table(id))
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationState {
        &mut self.navigation
    }

    pub fn set_navigation(&mut self, navigation: NavigationState) {
        self.navigation = navigation;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Drops pointers that do not reference existing entities and restores the rule that the
    /// current table lives inside the current workspace.
    pub fn repair_navigation(&mut self) {
        let workspace_exists = self
            .navigation
            .current_workspace_id()
            .is_some_and(|id| self.workspace(id).is_some());
        if !workspace_exists {
            if self.navigation.current_workspace_id().is_some() {
                self.navigation.select_workspace(None);
            } else if self.navigation.current_table_id().is_some() {
                self.navigation.select_table(None);
            }
            return;
        }

        let table_is_inside = match (
            self.navigation.current_workspace_id(),
            self.navigation.current_table_id(),
        ) {
            (Some(workspace_id), Some(table_id)) => self
                .workspace(workspace_id)
                .is_some_and(|w| w.contains_table(table_id)),
            _ => true,
        };
        if !table_is_inside {
            self.navigation.select_table(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppModel, CommandSeparator};
    use crate::model::{Table, TableId, Workspace, WorkspaceId};

    #[test]
    fn repair_drops_table_pointer_outside_current_workspace() {
        let mut alpha = Workspace::new(WorkspaceId::new("w:a").expect("id"), "Alpha");
        alpha
            .tables_mut()
            .push(Table::new(TableId::new("t:a").expect("id"), "Tasks"));
        let beta = Workspace::new(WorkspaceId::new("w:b").expect("id"), "Beta");
        let mut model = AppModel::new(vec![alpha, beta]);

        model
            .navigation_mut()
            .select_workspace(Some(WorkspaceId::new("w:b").expect("id")));
        model
            .navigation_mut()
            .select_table(Some(TableId::new("t:a").expect("id")));

        model.repair_navigation();
        assert_eq!(
            model.navigation().current_workspace_id().map(|id| id.as_str()),
            Some("w:b")
        );
        assert!(model.navigation().current_table_id().is_none());
    }

    #[test]
    fn repair_clears_missing_workspace() {
        let mut model = AppModel::new(Vec::new());
        model
            .navigation_mut()
            .select_workspace(Some(WorkspaceId::new("gone").expect("id")));
        model.repair_navigation();
        assert!(model.navigation().current_workspace_id().is_none());
    }

    #[test]
    fn separator_round_trips_through_char() {
        for sep in [
            CommandSeparator::Slash,
            CommandSeparator::Backslash,
            CommandSeparator::Pipe,
        ] {
            assert_eq!(CommandSeparator::from_char(sep.as_char()), Some(sep));
        }
        assert_eq!(CommandSeparator::from_char('#'), None);
    }
}
