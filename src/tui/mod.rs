// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive TUI shell (ratatui + crossterm), including a built-in demo model.
//! Every change goes through [`crate::command::execute`] or [`try_apply_edit`]; the shell only
//! decides which action a key stands for and persists the result.

use std::{
    error::Error,
    io,
    mem,
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row as GridRow,
        Table as Grid, TableState, Wrap,
    },
};

use crate::command::{
    execute as execute_action, parse_with_separator, try_apply_edit, Action, EditOp,
    PathFragment, RelativeTarget,
};
use crate::model::factory::{default_table, default_workspace, new_column, new_row};
use crate::model::{
    AppModel, CellValue, ColumnId, ColumnKind, Row, RowId, Table, TableId, ViewMode,
};
use crate::query::{breadcrumbs, card_title, cell_text, kanban_lanes, path_label};
use crate::store::{AutoBackup, SnapshotArchive, SnapshotStore, WorkspaceFolder};

const FOCUS_COLOR: Color = Color::LightGreen;
const CURSOR_ROW_COLOR: Color = Color::DarkGray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "tablane ";
const COMMAND_PROMPT: &str = "› ";
const EDIT_PROMPT: &str = "edit › ";
const SIDEBAR_WIDTH: u16 = 28;
const DEFAULT_COLUMN_WIDTH_PX: u32 = 160;
const PX_PER_CELL: u32 = 8;
const MIN_COLUMN_CELLS: u32 = 10;
const MAX_COLUMN_CELLS: u32 = 48;
const RESIZE_STEP_PX: u32 = 40;
const TOAST_TTL: Duration = Duration::from_secs(2);

/// Runs the interactive terminal UI on the demo model, without persistence.
pub fn run() -> Result<(), Box<dyn Error>> {
    run_with_folder(demo_model(), None)
}

/// Runs the interactive terminal UI, saving every change to `folder` when one is given.
pub fn run_with_folder(
    model: AppModel,
    folder: Option<WorkspaceFolder>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(model, folder);

    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    let path_area = layout[0];
    let body_area = layout[1];
    let command_area = layout[2];
    let status_area = layout[3];

    frame.render_widget(Paragraph::new(path_bar_line(&app.model)), path_area);
    let label = Paragraph::new(Line::from(Span::styled(
        path_label(&app.model),
        Style::default().fg(FOOTER_LABEL_COLOR),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(label, path_area);

    let main_area = if app.model.settings().sidebar_open() {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body_area);
        render_sidebar(frame, app, panes[0]);
        panes[1]
    } else {
        body_area
    };
    render_main(frame, app, main_area);

    frame.render_widget(Paragraph::new(command_line(app)), command_area);
    if app.input_mode != InputMode::Normal {
        let offset = input_prompt_width(&app.input_mode) + app.input.chars().count();
        let cursor_x = command_area
            .x
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
            .min(command_area.x.saturating_add(command_area.width.saturating_sub(1)));
        frame.set_cursor(cursor_x, command_area.y);
    }

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    frame.render_widget(Paragraph::new(footer_help_line(app, &toast_suffix)), status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    if app.show_help {
        render_help(frame, app, body_area);
    }
}

include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    Normal,
    Command,
    EditCell {
        table_id: TableId,
        row_id: RowId,
        column_id: ColumnId,
        kind: ColumnKind,
    },
}

struct App {
    model: AppModel,
    folder: Option<WorkspaceFolder>,
    auto_backup: AutoBackup,
    input_mode: InputMode,
    input: String,
    show_help: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(model: AppModel, folder: Option<WorkspaceFolder>) -> Self {
        Self {
            model,
            folder,
            auto_backup: AutoBackup::default(),
            input_mode: InputMode::Normal,
            input: String::new(),
            show_help: false,
            toast: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('b') => {
                    self.apply_edit(EditOp::ToggleSidebar);
                    return;
                }
                KeyCode::Char('k') => {
                    self.open_input(InputMode::Command, String::new());
                    return;
                }
                _ => {}
            }
        }

        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return false;
        }

        if self.input_mode != InputMode::Normal {
            self.handle_input_key(code);
            return false;
        }

        let separator = self.model.settings().command_separator().as_char();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(':') => self.open_input(InputMode::Command, String::new()),
            KeyCode::Char(ch) if ch == separator => {
                self.open_input(InputMode::Command, ch.to_string())
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Tab => self.cycle_table(1),
            KeyCode::BackTab => self.cycle_table(-1),
            KeyCode::Backspace => {
                self.run_action(Action::Select {
                    path: Some(PathFragment::Ascend(1)),
                });
            }
            KeyCode::Home => {
                self.run_action(Action::Select { path: None });
            }
            KeyCode::Char('v') => self.toggle_view(),
            KeyCode::Char('g') => self.cycle_group_by(),
            KeyCode::Char('e') | KeyCode::Enter => self.begin_cell_edit(),
            KeyCode::Char('n') => self.add_row(),
            KeyCode::Char('x') => self.remove_cursor_row(),
            KeyCode::Char('c') => self.add_column(),
            KeyCode::Char('<') => self.move_cursor_column(-1),
            KeyCode::Char('>') => self.move_cursor_column(1),
            KeyCode::Char('-') => self.resize_cursor_column(false),
            KeyCode::Char('+') => self.resize_cursor_column(true),
            KeyCode::Char('N') => self.add_table(),
            KeyCode::Char('W') => self.add_workspace(),
            KeyCode::Char('B') => self.create_backup(Instant::now()),
            _ => {}
        }
        false
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input.clear();
            }
            KeyCode::Enter => self.commit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) => self.input.push(ch),
            _ => {}
        }
    }

    fn open_input(&mut self, mode: InputMode, initial: String) {
        self.input_mode = mode;
        self.input = initial;
    }

    fn commit_input(&mut self) {
        let mode = mem::replace(&mut self.input_mode, InputMode::Normal);
        let text = mem::take(&mut self.input);
        match mode {
            InputMode::Normal => {}
            InputMode::Command => self.run_command(&text),
            InputMode::EditCell {
                table_id,
                row_id,
                column_id,
                kind,
            } => {
                self.apply_edit(EditOp::EditCell {
                    table_id,
                    row_id,
                    column_id,
                    value: cell_value_from_input(kind, &text),
                });
            }
        }
    }

    fn run_command(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let action = parse_with_separator(text, self.model.settings().command_separator());
        if action == Action::Unknown {
            self.set_toast(format!("Unknown command: {}", text.trim()));
            return;
        }
        if !self.run_action(action) {
            self.set_toast("No change");
        }
    }

    /// Returns `true` when the model changed.
    fn run_action(&mut self, action: Action) -> bool {
        let next = execute_action(&self.model, &action);
        if next == self.model {
            return false;
        }
        self.commit(next);
        true
    }

    /// Like [`Self::run_action`] for edits, but reports rejections as a toast.
    fn apply_edit(&mut self, op: EditOp) -> bool {
        let mut next = self.model.clone();
        match try_apply_edit(&mut next, &op) {
            Ok(()) if next != self.model => {
                self.commit(next);
                true
            }
            Ok(()) => false,
            Err(err) => {
                self.set_toast(err.to_string());
                false
            }
        }
    }

    fn commit(&mut self, next: AppModel) {
        self.model = next;
        let Some(folder) = &self.folder else {
            return;
        };
        if let Err(err) = folder.save(&self.model) {
            self.set_toast(format!("Save failed: {err}"));
        }
    }

    /// Takes a periodic backup while a folder is attached.
    fn tick(&mut self, now: Instant) {
        if self.folder.is_some() && self.auto_backup.is_due(now) {
            self.create_backup(now);
        }
    }

    fn create_backup(&mut self, now: Instant) {
        let Some(folder) = &self.folder else {
            self.set_toast("No workspace folder to back up");
            return;
        };
        match folder.create(&self.model) {
            Ok(info) => {
                self.auto_backup.record(now);
                self.set_toast(format!("Backup created: {}", info.archive_id()));
            }
            Err(err) => {
                // Retry on the next interval rather than every frame.
                self.auto_backup.record(now);
                self.set_toast(format!("Backup failed: {err}"));
            }
        }
    }

    fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        let Some(table) = self.model.current_table() else {
            self.set_toast("No table selected");
            return;
        };
        let row_count = table.rows().len();
        let col_count = table.columns().len();
        if row_count == 0 || col_count == 0 {
            return;
        }

        let cursor = self.model.navigation().cursor();
        let row = step_position(cursor.row, row_delta, row_count);
        let col = step_position(cursor.col, col_delta, col_count);
        self.run_action(Action::Select {
            path: Some(PathFragment::Descend(RelativeTarget::Two(
                row.to_string(),
                col.to_string(),
            ))),
        });
    }

    fn cycle_table(&mut self, delta: isize) {
        let tables = self
            .model
            .workspaces()
            .iter()
            .flat_map(|w| {
                w.tables()
                    .iter()
                    .map(move |t| (w.workspace_id().clone(), t.table_id().clone()))
            })
            .collect::<Vec<_>>();
        if tables.is_empty() {
            self.set_toast("No tables");
            return;
        }

        let current = self.model.navigation().current_table_id();
        let next = match tables.iter().position(|(_, table_id)| Some(table_id) == current) {
            Some(index) => wrap_index(index, delta, tables.len()),
            None if delta < 0 => tables.len() - 1,
            None => 0,
        };
        let (workspace_id, table_id) = tables[next].clone();
        self.apply_edit(EditOp::SelectTable {
            workspace_id,
            table_id,
        });
    }

    fn toggle_view(&mut self) {
        let Some(table) = self.model.current_table() else {
            self.set_toast("No table selected");
            return;
        };
        let action = match self.model.navigation().view() {
            ViewMode::Kanban => Action::ChangeView {
                mode: ViewMode::Table,
                path: None,
                group_by: None,
            },
            ViewMode::Table => {
                let group_by = match self.model.navigation().group_by_column_id() {
                    Some(_) => None,
                    None => table
                        .ordered_columns()
                        .iter()
                        .position(|c| c.kind() == ColumnKind::Select)
                        .map(|index| (index + 1).to_string()),
                };
                Action::ChangeView {
                    mode: ViewMode::Kanban,
                    path: None,
                    group_by,
                }
            }
        };
        self.run_action(action);
    }

    fn cycle_group_by(&mut self) {
        let Some(table) = self.model.current_table() else {
            self.set_toast("No table selected");
            return;
        };
        let columns = table
            .ordered_columns()
            .into_iter()
            .map(|c| c.column_id().clone())
            .collect::<Vec<_>>();
        if columns.is_empty() {
            self.set_toast("Table has no columns");
            return;
        }

        let current = self.model.navigation().group_by_column_id();
        let next = match columns.iter().position(|id| Some(id) == current) {
            Some(index) => wrap_index(index, 1, columns.len()),
            None => 0,
        };
        self.apply_edit(EditOp::SetGroupBy {
            column_id: Some(columns[next].clone()),
        });
    }

    fn begin_cell_edit(&mut self) {
        let Some(table) = self.model.current_table() else {
            self.set_toast("No table selected");
            return;
        };
        let cursor = self.model.navigation().cursor();
        let (Some(row), Some(col)) = (cursor.row, cursor.col) else {
            self.set_toast("Move the cursor onto a cell first");
            return;
        };
        let columns = table.ordered_columns();
        let (Some(row), Some(column)) = (table.rows().get(row.get() - 1), columns.get(col.get() - 1))
        else {
            self.set_toast("Cursor is outside the table");
            return;
        };

        let mode = InputMode::EditCell {
            table_id: table.table_id().clone(),
            row_id: row.row_id().clone(),
            column_id: column.column_id().clone(),
            kind: column.kind(),
        };
        let initial = cell_text(row.value(column.column_id()));
        self.open_input(mode, initial);
    }

    fn add_row(&mut self) {
        let Some(table) = self.model.current_table() else {
            self.set_toast("No table selected");
            return;
        };
        let table_id = table.table_id().clone();
        let row_count = table.rows().len();
        let col = self.model.navigation().cursor().col.map_or(1, NonZeroUsize::get);

        if self.apply_edit(EditOp::AddRow {
            table_id,
            row: new_row(),
        }) {
            self.run_action(Action::Select {
                path: Some(PathFragment::Descend(RelativeTarget::Two(
                    (row_count + 1).to_string(),
                    col.to_string(),
                ))),
            });
        }
    }

    fn remove_cursor_row(&mut self) {
        let Some((table, row)) = self.cursor_row() else {
            self.set_toast("Move the cursor onto a row first");
            return;
        };
        let table_id = table.table_id().clone();
        let row_id = row.row_id().clone();

        if self.apply_edit(EditOp::RemoveRow { table_id, row_id }) {
            let has_rows = self
                .model
                .current_table()
                .is_some_and(|table| !table.rows().is_empty());
            if has_rows {
                self.move_cursor(0, 0);
            } else {
                self.run_action(Action::Select {
                    path: Some(PathFragment::Ascend(2)),
                });
            }
        }
    }

    fn add_column(&mut self) {
        let Some(table) = self.model.current_table() else {
            self.set_toast("No table selected");
            return;
        };
        let table_id = table.table_id().clone();
        let column = new_column(
            format!("Column {}", table.columns().len() + 1),
            ColumnKind::Text,
            Vec::new(),
            table.next_display_order(),
        );
        self.apply_edit(EditOp::AddColumn {
            table_id,
            column_id: column.column_id().clone(),
            name: column.name().to_owned(),
            kind: column.kind(),
            options: Vec::new(),
        });
    }

    fn move_cursor_column(&mut self, delta: isize) {
        let Some((table_id, column_id, position)) = self.cursor_column() else {
            self.set_toast("Move the cursor onto a column first");
            return;
        };
        let Some(target) = position
            .get()
            .checked_add_signed(delta)
            .and_then(NonZeroUsize::new)
        else {
            return;
        };
        if self.apply_edit(EditOp::MoveColumn {
            table_id,
            column_id,
            position: target,
        }) {
            self.move_cursor(0, delta);
        }
    }

    fn resize_cursor_column(&mut self, wider: bool) {
        let Some((table_id, column_id, _)) = self.cursor_column() else {
            self.set_toast("Move the cursor onto a column first");
            return;
        };
        let current = self
            .model
            .current_table()
            .and_then(|table| table.column_width(&column_id))
            .unwrap_or(DEFAULT_COLUMN_WIDTH_PX);
        let width = if wider {
            current.saturating_add(RESIZE_STEP_PX)
        } else {
            current.saturating_sub(RESIZE_STEP_PX)
        };
        self.apply_edit(EditOp::ResizeColumn {
            table_id,
            column_id,
            width,
        });
    }

    fn add_table(&mut self) {
        let Some(workspace) = self.model.current_workspace() else {
            self.set_toast("No workspace selected");
            return;
        };
        let workspace_id = workspace.workspace_id().clone();
        let table = default_table(format!("Table {}", workspace.tables().len() + 1));
        self.apply_edit(EditOp::AddTable {
            workspace_id,
            table,
        });
    }

    fn add_workspace(&mut self) {
        let workspace =
            default_workspace(format!("Workspace {}", self.model.workspaces().len() + 1));
        let workspace_id = workspace.workspace_id().clone();
        if self.apply_edit(EditOp::AddWorkspace { workspace }) {
            self.apply_edit(EditOp::SelectWorkspace { workspace_id });
        }
    }

    fn cursor_row(&self) -> Option<(&Table, &Row)> {
        let table = self.model.current_table()?;
        let row = self.model.navigation().cursor().row?;
        Some((table, table.rows().get(row.get() - 1)?))
    }

    fn cursor_column(&self) -> Option<(TableId, ColumnId, NonZeroUsize)> {
        let table = self.model.current_table()?;
        let col = self.model.navigation().cursor().col?;
        let column = *table.ordered_columns().get(col.get() - 1)?;
        Some((table.table_id().clone(), column.column_id().clone(), col))
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

/// Moves a 1-based position by `delta` inside `1..=len`; an unset position starts at 1.
fn step_position(current: Option<NonZeroUsize>, delta: isize, len: usize) -> usize {
    match current {
        None => 1,
        Some(position) => position
            .get()
            .saturating_add_signed(delta)
            .clamp(1, len.max(1)),
    }
}

fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    let len = len as isize;
    (index as isize + delta).rem_euclid(len) as usize
}

/// Interprets typed cell text for a column kind; blank text empties the cell.
fn cell_value_from_input(kind: ColumnKind, text: &str) -> CellValue {
    let text = text.trim();
    if text.is_empty() {
        return CellValue::Null;
    }
    match kind {
        ColumnKind::Number => {
            if let Ok(value) = text.parse::<i64>() {
                return CellValue::from(value);
            }
            text.parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map_or_else(|| CellValue::String(text.to_owned()), CellValue::Number)
        }
        ColumnKind::Checkbox => match text.to_ascii_lowercase().as_str() {
            "x" | "y" | "yes" | "true" | "1" => CellValue::Bool(true),
            "n" | "no" | "false" | "0" => CellValue::Bool(false),
            _ => CellValue::String(text.to_owned()),
        },
        ColumnKind::Text | ColumnKind::Date | ColumnKind::Select => {
            CellValue::String(text.to_owned())
        }
    }
}

/// A small two-workspace model for `--demo`.
pub fn demo_model() -> AppModel {
    let mut work = default_workspace("Work");
    if let Some(tasks) = work.tables_mut().first_mut() {
        let columns = tasks
            .ordered_columns()
            .into_iter()
            .map(|c| c.column_id().clone())
            .collect::<Vec<_>>();
        for (title, status, priority) in [
            ("Draft the release notes", "Doing", "High"),
            ("Review open pull requests", "Todo", "Med"),
            ("Triage bug reports", "Todo", "High"),
            ("Update dependencies", "Done", "Low"),
            ("Plan the next sprint", "", "Med"),
        ] {
            let mut row = new_row();
            for (column_id, value) in columns.iter().zip([title, status, priority]) {
                if !value.is_empty() {
                    row.set_value(column_id.clone(), value.into());
                }
            }
            tasks.rows_mut().push(row);
        }
    }
    work.tables_mut().push(default_table("Bugs"));

    let home = default_workspace("Home");

    let mut model = AppModel::new(vec![work, home]);
    let first = model.workspaces().first().map(|w| {
        (
            w.workspace_id().clone(),
            w.tables().first().map(|t| t.table_id().clone()),
        )
    });
    if let Some((workspace_id, table_id)) = first {
        let navigation = model.navigation_mut();
        navigation.select_workspace(Some(workspace_id));
        navigation.select_table(table_id);
    }
    model
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
