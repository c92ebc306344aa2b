// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Sidebar, grid, board, path bar, footer and help rendering used by [`draw`].
fn render_sidebar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (items, selected) = sidebar_items(&app.model);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Workspaces "))
        .highlight_style(
            Style::default()
                .fg(FOCUS_COLOR)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

/// One item per workspace followed by its tables; the selection is the current table when
/// there is one, otherwise the current workspace.
fn sidebar_items(model: &AppModel) -> (Vec<ListItem<'static>>, Option<usize>) {
    let navigation = model.navigation();
    let mut items = Vec::new();
    let mut selected = None;

    for workspace in model.workspaces() {
        let is_current = navigation.current_workspace_id() == Some(workspace.workspace_id());
        if is_current && navigation.current_table_id().is_none() {
            selected = Some(items.len());
        }
        items.push(ListItem::new(Line::from(Span::styled(
            workspace.name().to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ))));

        for table in workspace.tables() {
            if is_current && navigation.current_table_id() == Some(table.table_id()) {
                selected = Some(items.len());
            }
            items.push(ListItem::new(format!("  {}", table.name())));
        }
    }

    (items, selected)
}

fn render_main(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(table) = app.model.current_table() else {
        let hint = Paragraph::new(vec![
            Line::from("No table selected."),
            Line::from(""),
            Line::from("Tab cycles tables, : opens the command line, ? shows help."),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    };

    match app.model.navigation().view() {
        ViewMode::Table => render_grid(frame, app, table, area),
        ViewMode::Kanban => render_board(frame, app, table, area),
    }
}

fn render_grid(frame: &mut Frame<'_>, app: &App, table: &Table, area: Rect) {
    let cursor = app.model.navigation().cursor();
    let columns = table.ordered_columns();

    let header = GridRow::new(
        std::iter::once(Cell::from("#"))
            .chain(columns.iter().map(|column| Cell::from(column.name().to_owned())))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD));

    let rows = table.rows().iter().enumerate().map(|(index, row)| {
        let is_cursor_row = cursor.row.map(|r| r.get()) == Some(index + 1);
        let mut cells = vec![Cell::from((index + 1).to_string())
            .style(Style::default().fg(FOOTER_LABEL_COLOR))];
        cells.extend(columns.iter().enumerate().map(|(col_index, column)| {
            let cell = Cell::from(cell_text(row.value(column.column_id())));
            if is_cursor_row && cursor.col.map(|c| c.get()) == Some(col_index + 1) {
                cell.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                cell
            }
        }));
        GridRow::new(cells)
    });

    let widths = std::iter::once(Constraint::Length(4))
        .chain(
            columns
                .iter()
                .map(|column| Constraint::Length(column_cells(table.column_width(column.column_id())))),
        )
        .collect::<Vec<_>>();

    let grid = Grid::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title(table.name(), ViewMode::Table, None)),
        )
        .highlight_style(Style::default().bg(CURSOR_ROW_COLOR));

    let mut state = TableState::default().with_selected(cursor.row.map(|r| r.get() - 1));
    frame.render_stateful_widget(grid, area, &mut state);
}

/// Terminal cells for a stored pixel width.
fn column_cells(width_px: Option<u32>) -> u16 {
    let width_px = width_px.unwrap_or(DEFAULT_COLUMN_WIDTH_PX);
    let cells = (width_px / PX_PER_CELL).clamp(MIN_COLUMN_CELLS, MAX_COLUMN_CELLS);
    u16::try_from(cells).unwrap_or(u16::MAX)
}

fn render_board(frame: &mut Frame<'_>, app: &App, table: &Table, area: Rect) {
    let navigation = app.model.navigation();
    let group_by = navigation.group_by_column_id();
    let group_by_name = group_by
        .and_then(|column_id| table.column(column_id))
        .map(|column| column.name().to_owned());
    let cursor_row_id = navigation
        .cursor()
        .row
        .and_then(|r| table.rows().get(r.get() - 1))
        .map(|row| row.row_id().clone());

    let block = Block::default().borders(Borders::ALL).title(view_title(
        table.name(),
        ViewMode::Kanban,
        group_by_name.as_deref(),
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lanes = kanban_lanes(table, group_by);
    let lane_count = u32::try_from(lanes.len().max(1)).unwrap_or(u32::MAX);
    let lane_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            lanes
                .iter()
                .map(|_| Constraint::Ratio(1, lane_count))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (lane, lane_area) in lanes.iter().zip(lane_areas.iter()) {
        let mut selected = None;
        let items = lane
            .row_ids()
            .iter()
            .enumerate()
            .filter_map(|(index, row_id)| {
                if cursor_row_id.as_ref() == Some(row_id) {
                    selected = Some(index);
                }
                let row = table.row(row_id)?;
                Some(ListItem::new(card_title(table, row)))
            })
            .collect::<Vec<_>>();

        let title_style = if lane.is_no_value() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        format!(" {} ({}) ", lane.title(), lane.row_ids().len()),
                        title_style,
                    )),
            )
            .highlight_style(Style::default().bg(CURSOR_ROW_COLOR));
        let mut state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, *lane_area, &mut state);
    }
}

fn view_title(label: &str, mode: ViewMode, tail: Option<&str>) -> String {
    let mut title = format!(" {label} [{}]", mode.as_str());
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push_str(" by ");
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

/// Breadcrumbs on the left, the compact path label on the right.
fn path_bar_line(model: &AppModel) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    for crumb in breadcrumbs(model) {
        if !spans.is_empty() {
            spans.push(Span::styled(" › ", Style::default().fg(FOOTER_LABEL_COLOR)));
        }
        let style = if crumb.enabled() {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(crumb.label().to_owned(), style));
    }
    Line::from(spans)
}

fn command_line(app: &App) -> Line<'static> {
    match &app.input_mode {
        InputMode::Normal => {
            let separator = app.model.settings().command_separator().as_char();
            Line::from(Span::styled(
                format!("press : or {separator} for a command, e.g. {separator}s Work:Tasks:2:1"),
                Style::default().fg(Color::DarkGray),
            ))
        }
        InputMode::Command => Line::from(vec![
            Span::styled(COMMAND_PROMPT, Style::default().fg(FOCUS_COLOR)),
            Span::raw(app.input.clone()),
        ]),
        InputMode::EditCell { .. } => Line::from(vec![
            Span::styled(EDIT_PROMPT, Style::default().fg(FOCUS_COLOR)),
            Span::raw(app.input.clone()),
        ]),
    }
}

fn input_prompt_width(mode: &InputMode) -> usize {
    match mode {
        InputMode::Normal => 0,
        InputMode::Command => COMMAND_PROMPT.chars().count(),
        InputMode::EditCell { .. } => EDIT_PROMPT.chars().count(),
    }
}

fn footer_help_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let sidebar = if app.model.settings().sidebar_open() { "^b◼" } else { "^b◻" };

    match app.input_mode {
        InputMode::Normal => {
            push_footer_entry(&mut spans, "MOVE", "hjkl");
            push_footer_entry(&mut spans, "TABLE", "Tab");
            push_footer_entry(&mut spans, "VIEW", "v");
            push_footer_entry(&mut spans, "EDIT", "e");
            push_footer_entry(&mut spans, "ROW", "n/x");
            push_footer_entry(&mut spans, "SIDEBAR", sidebar);
            push_footer_entry(&mut spans, "HELP", "?");
            push_footer_entry(&mut spans, "QUIT", "q");
        }
        InputMode::Command | InputMode::EditCell { .. } => {
            push_footer_entry(&mut spans, "APPLY", "Enter");
            push_footer_entry(&mut spans, "CANCEL", "Esc");
        }
    }

    if !toast_suffix.is_empty() {
        spans.push(Span::styled(
            toast_suffix.to_owned(),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines(separator: char) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD);
    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let select = format!("{separator}s <path>");
    let view = format!("{separator}v [<path>] table|kanban [by:<col>]");
    let bindings: [(&str, &[(&str, &str)]); 3] = [
        (
            "--- Navigation ---",
            &[
                ("h/j/k/l, arrows", "Move the cell cursor"),
                ("Tab/Shift-Tab", "Next/previous table"),
                ("Backspace", "Up one level"),
                ("Home", "Go home (clear every pointer)"),
                ("v", "Toggle table/kanban view"),
                ("g", "Cycle kanban group-by column"),
            ],
        ),
        (
            "--- Editing ---",
            &[
                ("e, Enter", "Edit the cell under the cursor"),
                ("n/x", "Add row / remove cursor row"),
                ("c", "Add a text column"),
                ("</>", "Move cursor column left/right"),
                ("-/+", "Narrow/widen cursor column"),
                ("N/W", "Add table / add workspace"),
                ("B", "Create a backup now"),
            ],
        ),
        (
            "--- Global ---",
            &[
                (":, Ctrl-K", "Open the command line"),
                ("Ctrl-B", "Toggle sidebar"),
                ("?", "Help (toggle)"),
                ("q, Ctrl-C", "Quit"),
            ],
        ),
    ];

    let key_col_width = bindings
        .iter()
        .flat_map(|(_, entries)| entries.iter().map(|(key, _)| key.chars().count()))
        .chain([select.chars().count(), view.chars().count()])
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (header, entries) in bindings {
        lines.push(Line::from(Span::styled(header, header_style)));
        for (key, desc) in entries {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("--- Commands ---", header_style)));
    lines.push(help_kv(&select, "Select ws:table:row:col, :row:col, :_:col, ::", key_col_width, key_style));
    lines.push(help_kv(&view, "Switch view, optionally navigating first", key_col_width, key_style));
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let area = centered_rect(80, 80, main_area);
    frame.render_widget(Clear, area);

    let separator = app.model.settings().command_separator().as_char();
    let help = Paragraph::new(help_lines(separator))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help "));
    frame.render_widget(help, area);
}
