// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ids::{ColumnId, RowId, TableId, WorkspaceId};

/// Untyped cell content. Interpretation (text, number, checkbox, date, select option) is left to
/// the front end; a missing key means the cell is empty.
pub type CellValue = serde_json::Value;

/// Narrowest width (pixels) a column can be resized to.
pub const MIN_COLUMN_WIDTH: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    workspace_id: WorkspaceId,
    name: String,
    tables: Vec<Table>,
}

impl Workspace {
    pub fn new(workspace_id: WorkspaceId, name: impl Into<String>) -> Self {
        Self {
            workspace_id,
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut Vec<Table> {
        &mut self.tables
    }

    pub fn table(&self, table_id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_id() == table_id)
    }

    pub fn contains_table(&self, table_id: &TableId) -> bool {
        self.table(table_id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    table_id: TableId,
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
    column_widths: BTreeMap<ColumnId, u32>,
}

impl Table {
    pub fn new(table_id: TableId, name: impl Into<String>) -> Self {
        Self {
            table_id,
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            column_widths: BTreeMap::new(),
        }
    }

    pub fn table_id(&self) -> &TableId {
        &self.table_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Columns in storage (insertion) order. Use [`Table::ordered_columns`] for display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }

    /// Columns sorted by `display_order`; this is the order 1-based column positions refer to.
    pub fn ordered_columns(&self) -> Vec<&Column> {
        let mut ordered = self.columns.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|c| c.display_order());
        ordered
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_id() == column_id)
    }

    pub fn next_display_order(&self) -> i64 {
        self.columns
            .iter()
            .map(Column::display_order)
            .max()
            .map_or(0, |max| max + 1)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub fn row(&self, row_id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.row_id() == row_id)
    }

    pub fn column_widths(&self) -> &BTreeMap<ColumnId, u32> {
        &self.column_widths
    }

    pub fn column_widths_mut(&mut self) -> &mut BTreeMap<ColumnId, u32> {
        &mut self.column_widths
    }

    pub fn column_width(&self, column_id: &ColumnId) -> Option<u32> {
        self.column_widths.get(column_id).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
    Checkbox,
    Date,
    Select,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColumnKindError {
    raw: String,
}

impl fmt::Display for ParseColumnKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown column kind '{}' (expected text|number|checkbox|date|select)",
            self.raw
        )
    }
}

impl std::error::Error for ParseColumnKindError {}

impl FromStr for ColumnKind {
    type Err = ParseColumnKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "checkbox" => Ok(Self::Checkbox),
            "date" => Ok(Self::Date),
            "select" => Ok(Self::Select),
            _ => Err(ParseColumnKindError { raw: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    column_id: ColumnId,
    name: String,
    kind: ColumnKind,
    options: Vec<String>,
    display_order: i64,
}

impl Column {
    pub fn new(
        column_id: ColumnId,
        name: impl Into<String>,
        kind: ColumnKind,
        display_order: i64,
    ) -> Self {
        Self {
            column_id,
            name: name.into(),
            kind,
            options: Vec::new(),
            display_order,
        }
    }

    pub fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Select options; only meaningful for [`ColumnKind::Select`].
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub fn display_order(&self) -> i64 {
        self.display_order
    }

    pub fn set_display_order(&mut self, display_order: i64) {
        self.display_order = display_order;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    row_id: RowId,
    values: BTreeMap<ColumnId, CellValue>,
}

impl Row {
    pub fn new(row_id: RowId) -> Self {
        Self {
            row_id,
            values: BTreeMap::new(),
        }
    }

    pub fn row_id(&self) -> &RowId {
        &self.row_id
    }

    pub fn values(&self) -> &BTreeMap<ColumnId, CellValue> {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut BTreeMap<ColumnId, CellValue> {
        &mut self.values
    }

    pub fn value(&self, column_id: &ColumnId) -> Option<&CellValue> {
        self.values.get(column_id)
    }

    pub fn set_value(&mut self, column_id: ColumnId, value: CellValue) {
        if value.is_null() {
            self.values.remove(&column_id);
        } else {
            self.values.insert(column_id, value);
        }
    }
}
