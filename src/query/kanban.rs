// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{CellValue, ColumnId, ColumnKind, Row, RowId, Table};

/// Title of the lane that collects rows with an empty group-by cell.
pub const NO_VALUE_LANE: &str = "(No value)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanLane {
    title: String,
    row_ids: Vec<RowId>,
    no_value: bool,
}

impl KanbanLane {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            row_ids: Vec::new(),
            no_value: false,
        }
    }

    fn no_value() -> Self {
        Self {
            no_value: true,
            ..Self::new(NO_VALUE_LANE)
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn row_ids(&self) -> &[RowId] {
        &self.row_ids
    }

    /// True only for the lane of empty cells, even if a data lane carries the same title.
    pub fn is_no_value(&self) -> bool {
        self.no_value
    }
}

/// Partitions the rows of `table` into kanban lanes by the `group_by` column.
///
/// Lane order: select options (when the column is a select), then values only found in the data
/// in first-seen order, then [`NO_VALUE_LANE`] if any row is empty. A missing or unknown group-by
/// column yields a single [`NO_VALUE_LANE`] holding every row.
pub fn kanban_lanes(table: &Table, group_by: Option<&ColumnId>) -> Vec<KanbanLane> {
    let Some(column) = group_by.and_then(|id| table.column(id)) else {
        let mut lane = KanbanLane::no_value();
        lane.row_ids = table.rows().iter().map(|r| r.row_id().clone()).collect();
        return vec![lane];
    };

    let mut lanes = if column.kind() == ColumnKind::Select {
        column
            .options()
            .iter()
            .filter(|option| !option.is_empty())
            .map(|option| KanbanLane::new(option.as_str()))
            .collect::<Vec<_>>()
    } else {
        Vec::new()
    };
    let mut no_value = KanbanLane::no_value();

    for row in table.rows() {
        let Some(key) = lane_key(row.value(column.column_id())) else {
            no_value.row_ids.push(row.row_id().clone());
            continue;
        };
        match lanes.iter_mut().find(|lane| lane.title == key) {
            Some(lane) => lane.row_ids.push(row.row_id().clone()),
            None => {
                let mut lane = KanbanLane::new(key);
                lane.row_ids.push(row.row_id().clone());
                lanes.push(lane);
            }
        }
    }

    if lanes.is_empty() || !no_value.row_ids.is_empty() {
        lanes.push(no_value);
    }
    lanes
}

/// Text of a cell as the views display it: strings verbatim, other JSON values in their compact
/// JSON form, `null` as empty.
pub fn cell_text(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Null) => String::new(),
        Some(CellValue::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Card heading: the row's value in the first column, or `Row <id>` when that cell is empty.
pub fn card_title(table: &Table, row: &Row) -> String {
    let first = table.ordered_columns().first().map(|c| c.column_id().clone());
    match first.and_then(|id| row.value(&id).cloned()) {
        None | Some(CellValue::Null) => format!("Row {}", row.row_id()),
        Some(value) => cell_text(Some(&value)),
    }
}

fn lane_key(value: Option<&CellValue>) -> Option<String> {
    let text = cell_text(value);
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{card_title, kanban_lanes, NO_VALUE_LANE};
    use crate::model::fixtures::{cid, rid, tasks_table};
    use crate::model::{Column, ColumnKind, Row, Table};

    fn titles(table: &Table, column: &str) -> Vec<String> {
        kanban_lanes(table, Some(&cid(column)))
            .iter()
            .map(|lane| lane.title().to_owned())
            .collect()
    }

    #[test]
    fn select_options_come_first_then_no_value() {
        let table = tasks_table();
        let lanes = kanban_lanes(&table, Some(&cid("c:status")));
        let summary = lanes
            .iter()
            .map(|lane| {
                (
                    lane.title(),
                    lane.row_ids().iter().map(|id| id.as_str()).collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("Todo", vec![]),
                ("Doing", vec!["r:2"]),
                ("Done", vec!["r:1"]),
                (NO_VALUE_LANE, vec!["r:3"]),
            ]
        );
    }

    #[test]
    fn values_outside_options_get_their_own_lane() {
        let mut table = tasks_table();
        if let Some(row) = table.rows_mut().iter_mut().find(|r| r.row_id() == &rid("r:3")) {
            row.set_value(cid("c:status"), "Blocked".into());
        }
        assert_eq!(titles(&table, "c:status"), ["Todo", "Doing", "Done", "Blocked"]);
    }

    #[test]
    fn literal_no_value_text_stays_a_data_lane() {
        let mut table = tasks_table();
        if let Some(row) = table.rows_mut().iter_mut().find(|r| r.row_id() == &rid("r:1")) {
            row.set_value(cid("c:status"), NO_VALUE_LANE.into());
        }
        let lanes = kanban_lanes(&table, Some(&cid("c:status")));
        let summary = lanes
            .iter()
            .map(|lane| {
                (
                    lane.title(),
                    lane.is_no_value(),
                    lane.row_ids().iter().map(|id| id.as_str()).collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("Todo", false, vec![]),
                ("Doing", false, vec!["r:2"]),
                ("Done", false, vec![]),
                (NO_VALUE_LANE, false, vec!["r:1"]),
                (NO_VALUE_LANE, true, vec!["r:3"]),
            ]
        );
        assert_eq!(lanes.iter().filter(|lane| lane.is_no_value()).count(), 1);
    }

    #[test]
    fn text_column_lanes_follow_data_order() {
        let table = tasks_table();
        assert_eq!(
            titles(&table, "c:title"),
            ["Write parser", "Write resolver", "Ship it"]
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some("c:missing"))]
    fn without_group_by_every_row_is_in_one_lane(#[case] column: Option<&str>) {
        let table = tasks_table();
        let column = column.map(cid);
        let lanes = kanban_lanes(&table, column.as_ref());
        assert_eq!(lanes.len(), 1);
        assert!(lanes[0].is_no_value());
        assert_eq!(lanes[0].row_ids().len(), 3);
    }

    #[test]
    fn blank_strings_count_as_empty() {
        let mut table = tasks_table();
        table
            .columns_mut()
            .push(Column::new(cid("c:note"), "Note", ColumnKind::Text, 3));
        for row in table.rows_mut() {
            row.set_value(cid("c:note"), "  ".into());
        }
        assert_eq!(titles(&table, "c:note"), [NO_VALUE_LANE]);
    }

    #[test]
    fn empty_table_still_has_a_lane() {
        let mut table = tasks_table();
        table.rows_mut().clear();
        assert_eq!(titles(&table, "c:title"), [NO_VALUE_LANE]);
    }

    #[test]
    fn card_title_uses_first_column_or_row_id() {
        let table = tasks_table();
        let row = table.row(&rid("r:1")).expect("row");
        assert_eq!(card_title(&table, row), "Write parser");

        let blank = Row::new(rid("r:9"));
        assert_eq!(card_title(&table, &blank), "Row r:9");

        let mut numbered = Row::new(rid("r:10"));
        numbered.set_value(cid("c:title"), 42.into());
        assert_eq!(card_title(&table, &numbered), "42");
    }
}
