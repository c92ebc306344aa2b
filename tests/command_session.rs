// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tablane::command::{execute, parse, Action};
use tablane::model::{AppModel, ColumnId, ViewMode};
use tablane::query::{current_table, kanban_lanes, path_label};
use tablane::store::{SnapshotArchive, SnapshotStore, WorkspaceFolder};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!("tablane-it-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("command_session")
        .join("workspace.todo.json")
}

/// A folder seeded with the fixture snapshot.
fn seeded_folder(tmp: &TempDir) -> WorkspaceFolder {
    let folder = WorkspaceFolder::new(tmp.path.join("todo"));
    fs::create_dir_all(folder.root()).unwrap();
    fs::copy(fixture_path(), folder.snapshot_path()).unwrap();
    folder
}

fn run(model: &AppModel, input: &str) -> AppModel {
    let action = parse(input);
    assert_ne!(action, Action::Unknown, "expected {input:?} to parse");
    execute(model, &action)
}

#[test]
fn scripted_session_walks_the_hierarchy() {
    let tmp = TempDir::new("script");
    let folder = seeded_folder(&tmp);
    let mut model = folder.load().expect("load").expect("snapshot");
    assert_eq!(path_label(&model), "Work : Sprint : 2 : 1");
    assert!(!model.settings().sidebar_open());

    for (input, expected) in [
        ("/s :3:2", "Work : Sprint : 3 : 2"),
        ("/s :_:3", "Work : Sprint : 3 : 3"),
        ("/s :4", "Work : Sprint : 4 : 3"),
        ("/s ::", "Work : Sprint : – : –"),
        ("/s :Backlog", "Work : Backlog : – : –"),
        ("/s :sprint:1:2", "Work : Sprint : 1 : 2"),
        ("/s Home", "Home : – : – : –"),
        ("/s 2:1:1:1", "Home : Chores : 1 : 1"),
        ("/s :::", "Home : – : – : –"),
        ("/s work:NoSuchTable", "Work : – : – : –"),
        ("/s nowhere", "Work : – : – : –"),
        ("/s", "– : – : – : –"),
    ] {
        model = run(&model, input);
        assert_eq!(path_label(&model), expected, "after {input:?}");
    }
}

#[test]
fn kanban_view_groups_rows_by_status() {
    let tmp = TempDir::new("kanban");
    let folder = seeded_folder(&tmp);
    let model = folder.load().expect("load").expect("snapshot");

    let model = run(&model, "/v Work:Sprint kanban by:status");
    assert_eq!(model.navigation().view(), ViewMode::Kanban);
    assert_eq!(path_label(&model), "Work : Sprint : – : –");

    let table = current_table(&model).expect("current table");
    let lanes = kanban_lanes(table, model.navigation().group_by_column_id())
        .into_iter()
        .map(|lane| {
            (
                lane.title().to_owned(),
                lane.row_ids().iter().map(ToString::to_string).collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        lanes,
        [
            ("Todo".to_owned(), vec!["row-2".to_owned()]),
            ("Doing".to_owned(), vec!["row-1".to_owned()]),
            ("Done".to_owned(), vec![]),
            ("Blocked".to_owned(), vec!["row-3".to_owned()]),
            ("(No value)".to_owned(), vec!["row-4".to_owned()]),
        ]
    );

    let home = run(&model, "/s");
    assert_eq!(home.navigation().view(), ViewMode::Kanban);
    assert_eq!(
        home.navigation().group_by_column_id(),
        Some(&ColumnId::new("col-status").unwrap())
    );
}

#[test]
fn session_survives_save_backup_and_restore() {
    let tmp = TempDir::new("persist");
    let folder = seeded_folder(&tmp);
    let loaded = folder.load().expect("load").expect("snapshot");

    let table = current_table(&loaded).expect("current table");
    assert_eq!(table.column_width(&ColumnId::new("col-title").unwrap()), Some(241));

    let edited = run(&loaded, "/v :Backlog kanban");
    folder.save(&edited).expect("save");
    assert_eq!(folder.load().expect("load"), Some(edited.clone()));

    let archive = folder.create(&edited).expect("backup");
    let moved = run(&edited, "/s Home:Chores");
    folder.save(&moved).expect("save");

    let restored = folder.restore(archive.archive_id()).expect("restore");
    assert_eq!(restored, edited);
    assert_eq!(folder.load().expect("load"), Some(edited));
    assert_eq!(folder.list().expect("list").len(), 1);
}
