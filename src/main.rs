// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tablane CLI entrypoint.
//!
//! By default this opens the interactive TUI on `<dir>/workspace.todo.json`, creating it when
//! missing. The backup flags and `--exec` run once and exit without starting the TUI.

use std::error::Error;

use tablane::command::{execute, parse_with_separator, Action};
use tablane::query::path_label;
use tablane::store::{
    ArchiveId, SnapshotArchive, SnapshotStore, WorkspaceFolder, WriteDurability,
};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<dir>] [--durable-writes]\n  {program} [--dir <dir>] [--durable-writes]\n  {program} --demo\n  {program} [<dir>] --backup\n  {program} [<dir>] --list-backups\n  {program} [<dir>] --restore <backup-name>\n  {program} [<dir>] --exec <command> [--exec <command>...]\n  {program} --demo --exec <command> [--exec <command>...]\n\nIf dir/--dir is omitted, the current working directory is used.\n--demo uses a built-in demo model, never touches disk and cannot be combined with dir/--dir.\n--exec applies commands such as `/s Work:Tasks:2:1` in order, saves, and prints the final path.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum Mode {
    #[default]
    Tui,
    Backup,
    ListBackups,
    Restore(String),
    Exec(Vec<String>),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    dir: Option<String>,
    durable_writes: bool,
    mode: Mode,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--dir" => {
                if options.dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.dir = Some(dir);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--backup" => set_mode(&mut options, Mode::Backup)?,
            "--list-backups" => set_mode(&mut options, Mode::ListBackups)?,
            "--restore" => {
                let name = args.next().ok_or(())?;
                set_mode(&mut options, Mode::Restore(name))?;
            }
            "--exec" => {
                let command = args.next().ok_or(())?;
                if let Mode::Exec(commands) = &mut options.mode {
                    commands.push(command);
                } else {
                    set_mode(&mut options, Mode::Exec(vec![command]))?;
                }
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.dir.is_some() {
                    return Err(());
                }
                options.dir = Some(arg);
            }
        }
    }

    if options.demo {
        if options.dir.is_some() || options.durable_writes {
            return Err(());
        }
        if !matches!(options.mode, Mode::Tui | Mode::Exec(_)) {
            return Err(());
        }
    }

    Ok(options)
}

fn set_mode(options: &mut CliOptions, mode: Mode) -> Result<(), ()> {
    if options.mode != Mode::Tui {
        return Err(());
    }
    options.mode = mode;
    Ok(())
}

fn open_folder(options: &CliOptions) -> WorkspaceFolder {
    let dir = options.dir.clone().unwrap_or_else(|| ".".to_owned());
    let folder = WorkspaceFolder::new(dir);
    if options.durable_writes {
        folder.with_durability(WriteDurability::Durable)
    } else {
        folder
    }
}

/// Applies `commands` in order; without a folder they run against the demo model.
fn run_exec(commands: &[String], folder: Option<&WorkspaceFolder>) -> Result<(), Box<dyn Error>> {
    let mut model = match folder {
        Some(folder) => folder.load_or_init()?,
        None => tablane::tui::demo_model(),
    };

    for command in commands {
        let action = parse_with_separator(command, model.settings().command_separator());
        if action == Action::Unknown {
            return Err(format!("unknown command: {command:?}").into());
        }
        model = execute(&model, &action);
    }

    if let Some(folder) = folder {
        folder.save(&model)?;
    }
    println!("{}", path_label(&model));
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "tablane".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.demo {
            return match &options.mode {
                Mode::Exec(commands) => run_exec(commands, None),
                _ => tablane::tui::run(),
            };
        }

        let folder = open_folder(&options);
        match &options.mode {
            Mode::Tui => {
                let model = folder.load_or_init()?;
                tablane::tui::run_with_folder(model, Some(folder))
            }
            Mode::Backup => {
                let model = folder.load_or_init()?;
                let info = folder.create(&model)?;
                println!("{}", info.archive_id());
                Ok(())
            }
            Mode::ListBackups => {
                for info in folder.list()? {
                    println!("{}\t{} bytes", info.archive_id(), info.size());
                }
                Ok(())
            }
            Mode::Restore(name) => {
                let archive_id = ArchiveId::new(name.clone())?;
                let model = folder.restore(&archive_id)?;
                println!("restored {archive_id}: {}", path_label(&model));
                Ok(())
            }
            Mode::Exec(commands) => run_exec(commands, Some(&folder)),
        }
    })();

    if let Err(err) = result {
        eprintln!("tablane: {err}");
        std::process::exit(1);
    }
}
