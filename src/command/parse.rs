// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line tokenizer: raw input → [`Action`].
//!
//! Grammar (with `/` as the default separator):
//! - `/s [path]`, `/select [path]`
//! - `/v [path] (table|kanban) [by:<column>]`, `/view ...`
//!
//! Anything else, including a command whose path fragment is malformed, is [`Action::Unknown`].

use std::sync::OnceLock;

use regex::{Match, Regex};

use super::path::PathFragment;
use super::Action;
use crate::model::{CommandSeparator, ViewMode};

const GROUP_BY_PREFIX: &str = "by:";

fn command_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)^(?P<sep>[/\\|])(?P<word>select|view|s|v)(?:\s+(?P<rest>.*))?$")
            .expect("hard-coded command regex is valid")
    })
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+").expect("hard-coded word regex is valid"))
}

/// Parses a command typed with the default `/` separator.
pub fn parse(input: &str) -> Action {
    parse_with_separator(input, CommandSeparator::default())
}

pub fn parse_with_separator(input: &str, separator: CommandSeparator) -> Action {
    let input = input.trim();
    let Some(caps) = command_regex().captures(input) else {
        return Action::Unknown;
    };

    let sep_matches = caps
        .name("sep")
        .and_then(|m| m.as_str().chars().next())
        .is_some_and(|ch| ch == separator.as_char());
    if !sep_matches {
        return Action::Unknown;
    }

    let word = caps
        .name("word")
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default();
    let rest = caps.name("rest").map_or("", |m| m.as_str()).trim();

    match word.as_str() {
        "s" | "select" => parse_select(rest),
        "v" | "view" => parse_view(rest),
        _ => Action::Unknown,
    }
}

fn parse_select(rest: &str) -> Action {
    if rest.is_empty() {
        return Action::Select { path: None };
    }
    match PathFragment::parse(rest) {
        Ok(path) => Action::Select { path: Some(path) },
        Err(_) => Action::Unknown,
    }
}

fn parse_view(rest: &str) -> Action {
    let words = word_regex().find_iter(rest).collect::<Vec<_>>();

    let by_index = words.iter().position(|w| is_group_by_word(w.as_str()));
    let (head, by_clause) = match by_index {
        Some(index) => {
            let after_prefix = words[index].start() + GROUP_BY_PREFIX.len();
            (&words[..index], Some(rest[after_prefix..].trim()))
        }
        None => (&words[..], None),
    };

    let Some(mode_index) = head
        .iter()
        .rposition(|w| ViewMode::parse_keyword(w.as_str()).is_some())
    else {
        return Action::ChangeView {
            mode: ViewMode::Table,
            path: None,
            group_by: None,
        };
    };
    let mode = ViewMode::parse_keyword(head[mode_index].as_str()).unwrap_or_default();

    let bare_group_by = span_text(rest, &head[mode_index + 1..]);
    let group_by = by_clause
        .or(bare_group_by)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned);

    let path_text = rest[..head[mode_index].start()].trim();
    let path = if path_text.is_empty() {
        None
    } else {
        match PathFragment::parse(path_text) {
            Ok(path) => Some(path),
            Err(_) => return Action::Unknown,
        }
    };

    Action::ChangeView {
        mode,
        path,
        group_by,
    }
}

fn is_group_by_word(word: &str) -> bool {
    word.get(..GROUP_BY_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(GROUP_BY_PREFIX))
}

/// Source text covered by `words`, from the first word's start to the last word's end.
fn span_text<'a>(source: &'a str, words: &[Match<'a>]) -> Option<&'a str> {
    let first = words.first()?;
    let last = words.last()?;
    Some(source[first.start()..last.end()].trim())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{parse, parse_with_separator};
    use crate::command::{Action, PathFragment};
    use crate::model::{CommandSeparator, ViewMode};

    fn path(input: &str) -> Option<PathFragment> {
        Some(PathFragment::parse(input).expect("path"))
    }

    fn view(mode: ViewMode, path_text: Option<&str>, by: Option<&str>) -> Action {
        Action::ChangeView {
            mode,
            path: path_text.and_then(path),
            group_by: by.map(ToOwned::to_owned),
        }
    }

    #[rstest]
    #[case("/s", Action::Select { path: None })]
    #[case("  /s   ", Action::Select { path: None })]
    #[case("/S Alpha:Tasks", Action::Select { path: path("Alpha:Tasks") })]
    #[case("/select ::", Action::Select { path: path("::") })]
    #[case("/s My Workspace:Tasks:2", Action::Select { path: path("My Workspace:Tasks:2") })]
    #[case("/s :_:3", Action::Select { path: path(":_:3") })]
    fn parses_select(#[case] input: &str, #[case] expected: Action) {
        assert_eq!(parse(input), expected);
    }

    #[rstest]
    #[case("/v", view(ViewMode::Table, None, None))]
    #[case("/v table", view(ViewMode::Table, None, None))]
    #[case("/v kanban", view(ViewMode::Kanban, None, None))]
    #[case("/v kanban by:Status", view(ViewMode::Kanban, None, Some("Status")))]
    #[case("/V KANBAN BY:2", view(ViewMode::Kanban, None, Some("2")))]
    #[case("/v kanban Status", view(ViewMode::Kanban, None, Some("Status")))]
    #[case("/v kanban by:Due Date", view(ViewMode::Kanban, None, Some("Due Date")))]
    #[case("/v Alpha:Tasks kanban by:Status", view(ViewMode::Kanban, Some("Alpha:Tasks"), Some("Status")))]
    #[case("/view :2 table", view(ViewMode::Table, Some(":2"), None))]
    #[case("/v My Workspace:Sprint Board kanban", view(ViewMode::Kanban, Some("My Workspace:Sprint Board"), None))]
    #[case("/v Alpha:Tasks", view(ViewMode::Table, None, None))]
    #[case("/v kanban by:", view(ViewMode::Kanban, None, None))]
    fn parses_view(#[case] input: &str, #[case] expected: Action) {
        assert_eq!(parse(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("hello")]
    #[case("/x Alpha")]
    #[case("/sAlpha")]
    #[case("/selectAlpha")]
    #[case("s Alpha")]
    #[case("/s Alpha::Tasks")]
    #[case("/s a:b:c:d:e")]
    #[case("/v Alpha:: kanban")]
    fn unknown_inputs(#[case] input: &str) {
        assert_eq!(parse(input), Action::Unknown);
    }

    #[test]
    fn separator_is_configurable() {
        assert_eq!(
            parse_with_separator("\\s Alpha", CommandSeparator::Backslash),
            Action::Select { path: path("Alpha") }
        );
        assert_eq!(
            parse_with_separator("|v kanban", CommandSeparator::Pipe),
            view(ViewMode::Kanban, None, None)
        );
        assert_eq!(
            parse_with_separator("/s Alpha", CommandSeparator::Pipe),
            Action::Unknown
        );
    }
}
