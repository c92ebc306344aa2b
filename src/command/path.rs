// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

/// Segment that keeps the current level and targets the next one (`:_:col`).
pub const PLACEHOLDER: &str = "_";
pub const MAX_ABSOLUTE_SEGMENTS: usize = 4;
pub const MAX_RELATIVE_SEGMENTS: usize = 3;

/// Absolute path segments, `workspace[:table[:row[:col]]]`.
pub type Segments = SmallVec<[String; MAX_ABSOLUTE_SEGMENTS]>;

/// A classified path fragment.
///
/// Segments are carried verbatim (trimmed); whether a token names an entity or is a 1-based
/// position is decided during resolution, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFragment {
    /// 1 to 4 segments from the workspace root.
    Absolute(Segments),
    /// `N` bare colons: go up `N` levels.
    Ascend(usize),
    /// A leading colon followed by 1 to 3 segments.
    Descend(RelativeTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelativeTarget {
    /// `:token` — a row position or a table in the current workspace.
    One(String),
    /// `:row:col`
    Two(String, String),
    /// `:_:col`
    ColumnOnly(String),
    /// `:table:row:col`
    Three(String, String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSyntaxError {
    Empty,
    EmptySegment,
    TooManySegments { max: usize, found: usize },
}

impl fmt::Display for PathSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("path must not be empty"),
            Self::EmptySegment => f.write_str("path must not contain empty segments"),
            Self::TooManySegments { max, found } => {
                write!(f, "path has {found} segments (at most {max} allowed)")
            }
        }
    }
}

impl std::error::Error for PathSyntaxError {}

impl PathFragment {
    pub fn parse(input: &str) -> Result<Self, PathSyntaxError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PathSyntaxError::Empty);
        }

        if input.bytes().all(|b| b == b':') {
            return Ok(Self::Ascend(input.len()));
        }

        if let Some(rest) = input.strip_prefix(':') {
            let mut segments = split_segments(rest, MAX_RELATIVE_SEGMENTS)?.into_iter();
            let target = match (segments.next(), segments.next(), segments.next()) {
                (Some(a), None, None) => RelativeTarget::One(a),
                (Some(a), Some(b), None) if a == PLACEHOLDER => RelativeTarget::ColumnOnly(b),
                (Some(a), Some(b), None) => RelativeTarget::Two(a, b),
                (Some(a), Some(b), Some(c)) => RelativeTarget::Three(a, b, c),
                _ => return Err(PathSyntaxError::Empty),
            };
            return Ok(Self::Descend(target));
        }

        Ok(Self::Absolute(split_segments(input, MAX_ABSOLUTE_SEGMENTS)?))
    }

    pub fn is_relative(&self) -> bool {
        !matches!(self, Self::Absolute(_))
    }
}

fn split_segments(input: &str, max: usize) -> Result<Segments, PathSyntaxError> {
    let mut segments = Segments::new();
    for raw in input.split(':') {
        let segment = raw.trim();
        if segment.is_empty() {
            return Err(PathSyntaxError::EmptySegment);
        }
        segments.push(segment.to_owned());
    }
    if segments.len() > max {
        return Err(PathSyntaxError::TooManySegments {
            max,
            found: segments.len(),
        });
    }
    Ok(segments)
}

impl fmt::Display for PathFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(segments) => f.write_str(&segments.join(":")),
            Self::Ascend(levels) => {
                for _ in 0..*levels {
                    f.write_str(":")?;
                }
                Ok(())
            }
            Self::Descend(RelativeTarget::One(a)) => write!(f, ":{a}"),
            Self::Descend(RelativeTarget::Two(a, b)) => write!(f, ":{a}:{b}"),
            Self::Descend(RelativeTarget::ColumnOnly(b)) => write!(f, ":{PLACEHOLDER}:{b}"),
            Self::Descend(RelativeTarget::Three(a, b, c)) => write!(f, ":{a}:{b}:{c}"),
        }
    }
}

impl FromStr for PathFragment {
    type Err = PathSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
