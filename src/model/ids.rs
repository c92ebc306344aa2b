// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Stable key of a workspace, table, column or row, tagged by what it points at.
///
/// Commands never address entities by id (paths use names or 1-based positions); ids only link
/// pointers, cell values and column widths to their owners and survive renames. Snapshots written
/// elsewhere may carry any non-blank string, while new entities get a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<Tag> {
    key: String,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag> Id<Tag> {
    pub fn new(key: impl Into<String>) -> Result<Self, IdError> {
        let key = key.into();
        if key.is_empty() {
            return Err(IdError::Empty);
        }
        if key.trim().is_empty() {
            return Err(IdError::Blank);
        }
        Ok(Self {
            key,
            _tag: PhantomData,
        })
    }

    /// Mints the key for a newly created entity.
    pub fn generate() -> Self {
        Self {
            key: uuid::Uuid::new_v4().to_string(),
            _tag: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl<Tag> fmt::Display for Id<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl<Tag> FromStr for Id<Tag> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Why a stored key cannot become an [`Id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    Blank,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::Blank => f.write_str("id must not be whitespace only"),
        }
    }
}

impl std::error::Error for IdError {}

/// A workspace (`dbs[]` in snapshots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkspaceIdTag {}
pub type WorkspaceId = Id<WorkspaceIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableIdTag {}
pub type TableId = Id<TableIdTag>;

/// Also keys row values and column widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnIdTag {}
pub type ColumnId = Id<ColumnIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowIdTag {}
pub type RowId = Id<RowIdTag>;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ColumnId, IdError, RowId, TableId};

    #[rstest]
    #[case("", IdError::Empty)]
    #[case("  \t", IdError::Blank)]
    fn blank_keys_are_rejected(#[case] key: &str, #[case] expected: IdError) {
        assert_eq!(TableId::new(key), Err(expected));
    }

    #[test]
    fn foreign_keys_are_kept_verbatim() {
        let column: ColumnId = " col 1 ".parse().expect("column id");
        assert_eq!(column.as_str(), " col 1 ");
        assert_eq!(column.to_string(), " col 1 ");
    }

    #[test]
    fn generated_keys_are_distinct_uuids() {
        let a = RowId::generate();
        let b = RowId::generate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }
}
