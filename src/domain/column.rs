use crate::domain::layout::LayoutHandle;
use crate::domain::row::RowId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a ColumnId from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random ColumnId for columns that arrive without one
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ColumnId {
    type Err = crate::error::HlaviError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(crate::error::HlaviError::InvalidId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A list on the board. Rows are referenced by id; display order is the
/// order of `rows`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    /// Display position among the board's columns
    pub index: usize,
    pub rows: Vec<RowId>,
    pub data: Value,
    /// Set while the column itself is being dragged
    pub hidden: bool,
    #[serde(skip)]
    pub handle: Option<LayoutHandle>,
}

impl Column {
    pub fn new(id: ColumnId, index: usize, data: Value) -> Self {
        Self {
            id,
            index,
            rows: Vec::new(),
            data,
            hidden: false,
            handle: None,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row: &RowId) -> bool {
        self.rows.contains(row)
    }

    /// Index of the row within this column's display order
    pub fn position_of(&self, row: &RowId) -> Option<usize> {
        self.rows.iter().position(|id| id == row)
    }
}
