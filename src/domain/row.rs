use crate::domain::column::ColumnId;
use crate::domain::layout::LayoutHandle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a row, unique across the whole board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(String);

impl RowId {
    /// Creates a RowId from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random RowId for rows that arrive without one
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RowId {
    type Err = crate::error::HlaviError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(crate::error::HlaviError::InvalidId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    /// Column whose sequence currently contains this row
    pub column_id: ColumnId,
    /// Column the row lived in when the current drag started
    pub old_column_id: Option<ColumnId>,
    pub data: Value,
    /// Set while the row's ghost is being dragged
    pub hidden: bool,
    #[serde(skip)]
    pub handle: Option<LayoutHandle>,
}

impl Row {
    pub fn new(id: RowId, column_id: ColumnId, data: Value) -> Self {
        Self {
            id,
            column_id,
            old_column_id: None,
            data,
            hidden: false,
            handle: None,
        }
    }

    /// Whether the row takes part in hit-testing
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}
