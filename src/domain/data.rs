//! Wire shape of the externally owned board data.
//!
//! This is what a data source hands the engine on reload and what the engine
//! hands back on commit. Ids are optional on the way in; the board fills in
//! generated ids for entries that lack one.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl RowData {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: Some(id.into()),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub rows: Vec<RowData>,
}

impl ColumnData {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: Some(id.into()),
            data,
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: RowData) -> Self {
        self.rows.push(row);
        self
    }
}

/// Canonical board contents, in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardData {
    #[serde(default)]
    pub columns: Vec<ColumnData>,
}

impl BoardData {
    pub fn new(columns: Vec<ColumnData>) -> Self {
        Self { columns }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Row ids of one column, in order. Only ids that were present are listed.
    pub fn row_ids(&self, column_id: &str) -> Vec<&str> {
        self.columns
            .iter()
            .find(|col| col.id.as_deref() == Some(column_id))
            .map(|col| col.rows.iter().filter_map(|r| r.id.as_deref()).collect())
            .unwrap_or_default()
    }
}
