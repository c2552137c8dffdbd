use crate::domain::column::ColumnId;
use crate::domain::row::RowId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Drag lifecycle
///
/// ```text
/// Idle -> Measuring     (drag starts on a row or column handle)
/// Measuring -> Dragging (layout captured, ghost shown)
/// Dragging -> Settling  (release or cancel)
/// Settling -> Idle      (target shown again, reorder committed if needed)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragState {
    #[default]
    Idle,
    Measuring,
    Dragging,
    Settling,
}

impl fmt::Display for DragState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Measuring => write!(f, "Measuring"),
            Self::Dragging => write!(f, "Dragging"),
            Self::Settling => write!(f, "Settling"),
        }
    }
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    Row(RowId),
    Column(ColumnId),
}

/// How a drag ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    Released,
    Cancelled,
}

/// State of the one active drag
#[derive(Debug, Clone)]
pub struct DragSession {
    pub id: Uuid,
    pub target: DragTarget,
    /// Column the target belonged to when the drag started
    pub old_column_id: ColumnId,
    /// Column the target belongs to now
    pub column_id: ColumnId,
    /// Last absolute pointer position
    pub pointer: Option<(f32, f32)>,
    pub started_at: DateTime<Utc>,
}

impl DragSession {
    pub fn new(target: DragTarget, column_id: ColumnId) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            old_column_id: column_id.clone(),
            column_id,
            pointer: None,
            started_at: Utc::now(),
        }
    }

    /// True if the target has ended up in a different column
    pub fn changed_column(&self) -> bool {
        self.old_column_id != self.column_id
    }
}

/// Summary of a finished drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub session_id: Uuid,
    pub target: DragTarget,
    pub reason: EndReason,
    pub old_column_id: ColumnId,
    pub new_column_id: ColumnId,
    /// Whether the reorder was written back to the canonical data
    pub committed: bool,
    pub duration: chrono::Duration,
}
