//! Layout rectangle cache.
//!
//! Rectangles are captured at checkpoints (mount, scroll settle, drag start,
//! auto-scroll tick) and read on the pointer hot path. Between checkpoints the
//! cache may be stale; hit-testing accepts that inaccuracy instead of asking
//! the render layer for fresh geometry on every sample.

use crate::domain::column::ColumnId;
use crate::domain::row::RowId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Axis-aligned rectangle in absolute screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if `x` lies within the horizontal span (edges inclusive)
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x <= self.x + self.width
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Opaque handle to an on-screen instance, issued by the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutHandle(pub u64);

/// Render-layer capability that measures an on-screen instance
pub trait LayoutMeasurer {
    /// Returns the current rectangle, or `None` if the instance is not mounted
    fn measure(&self, handle: &LayoutHandle) -> Option<Rect>;
}

/// Cache of column and row rectangles
#[derive(Debug, Default, Clone)]
pub struct LayoutTracker {
    columns: HashMap<ColumnId, Rect>,
    rows: HashMap<RowId, Rect>,
}

impl LayoutTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self, id: &ColumnId) -> Option<Rect> {
        self.columns.get(id).copied()
    }

    pub fn row(&self, id: &RowId) -> Option<Rect> {
        self.rows.get(id).copied()
    }

    /// Stores a fresh measurement, or evicts the entry when the measurement
    /// came back empty
    pub fn set_column(&mut self, id: &ColumnId, rect: Option<Rect>) {
        match rect {
            Some(rect) => {
                self.columns.insert(id.clone(), rect);
            }
            None => {
                self.columns.remove(id);
            }
        }
    }

    pub fn set_row(&mut self, id: &RowId, rect: Option<Rect>) {
        match rect {
            Some(rect) => {
                self.rows.insert(id.clone(), rect);
            }
            None => {
                self.rows.remove(id);
            }
        }
    }

    /// Drops every entry whose id is not accepted by the predicates
    pub fn retain(
        &mut self,
        keep_column: impl Fn(&ColumnId) -> bool,
        keep_row: impl Fn(&RowId) -> bool,
    ) {
        self.columns.retain(|id, _| keep_column(id));
        self.rows.retain(|id, _| keep_row(id));
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
