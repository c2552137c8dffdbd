//! Capabilities supplied by the host UI: the scrollable viewport, the ghost
//! animation driver and the widget callbacks.
//!
//! Layout measurement lives with the layout cache in
//! [`crate::domain::layout::LayoutMeasurer`].

use crate::domain::column::{Column, ColumnId};
use crate::domain::layout::Rect;
use crate::domain::row::Row;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One sample from the pan gesture
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Offset from where the gesture started
    pub translation_x: f32,
    pub translation_y: f32,
    /// Position in screen coordinates
    pub absolute_x: f32,
    pub absolute_y: f32,
}

impl PointerSample {
    pub fn new(translation_x: f32, translation_y: f32, absolute_x: f32, absolute_y: f32) -> Self {
        Self {
            translation_x,
            translation_y,
            absolute_x,
            absolute_y,
        }
    }

    /// A sample at an absolute position with no translation
    pub fn at(absolute_x: f32, absolute_y: f32) -> Self {
        Self::new(0.0, 0.0, absolute_x, absolute_y)
    }
}

/// Transform applied to the floating ghost
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GhostTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotation_deg: f32,
}

/// Imperative handle to the board's scroll view
pub trait Viewport {
    /// Visible length along the scroll axis
    fn extent(&self) -> f32;

    /// Largest reachable scroll offset
    fn max_offset(&self) -> f32 {
        f32::MAX
    }

    fn scroll_to(&mut self, offset: f32, animated: bool);
}

/// Interpolation driver for the ghost
pub trait Animator {
    /// Shows the ghost over `slot`, tilted by `rotation_deg`
    fn show_ghost(&mut self, slot: Rect, rotation_deg: f32);

    /// Moves the ghost to follow the pointer
    fn track(&mut self, transform: GhostTransform);

    /// Animates the ghost back onto `slot` (if known) and resets it to the
    /// default transform once `delay` has elapsed
    fn settle(&mut self, slot: Option<Rect>, delay: Duration);
}

/// Widget callbacks. Every method is best-effort: an error is logged and the
/// drag still runs to completion.
pub trait BoardListener {
    fn on_row_press(&mut self, _row: &Row) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_drag_start(&mut self, _column: &Column) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_drag_end(
        &mut self,
        _old_column_id: &ColumnId,
        _new_column_id: &ColumnId,
        _row: &Row,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Listener that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl BoardListener for NoopListener {}
