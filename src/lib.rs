//! # Hlavi Board
//!
//! Board state and drag-reorder engine for Hlavi's draggable kanban board.
//!
//! This crate owns the in-memory model of columns and rows, turns a stream
//! of pointer samples into reorder decisions, and auto-scrolls a wide board
//! while a card is dragged near its edges. Rendering, gestures, animation
//! and the scroll view stay with the host UI, which plugs in through the
//! traits in [`host`] and [`domain::layout::LayoutMeasurer`].

pub mod config;
pub mod domain;
pub mod drag;
pub mod error;
pub mod host;
pub mod runtime;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::BoardConfig;
pub use domain::{
    board::BoardModel,
    column::{Column, ColumnId},
    data::{BoardData, ColumnData, RowData},
    layout::{LayoutHandle, LayoutMeasurer, Rect},
    row::{Row, RowId},
};
pub use drag::{DragController, DragOutcome, DragState};
pub use error::{HlaviError, Result};
pub use host::{Animator, BoardListener, GhostTransform, NoopListener, PointerSample, Viewport};
pub use runtime::{BoardEvent, BoardRuntime};
pub use source::{DataSource, MemorySource};
