//! Test doubles for the host capabilities.
//!
//! Boards built here use a fixed grid: column `i` spans x `300*i..300*(i+1)`
//! and y `0..1000`; row `j` of a column spans y `100*j..100*(j+1)`.

use crate::config::BoardConfig;
use crate::domain::board::BoardModel;
use crate::domain::column::{Column, ColumnId};
use crate::domain::data::{BoardData, ColumnData, RowData};
use crate::domain::layout::{LayoutHandle, LayoutMeasurer, Rect};
use crate::domain::row::{Row, RowId};
use crate::drag::controller::DragController;
use crate::host::{Animator, BoardListener, GhostTransform, Viewport};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

pub(crate) const COLUMN_WIDTH: f32 = 300.0;
pub(crate) const ROW_HEIGHT: f32 = 100.0;
pub(crate) const VIEWPORT_EXTENT: f32 = 600.0;

pub(crate) type BoardShape<'a> = &'a [(&'a str, &'a [&'a str])];

pub(crate) fn board_data(shape: BoardShape<'_>) -> BoardData {
    BoardData::new(
        shape
            .iter()
            .map(|(column, rows)| {
                rows.iter().fold(
                    ColumnData::new(*column, json!({"name": column})),
                    |col, row| col.with_row(RowData::new(*row, json!({"title": row}))),
                )
            })
            .collect(),
    )
}

/// Measurer backed by a shared handle → rectangle map
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedMeasurer {
    rects: Rc<RefCell<HashMap<LayoutHandle, Rect>>>,
}

impl SharedMeasurer {
    pub(crate) fn set(&self, handle: LayoutHandle, rect: Rect) {
        self.rects.borrow_mut().insert(handle, rect);
    }

    /// Points a row's handle at a new rectangle, as a re-render would
    pub(crate) fn move_row(&self, board: &BoardModel, id: &str, rect: Rect) {
        if let Some(handle) = board.row(&RowId::new(id)).and_then(|row| row.handle) {
            self.set(handle, rect);
        }
    }

    /// Makes a row unmeasurable, as if it were unmounted
    pub(crate) fn forget_row(&self, board: &BoardModel, id: &str) {
        if let Some(handle) = board.row(&RowId::new(id)).and_then(|row| row.handle) {
            self.rects.borrow_mut().remove(&handle);
        }
    }

    /// Moves every rectangle horizontally, as a scroll would
    pub(crate) fn shift_all(&self, dx: f32) {
        for rect in self.rects.borrow_mut().values_mut() {
            rect.x += dx;
        }
    }
}

impl LayoutMeasurer for SharedMeasurer {
    fn measure(&self, handle: &LayoutHandle) -> Option<Rect> {
        self.rects.borrow().get(handle).copied()
    }
}

/// Board with every column and row mounted and measured
pub(crate) fn grid_board(shape: BoardShape<'_>) -> (BoardModel, SharedMeasurer) {
    let (mut board, measurer) = mounted_board(shape);
    board.measure_columns_layout();
    (board, measurer)
}

/// Board with every handle registered but no layout captured yet
pub(crate) fn mounted_board(shape: BoardShape<'_>) -> (BoardModel, SharedMeasurer) {
    let measurer = SharedMeasurer::default();
    let mut board = BoardModel::from_data(board_data(shape), Box::new(measurer.clone()))
        .expect("valid test board");

    let mut next_handle = 1;
    for (ci, (column, rows)) in shape.iter().enumerate() {
        let left = ci as f32 * COLUMN_WIDTH;
        let handle = LayoutHandle(1000 + ci as u64);
        measurer.set(handle, Rect::new(left, 0.0, COLUMN_WIDTH, 1000.0));
        board
            .update_column_ref(&ColumnId::new(*column), Some(handle))
            .expect("column exists");

        for (ri, row) in rows.iter().enumerate() {
            let handle = LayoutHandle(next_handle);
            next_handle += 1;
            measurer.set(
                handle,
                Rect::new(left, ri as f32 * ROW_HEIGHT, COLUMN_WIDTH, ROW_HEIGHT),
            );
            board
                .update_row_ref(&RowId::new(*row), Some(handle))
                .expect("row exists");
        }
    }
    (board, measurer)
}

#[derive(Debug, Clone)]
pub(crate) struct RecordingViewport {
    extent: f32,
    max_offset: f32,
    scrolls: Rc<RefCell<Vec<(f32, bool)>>>,
}

impl RecordingViewport {
    pub(crate) fn new(extent: f32, max_offset: f32) -> Self {
        Self {
            extent,
            max_offset,
            scrolls: Rc::default(),
        }
    }

    pub(crate) fn scrolls(&self) -> Vec<(f32, bool)> {
        self.scrolls.borrow().clone()
    }
}

impl Viewport for RecordingViewport {
    fn extent(&self) -> f32 {
        self.extent
    }

    fn max_offset(&self) -> f32 {
        self.max_offset
    }

    fn scroll_to(&mut self, offset: f32, animated: bool) {
        self.scrolls.borrow_mut().push((offset, animated));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AnimatorCall {
    Show { slot: Rect, rotation: f32 },
    Track(GhostTransform),
    Settle { slot: Option<Rect>, delay_ms: u64 },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingAnimator {
    calls: Rc<RefCell<Vec<AnimatorCall>>>,
}

impl RecordingAnimator {
    pub(crate) fn calls(&self) -> Vec<AnimatorCall> {
        self.calls.borrow().clone()
    }
}

impl Animator for RecordingAnimator {
    fn show_ghost(&mut self, slot: Rect, rotation_deg: f32) {
        self.calls.borrow_mut().push(AnimatorCall::Show {
            slot,
            rotation: rotation_deg,
        });
    }

    fn track(&mut self, transform: GhostTransform) {
        self.calls.borrow_mut().push(AnimatorCall::Track(transform));
    }

    fn settle(&mut self, slot: Option<Rect>, delay: Duration) {
        self.calls.borrow_mut().push(AnimatorCall::Settle {
            slot,
            delay_ms: delay.as_millis() as u64,
        });
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingListener {
    presses: Rc<RefCell<Vec<String>>>,
    starts: Rc<RefCell<Vec<String>>>,
    ends: Rc<RefCell<Vec<(String, String, String)>>>,
    failing: Rc<Cell<bool>>,
}

impl RecordingListener {
    pub(crate) fn presses(&self) -> Vec<String> {
        self.presses.borrow().clone()
    }

    pub(crate) fn starts(&self) -> Vec<String> {
        self.starts.borrow().clone()
    }

    pub(crate) fn ends(&self) -> Vec<(String, String, String)> {
        self.ends.borrow().clone()
    }

    /// Every callback records its call and then returns an error
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn result(&self) -> anyhow::Result<()> {
        if self.failing.get() {
            anyhow::bail!("listener failure");
        }
        Ok(())
    }
}

impl BoardListener for RecordingListener {
    fn on_row_press(&mut self, row: &Row) -> anyhow::Result<()> {
        self.presses.borrow_mut().push(row.id.to_string());
        self.result()
    }

    fn on_drag_start(&mut self, column: &Column) -> anyhow::Result<()> {
        self.starts.borrow_mut().push(column.id.to_string());
        self.result()
    }

    fn on_drag_end(
        &mut self,
        old_column_id: &ColumnId,
        new_column_id: &ColumnId,
        row: &Row,
    ) -> anyhow::Result<()> {
        self.ends.borrow_mut().push((
            old_column_id.to_string(),
            new_column_id.to_string(),
            row.id.to_string(),
        ));
        self.result()
    }
}

pub(crate) struct Harness {
    pub controller: DragController,
    pub measurer: SharedMeasurer,
    pub viewport: RecordingViewport,
    pub animator: RecordingAnimator,
    pub listener: RecordingListener,
}

pub(crate) fn harness(shape: BoardShape<'_>) -> Harness {
    harness_with(shape, BoardConfig::default())
}

pub(crate) fn harness_with(shape: BoardShape<'_>, config: BoardConfig) -> Harness {
    let (board, measurer) = grid_board(shape);
    harness_for(board, measurer, config)
}

pub(crate) fn harness_for(
    board: BoardModel,
    measurer: SharedMeasurer,
    config: BoardConfig,
) -> Harness {
    let viewport = RecordingViewport::new(VIEWPORT_EXTENT, 10_000.0);
    let animator = RecordingAnimator::default();
    let listener = RecordingListener::default();
    let controller = DragController::new(
        board,
        config,
        Box::new(viewport.clone()),
        Box::new(animator.clone()),
        Box::new(listener.clone()),
    )
    .expect("valid test config");

    Harness {
        controller,
        measurer,
        viewport,
        animator,
        listener,
    }
}
