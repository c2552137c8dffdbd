//! Drag lifecycle.
//!
//! The controller is the only writer of the board while a drag is live. It
//! turns gesture events into board moves, drives the ghost and the viewport,
//! and commits the reorder once the drag has settled.

use crate::config::BoardConfig;
use crate::domain::board::BoardModel;
use crate::domain::column::ColumnId;
use crate::domain::data::BoardData;
use crate::domain::layout::Rect;
use crate::domain::row::RowId;
use crate::drag::autoscroll::{AutoScrollHeuristic, AutoScrollTimer};
use crate::drag::session::{DragOutcome, DragSession, DragState, DragTarget, EndReason};
use crate::error::Result;
use crate::host::{Animator, BoardListener, GhostTransform, PointerSample, Viewport};
use chrono::Utc;
use tracing::{debug, info, trace, warn};

/// Logs a failed callback. Callbacks never stop the state machine.
fn log_callback(name: &str, result: anyhow::Result<()>) {
    if let Err(err) = result {
        warn!(callback = name, error = %err, "Board callback failed");
    }
}

pub struct DragController {
    board: BoardModel,
    config: BoardConfig,
    viewport: Box<dyn Viewport>,
    animator: Box<dyn Animator>,
    listener: Box<dyn BoardListener>,
    state: DragState,
    session: Option<DragSession>,
    auto_scroll: AutoScrollHeuristic,
    scroll_offset: f32,
}

impl DragController {
    pub fn new(
        board: BoardModel,
        config: BoardConfig,
        viewport: Box<dyn Viewport>,
        animator: Box<dyn Animator>,
        listener: Box<dyn BoardListener>,
    ) -> Result<Self> {
        config.validate()?;
        let auto_scroll = AutoScrollHeuristic::new(&config);
        Ok(Self {
            board,
            config,
            viewport,
            animator,
            listener,
            state: DragState::Idle,
            session: None,
            auto_scroll,
            scroll_offset: 0.0,
        })
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    /// Mutable board access for structural setup (refs, layout checkpoints).
    /// Moves should go through the drag API.
    pub fn board_mut(&mut self) -> &mut BoardModel {
        &mut self.board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    pub fn auto_scroll_timer(&self) -> Option<AutoScrollTimer> {
        self.auto_scroll.timer()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn transition(&mut self, next: DragState) {
        debug!(from = %self.state, to = %next, "Drag state transition");
        self.state = next;
    }

    /// Replaces the board contents. Refused while a drag is live, since the
    /// draft order would be lost; returns whether the data was applied.
    pub fn reload(&mut self, data: BoardData) -> Result<bool> {
        if !self.is_idle() {
            debug!(state = %self.state, "Reload refused during drag");
            return Ok(false);
        }
        self.board.reload(data)?;
        Ok(true)
    }

    /// Forwards a tap on a row to the listener
    pub fn press_row(&mut self, id: &RowId) -> bool {
        if !self.is_idle() {
            return false;
        }
        match self.board.row(id) {
            Some(row) => {
                log_callback("on_row_press", self.listener.on_row_press(row));
                true
            }
            None => false,
        }
    }

    /// Mirrors the viewport's scroll offset
    pub fn scroll_changed(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    /// Scroll came to rest: mirror the offset and refresh layout
    pub fn scroll_settled(&mut self, offset: f32) {
        self.scroll_offset = offset;
        self.board.measure_columns_layout();
    }

    /// Starts dragging a row. Returns `false` if a drag is already live or
    /// the row does not exist.
    pub fn start_row_drag(&mut self, id: &RowId) -> bool {
        if !self.is_idle() {
            debug!(row = %id, state = %self.state, "Drag start ignored, drag already active");
            return false;
        }
        let Some(column_id) = self.board.row(id).map(|row| row.column_id.clone()) else {
            return false;
        };

        self.transition(DragState::Measuring);
        self.board.hide_row(id);
        self.board.measure_columns_layout();
        let session = DragSession::new(DragTarget::Row(id.clone()), column_id.clone());
        info!(session = %session.id, row = %id, column = %column_id, "Row drag started");
        self.session = Some(session);

        // Hidden rows are skipped by the checkpoint above
        let slot = self.board.update_row_layout(id);
        self.begin_dragging(&column_id, slot);
        true
    }

    /// Starts dragging a whole column
    pub fn start_column_drag(&mut self, id: &ColumnId) -> bool {
        if !self.is_idle() {
            debug!(column = %id, state = %self.state, "Drag start ignored, drag already active");
            return false;
        }
        if self.board.column(id).is_none() {
            return false;
        }

        self.transition(DragState::Measuring);
        self.board.hide_column(id);
        self.board.measure_columns_layout();
        let session = DragSession::new(DragTarget::Column(id.clone()), id.clone());
        info!(session = %session.id, column = %id, "Column drag started");
        self.session = Some(session);

        let slot = self.board.column_layout(id);
        self.begin_dragging(id, slot);
        true
    }

    fn begin_dragging(&mut self, column_id: &ColumnId, slot: Option<Rect>) {
        self.center_column(column_id);
        if let Some(column) = self.board.column(column_id) {
            log_callback("on_drag_start", self.listener.on_drag_start(column));
        }
        if let Some(slot) = slot {
            self.animator
                .show_ghost(slot, self.config.active_row_rotation);
        }
        self.transition(DragState::Dragging);
    }

    /// Scrolls the viewport so the column sits in its middle
    fn center_column(&mut self, column_id: &ColumnId) {
        let Some(rect) = self.board.update_column_layout(column_id) else {
            return;
        };
        let extent = self.viewport.extent();
        let (start, length) = if self.config.horizontal {
            (rect.x, rect.width)
        } else {
            (rect.y, rect.height)
        };
        let target = (start + self.scroll_offset + length / 2.0 - extent / 2.0)
            .clamp(0.0, self.viewport.max_offset().max(0.0));

        self.viewport.scroll_to(target, true);
        self.scroll_offset = target;
    }

    /// Handles one pointer sample. Returns the column under the pointer, if
    /// any.
    pub fn pointer_moved(&mut self, sample: PointerSample) -> Option<ColumnId> {
        if self.state != DragState::Dragging {
            return None;
        }

        self.animator.track(GhostTransform {
            translate_x: sample.translation_x,
            translate_y: sample.translation_y,
            rotation_deg: self.config.active_row_rotation,
        });
        self.auto_scroll.clear();

        let (x, y) = (sample.absolute_x, sample.absolute_y);
        // The gesture source reports the origin before its first real sample
        if x == 0.0 && y == 0.0 {
            return None;
        }

        let session = self.session.as_mut()?;
        session.pointer = Some((x, y));

        let hit = match session.target.clone() {
            DragTarget::Row(row_id) => self.board.move_row(&row_id, x, y, |_from, to| {
                session.column_id = to.clone();
            }),
            DragTarget::Column(column_id) => self.board.move_column(&column_id, x),
        };
        trace!(x, y, hit = ?hit, "Pointer sample");

        if hit.is_some() {
            let position = if self.config.horizontal { x } else { y };
            self.auto_scroll.observe(position, self.viewport.extent());
        }
        hit
    }

    /// One interval of the auto-scroll timer. Returns the new offset, or
    /// `None` if no timer is running.
    pub fn auto_scroll_tick(&mut self) -> Option<f32> {
        if self.state != DragState::Dragging {
            return None;
        }
        let step = self.config.snap_interval(self.viewport.extent());
        let next = self
            .auto_scroll
            .next_offset(self.scroll_offset, step, self.viewport.max_offset())?;

        self.viewport.scroll_to(next, true);
        self.scroll_offset = next;
        self.board.measure_columns_layout();
        trace!(offset = next, "Auto-scroll step");
        Some(next)
    }

    /// The gesture was released
    pub fn release(&mut self) -> Option<DragOutcome> {
        self.finish(EndReason::Released)
    }

    /// The gesture was cancelled. Resolves exactly like a release.
    pub fn cancel(&mut self) -> Option<DragOutcome> {
        self.finish(EndReason::Cancelled)
    }

    fn finish(&mut self, reason: EndReason) -> Option<DragOutcome> {
        if self.session.is_none() {
            trace!(?reason, "Drag end without a session");
            return None;
        }

        self.transition(DragState::Settling);
        if self.auto_scroll.clear() {
            debug!("Auto-scroll timer cleared on drag end");
        }

        let session = self.session.take()?;
        let slot = match &session.target {
            DragTarget::Row(id) => self.board.update_row_layout(id),
            DragTarget::Column(id) => self.board.update_column_layout(id),
        };
        self.animator.settle(slot, self.config.settle_delay());

        let committed = match &session.target {
            DragTarget::Row(id) => self.settle_row(id, &session),
            DragTarget::Column(id) => self.settle_column(id),
        };

        self.transition(DragState::Idle);
        let duration = Utc::now() - session.started_at;
        info!(
            session = %session.id,
            ?reason,
            from = %session.old_column_id,
            to = %session.column_id,
            committed,
            duration_ms = duration.num_milliseconds(),
            "Drag finished"
        );

        Some(DragOutcome {
            session_id: session.id,
            target: session.target,
            reason,
            old_column_id: session.old_column_id,
            new_column_id: session.column_id,
            committed,
            duration,
        })
    }

    fn settle_row(&mut self, id: &RowId, session: &DragSession) -> bool {
        self.board.show_row(id);
        if !session.changed_column() {
            return false;
        }
        if let Some(row) = self.board.row(id) {
            log_callback(
                "on_drag_end",
                self.listener
                    .on_drag_end(&session.old_column_id, &session.column_id, row),
            );
        }
        self.board.update_original_data();
        true
    }

    fn settle_column(&mut self, id: &ColumnId) -> bool {
        self.board.show_column(id);
        let committed_index = self
            .board
            .original_data()
            .columns
            .iter()
            .position(|col| col.id.as_deref() == Some(id.as_str()));
        let current_index = self.board.columns().iter().position(|col| &col.id == id);
        if committed_index == current_index {
            return false;
        }
        self.board.update_original_data();
        true
    }
}
