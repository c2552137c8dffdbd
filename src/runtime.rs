//! Single-consumer event loop.
//!
//! Gesture, scroll and reload events arrive on one queue and are handled one
//! at a time, interleaved with ticks of the auto-scroll interval. Nothing
//! else touches the controller while the loop runs, so the engine needs no
//! locks.

use crate::domain::column::ColumnId;
use crate::domain::row::RowId;
use crate::drag::controller::DragController;
use crate::host::PointerSample;
use crate::source::DataSource;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Input to the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    PressRow(RowId),
    DragRow(RowId),
    DragColumn(ColumnId),
    Pointer(PointerSample),
    Release,
    Cancel,
    /// Viewport offset changed
    Scrolled(f32),
    /// Viewport came to rest at this offset
    ScrollSettled(f32),
    /// Reload the board from the data source
    Reload,
    Shutdown,
}

pub struct BoardRuntime {
    controller: DragController,
    source: Arc<dyn DataSource>,
    armed: Option<u64>,
    reload_pending: bool,
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

impl BoardRuntime {
    pub fn new(controller: DragController, source: Arc<dyn DataSource>) -> Self {
        Self {
            controller,
            source,
            armed: None,
            reload_pending: false,
        }
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Runs until `Shutdown` arrives or every sender is dropped, then hands
    /// the controller back. A live drag is cancelled on the way out.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<BoardEvent>) -> DragController {
        let mut interval: Option<Interval> = None;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(BoardEvent::Shutdown) | None => {
                        self.controller.cancel();
                        self.flush_commit().await;
                        break;
                    }
                    Some(event) => self.dispatch(event).await,
                },
                _ = next_tick(&mut interval), if interval.is_some() => {
                    self.controller.auto_scroll_tick();
                }
            }

            self.flush_commit().await;
            if self.reload_pending && self.controller.is_idle() {
                self.reload().await;
            }
            self.rearm(&mut interval);
        }

        info!("Board runtime stopped");
        self.controller
    }

    async fn dispatch(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::PressRow(id) => {
                self.controller.press_row(&id);
            }
            BoardEvent::DragRow(id) => {
                self.controller.start_row_drag(&id);
            }
            BoardEvent::DragColumn(id) => {
                self.controller.start_column_drag(&id);
            }
            BoardEvent::Pointer(sample) => {
                self.controller.pointer_moved(sample);
            }
            BoardEvent::Release => {
                self.controller.release();
            }
            BoardEvent::Cancel => {
                self.controller.cancel();
            }
            BoardEvent::Scrolled(offset) => self.controller.scroll_changed(offset),
            BoardEvent::ScrollSettled(offset) => self.controller.scroll_settled(offset),
            // Applied once the board is idle and any drag commit has landed
            BoardEvent::Reload => self.reload_pending = true,
            BoardEvent::Shutdown => {}
        }
    }

    async fn reload(&mut self) {
        self.reload_pending = false;
        match self.source.load().await {
            Ok(data) => {
                if let Err(err) = self.controller.reload(data) {
                    warn!(error = %err, "Rejected reloaded board data");
                }
            }
            Err(err) => warn!(error = %err, "Failed to load board data"),
        }
    }

    /// Sends a queued commit to the data source
    async fn flush_commit(&mut self) {
        let Some(data) = self.controller.board_mut().take_pending_commit() else {
            return;
        };
        if let Err(err) = self.source.commit(&data).await {
            warn!(error = %err, "Failed to commit board order");
        }
    }

    /// Keeps the interval in step with the heuristic's timer
    fn rearm(&mut self, interval: &mut Option<Interval>) {
        let timer = self.controller.auto_scroll_timer();
        let generation = timer.map(|t| t.generation);
        if generation == self.armed {
            return;
        }

        self.armed = generation;
        *interval = timer.map(|timer| {
            let mut interval = time::interval_at(Instant::now() + timer.interval, timer.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        debug!(generation = ?generation, "Auto-scroll interval re-armed");
    }
}
