//! Edge auto-scroll during a drag.
//!
//! Every pointer sample clears the running timer and decides afresh whether
//! the pointer sits in the leading or trailing edge band. The timer itself is
//! just a record here; whoever owns the clock (see [`crate::runtime`]) watches
//! [`AutoScrollHeuristic::timer`] and calls back on every interval.

use crate::config::BoardConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Towards the trailing edge (increasing offset)
    Forward,
    /// Towards the leading edge (decreasing offset)
    Backward,
}

/// The single repeating nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoScrollTimer {
    pub direction: ScrollDirection,
    /// Bumped on every start, so a restarted timer is distinguishable from
    /// the one it replaced
    pub generation: u64,
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub struct AutoScrollHeuristic {
    threshold: f32,
    drag_range_factor: f32,
    interval: Duration,
    timer: Option<AutoScrollTimer>,
    generation: u64,
}

impl AutoScrollHeuristic {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            threshold: config.scroll_threshold(),
            drag_range_factor: config.drag_range_factor,
            interval: config.auto_scroll_interval(),
            timer: None,
            generation: 0,
        }
    }

    pub fn timer(&self) -> Option<AutoScrollTimer> {
        self.timer
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Stops the running timer. Returns whether one was running.
    pub fn clear(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Starts a timer if `position` lies in an edge band of a viewport of
    /// length `extent`. Any previous timer must already be cleared.
    pub fn observe(&mut self, position: f32, extent: f32) -> Option<ScrollDirection> {
        self.clear();

        let direction = if position + self.threshold > extent {
            ScrollDirection::Forward
        } else if position < self.threshold {
            ScrollDirection::Backward
        } else {
            return None;
        };

        self.generation += 1;
        self.timer = Some(AutoScrollTimer {
            direction,
            generation: self.generation,
            interval: self.interval,
        });
        debug!(?direction, generation = self.generation, "Auto-scroll timer started");
        Some(direction)
    }

    /// Offset after one nudge from `offset`, or `None` if no timer is running.
    /// `step` is the unscaled distance (the column snap width).
    pub fn next_offset(&self, offset: f32, step: f32, max_offset: f32) -> Option<f32> {
        let timer = self.timer?;
        let delta = step * self.drag_range_factor;
        let next = match timer.direction {
            ScrollDirection::Forward => offset + delta,
            ScrollDirection::Backward => offset - delta,
        };
        Some(next.clamp(0.0, max_offset.max(0.0)))
    }
}
