use crate::error::{HlaviError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inset subtracted from the viewport extent when no column width is set
const COLUMN_INSET: f32 = 10.0;

/// Board widget options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Snap width of a column. Defaults to the viewport extent minus a small
    /// inset.
    pub column_width: Option<f32>,
    /// Width of the leading/trailing edge bands that trigger auto-scroll on a
    /// horizontal board
    pub x_scroll_threshold: f32,
    /// Same as `x_scroll_threshold` for vertical boards
    pub y_scroll_threshold: f32,
    /// Scales the auto-scroll step
    pub drag_range_factor: f32,
    /// Ghost tilt in degrees
    pub active_row_rotation: f32,
    pub horizontal: bool,
    pub auto_scroll_interval_ms: u64,
    /// Delay before the ghost snaps back to neutral after release
    pub settle_delay_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            column_width: None,
            x_scroll_threshold: 50.0,
            y_scroll_threshold: 50.0,
            drag_range_factor: 1.0,
            active_row_rotation: 8.0,
            horizontal: true,
            auto_scroll_interval_ms: 800,
            settle_delay_ms: 100,
        }
    }
}

impl BoardConfig {
    /// Parses options from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(width) = self.column_width {
            if !(width > 0.0) {
                return Err(HlaviError::ConfigError(format!(
                    "columnWidth must be positive, got {}",
                    width
                )));
            }
        }
        if self.x_scroll_threshold < 0.0 || self.y_scroll_threshold < 0.0 {
            return Err(HlaviError::ConfigError(
                "scroll thresholds must not be negative".to_string(),
            ));
        }
        if !(self.drag_range_factor > 0.0) {
            return Err(HlaviError::ConfigError(format!(
                "dragRangeFactor must be positive, got {}",
                self.drag_range_factor
            )));
        }
        if self.auto_scroll_interval_ms == 0 {
            return Err(HlaviError::ConfigError(
                "autoScrollIntervalMs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Column snap width for a viewport of the given extent
    pub fn snap_interval(&self, viewport_extent: f32) -> f32 {
        self.column_width
            .unwrap_or((viewport_extent - COLUMN_INSET).max(0.0))
    }

    /// Edge band for the board's scroll axis
    pub fn scroll_threshold(&self) -> f32 {
        if self.horizontal {
            self.x_scroll_threshold
        } else {
            self.y_scroll_threshold
        }
    }

    pub fn auto_scroll_interval(&self) -> Duration {
        Duration::from_millis(self.auto_scroll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
