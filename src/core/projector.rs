//! Pointer position → grid cell mapping.
//!
//! The grid is a label column followed by 24 equal-width hour columns,
//! and a header row followed by 4 equal-height status rows
//! (off duty, sleeper berth, driving, on duty). Coordinates are plain
//! `f64` in whatever unit the bounds use, so no rendering surface is
//! needed to exercise this module.

use crate::core::grid::HOURS_IN_DAY;
use crate::models::duty_status::DutyStatus;

pub const STATUS_ROWS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label_width: f64,
    pub header_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub hour: u8,
    pub status_row: u8,
}

impl GridCell {
    pub fn status(&self) -> DutyStatus {
        DutyStatus::from_row(self.status_row as usize).unwrap_or(DutyStatus::OffDuty)
    }
}

impl GridBounds {
    /// Reference layout: the label column is as wide as one hour column
    /// (width / 25) and the header row as tall as one status row
    /// (height / 5).
    pub fn standard(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label_width: width / (f64::from(HOURS_IN_DAY) + 1.0),
            header_height: height / (STATUS_ROWS as f64 + 1.0),
        }
    }

    pub fn column_width(&self) -> f64 {
        (self.width - self.label_width) / f64::from(HOURS_IN_DAY)
    }

    pub fn row_height(&self) -> f64 {
        (self.height - self.header_height) / STATUS_ROWS as f64
    }

    /// Centre point of a cell, handy for tests and scripted clicks.
    pub fn cell_center(&self, hour: u8, status_row: u8) -> (f64, f64) {
        (
            self.x + self.label_width + (f64::from(hour) + 0.5) * self.column_width(),
            self.y + self.header_height + (f64::from(status_row) + 0.5) * self.row_height(),
        )
    }

    fn is_degenerate(&self) -> bool {
        let values = [
            self.x,
            self.y,
            self.width,
            self.height,
            self.label_width,
            self.header_height,
        ];
        values.iter().any(|v| !v.is_finite())
            || self.label_width < 0.0
            || self.header_height < 0.0
            || self.column_width() <= 0.0
            || self.row_height() <= 0.0
    }
}

/// Map `(x, y)` to the editable cell under it, or `None` when the point is
/// in the label column, the header row, or outside the grid.
pub fn project(x: f64, y: f64, bounds: &GridBounds) -> Option<GridCell> {
    if !x.is_finite() || !y.is_finite() || bounds.is_degenerate() {
        return None;
    }

    // Relative to the first editable cell
    let rel_x = x - bounds.x - bounds.label_width;
    let rel_y = y - bounds.y - bounds.header_height;

    if rel_x < 0.0 || rel_y < 0.0 {
        return None;
    }

    let hour = (rel_x / bounds.column_width()).floor();
    let row = (rel_y / bounds.row_height()).floor();

    if hour >= f64::from(HOURS_IN_DAY) || row >= STATUS_ROWS as f64 {
        return None;
    }

    Some(GridCell {
        hour: hour as u8,
        status_row: row as u8,
    })
}
