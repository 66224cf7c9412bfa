//! Snapping of pointer-derived time values onto the dial grid.

use serde::{Deserialize, Serialize};

use crate::geometry::{angle_to_seconds, DialGeometry, PointerSample};

const FULL_HOUR_SECS: u32 = 3600;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    /// Coarse grid with magnetic preset marks.
    #[default]
    Default,
    /// Whole minutes, no preset magnetism.
    Fine,
}

/// Grid and magnet settings for the snap resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapRules {
    #[serde(default = "default_coarse_step")]
    pub coarse_step_secs: u32,
    #[serde(default = "default_fine_step")]
    pub fine_step_secs: u32,
    /// Checked in order; the first mark within the window wins.
    #[serde(default = "default_priority_marks")]
    pub priority_marks: Vec<u32>,
    #[serde(default = "default_priority_window")]
    pub priority_window_secs: u32,
}

fn default_coarse_step() -> u32 {
    300
}
fn default_fine_step() -> u32 {
    60
}
fn default_priority_marks() -> Vec<u32> {
    vec![25 * 60, 50 * 60]
}
fn default_priority_window() -> u32 {
    120
}

impl Default for SnapRules {
    fn default() -> Self {
        Self {
            coarse_step_secs: default_coarse_step(),
            fine_step_secs: default_fine_step(),
            priority_marks: default_priority_marks(),
            priority_window_secs: default_priority_window(),
        }
    }
}

impl SnapRules {
    /// Quantize a raw second value for the given drag mode.
    ///
    /// In default mode the preset marks are measured against the raw value,
    /// not the grid-rounded one, and override the grid when they match.
    pub fn snap(&self, raw_secs: f64, mode: DragMode) -> u32 {
        let snapped = match mode {
            DragMode::Fine => round_to_step(raw_secs, self.fine_step_secs),
            DragMode::Default => self
                .priority_marks
                .iter()
                .copied()
                .find(|&mark| (raw_secs - f64::from(mark)).abs() < f64::from(self.priority_window_secs))
                .unwrap_or_else(|| round_to_step(raw_secs, self.coarse_step_secs)),
        };

        // Top of the dial: a full hour and zero are the same position.
        if snapped == FULL_HOUR_SECS {
            0
        } else {
            snapped
        }
    }

    /// Pointer position to snapped seconds: coordinates, angle, seconds, grid.
    pub fn resolve_pointer(&self, sample: PointerSample, mode: DragMode, dial: &DialGeometry) -> u32 {
        let raw = angle_to_seconds(dial.angle_of(sample));
        self.snap(raw, mode)
    }
}

fn round_to_step(raw_secs: f64, step: u32) -> u32 {
    let step = f64::from(step.max(1));
    let rounded = (raw_secs.max(0.0) / step).round() * step;
    rounded.min(f64::from(u32::MAX)) as u32
}
