// ABOUTME: Split-pane layout state for the editor and assistant panes
// ABOUTME: Pointer-drag sessions recompute a clamped percentage split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use codemind_core::constants::layout::{DEFAULT_SPLIT, MAX_SPLIT, MIN_SPLIT};

/// Width of the editor pane as a percentage of the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLayout {
    ratio: f64,
}

impl Default for SplitLayout {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_SPLIT,
        }
    }
}

impl SplitLayout {
    /// Current editor pane width in percent
    #[must_use]
    pub const fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Set the ratio, clamped to the allowed range
    pub fn set_ratio(&mut self, ratio: f64) {
        if ratio.is_finite() {
            self.ratio = ratio.clamp(MIN_SPLIT, MAX_SPLIT);
        }
    }

    /// `(editor, assistant)` widths in percent
    #[must_use]
    pub fn pane_widths(&self) -> (f64, f64) {
        (self.ratio, 100.0 - self.ratio)
    }

    /// Capture the pointer position and current ratio at drag start
    #[must_use]
    pub const fn begin_drag(&self, pointer_x: f64) -> DragSession {
        DragSession {
            start_x: pointer_x,
            start_ratio: self.ratio,
        }
    }
}

/// An in-progress divider drag
///
/// Dropping the session (or calling [`DragSession::end`]) detaches it; the
/// layout keeps whatever ratio the last move produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    start_x: f64,
    start_ratio: f64,
}

impl DragSession {
    /// Apply a pointer move
    ///
    /// The new ratio is the start ratio shifted by the pointer displacement
    /// as a share of `container_width`. A non-positive or non-finite width
    /// leaves the layout untouched.
    pub fn drag_to(&self, layout: &mut SplitLayout, pointer_x: f64, container_width: f64) {
        if !container_width.is_finite() || container_width <= 0.0 {
            return;
        }
        let delta = pointer_x - self.start_x;
        let start_px = self.start_ratio / 100.0 * container_width;
        layout.set_ratio((start_px + delta) / container_width * 100.0);
    }

    /// Finish the drag
    pub const fn end(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_split() {
        let layout = SplitLayout::default();
        assert!((layout.ratio() - 55.0).abs() < f64::EPSILON);
        assert_eq!(layout.pane_widths(), (55.0, 45.0));
    }

    #[test]
    fn test_drag_moves_proportionally() {
        let mut layout = SplitLayout::default();
        let drag = layout.begin_drag(550.0);
        drag.drag_to(&mut layout, 600.0, 1000.0);
        assert!((layout.ratio() - 60.0).abs() < 1e-9);
        drag.drag_to(&mut layout, 500.0, 1000.0);
        assert!((layout.ratio() - 50.0).abs() < 1e-9);
        drag.end();
    }

    #[test]
    fn test_zero_width_is_ignored() {
        let mut layout = SplitLayout::default();
        let drag = layout.begin_drag(0.0);
        drag.drag_to(&mut layout, 400.0, 0.0);
        drag.drag_to(&mut layout, f64::NAN, 1000.0);
        assert!((layout.ratio() - 55.0).abs() < f64::EPSILON);
    }
}
