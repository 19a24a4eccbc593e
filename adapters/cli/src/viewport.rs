//! Maps the window width onto one of the supported board sizes.

use neon_snake_core::GridSize;

/// Board size for a viewport `width` pixels wide.
pub(crate) fn grid_for_width(width: f32) -> GridSize {
    let cells = if width < 360.0 {
        13
    } else if width < 480.0 {
        15
    } else if width < 768.0 {
        17
    } else {
        21
    };
    GridSize::new(cells)
}

/// Tracks the width class of the viewport and reports class changes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ViewportClassifier {
    current: GridSize,
}

impl ViewportClassifier {
    /// Creates a classifier that considers `initial` the size already in use.
    pub(crate) fn new(initial: GridSize) -> Self {
        Self { current: initial }
    }

    /// Returns the new board size when `width` falls into a different class.
    pub(crate) fn observe(&mut self, width: f32) -> Option<GridSize> {
        if !width.is_finite() || width <= 0.0 {
            return None;
        }
        let size = grid_for_width(width);
        if size == self.current {
            return None;
        }
        tracing::debug!(width, grid = size.get(), "viewport class changed");
        self.current = size;
        Some(size)
    }
}
