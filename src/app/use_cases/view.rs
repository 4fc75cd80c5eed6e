//! Use-Cases für Viewport-Hilfen.

use crate::app::AppState;
use crate::engine::ViewerEngine;

/// Setzt Raster und Achsen.
pub fn set_helpers(state: &mut AppState, engine: &mut dyn ViewerEngine, grid: bool, axes: bool) {
    state.ui.show_grid = grid;
    state.ui.show_axes = axes;
    engine.set_helpers(grid, axes);
}
