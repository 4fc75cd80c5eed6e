//! Handler für Clipping-Ebenen und Viewport-Hilfen.

use crate::app::use_cases;
use crate::app::AppState;
use crate::engine::{ScreenPoint, ViewerEngine};

/// Legt eine Clipping-Ebene an.
pub fn create_clipping_plane(state: &AppState, engine: &mut dyn ViewerEngine, point: ScreenPoint) {
    use_cases::clipping::create_plane(state, engine, point);
}

/// Löscht eine Clipping-Ebene.
pub fn delete_clipping_plane(engine: &mut dyn ViewerEngine, point: ScreenPoint) {
    use_cases::clipping::delete_plane(engine, point);
}

/// Setzt Raster und Achsen.
pub fn set_helpers(state: &mut AppState, engine: &mut dyn ViewerEngine, grid: bool, axes: bool) {
    use_cases::view::set_helpers(state, engine, grid, axes);
}
