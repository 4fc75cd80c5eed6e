//! Use-Cases für Clipping-Ebenen. Die Engine verwaltet die Ebenen selbst.

use crate::app::AppState;
use crate::engine::{ScreenPoint, ViewerEngine};

/// Legt eine Clipping-Ebene an der Zeigerposition an.
pub fn create_plane(state: &AppState, engine: &mut dyn ViewerEngine, point: ScreenPoint) {
    if !state.has_model() {
        return;
    }
    if engine.create_clipping_plane(point) {
        log::info!("Clipping-Ebene bei {:?} angelegt", point);
    } else {
        log::debug!("Keine Clipping-Ebene bei {:?}: kein Treffer", point);
    }
}

/// Löscht die Clipping-Ebene an der Zeigerposition.
pub fn delete_plane(engine: &mut dyn ViewerEngine, point: ScreenPoint) {
    if engine.delete_clipping_plane(point) {
        log::info!("Clipping-Ebene bei {:?} gelöscht", point);
    }
}
