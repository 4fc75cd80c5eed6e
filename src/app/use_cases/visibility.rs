//! Use-Cases für Ausblenden und Einblenden.

use super::report_session_error;
use crate::app::AppState;
use crate::engine::ViewerEngine;

/// Blendet das gepickte Element aus.
pub fn hide_selected(state: &mut AppState, engine: &mut dyn ViewerEngine) -> anyhow::Result<()> {
    match state.session.hide_selected(engine) {
        Ok(_) => {
            state.ui.status_message = None;
            Ok(())
        }
        Err(e) => report_session_error(state, e),
    }
}

/// Macht alle Elemente wieder sichtbar.
pub fn show_all(state: &mut AppState, engine: &mut dyn ViewerEngine) -> anyhow::Result<()> {
    match state.session.show_all(engine) {
        Ok(()) => {
            state.ui.status_message = None;
            Ok(())
        }
        Err(e) => report_session_error(state, e),
    }
}
