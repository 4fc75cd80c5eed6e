//! Use-Cases für Pick und Hover-Hervorhebung.

use super::report_session_error;
use crate::app::AppState;
use crate::engine::{ScreenPoint, ViewerEngine};

/// Hover-Hervorhebung an der Zeigerposition.
pub fn prepick(state: &AppState, engine: &mut dyn ViewerEngine, point: ScreenPoint) {
    state.session.prepick(engine, point);
}

/// Pickt das sichtbare Element an der Zeigerposition.
///
/// Ein Fehlschuss hebt den bisherigen Pick auf.
pub fn pick(
    state: &mut AppState,
    engine: &mut dyn ViewerEngine,
    point: ScreenPoint,
) -> anyhow::Result<()> {
    match state.session.pick(engine, point) {
        Ok(Some(_)) => {
            state.ui.status_message = None;
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => report_session_error(state, e),
    }
}

/// Hebt Pick und Hervorhebung auf.
pub fn clear_pick(state: &mut AppState, engine: &mut dyn ViewerEngine) {
    state.session.clear_pick(engine);
}
