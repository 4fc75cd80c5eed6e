//! Handler für Pick und Hover-Hervorhebung.

use crate::app::use_cases;
use crate::app::AppState;
use crate::engine::{ScreenPoint, ViewerEngine};

/// Hover-Hervorhebung.
pub fn prepick(state: &AppState, engine: &mut dyn ViewerEngine, point: ScreenPoint) {
    use_cases::picking::prepick(state, engine, point);
}

/// Pickt ein Element.
pub fn pick(
    state: &mut AppState,
    engine: &mut dyn ViewerEngine,
    point: ScreenPoint,
) -> anyhow::Result<()> {
    use_cases::picking::pick(state, engine, point)
}

/// Hebt den Pick auf.
pub fn clear(state: &mut AppState, engine: &mut dyn ViewerEngine) {
    use_cases::picking::clear_pick(state, engine);
}
