//! Handler für Ausblenden und Einblenden.

use crate::app::use_cases;
use crate::app::AppState;
use crate::engine::ViewerEngine;

/// Blendet das gepickte Element aus.
pub fn hide_selected(state: &mut AppState, engine: &mut dyn ViewerEngine) -> anyhow::Result<()> {
    use_cases::visibility::hide_selected(state, engine)
}

/// Blendet alle Elemente ein.
pub fn show_all(state: &mut AppState, engine: &mut dyn ViewerEngine) -> anyhow::Result<()> {
    use_cases::visibility::show_all(state, engine)
}
