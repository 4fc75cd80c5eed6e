//! Use-Cases für Laden und Abbauen von Modellen.

use super::report_session_error;
use crate::app::AppState;
use crate::core::LoadOutcome;
use crate::engine::{ModelUrl, ViewerEngine};

/// Öffnet den Open-Datei-Dialog über UI-State.
pub fn request_open_file(state: &mut AppState) {
    state.ui.show_file_dialog = true;
}

/// Startet das Laden eines Modells.
///
/// Das bisher aktive Modell bleibt sichtbar, bis das neue fertig ist.
/// Ergebnisse, die sofort vorliegen (Inline-Laden), werden direkt übernommen.
pub fn load_model(
    state: &mut AppState,
    engine: &mut dyn ViewerEngine,
    url: ModelUrl,
) -> anyhow::Result<()> {
    state.session.set_settings(state.options.session_settings());

    match state.session.request_load(engine, url.clone()) {
        Ok(ticket) => {
            log::debug!("Ladeanfrage {:?} gestartet", ticket);
            state.ui.current_file_path = Some(url.to_string());
            state.ui.status_message = Some(format!("Lade {} …", url));
            poll_model_load(state, engine)
        }
        Err(e) => report_session_error(state, e),
    }
}

/// Fragt laufende Ladevorgänge ab und übernimmt fertige Modelle.
pub fn poll_model_load(state: &mut AppState, engine: &mut dyn ViewerEngine) -> anyhow::Result<()> {
    match state.session.poll_load(engine) {
        Ok(LoadOutcome::Loaded { element_count, .. }) => {
            let url = state
                .session
                .active()
                .map(|active| active.url.to_string())
                .unwrap_or_default();
            state.ui.status_message = Some(format!("{} Elemente geladen aus {}", element_count, url));
            Ok(())
        }
        Ok(LoadOutcome::Idle | LoadOutcome::Pending) => Ok(()),
        Err(e) => {
            // Fehlgeschlagen: zuletzt angezeigter Pfad gehört wieder zum aktiven Modell
            state.ui.current_file_path = state
                .session
                .active()
                .map(|active| active.url.to_string());
            report_session_error(state, e)
        }
    }
}

/// Baut das aktive Modell ab und verwirft offene Ladeanfragen.
pub fn dispose_model(state: &mut AppState, engine: &mut dyn ViewerEngine) {
    state.session.dispose(engine);
    state.ui.current_file_path = None;
    state.ui.status_message = None;
}
