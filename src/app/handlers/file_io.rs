//! Handler für Datei-Operationen (Öffnen, Laden, Schließen).

use crate::app::use_cases;
use crate::app::AppState;
use crate::engine::{ModelUrl, ViewerEngine};

/// Öffnet den Datei-Öffnen-Dialog.
pub fn request_open(state: &mut AppState) {
    use_cases::model_load::request_open_file(state);
}

/// Startet das Laden eines Modells von der übergebenen URL.
pub fn load(
    state: &mut AppState,
    engine: &mut dyn ViewerEngine,
    url: ModelUrl,
) -> anyhow::Result<()> {
    use_cases::model_load::load_model(state, engine, url)
}

/// Übernimmt fertig geladene Modelle.
pub fn poll(state: &mut AppState, engine: &mut dyn ViewerEngine) -> anyhow::Result<()> {
    use_cases::model_load::poll_model_load(state, engine)
}

/// Schließt das aktive Modell.
pub fn dispose(state: &mut AppState, engine: &mut dyn ViewerEngine) {
    use_cases::model_load::dispose_model(state, engine);
}
