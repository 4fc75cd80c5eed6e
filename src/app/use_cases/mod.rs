//! Use-Cases der Application-Layer-Orchestrierung.

pub mod clipping;
pub mod model_load;
pub mod picking;
pub mod view;
pub mod visibility;

use crate::app::AppState;
use crate::core::ViewerError;

/// Übersetzt Session-Fehler in Statusmeldungen.
///
/// Ladefehler und fehlende Auswahl werden dem Nutzer angezeigt, fehlendes
/// Modell bleibt stumm. Engine-Fehler gehen an den Aufrufer.
pub(crate) fn report_session_error(state: &mut AppState, error: ViewerError) -> anyhow::Result<()> {
    match error {
        ViewerError::LoadFailure { .. } | ViewerError::NoSelection => {
            log::warn!("{}", error);
            state.ui.status_message = Some(error.to_string());
            Ok(())
        }
        ViewerError::NoModel => {
            log::debug!("Ignoriert: {}", error);
            Ok(())
        }
        ViewerError::Engine(e) => Err(e.into()),
    }
}
