//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};
use crate::engine::ViewerEngine;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
///
/// Der Controller besitzt die Engine; Handler erhalten sie nur geliehen.
pub struct AppController<E: ViewerEngine> {
    engine: E,
}

impl<E: ViewerEngine> AppController<E> {
    /// Erstellt einen neuen Controller um die übergebene Engine.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Read-only Zugriff auf die Engine (z.B. für das Zeichnen).
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutabler Zugriff auf die Engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;
        let engine: &mut dyn ViewerEngine = &mut self.engine;

        match command {
            // === Datei-I/O ===
            AppCommand::RequestOpenFileDialog => handlers::file_io::request_open(state),
            AppCommand::LoadModel { url } => handlers::file_io::load(state, engine, url)?,
            AppCommand::DisposeModel => handlers::file_io::dispose(state, engine),

            // === Pick ===
            AppCommand::PrePick { point } => handlers::selection::prepick(state, engine, point),
            AppCommand::PickElement { point } => handlers::selection::pick(state, engine, point)?,
            AppCommand::ClearPick => handlers::selection::clear(state, engine),

            // === Sichtbarkeit ===
            AppCommand::HideSelected => handlers::visibility::hide_selected(state, engine)?,
            AppCommand::ShowAll => handlers::visibility::show_all(state, engine)?,

            // === Viewport ===
            AppCommand::CreateClippingPlane { point } => {
                handlers::view::create_clipping_plane(state, engine, point)
            }
            AppCommand::DeleteClippingPlane { point } => {
                handlers::view::delete_clipping_plane(engine, point)
            }
            AppCommand::SetHelpers { grid, axes } => {
                handlers::view::set_helpers(state, engine, grid, axes)
            }

            // === Anwendung ===
            AppCommand::RequestExit => handlers::dialog::request_exit(state),
        }

        Ok(())
    }

    /// Fragt laufende Ladevorgänge ab (einmal pro Frame).
    ///
    /// Läuft am Command-Log vorbei, damit das Polling es nicht flutet.
    pub fn poll_model_load(&mut self, state: &mut AppState) -> anyhow::Result<()> {
        super::handlers::file_io::poll(state, &mut self.engine)
    }
}
