//! Application State — zentrale Datenhaltung.

use super::CommandLog;
use crate::core::ViewerSession;
use crate::shared::ViewerOptions;

/// UI-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct UiState {
    /// Ob der Open-Datei-Dialog geöffnet werden soll
    pub show_file_dialog: bool,
    /// Pfad der zuletzt angeforderten Datei
    pub current_file_path: Option<String>,
    /// Temporäre Statusnachricht (z.B. Ladefehler, "Nichts ausgewählt")
    pub status_message: Option<String>,
    /// Raster im Viewport
    pub show_grid: bool,
    /// Achsen im Viewport
    pub show_axes: bool,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand (alle Dialoge geschlossen).
    pub fn new() -> Self {
        Self {
            show_file_dialog: false,
            current_file_path: None,
            status_message: None,
            show_grid: true,
            show_axes: true,
        }
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Sichtbarkeits-Session (aktives Modell, Visible Set, Pick)
    pub session: ViewerSession,
    /// UI-State
    pub ui: UiState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen (Farben, Material, Ladeverhalten)
    pub options: ViewerOptions,
    /// Signalisiert dem Host (eframe), die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(ViewerOptions::default())
    }

    /// Erstellt einen leeren App-State mit den übergebenen Optionen.
    pub fn with_options(options: ViewerOptions) -> Self {
        let mut ui = UiState::new();
        ui.show_grid = options.show_grid;
        ui.show_axes = options.show_axes;
        Self {
            session: ViewerSession::new(options.session_settings()),
            ui,
            command_log: CommandLog::new(),
            options,
            should_exit: false,
        }
    }

    /// Ob ein Modell aktiv ist
    pub fn has_model(&self) -> bool {
        self.session.active().is_some()
    }

    /// Sichtbare und gesamte Elementanzahl (für UI-Anzeige)
    pub fn visible_counts(&self) -> Option<(usize, usize)> {
        self.session
            .visible_set()
            .map(|visible| (visible.len(), visible.total()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
