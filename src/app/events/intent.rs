use crate::engine::ScreenPoint;

/// App-Intent Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Datei öffnen (zeigt Dateidialog)
    OpenFileRequested,
    /// Datei wurde im Dialog ausgewählt (Laden)
    FileSelected { path: String },
    /// Modell schließen
    CloseModelRequested,
    /// Anwendung beenden
    ExitRequested,
    /// Mauszeiger über dem Viewport bewegt (Hover-Hervorhebung)
    PrePickRequested { point: ScreenPoint },
    /// Element per Doppelklick picken
    PickRequested { point: ScreenPoint },
    /// Pick aufheben (Escape)
    ClearPickRequested,
    /// Gepicktes Element ausblenden
    HideSelectedRequested,
    /// Alle Elemente einblenden
    ShowAllRequested,
    /// Clipping-Ebene an der Zeigerposition anlegen (P)
    CreateClippingPlaneRequested { point: ScreenPoint },
    /// Clipping-Ebene an der Zeigerposition löschen (O)
    DeleteClippingPlaneRequested { point: ScreenPoint },
    /// Raster/Achsen umschalten
    HelpersToggled { grid: bool, axes: bool },
}
