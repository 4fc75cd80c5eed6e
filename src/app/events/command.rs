use crate::engine::{ModelUrl, ScreenPoint};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Datei-Öffnen-Dialog anfordern
    RequestOpenFileDialog,
    /// Modell laden (verdrängt eine noch offene Ladeanfrage)
    LoadModel { url: ModelUrl },
    /// Aktives Modell abbauen
    DisposeModel,
    /// Anwendung beenden
    RequestExit,
    /// Hover-Hervorhebung
    PrePick { point: ScreenPoint },
    /// Element picken
    PickElement { point: ScreenPoint },
    /// Pick und Hervorhebung aufheben
    ClearPick,
    /// Gepicktes Element ausblenden
    HideSelected,
    /// Alle Elemente einblenden
    ShowAll,
    /// Clipping-Ebene anlegen
    CreateClippingPlane { point: ScreenPoint },
    /// Clipping-Ebene löschen
    DeleteClippingPlane { point: ScreenPoint },
    /// Raster/Achsen setzen
    SetHelpers { grid: bool, axes: bool },
}
