//! Viewer-Engine: Schnittstelle zur externen 3D-Engine.
//!
//! Der Viewer selbst parst keine Geometrie und rendert nicht. Alles davon
//! läuft über das `ViewerEngine`-Trait: Modell laden, Elemente aufzählen,
//! Subsets bilden, Picking, Szenegraph und Clipping-Ebenen.
//! `SceneEngine` ist die mitgelieferte Referenz-Implementierung.

pub mod scene;
pub mod step_index;
mod types;

pub use scene::{LoadDispatch, SceneEngine, SceneSnapshot};
pub use step_index::IndexedElement;
pub use types::{
    ElementId, LoadPoll, LoadToken, ModelHandle, ModelUrl, ScreenPoint, SubsetId, SubsetMaterial,
    SubsetRequest,
};

/// Fehler, die eine Engine melden kann.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Datei nicht lesbar
    #[error("Modell '{url}' nicht lesbar: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
    /// Keine IFC/STEP-Datei
    #[error("Kein IFC-Format: {0}")]
    UnsupportedFormat(String),
    /// Modell enthält keine darstellbaren Elemente
    #[error("Modell '{0}' enthält keine Bauteile")]
    NoElements(String),
    /// Unbekannter Modell-Handle
    #[error("Unbekanntes Modell: {0}")]
    UnknownModel(ModelHandle),
    /// Unbekanntes Subset
    #[error("Unbekanntes Subset: {0:?}")]
    UnknownSubset(SubsetId),
    /// Unbekannter Lade-Token
    #[error("Unbekannter Ladevorgang: {0:?}")]
    UnknownLoad(LoadToken),
    /// Lade-Thread wurde ohne Ergebnis beendet
    #[error("Lade-Thread für '{0}' abgebrochen")]
    LoaderDisconnected(String),
}

/// Capability-Schnittstelle der Viewer-Engine.
///
/// Alle Aufrufe erfolgen aus dem UI-Thread. Laden ist zweistufig:
/// `begin_load` startet, `poll_load` liefert das Ergebnis sobald es vorliegt.
pub trait ViewerEngine {
    /// Startet das Laden eines Modells.
    fn begin_load(&mut self, url: &ModelUrl) -> Result<LoadToken, EngineError>;

    /// Fragt den Stand eines Ladevorgangs ab.
    ///
    /// Nach `LoadPoll::Ready` ist der Token verbraucht.
    fn poll_load(&mut self, token: LoadToken) -> LoadPoll;

    /// Gibt ein Modell samt Mesh und aller seiner Subsets frei.
    fn dispose_model(&mut self, model: ModelHandle);

    /// Alle Element-IDs eines Modells in Engine-Reihenfolge.
    fn element_ids(&self, model: ModelHandle) -> Result<Vec<ElementId>, EngineError>;

    /// Erstellt ein Subset oder ersetzt/erweitert das gleichnamige.
    fn create_subset(&mut self, request: SubsetRequest<'_>) -> Result<SubsetId, EngineError>;

    /// Entfernt Elemente aus einem bestehenden Subset (in place).
    fn remove_from_subset(
        &mut self,
        subset: SubsetId,
        ids: &[ElementId],
    ) -> Result<(), EngineError>;

    /// Löscht ein Subset (hängt es vorher aus dem Szenegraph).
    fn remove_subset(&mut self, subset: SubsetId);

    /// Hängt ein Subset in den Szenegraph.
    fn attach(&mut self, subset: SubsetId) -> Result<(), EngineError>;

    /// Entfernt ein Subset aus dem Szenegraph.
    fn detach(&mut self, subset: SubsetId);

    /// Ob das Subset aktuell im Szenegraph hängt.
    fn is_attached(&self, subset: SubsetId) -> bool;

    /// Blendet das rohe Modell-Mesh ein oder aus.
    fn set_model_visible(&mut self, model: ModelHandle, visible: bool);

    /// Stößt die Schattenberechnung für ein Modell an.
    fn compute_shadows(&mut self, model: ModelHandle);

    /// Pick-Abfrage auf ein Modell; liefert das getroffene Element.
    fn pick(&mut self, model: ModelHandle, point: ScreenPoint) -> Option<ElementId>;

    /// Hover-Hervorhebung ohne Selektion.
    fn prepick(&mut self, model: ModelHandle, point: ScreenPoint);

    /// Entfernt Pick- und Pre-Pick-Hervorhebung.
    fn clear_highlight(&mut self);

    /// Legt eine Clipping-Ebene an der Position an. `false` wenn nichts getroffen.
    fn create_clipping_plane(&mut self, point: ScreenPoint) -> bool;

    /// Löscht die Clipping-Ebene unter der Position. `false` wenn keine getroffen.
    fn delete_clipping_plane(&mut self, point: ScreenPoint) -> bool;

    /// Blendet Raster und Achsen ein oder aus.
    fn set_helpers(&mut self, grid: bool, axes: bool);
}
