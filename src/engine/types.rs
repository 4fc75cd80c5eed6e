//! Handles, IDs und Wertetypen der Engine-Schnittstelle.

use std::fmt;

/// Opaker Handle eines geladenen Modells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelHandle(pub u32);

impl fmt::Display for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model:{}", self.0)
    }
}

/// Element-ID innerhalb eines Modells (IFC-Entity-Nummer, z.B. `#123` → 123).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        ElementId(id)
    }
}

/// Handle eines renderbaren Subsets in der Engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubsetId(pub u32);

/// Token eines laufenden Ladevorgangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(pub u64);

/// Ladbare Modell-Adresse (lokaler Pfad oder `file://`-URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelUrl(String);

impl ModelUrl {
    /// Erstellt eine URL aus einem beliebigen String.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Rohe URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dateisystempfad hinter der URL (`file://`-Präfix entfernt).
    pub fn to_path(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(self.0.strip_prefix("file://").unwrap_or(&self.0))
    }
}

impl fmt::Display for ModelUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelUrl {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for ModelUrl {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// Punkt im Viewport in Normalized Device Coordinates.
///
/// x und y liegen in `[-1, 1]`, y zeigt nach oben (Raycaster-Konvention).
pub type ScreenPoint = glam::Vec2;

/// Material eines Subsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsetMaterial {
    /// Grundfarbe (RGB, 0..1)
    pub color: [f32; 3],
    /// Deckkraft (0..1), wirkt nur bei `transparent`
    pub opacity: f32,
    /// Alpha-Blending aktiv
    pub transparent: bool,
    /// Vorder- und Rückseiten rendern
    pub double_sided: bool,
}

/// Parameter für `ViewerEngine::create_subset`.
#[derive(Debug, Clone, Copy)]
pub struct SubsetRequest<'a> {
    /// Modell, aus dem das Subset gebildet wird
    pub model: ModelHandle,
    /// Elemente des Subsets
    pub ids: &'a [ElementId],
    /// Darstellung
    pub material: &'a SubsetMaterial,
    /// Schlüssel, unter dem die Engine das Subset pro Modell führt
    pub custom_id: &'a str,
    /// Existierendes Subset gleichen Schlüssels ersetzen statt erweitern
    pub replace_previous: bool,
}

/// Ergebnis eines Polls auf einen laufenden Ladevorgang.
#[derive(Debug)]
pub enum LoadPoll {
    /// Engine lädt noch
    Pending,
    /// Ladevorgang abgeschlossen
    Ready(Result<ModelHandle, super::EngineError>),
}
