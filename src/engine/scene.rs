//! Referenz-Engine mit Szenegraph-Buchführung.
//!
//! Führt Modelle, Subsets, Szenegraph-Knoten, Hervorhebung und
//! Clipping-Ebenen im Speicher. Bauteile werden als Kacheln in einem Raster
//! im NDC-Raum angeordnet, darauf laufen Pick und Pre-Pick. Der Renderer
//! liest den Zustand über `SceneEngine::snapshot()`.

use super::step_index::{self, IndexedElement};
use super::{
    ElementId, EngineError, LoadPoll, LoadToken, ModelHandle, ModelUrl, ScreenPoint, SubsetId,
    SubsetMaterial, SubsetRequest, ViewerEngine,
};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

/// Halbe Kantenlänge des Layout-Bereichs in NDC.
const LAYOUT_EXTENT: f32 = 0.9;
/// Anteil einer Rasterzelle, der als Abstand zwischen Kacheln frei bleibt.
const TILE_GAP: f32 = 0.12;
/// Fangbereich (NDC) beim Löschen einer Clipping-Ebene.
const PLANE_PICK_TOLERANCE: f32 = 0.05;

/// Lädt ein Modell und liefert seine Bauteile.
pub type ModelLoader =
    Arc<dyn Fn(&ModelUrl) -> Result<Vec<IndexedElement>, EngineError> + Send + Sync>;

/// Wie `begin_load` den Loader ausführt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadDispatch {
    /// Eigener Thread, Ergebnis per Channel
    #[default]
    Background,
    /// Sofort im aufrufenden Thread, Ergebnis beim nächsten Poll
    Inline,
}

/// Standard-Loader: liest die Datei und indiziert die Bauteile.
pub fn read_ifc_file(url: &ModelUrl) -> Result<Vec<IndexedElement>, EngineError> {
    let bytes = std::fs::read(url.to_path()).map_err(|source| EngineError::Io {
        url: url.to_string(),
        source,
    })?;
    // Ältere Exporter schreiben Latin-1 in Strings; gesucht wird nur ASCII
    let content = String::from_utf8_lossy(&bytes);
    step_index::index_elements(&content, url.as_str())
}

struct LoadedModel {
    url: ModelUrl,
    elements: Vec<IndexedElement>,
    mesh_visible: bool,
    shadows: bool,
}

struct Subset {
    model: ModelHandle,
    custom_id: String,
    ids: IndexSet<ElementId>,
    material: SubsetMaterial,
}

enum PendingLoad {
    Receiving {
        url: ModelUrl,
        rx: Receiver<Result<Vec<IndexedElement>, EngineError>>,
    },
    Done {
        url: ModelUrl,
        result: Result<Vec<IndexedElement>, EngineError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SceneNode {
    ModelMesh(ModelHandle),
    Subset(SubsetId),
}

/// Art einer gezeichneten Kachel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Rohes Modell-Mesh
    RawMesh,
    /// Element eines Subsets
    Subset,
}

/// Eine zu zeichnende Bauteil-Kachel (NDC).
#[derive(Debug, Clone)]
pub struct TileView {
    /// Element-ID
    pub element: ElementId,
    /// IFC-Typ
    pub ifc_type: String,
    /// Untere linke Ecke
    pub min: glam::Vec2,
    /// Obere rechte Ecke
    pub max: glam::Vec2,
    /// Herkunft der Kachel
    pub kind: TileKind,
    /// Material (nur bei Subset-Kacheln)
    pub material: Option<SubsetMaterial>,
    /// Pick-Hervorhebung
    pub highlighted: bool,
    /// Hover-Hervorhebung
    pub prepicked: bool,
    /// Schatten berechnet
    pub shadow: bool,
}

/// Zeichenfertiger Zustand der Szene.
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    /// Kacheln in Szenegraph-Reihenfolge
    pub tiles: Vec<TileView>,
    /// x-Positionen der Clipping-Ebenen (NDC)
    pub clipping_planes: Vec<f32>,
    /// Raster sichtbar
    pub grid: bool,
    /// Achsen sichtbar
    pub axes: bool,
}

/// In-Memory-Engine.
pub struct SceneEngine {
    loader: ModelLoader,
    dispatch: LoadDispatch,
    next_model: u32,
    next_subset: u32,
    next_token: u64,
    models: BTreeMap<ModelHandle, LoadedModel>,
    subsets: BTreeMap<SubsetId, Subset>,
    scene: Vec<SceneNode>,
    pending: BTreeMap<u64, PendingLoad>,
    highlight: Option<(ModelHandle, ElementId)>,
    prepick: Option<(ModelHandle, ElementId)>,
    clipping_planes: Vec<f32>,
    grid: bool,
    axes: bool,
}

impl Default for SceneEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneEngine {
    /// Engine mit Datei-Loader im Hintergrund-Thread.
    pub fn new() -> Self {
        Self::with_loader(Arc::new(read_ifc_file), LoadDispatch::Background)
    }

    /// Engine mit eigenem Loader.
    pub fn with_loader(loader: ModelLoader, dispatch: LoadDispatch) -> Self {
        Self {
            loader,
            dispatch,
            next_model: 1,
            next_subset: 1,
            next_token: 1,
            models: BTreeMap::new(),
            subsets: BTreeMap::new(),
            scene: Vec::new(),
            pending: BTreeMap::new(),
            highlight: None,
            prepick: None,
            clipping_planes: Vec::new(),
            grid: true,
            axes: true,
        }
    }

    /// Setzt die Ausführungsart für künftige Ladevorgänge.
    pub fn set_dispatch(&mut self, dispatch: LoadDispatch) {
        self.dispatch = dispatch;
    }

    /// Anzahl geladener Modelle.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Ob ein Modell geladen ist.
    pub fn has_model(&self, model: ModelHandle) -> bool {
        self.models.contains_key(&model)
    }

    /// URL eines geladenen Modells.
    pub fn model_url(&self, model: ModelHandle) -> Option<&ModelUrl> {
        self.models.get(&model).map(|m| &m.url)
    }

    /// Ob das rohe Mesh eines Modells sichtbar ist.
    pub fn is_model_visible(&self, model: ModelHandle) -> bool {
        self.models.get(&model).is_some_and(|m| m.mesh_visible)
    }

    /// Ob für ein Modell Schatten berechnet wurden.
    pub fn has_shadows(&self, model: ModelHandle) -> bool {
        self.models.get(&model).is_some_and(|m| m.shadows)
    }

    /// Anzahl existierender Subsets.
    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }

    /// Elemente eines Subsets.
    pub fn subset_ids(&self, subset: SubsetId) -> Option<Vec<ElementId>> {
        self.subsets
            .get(&subset)
            .map(|s| s.ids.iter().copied().collect())
    }

    /// Wie oft ein Subset im Szenegraph hängt.
    pub fn scene_node_count(&self, subset: SubsetId) -> usize {
        self.scene
            .iter()
            .filter(|node| **node == SceneNode::Subset(subset))
            .count()
    }

    /// Aktuell hervorgehobenes Element.
    pub fn highlighted(&self) -> Option<ElementId> {
        self.highlight.map(|(_, id)| id)
    }

    /// Element unter dem Mauszeiger.
    pub fn prepicked(&self) -> Option<ElementId> {
        self.prepick.map(|(_, id)| id)
    }

    /// x-Positionen aller Clipping-Ebenen.
    pub fn clipping_planes(&self) -> &[f32] {
        &self.clipping_planes
    }

    /// IFC-Typ eines Elements.
    pub fn element_type(&self, model: ModelHandle, id: ElementId) -> Option<&str> {
        self.models
            .get(&model)?
            .elements
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.ifc_type.as_str())
    }

    /// Anzahl noch offener Ladevorgänge.
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Baut den zeichenfertigen Zustand.
    pub fn snapshot(&self) -> SceneSnapshot {
        let mut tiles = Vec::new();

        for node in &self.scene {
            match *node {
                SceneNode::ModelMesh(handle) => {
                    let Some(model) = self.models.get(&handle) else {
                        continue;
                    };
                    if !model.mesh_visible {
                        continue;
                    }
                    for (index, element) in model.elements.iter().enumerate() {
                        if let Some(tile) =
                            self.tile_view(handle, model, index, element, TileKind::RawMesh, None)
                        {
                            tiles.push(tile);
                        }
                    }
                }
                SceneNode::Subset(subset_id) => {
                    let Some(subset) = self.subsets.get(&subset_id) else {
                        continue;
                    };
                    let Some(model) = self.models.get(&subset.model) else {
                        continue;
                    };
                    for (index, element) in model.elements.iter().enumerate() {
                        if !subset.ids.contains(&element.id) {
                            continue;
                        }
                        if let Some(tile) = self.tile_view(
                            subset.model,
                            model,
                            index,
                            element,
                            TileKind::Subset,
                            Some(subset.material),
                        ) {
                            tiles.push(tile);
                        }
                    }
                }
            }
        }

        SceneSnapshot {
            tiles,
            clipping_planes: self.clipping_planes.clone(),
            grid: self.grid,
            axes: self.axes,
        }
    }

    fn tile_view(
        &self,
        handle: ModelHandle,
        model: &LoadedModel,
        index: usize,
        element: &IndexedElement,
        kind: TileKind,
        material: Option<SubsetMaterial>,
    ) -> Option<TileView> {
        let (min, max) = tile_rect(index, model.elements.len());
        if self.is_clipped(min, max) {
            return None;
        }
        Some(TileView {
            element: element.id,
            ifc_type: element.ifc_type.clone(),
            min,
            max,
            kind,
            material,
            highlighted: self.highlight == Some((handle, element.id)),
            prepicked: self.prepick == Some((handle, element.id)),
            shadow: model.shadows,
        })
    }

    fn is_clipped(&self, min: glam::Vec2, max: glam::Vec2) -> bool {
        let center_x = (min.x + max.x) * 0.5;
        self.clipping_planes.iter().any(|&plane_x| center_x > plane_x)
    }

    /// Sucht das sichtbare Element eines Modells unter dem Punkt.
    fn hit_test(&self, handle: ModelHandle, point: ScreenPoint) -> Option<ElementId> {
        let model = self.models.get(&handle)?;
        let visible_ids: IndexSet<ElementId> = self
            .scene
            .iter()
            .filter_map(|node| match node {
                SceneNode::Subset(id) => self.subsets.get(id),
                SceneNode::ModelMesh(_) => None,
            })
            .filter(|subset| subset.model == handle)
            .flat_map(|subset| subset.ids.iter().copied())
            .collect();

        model
            .elements
            .iter()
            .enumerate()
            .filter(|(_, element)| visible_ids.contains(&element.id) || model.mesh_visible)
            .find_map(|(index, element)| {
                let (min, max) = tile_rect(index, model.elements.len());
                let inside = point.cmpge(min).all() && point.cmple(max).all();
                (inside && !self.is_clipped(min, max)).then_some(element.id)
            })
    }

    fn register_model(&mut self, url: ModelUrl, elements: Vec<IndexedElement>) -> ModelHandle {
        let handle = ModelHandle(self.next_model);
        self.next_model += 1;
        log::info!(
            "Modell {} registriert: {} Bauteile aus {}",
            handle,
            elements.len(),
            url
        );
        self.models.insert(
            handle,
            LoadedModel {
                url,
                elements,
                mesh_visible: true,
                shadows: false,
            },
        );
        self.scene.push(SceneNode::ModelMesh(handle));
        handle
    }

    fn finish_load(
        &mut self,
        url: ModelUrl,
        result: Result<Vec<IndexedElement>, EngineError>,
    ) -> LoadPoll {
        LoadPoll::Ready(result.map(|elements| self.register_model(url, elements)))
    }
}

/// Rasterzelle eines Elements: `(min, max)` in NDC.
fn tile_rect(index: usize, count: usize) -> (glam::Vec2, glam::Vec2) {
    let count = count.max(1);
    let cols = (count as f32).sqrt().ceil().max(1.0) as usize;
    let rows = count.div_ceil(cols);

    let cell_w = 2.0 * LAYOUT_EXTENT / cols as f32;
    let cell_h = 2.0 * LAYOUT_EXTENT / rows as f32;
    let col = index % cols;
    let row = index / cols;

    let left = -LAYOUT_EXTENT + col as f32 * cell_w;
    let top = LAYOUT_EXTENT - row as f32 * cell_h;
    let gap_x = cell_w * TILE_GAP * 0.5;
    let gap_y = cell_h * TILE_GAP * 0.5;

    (
        glam::Vec2::new(left + gap_x, top - cell_h + gap_y),
        glam::Vec2::new(left + cell_w - gap_x, top - gap_y),
    )
}

impl ViewerEngine for SceneEngine {
    fn begin_load(&mut self, url: &ModelUrl) -> Result<LoadToken, EngineError> {
        let token = LoadToken(self.next_token);
        self.next_token += 1;

        let pending = match self.dispatch {
            LoadDispatch::Inline => PendingLoad::Done {
                url: url.clone(),
                result: (self.loader)(url),
            },
            LoadDispatch::Background => {
                let (tx, rx) = mpsc::channel();
                let loader = Arc::clone(&self.loader);
                let thread_url = url.clone();
                std::thread::spawn(move || {
                    let _ = tx.send(loader(&thread_url));
                });
                PendingLoad::Receiving {
                    url: url.clone(),
                    rx,
                }
            }
        };

        log::debug!("Ladevorgang {:?} gestartet: {}", token, url);
        self.pending.insert(token.0, pending);
        Ok(token)
    }

    fn poll_load(&mut self, token: LoadToken) -> LoadPoll {
        let Some(pending) = self.pending.remove(&token.0) else {
            return LoadPoll::Ready(Err(EngineError::UnknownLoad(token)));
        };

        match pending {
            PendingLoad::Done { url, result } => self.finish_load(url, result),
            PendingLoad::Receiving { url, rx } => match rx.try_recv() {
                Ok(result) => self.finish_load(url, result),
                Err(TryRecvError::Empty) => {
                    self.pending
                        .insert(token.0, PendingLoad::Receiving { url, rx });
                    LoadPoll::Pending
                }
                Err(TryRecvError::Disconnected) => {
                    LoadPoll::Ready(Err(EngineError::LoaderDisconnected(url.to_string())))
                }
            },
        }
    }

    fn dispose_model(&mut self, model: ModelHandle) {
        let subset_ids: Vec<SubsetId> = self
            .subsets
            .iter()
            .filter(|(_, s)| s.model == model)
            .map(|(id, _)| *id)
            .collect();
        for subset in subset_ids {
            self.remove_subset(subset);
        }

        self.scene.retain(|node| *node != SceneNode::ModelMesh(model));
        if self.highlight.is_some_and(|(m, _)| m == model) {
            self.highlight = None;
        }
        if self.prepick.is_some_and(|(m, _)| m == model) {
            self.prepick = None;
        }
        if self.models.remove(&model).is_some() {
            log::info!("Modell {} freigegeben", model);
        }
    }

    fn element_ids(&self, model: ModelHandle) -> Result<Vec<ElementId>, EngineError> {
        self.models
            .get(&model)
            .map(|m| m.elements.iter().map(|e| e.id).collect())
            .ok_or(EngineError::UnknownModel(model))
    }

    fn create_subset(&mut self, request: SubsetRequest<'_>) -> Result<SubsetId, EngineError> {
        let model = self
            .models
            .get(&request.model)
            .ok_or(EngineError::UnknownModel(request.model))?;
        let known: IndexSet<ElementId> = model.elements.iter().map(|e| e.id).collect();
        let ids = request.ids.iter().copied().filter(|id| known.contains(id));

        let existing = self
            .subsets
            .iter_mut()
            .find(|(_, s)| s.model == request.model && s.custom_id == request.custom_id);

        if let Some((&subset_id, subset)) = existing {
            if request.replace_previous {
                subset.ids = ids.collect();
            } else {
                subset.ids.extend(ids);
            }
            subset.material = *request.material;
            return Ok(subset_id);
        }

        let subset_id = SubsetId(self.next_subset);
        self.next_subset += 1;
        self.subsets.insert(
            subset_id,
            Subset {
                model: request.model,
                custom_id: request.custom_id.to_string(),
                ids: ids.collect(),
                material: *request.material,
            },
        );
        Ok(subset_id)
    }

    fn remove_from_subset(
        &mut self,
        subset: SubsetId,
        ids: &[ElementId],
    ) -> Result<(), EngineError> {
        let entry = self
            .subsets
            .get_mut(&subset)
            .ok_or(EngineError::UnknownSubset(subset))?;
        for id in ids {
            entry.ids.shift_remove(id);
        }
        Ok(())
    }

    fn remove_subset(&mut self, subset: SubsetId) {
        self.detach(subset);
        self.subsets.remove(&subset);
    }

    fn attach(&mut self, subset: SubsetId) -> Result<(), EngineError> {
        if !self.subsets.contains_key(&subset) {
            return Err(EngineError::UnknownSubset(subset));
        }
        self.scene.push(SceneNode::Subset(subset));
        Ok(())
    }

    fn detach(&mut self, subset: SubsetId) {
        self.scene.retain(|node| *node != SceneNode::Subset(subset));
    }

    fn is_attached(&self, subset: SubsetId) -> bool {
        self.scene.contains(&SceneNode::Subset(subset))
    }

    fn set_model_visible(&mut self, model: ModelHandle, visible: bool) {
        if let Some(entry) = self.models.get_mut(&model) {
            entry.mesh_visible = visible;
        }
    }

    fn compute_shadows(&mut self, model: ModelHandle) {
        if let Some(entry) = self.models.get_mut(&model) {
            entry.shadows = true;
        }
    }

    fn pick(&mut self, model: ModelHandle, point: ScreenPoint) -> Option<ElementId> {
        let hit = self.hit_test(model, point);
        self.highlight = hit.map(|id| (model, id));
        hit
    }

    fn prepick(&mut self, model: ModelHandle, point: ScreenPoint) {
        self.prepick = self.hit_test(model, point).map(|id| (model, id));
    }

    fn clear_highlight(&mut self) {
        self.highlight = None;
        self.prepick = None;
    }

    fn create_clipping_plane(&mut self, point: ScreenPoint) -> bool {
        let handles: Vec<ModelHandle> = self.models.keys().copied().collect();
        let hits_model = handles
            .into_iter()
            .any(|handle| self.hit_test(handle, point).is_some());
        if hits_model {
            self.clipping_planes.push(point.x);
        }
        hits_model
    }

    fn delete_clipping_plane(&mut self, point: ScreenPoint) -> bool {
        let nearest = self
            .clipping_planes
            .iter()
            .enumerate()
            .map(|(index, &x)| (index, (x - point.x).abs()))
            .filter(|(_, distance)| *distance <= PLANE_PICK_TOLERANCE)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match nearest {
            Some((index, _)) => {
                self.clipping_planes.remove(index);
                true
            }
            None => false,
        }
    }

    fn set_helpers(&mut self, grid: bool, axes: bool) {
        self.grid = grid;
        self.axes = axes;
    }
}
