//! Gemeinsame Test-Helfer: eine protokollierende Fake-Engine.

#![allow(dead_code)]

use ifc_subset_viewer::engine::{LoadPoll, LoadToken, SubsetRequest};
use ifc_subset_viewer::{
    ElementId, EngineError, ModelHandle, ModelUrl, ScreenPoint, SubsetId, ViewerEngine,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Subset, wie die Fake-Engine es führt.
#[derive(Debug, Clone)]
pub struct FakeSubset {
    pub model: ModelHandle,
    pub ids: Vec<ElementId>,
    pub custom_id: String,
}

#[derive(Debug)]
struct FakeLoad {
    url: ModelUrl,
    released: bool,
}

/// In-Memory-Engine für Tests.
///
/// Modelle werden über `with_model` je URL hinterlegt. Mit `hold_loads(true)`
/// bleiben Ladevorgänge offen, bis `release` sie freigibt.
#[derive(Debug, Default)]
pub struct FakeEngine {
    fixtures: HashMap<String, Vec<ElementId>>,
    hold: bool,
    next_model: u32,
    next_subset: u32,
    next_token: u64,
    loads: BTreeMap<u64, FakeLoad>,
    pub models: BTreeMap<ModelHandle, (ModelUrl, Vec<ElementId>)>,
    pub subsets: BTreeMap<SubsetId, FakeSubset>,
    /// Szenegraph-Knoten (Duplikate möglich)
    pub scene: Vec<SubsetId>,
    pub hidden_models: BTreeSet<ModelHandle>,
    pub shadowed: BTreeSet<ModelHandle>,
    pub disposed: Vec<ModelHandle>,
    /// Nächstes Pick-Ergebnis
    pub pick_target: Option<ElementId>,
    pub highlight: Option<ElementId>,
    pub prepick_calls: usize,
    pub clipping_planes: Vec<ScreenPoint>,
    pub helpers: Option<(bool, bool)>,
    pub create_subset_calls: usize,
    pub remove_from_subset_calls: usize,
    /// Nächstes `remove_from_subset` schlägt fehl
    pub fail_next_remove: bool,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            next_model: 1,
            next_subset: 1,
            next_token: 1,
            ..Self::default()
        }
    }

    /// Hinterlegt ein Modell für eine URL.
    pub fn with_model(mut self, url: &str, ids: &[u32]) -> Self {
        self.fixtures
            .insert(url.to_string(), ids.iter().copied().map(ElementId).collect());
        self
    }

    /// Hält Ladevorgänge offen, bis `release` aufgerufen wird.
    pub fn hold_loads(&mut self, hold: bool) {
        self.hold = hold;
    }

    /// Gibt alle offenen Ladevorgänge einer URL frei.
    pub fn release(&mut self, url: &str) {
        for load in self.loads.values_mut() {
            if load.url.as_str() == url {
                load.released = true;
            }
        }
    }

    /// Lebende Modelle für eine URL.
    pub fn live_models_for(&self, url: &str) -> Vec<ModelHandle> {
        self.models
            .iter()
            .filter(|(_, (u, _))| u.as_str() == url)
            .map(|(h, _)| *h)
            .collect()
    }

    /// Elemente eines Subsets.
    pub fn subset_ids(&self, subset: SubsetId) -> Vec<ElementId> {
        self.subsets
            .get(&subset)
            .map(|s| s.ids.clone())
            .unwrap_or_default()
    }

    /// Anzahl Szenegraph-Knoten eines Subsets.
    pub fn attach_count(&self, subset: SubsetId) -> usize {
        self.scene.iter().filter(|s| **s == subset).count()
    }
}

pub fn ids(raw: &[u32]) -> Vec<ElementId> {
    raw.iter().copied().map(ElementId).collect()
}

impl ViewerEngine for FakeEngine {
    fn begin_load(&mut self, url: &ModelUrl) -> Result<LoadToken, EngineError> {
        let token = self.next_token;
        self.next_token += 1;
        self.loads.insert(
            token,
            FakeLoad {
                url: url.clone(),
                released: !self.hold,
            },
        );
        Ok(LoadToken(token))
    }

    fn poll_load(&mut self, token: LoadToken) -> LoadPoll {
        match self.loads.get(&token.0) {
            None => return LoadPoll::Ready(Err(EngineError::UnknownLoad(token))),
            Some(load) if !load.released => return LoadPoll::Pending,
            Some(_) => {}
        }
        let Some(load) = self.loads.remove(&token.0) else {
            return LoadPoll::Ready(Err(EngineError::UnknownLoad(token)));
        };
        let Some(ids) = self.fixtures.get(load.url.as_str()).cloned() else {
            return LoadPoll::Ready(Err(EngineError::UnsupportedFormat(load.url.to_string())));
        };
        let handle = ModelHandle(self.next_model);
        self.next_model += 1;
        self.models.insert(handle, (load.url, ids));
        LoadPoll::Ready(Ok(handle))
    }

    fn dispose_model(&mut self, model: ModelHandle) {
        if self.models.remove(&model).is_some() {
            self.disposed.push(model);
        }
        let owned: Vec<SubsetId> = self
            .subsets
            .iter()
            .filter(|(_, s)| s.model == model)
            .map(|(id, _)| *id)
            .collect();
        for subset in owned {
            self.remove_subset(subset);
        }
        self.hidden_models.remove(&model);
        self.shadowed.remove(&model);
    }

    fn element_ids(&self, model: ModelHandle) -> Result<Vec<ElementId>, EngineError> {
        self.models
            .get(&model)
            .map(|(_, ids)| ids.clone())
            .ok_or(EngineError::UnknownModel(model))
    }

    fn create_subset(&mut self, request: SubsetRequest<'_>) -> Result<SubsetId, EngineError> {
        self.create_subset_calls += 1;
        let Some((_, known)) = self.models.get(&request.model) else {
            return Err(EngineError::UnknownModel(request.model));
        };
        let ids: Vec<ElementId> = request
            .ids
            .iter()
            .copied()
            .filter(|id| known.contains(id))
            .collect();

        let existing = self
            .subsets
            .iter()
            .find(|(_, s)| s.model == request.model && s.custom_id == request.custom_id)
            .map(|(id, _)| *id);

        if let Some(id) = existing {
            if let Some(subset) = self.subsets.get_mut(&id) {
                if request.replace_previous {
                    subset.ids = ids;
                } else {
                    for element in ids {
                        if !subset.ids.contains(&element) {
                            subset.ids.push(element);
                        }
                    }
                }
            }
            return Ok(id);
        }

        let id = SubsetId(self.next_subset);
        self.next_subset += 1;
        self.subsets.insert(
            id,
            FakeSubset {
                model: request.model,
                ids,
                custom_id: request.custom_id.to_string(),
            },
        );
        Ok(id)
    }

    fn remove_from_subset(
        &mut self,
        subset: SubsetId,
        ids: &[ElementId],
    ) -> Result<(), EngineError> {
        self.remove_from_subset_calls += 1;
        if std::mem::take(&mut self.fail_next_remove) {
            return Err(EngineError::UnknownSubset(subset));
        }
        let entry = self
            .subsets
            .get_mut(&subset)
            .ok_or(EngineError::UnknownSubset(subset))?;
        entry.ids.retain(|id| !ids.contains(id));
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
        self.scene.push(subset);
        Ok(())
    }

    fn detach(&mut self, subset: SubsetId) {
        self.scene.retain(|s| *s != subset);
    }

    fn is_attached(&self, subset: SubsetId) -> bool {
        self.scene.contains(&subset)
    }

    fn set_model_visible(&mut self, model: ModelHandle, visible: bool) {
        if visible {
            self.hidden_models.remove(&model);
        } else {
            self.hidden_models.insert(model);
        }
    }

    fn compute_shadows(&mut self, model: ModelHandle) {
        self.shadowed.insert(model);
    }

    fn pick(&mut self, model: ModelHandle, _point: ScreenPoint) -> Option<ElementId> {
        let hit = self
            .pick_target
            .filter(|id| self.models.get(&model).is_some_and(|(_, ids)| ids.contains(id)));
        self.highlight = hit;
        hit
    }

    fn prepick(&mut self, _model: ModelHandle, _point: ScreenPoint) {
        self.prepick_calls += 1;
    }

    fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    fn create_clipping_plane(&mut self, point: ScreenPoint) -> bool {
        if self.models.is_empty() {
            return false;
        }
        self.clipping_planes.push(point);
        true
    }

    fn delete_clipping_plane(&mut self, point: ScreenPoint) -> bool {
        let before = self.clipping_planes.len();
        self.clipping_planes.retain(|p| *p != point);
        before != self.clipping_planes.len()
    }

    fn set_helpers(&mut self, grid: bool, axes: bool) {
        self.helpers = Some((grid, axes));
    }
}
