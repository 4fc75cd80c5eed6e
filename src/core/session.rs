//! Sichtbarkeits-Session: Zustandsautomat für aktives Modell, Visible Set,
//! Pick und gerendertes Subset.
//!
//! Zustände: `NoModel` → `ModelLoading` → `ModelReady { full | partial }`.
//! Die Session ist der einzige Schreiber auf das Subset im Szenegraph.
//! Laden ist zweistufig (`request_load` / `poll_load`); eine neuere Anfrage
//! verdrängt eine ältere, deren Ergebnis bei Ankunft verworfen wird.

use super::VisibleSet;
use crate::engine::{
    ElementId, EngineError, LoadPoll, LoadToken, ModelHandle, ModelUrl, ScreenPoint, SubsetId,
    SubsetMaterial, SubsetRequest, ViewerEngine,
};

/// Schlüssel, unter dem die Session ihr Subset in der Engine führt.
pub const SUBSET_CUSTOM_ID: &str = "visibility";

/// Fehler der Sichtbarkeits-Session.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Modell konnte nicht geladen werden; vorheriger Zustand bleibt aktiv
    #[error("Laden von '{url}' fehlgeschlagen: {source}")]
    LoadFailure {
        url: String,
        #[source]
        source: EngineError,
    },
    /// HideSelected ohne Pick
    #[error("Nichts ausgewählt")]
    NoSelection,
    /// Operation benötigt ein aktives Modell
    #[error("Kein Modell geladen")]
    NoModel,
    /// Engine-Fehler während einer Subset-Operation
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Zustand der Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Kein Modell aktiv
    NoModel,
    /// Ein Ladevorgang läuft (ein vorheriges Modell kann noch aktiv sein)
    ModelLoading,
    /// Modell aktiv; `full` = keine Elemente ausgeblendet
    ModelReady { full: bool },
}

/// Quittung einer Ladeanfrage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

/// Ergebnis von `ViewerSession::poll_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Keine Anfrage offen
    Idle,
    /// Neueste Anfrage läuft noch
    Pending,
    /// Neueste Anfrage abgeschlossen und aktiv
    Loaded {
        ticket: LoadTicket,
        model: ModelHandle,
        element_count: usize,
    },
}

/// Darstellungs-Einstellungen der Session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Material des Sichtbarkeits-Subsets
    pub material: SubsetMaterial,
    /// Schattenberechnung nach dem Laden anstoßen
    pub compute_shadows: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            material: SubsetMaterial {
                color: [0.85, 0.87, 0.92],
                opacity: 0.8,
                transparent: true,
                double_sided: true,
            },
            compute_shadows: true,
        }
    }
}

/// Das aktive Modell mit seinem Subset.
#[derive(Debug, Clone)]
pub struct ActiveModel {
    /// Engine-Handle
    pub handle: ModelHandle,
    /// Herkunft
    pub url: ModelUrl,
    /// Sichtbare Elemente
    pub visible: VisibleSet,
    /// Gerendertes Subset
    pub subset: SubsetId,
}

#[derive(Debug, Clone)]
struct PendingRequest {
    ticket: LoadTicket,
    token: LoadToken,
    url: ModelUrl,
}

/// Sichtbarkeits-Controller einer Anwendungssitzung.
#[derive(Debug)]
pub struct ViewerSession {
    settings: SessionSettings,
    active: Option<ActiveModel>,
    picked: Option<ElementId>,
    pending: Option<PendingRequest>,
    superseded: Vec<PendingRequest>,
    next_ticket: u64,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl ViewerSession {
    /// Erstellt eine leere Session (`NoModel`).
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            active: None,
            picked: None,
            pending: None,
            superseded: Vec::new(),
            next_ticket: 1,
        }
    }

    /// Aktuelle Einstellungen.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Ersetzt die Einstellungen; wirkt ab dem nächsten Subset-Aufbau.
    pub fn set_settings(&mut self, settings: SessionSettings) {
        self.settings = settings;
    }

    /// Aktueller Zustand.
    pub fn phase(&self) -> SessionPhase {
        if self.pending.is_some() {
            SessionPhase::ModelLoading
        } else if let Some(active) = &self.active {
            SessionPhase::ModelReady {
                full: active.visible.is_full(),
            }
        } else {
            SessionPhase::NoModel
        }
    }

    /// Aktives Modell.
    pub fn active(&self) -> Option<&ActiveModel> {
        self.active.as_ref()
    }

    /// Sichtbare Elemente des aktiven Modells.
    pub fn visible_set(&self) -> Option<&VisibleSet> {
        self.active.as_ref().map(|a| &a.visible)
    }

    /// Aktuell gepicktes Element.
    pub fn picked(&self) -> Option<ElementId> {
        self.picked
    }

    /// URL der neuesten offenen Ladeanfrage.
    pub fn pending_url(&self) -> Option<&ModelUrl> {
        self.pending.as_ref().map(|p| &p.url)
    }

    /// Ob noch Ergebnisse (auch verdrängter Anfragen) ausstehen.
    pub fn has_outstanding_loads(&self) -> bool {
        self.pending.is_some() || !self.superseded.is_empty()
    }

    // ── LoadModel ───────────────────────────────────────────────

    /// Startet das Laden eines Modells.
    ///
    /// Das aktive Modell bleibt bis zum erfolgreichen Abschluss bestehen.
    /// Eine noch offene ältere Anfrage wird verdrängt.
    pub fn request_load(
        &mut self,
        engine: &mut dyn ViewerEngine,
        url: ModelUrl,
    ) -> Result<LoadTicket, ViewerError> {
        let token = engine
            .begin_load(&url)
            .map_err(|source| ViewerError::LoadFailure {
                url: url.to_string(),
                source,
            })?;

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;

        if let Some(previous) = self.pending.take() {
            log::info!(
                "Ladeanfrage {:?} ({}) verdrängt durch {:?} ({})",
                previous.ticket,
                previous.url,
                ticket,
                url
            );
            self.superseded.push(previous);
        }

        log::info!("Lade Modell {:?}: {}", ticket, url);
        self.pending = Some(PendingRequest { ticket, token, url });
        Ok(ticket)
    }

    /// Fragt offene Ladevorgänge ab und übernimmt das neueste Ergebnis.
    ///
    /// Ergebnisse verdrängter Anfragen werden verworfen und in der Engine
    /// freigegeben. Der Wechsel auf ein neues Modell passiert vollständig
    /// innerhalb dieses Aufrufs.
    pub fn poll_load(&mut self, engine: &mut dyn ViewerEngine) -> Result<LoadOutcome, ViewerError> {
        self.superseded
            .retain(|request| match engine.poll_load(request.token) {
                LoadPoll::Pending => true,
                LoadPoll::Ready(Ok(handle)) => {
                    log::info!(
                        "Verdrängtes Ergebnis {:?} ({}) verworfen",
                        request.ticket,
                        request.url
                    );
                    engine.dispose_model(handle);
                    false
                }
                LoadPoll::Ready(Err(e)) => {
                    log::debug!("Verdrängte Anfrage {:?} fehlgeschlagen: {}", request.ticket, e);
                    false
                }
            });

        let Some(request) = self.pending.take() else {
            return Ok(LoadOutcome::Idle);
        };

        match engine.poll_load(request.token) {
            LoadPoll::Pending => {
                self.pending = Some(request);
                Ok(LoadOutcome::Pending)
            }
            LoadPoll::Ready(Err(source)) => {
                log::warn!("Laden von {} fehlgeschlagen: {}", request.url, source);
                Err(ViewerError::LoadFailure {
                    url: request.url.to_string(),
                    source,
                })
            }
            LoadPoll::Ready(Ok(handle)) => {
                let element_count = self.install(engine, request.url, handle)?;
                Ok(LoadOutcome::Loaded {
                    ticket: request.ticket,
                    model: handle,
                    element_count,
                })
            }
        }
    }

    /// Lädt ein Modell und wartet auf das Ergebnis.
    pub fn load_blocking(
        &mut self,
        engine: &mut dyn ViewerEngine,
        url: ModelUrl,
    ) -> Result<ModelHandle, ViewerError> {
        let ticket = self.request_load(engine, url)?;
        loop {
            match self.poll_load(engine)? {
                LoadOutcome::Loaded { model, .. } => return Ok(model),
                LoadOutcome::Pending => std::thread::yield_now(),
                LoadOutcome::Idle => {
                    log::warn!("Ladeanfrage {:?} ohne Ergebnis beendet", ticket);
                    return Err(ViewerError::NoModel);
                }
            }
        }
    }

    /// Baut Subset und Visible Set für ein frisch geladenes Modell auf und
    /// ersetzt das bisher aktive Modell.
    fn install(
        &mut self,
        engine: &mut dyn ViewerEngine,
        url: ModelUrl,
        handle: ModelHandle,
    ) -> Result<usize, ViewerError> {
        let prepared = engine.element_ids(handle).and_then(|ids| {
            let visible = VisibleSet::full(ids);
            let subset = engine.create_subset(SubsetRequest {
                model: handle,
                ids: visible.all(),
                material: &self.settings.material,
                custom_id: SUBSET_CUSTOM_ID,
                replace_previous: true,
            })?;
            if !engine.is_attached(subset) {
                engine.attach(subset)?;
            }
            Ok((visible, subset))
        });

        let (visible, subset) = match prepared {
            Ok(prepared) => prepared,
            Err(source) => {
                engine.dispose_model(handle);
                log::warn!("Modell {} aus {} verworfen: {}", handle, url, source);
                return Err(ViewerError::LoadFailure {
                    url: url.to_string(),
                    source,
                });
            }
        };

        self.teardown_active(engine);

        engine.set_model_visible(handle, false);
        if self.settings.compute_shadows {
            engine.compute_shadows(handle);
        }

        let element_count = visible.total();
        log::info!(
            "Modell {} aktiv: {} Elemente aus {}",
            handle,
            element_count,
            url
        );
        self.active = Some(ActiveModel {
            handle,
            url,
            visible,
            subset,
        });
        Ok(element_count)
    }

    fn teardown_active(&mut self, engine: &mut dyn ViewerEngine) {
        if let Some(active) = self.active.take() {
            engine.detach(active.subset);
            engine.remove_subset(active.subset);
            engine.dispose_model(active.handle);
            log::debug!("Modell {} abgebaut", active.handle);
        }
        self.picked = None;
        engine.clear_highlight();
    }

    // ── Pick ────────────────────────────────────────────────────

    /// Pick auf das aktive Modell; ein neuer Pick ersetzt den alten.
    ///
    /// Nur sichtbare Elemente können gepickt werden.
    pub fn pick(
        &mut self,
        engine: &mut dyn ViewerEngine,
        point: ScreenPoint,
    ) -> Result<Option<ElementId>, ViewerError> {
        let Some(active) = &self.active else {
            return Err(ViewerError::NoModel);
        };

        let hit = engine.pick(active.handle, point);
        let picked = hit.filter(|id| active.visible.contains(*id));
        if hit.is_some() && picked.is_none() {
            engine.clear_highlight();
        }

        log::debug!("Pick bei {:?}: {:?}", point, picked);
        self.picked = picked;
        Ok(picked)
    }

    /// Hover-Hervorhebung ohne Zustandsänderung.
    pub fn prepick(&self, engine: &mut dyn ViewerEngine, point: ScreenPoint) {
        if let Some(active) = &self.active {
            engine.prepick(active.handle, point);
        }
    }

    /// Hebt Pick und Hervorhebung auf.
    pub fn clear_pick(&mut self, engine: &mut dyn ViewerEngine) {
        self.picked = None;
        engine.clear_highlight();
    }

    // ── HideSelected / ShowAll ──────────────────────────────────

    /// Blendet das gepickte Element aus.
    ///
    /// Das Subset wird in place verkleinert, nicht neu aufgebaut.
    pub fn hide_selected(
        &mut self,
        engine: &mut dyn ViewerEngine,
    ) -> Result<ElementId, ViewerError> {
        let (Some(id), Some(active)) = (self.picked, self.active.as_mut()) else {
            return Err(ViewerError::NoSelection);
        };

        engine.remove_from_subset(active.subset, &[id])?;
        active.visible.hide(id);
        engine.clear_highlight();
        self.picked = None;

        log::info!(
            "Element {} ausgeblendet ({}/{} sichtbar)",
            id,
            active.visible.len(),
            active.visible.total()
        );
        Ok(id)
    }

    /// Macht alle Elemente wieder sichtbar und baut das Subset neu auf.
    pub fn show_all(&mut self, engine: &mut dyn ViewerEngine) -> Result<(), ViewerError> {
        let Some(active) = self.active.as_mut() else {
            return Err(ViewerError::NoModel);
        };

        let subset = engine.create_subset(SubsetRequest {
            model: active.handle,
            ids: active.visible.all(),
            material: &self.settings.material,
            custom_id: SUBSET_CUSTOM_ID,
            replace_previous: true,
        })?;
        if subset != active.subset {
            engine.remove_subset(active.subset);
            active.subset = subset;
        }
        if !engine.is_attached(subset) {
            engine.attach(subset)?;
        }
        active.visible.reset();

        log::info!("Alle {} Elemente eingeblendet", active.visible.total());
        Ok(())
    }

    // ── Dispose ─────────────────────────────────────────────────

    /// Baut das aktive Modell ab und verwirft offene Ladeanfragen.
    ///
    /// Noch laufende Ladevorgänge werden beim nächsten `poll_load` freigegeben.
    pub fn dispose(&mut self, engine: &mut dyn ViewerEngine) {
        if let Some(pending) = self.pending.take() {
            self.superseded.push(pending);
        }
        self.teardown_active(engine);
        log::info!("Session zurückgesetzt");
    }
}
