//! Menge der aktuell sichtbaren Elemente eines Modells.

use crate::engine::ElementId;
use indexmap::IndexSet;
use std::sync::Arc;

/// Sichtbare Elemente als Teilmenge aller Elemente des aktiven Modells.
///
/// Die Reihenfolge folgt der Aufzählung der Engine, damit Subsets
/// deterministisch aufgebaut werden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSet {
    /// Alle Elemente des Modells (ohne Duplikate)
    all: Arc<[ElementId]>,
    /// Davon aktuell sichtbar
    visible: IndexSet<ElementId>,
}

impl VisibleSet {
    /// Erstellt die volle Menge: alle Elemente sichtbar.
    pub fn full(ids: impl IntoIterator<Item = ElementId>) -> Self {
        let visible: IndexSet<ElementId> = ids.into_iter().collect();
        Self {
            all: visible.iter().copied().collect(),
            visible,
        }
    }

    /// Blendet ein Element aus. `false`, wenn es bereits ausgeblendet war.
    pub fn hide(&mut self, id: ElementId) -> bool {
        self.visible.shift_remove(&id)
    }

    /// Macht wieder alle Elemente sichtbar.
    pub fn reset(&mut self) {
        self.visible = self.all.iter().copied().collect();
    }

    /// Ob keine Elemente ausgeblendet sind.
    pub fn is_full(&self) -> bool {
        self.visible.len() == self.all.len()
    }

    /// Ob ein Element sichtbar ist.
    pub fn contains(&self, id: ElementId) -> bool {
        self.visible.contains(&id)
    }

    /// Anzahl sichtbarer Elemente.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Ob kein Element sichtbar ist.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Anzahl aller Elemente des Modells.
    pub fn total(&self) -> usize {
        self.all.len()
    }

    /// Alle Elemente des Modells.
    pub fn all(&self) -> &[ElementId] {
        &self.all
    }

    /// Sichtbare Elemente in Engine-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.visible.iter().copied()
    }

    /// Ausgeblendete Elemente in Engine-Reihenfolge.
    pub fn hidden(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.all
            .iter()
            .copied()
            .filter(|id| !self.visible.contains(id))
    }
}
