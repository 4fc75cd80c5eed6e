//! Status-Bar am unteren Bildschirmrand.

use crate::app::AppState;
use crate::core::SessionPhase;

/// Rendert die Status-Bar.
///
/// `element_type` liefert den IFC-Typ eines Elements des aktiven Modells,
/// soweit die Engine ihn kennt.
pub fn render_status_bar(
    ctx: &egui::Context,
    state: &AppState,
    element_type: impl Fn(crate::engine::ElementId) -> Option<String>,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let phase = match state.session.phase() {
                SessionPhase::NoModel => "No model",
                SessionPhase::ModelLoading => "Loading…",
                SessionPhase::ModelReady { full: true } => "Ready",
                SessionPhase::ModelReady { full: false } => "Ready (filtered)",
            };
            ui.label(phase);

            if let Some(active) = state.session.active() {
                ui.separator();
                ui.label(format!(
                    "Visible: {} / {}",
                    active.visible.len(),
                    active.visible.total()
                ));

                let hidden = active.visible.hidden().count();
                if hidden > 0 {
                    ui.label(format!("({} hidden)", hidden));
                }

                ui.separator();
                let file_name = std::path::Path::new(active.url.as_str())
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(active.url.as_str());
                ui.label(format!("File: {}", file_name));
            }

            ui.separator();

            match state.session.picked() {
                Some(id) => match element_type(id) {
                    Some(ifc_type) => ui.label(format!("Picked: {} ({})", id, ifc_type)),
                    None => ui.label(format!("Picked: {}", id)),
                },
                None => ui.label("Picked: –"),
            };

            if let Some(msg) = &state.ui.status_message {
                ui.separator();
                ui.label(egui::RichText::new(msg).color(egui::Color32::LIGHT_YELLOW));
            }
        });
    });
}
