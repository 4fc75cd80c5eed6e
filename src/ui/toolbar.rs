//! Toolbar mit Datei- und Sichtbarkeitsaktionen.

use crate::app::{AppIntent, AppState};

/// Rendert die Toolbar und gibt erzeugte Events zurück.
pub fn render_toolbar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let has_model = state.has_model();
    let has_pick = state.session.picked().is_some();

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Open IFC…").clicked() {
                events.push(AppIntent::OpenFileRequested);
            }

            ui.separator();

            // "Hide selected" bleibt ohne Pick klickbar, damit der Hinweis erscheint
            if ui
                .add_enabled(has_model, egui::Button::new("Hide selected"))
                .on_hover_text("Hides the element picked by double-click")
                .clicked()
            {
                events.push(AppIntent::HideSelectedRequested);
            }

            if ui
                .add_enabled(has_model, egui::Button::new("Show all"))
                .clicked()
            {
                events.push(AppIntent::ShowAllRequested);
            }

            if ui
                .add_enabled(has_model, egui::Button::new("Close model"))
                .clicked()
            {
                events.push(AppIntent::CloseModelRequested);
            }

            ui.separator();

            let mut grid = state.ui.show_grid;
            let mut axes = state.ui.show_axes;
            let grid_changed = ui.checkbox(&mut grid, "Grid").changed();
            let axes_changed = ui.checkbox(&mut axes, "Axes").changed();
            if grid_changed || axes_changed {
                events.push(AppIntent::HelpersToggled { grid, axes });
            }

            if has_pick {
                ui.separator();
                ui.label("Esc: clear pick");
            }
        });
    });

    events
}
