//! Top-Menü (File).

use crate::app::{AppIntent, AppState};

/// Rendert die Menü-Leiste
pub fn render_menu(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open IFC... (Ctrl+O)").clicked() {
                    events.push(AppIntent::OpenFileRequested);
                    ui.close();
                }

                if ui
                    .add_enabled(state.has_model(), egui::Button::new("Close model"))
                    .clicked()
                {
                    events.push(AppIntent::CloseModelRequested);
                    ui.close();
                }

                ui.separator();

                if ui.button("Exit").clicked() {
                    events.push(AppIntent::ExitRequested);
                    ui.close();
                }
            });
        });
    });

    events
}
