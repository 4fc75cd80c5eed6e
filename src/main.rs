//! IFC Subset Viewer.
//!
//! Lädt ein IFC-Modell, zeigt es als halbtransparentes Subset und erlaubt
//! das Ausblenden einzelner Bauteile per Doppelklick-Pick.

use eframe::egui;
use ifc_subset_viewer::{
    render, ui, AppController, AppIntent, AppState, SceneEngine, ViewerEngine, ViewerOptions,
};

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "IFC Subset Viewer v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("IFC Subset Viewer"),
            renderer: eframe::Renderer::Glow,
            ..Default::default()
        };

        eframe::run_native(
            "IFC Subset Viewer",
            options,
            Box::new(|_cc| Ok(Box::new(ViewerApp::new()))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct ViewerApp {
    state: AppState,
    controller: AppController<SceneEngine>,
    input: ui::InputState,
}

impl ViewerApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = ViewerOptions::config_path();
        let viewer_options = ViewerOptions::load_from_file(&config_path);
        if !config_path.exists() {
            if let Err(e) = viewer_options.save_to_file(&config_path) {
                log::warn!("Optionen konnten nicht angelegt werden: {:#}", e);
            }
        }

        let mut engine = SceneEngine::new();
        engine.set_dispatch(viewer_options.load_dispatch);
        engine.set_helpers(viewer_options.show_grid, viewer_options.show_axes);

        Self {
            state: AppState::with_options(viewer_options),
            controller: AppController::new(engine),
            input: ui::InputState::new(),
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if let Err(e) = self.controller.poll_model_load(&mut self.state) {
            log::error!("Laden fehlgeschlagen: {:#}", e);
        }

        let events = self.collect_ui_events(ctx);

        let has_meaningful_events = events
            .iter()
            .any(|e| !matches!(e, AppIntent::PrePickRequested { .. }));

        self.process_events(events);

        self.maybe_request_repaint(ctx, has_meaningful_events);
    }
}

impl ViewerApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        let engine = self.controller.engine();
        let active_handle = self.state.session.active().map(|a| a.handle);
        ui::render_status_bar(ctx, &self.state, |id| {
            active_handle
                .and_then(|handle| engine.element_type(handle, id))
                .map(str::to_string)
        });
        events.extend(ui::render_menu(ctx, &self.state));
        events.extend(ui::render_toolbar(ctx, &self.state));
        events.extend(ui::handle_file_dialogs(&mut self.state.ui));

        let style = render::SchematicStyle::from_options(&self.state.options);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click());

                events.extend(self.input.collect_viewport_events(ui, &response));

                let snapshot = self.controller.engine().snapshot();
                render::paint_scene(ui.painter(), rect, &snapshot, &style);

                if !self.state.has_model() {
                    let text = if self.state.session.pending_url().is_some() {
                        "Loading model…"
                    } else {
                        "No model loaded. Use File → Open IFC"
                    };
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        text,
                        egui::FontId::proportional(20.0),
                        egui::Color32::WHITE,
                    );
                }
            });

        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    fn maybe_request_repaint(&self, ctx: &egui::Context, has_meaningful_events: bool) {
        if has_meaningful_events || self.state.session.has_outstanding_loads() {
            ctx.request_repaint();
        }
    }
}
