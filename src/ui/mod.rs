//! UI-Komponenten: Menü, Toolbar, Status-Bar, Input-Handling, Dialoge.

pub mod dialogs;
pub mod input;
mod keyboard;
/// UI-Layer mit egui
///
/// Dieses Modul implementiert alle UI-Komponenten. Keyboard-Shortcuts sind
/// in eine eigene Datei extrahiert.
pub mod menu;
pub mod status;
pub mod toolbar;

pub use dialogs::handle_file_dialogs;
pub use input::{screen_to_ndc, InputState};
pub use menu::render_menu;
pub use status::render_status_bar;
pub use toolbar::render_toolbar;
