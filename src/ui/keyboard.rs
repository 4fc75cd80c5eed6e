//! Keyboard-Shortcuts für den Viewport.
//!
//! Verarbeitet globale Tastenkombinationen und mappt sie auf `AppIntent`s.

use crate::app::AppIntent;
use crate::engine::ScreenPoint;

/// Verarbeitet Keyboard-Shortcuts und gibt AppIntents zurück.
///
/// `pointer` ist die Zeigerposition im Viewport (NDC), falls der Zeiger
/// darüber steht. Clipping-Ebenen brauchen eine Position.
pub(super) fn collect_keyboard_intents(
    ui: &egui::Ui,
    pointer: Option<ScreenPoint>,
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    let (modifiers, key_o_pressed, key_p_pressed, key_escape_pressed) = ui.input(|i| {
        (
            i.modifiers,
            i.key_pressed(egui::Key::O),
            i.key_pressed(egui::Key::P),
            i.key_pressed(egui::Key::Escape),
        )
    });

    // Ctrl+O (Öffnen) hat Vorrang vor O (Ebene löschen)
    if modifiers.command && key_o_pressed {
        events.push(AppIntent::OpenFileRequested);
    } else if key_o_pressed {
        if let Some(point) = pointer {
            events.push(AppIntent::DeleteClippingPlaneRequested { point });
        }
    }

    if key_p_pressed && !modifiers.command {
        if let Some(point) = pointer {
            events.push(AppIntent::CreateClippingPlaneRequested { point });
        }
    }

    if key_escape_pressed {
        events.push(AppIntent::ClearPickRequested);
    }

    events
}
