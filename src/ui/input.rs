//! Viewport-Input-Handling: Hover, Doppelklick und Tastatur → AppIntent.

use super::keyboard;
use crate::app::AppIntent;
use crate::engine::ScreenPoint;

/// Rechnet eine Bildschirmposition in normalisierte Gerätekoordinaten um.
///
/// Ergebnis: x/y in [-1, 1], y zeigt nach oben. Für leere Rechtecke
/// (Größe 0) wird die Mitte geliefert.
pub fn screen_to_ndc(pos: egui::Pos2, rect: egui::Rect) -> ScreenPoint {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return ScreenPoint::ZERO;
    }
    let x = (pos.x - rect.min.x) / rect.width() * 2.0 - 1.0;
    let y = 1.0 - (pos.y - rect.min.y) / rect.height() * 2.0;
    ScreenPoint::new(x, y)
}

/// Verwaltet den Input-Zustand für das Viewport (letzte Hover-Position)
#[derive(Default)]
pub struct InputState {
    last_hover: Option<egui::Pos2>,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self { last_hover: None }
    }

    /// Sammelt Viewport-Events aus egui-Input und gibt AppIntents zurück.
    ///
    /// Hover erzeugt nur bei tatsächlicher Zeigerbewegung einen Pre-Pick,
    /// Doppelklick pickt, Tastatur-Shortcuts beziehen sich auf den Zeiger.
    pub fn collect_viewport_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
    ) -> Vec<AppIntent> {
        let rect = response.rect;
        let hover_pos = response.hover_pos();
        let pointer = hover_pos.map(|pos| screen_to_ndc(pos, rect));

        let mut events = keyboard::collect_keyboard_intents(ui, pointer);

        match hover_pos {
            Some(pos) if self.last_hover != Some(pos) => {
                self.last_hover = Some(pos);
                events.push(AppIntent::PrePickRequested {
                    point: screen_to_ndc(pos, rect),
                });
            }
            Some(_) => {}
            None => self.last_hover = None,
        }

        if response.double_clicked_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(AppIntent::PickRequested {
                    point: screen_to_ndc(pos, rect),
                });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(200.0, 100.0))
    }

    #[test]
    fn test_corners_map_to_ndc_extremes() {
        let top_left = screen_to_ndc(egui::pos2(100.0, 50.0), rect());
        let bottom_right = screen_to_ndc(egui::pos2(300.0, 150.0), rect());

        assert_eq!(top_left, ScreenPoint::new(-1.0, 1.0));
        assert_eq!(bottom_right, ScreenPoint::new(1.0, -1.0));
    }

    #[test]
    fn test_center_maps_to_origin() {
        let center = screen_to_ndc(rect().center(), rect());
        assert!(center.length() < 1e-6);
    }

    #[test]
    fn test_empty_rect_maps_to_origin() {
        let empty = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::Vec2::ZERO);
        assert_eq!(screen_to_ndc(egui::pos2(10.0, 10.0), empty), ScreenPoint::ZERO);
    }
}
