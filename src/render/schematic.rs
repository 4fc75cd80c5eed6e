//! Zeichnet einen `SceneSnapshot` als Kachel-Schema in ein Viewport-Rechteck.
//!
//! Reihenfolge: Hintergrund, Raster, Achsen, Schatten, Kacheln mit
//! Hervorhebung, zuletzt die Clipping-Ebenen.

use crate::engine::scene::{TileKind, TileView};
use crate::engine::SceneSnapshot;
use crate::shared::ViewerOptions;

/// Rasterabstand in NDC.
const GRID_STEP: f32 = 0.1;
/// Versatz des Schlagschattens in Pixel.
const SHADOW_OFFSET: egui::Vec2 = egui::Vec2::new(3.0, 3.0);
/// Linienbreite der Hervorhebungen in Pixel.
const HIGHLIGHT_STROKE_WIDTH: f32 = 2.5;

/// Farben des Schemas.
#[derive(Debug, Clone, Copy)]
pub struct SchematicStyle {
    /// Hintergrund
    pub background: egui::Color32,
    /// Rohes Modell-Mesh
    pub raw_mesh: egui::Color32,
    /// Pick-Hervorhebung
    pub highlight: egui::Color32,
    /// Hover-Hervorhebung
    pub prepick: egui::Color32,
    /// Clipping-Ebenen
    pub clipping_plane: egui::Color32,
}

impl SchematicStyle {
    /// Übernimmt die Farben aus den Optionen.
    pub fn from_options(options: &ViewerOptions) -> Self {
        Self {
            background: rgba(options.background_color),
            raw_mesh: rgba(options.raw_mesh_color),
            highlight: rgba(options.highlight_color),
            prepick: rgba(options.prepick_color),
            clipping_plane: rgba(options.clipping_plane_color),
        }
    }
}

fn rgba(c: [f32; 4]) -> egui::Color32 {
    egui::Rgba::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]).into()
}

/// Rechnet NDC (y nach oben) in Bildschirmkoordinaten des Rechtecks um.
pub fn ndc_to_screen(point: glam::Vec2, rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(
        rect.min.x + (point.x + 1.0) * 0.5 * rect.width(),
        rect.min.y + (1.0 - point.y) * 0.5 * rect.height(),
    )
}

fn tile_rect(tile: &TileView, rect: egui::Rect) -> egui::Rect {
    // min ist unten links, max oben rechts; am Bildschirm kehrt sich y um
    egui::Rect::from_two_pos(ndc_to_screen(tile.min, rect), ndc_to_screen(tile.max, rect))
}

fn tile_fill(tile: &TileView, style: &SchematicStyle) -> egui::Color32 {
    match (tile.kind, tile.material) {
        (TileKind::Subset, Some(material)) => {
            let alpha = if material.transparent {
                material.opacity
            } else {
                1.0
            };
            let [r, g, b] = material.color;
            egui::Rgba::from_rgba_unmultiplied(r, g, b, alpha).into()
        }
        _ => style.raw_mesh,
    }
}

/// Zeichnet den Snapshot in `rect`.
pub fn paint_scene(
    painter: &egui::Painter,
    rect: egui::Rect,
    snapshot: &SceneSnapshot,
    style: &SchematicStyle,
) {
    painter.rect_filled(rect, 0.0, style.background);

    if snapshot.grid {
        paint_grid(painter, rect);
    }
    if snapshot.axes {
        paint_axes(painter, rect);
    }

    for tile in snapshot.tiles.iter().filter(|t| t.shadow) {
        let shadow = tile_rect(tile, rect).translate(SHADOW_OFFSET);
        painter.rect_filled(shadow, 2.0, egui::Color32::from_black_alpha(90));
    }

    for tile in &snapshot.tiles {
        let screen = tile_rect(tile, rect);
        painter.rect_filled(screen, 2.0, tile_fill(tile, style));

        if tile.material.is_some_and(|m| m.double_sided) {
            painter.rect_stroke(
                screen,
                2.0,
                egui::Stroke::new(1.0, egui::Color32::from_white_alpha(40)),
                egui::StrokeKind::Inside,
            );
        }

        let outline = if tile.highlighted {
            Some(style.highlight)
        } else if tile.prepicked {
            Some(style.prepick)
        } else {
            None
        };
        if let Some(color) = outline {
            painter.rect_stroke(
                screen,
                2.0,
                egui::Stroke::new(HIGHLIGHT_STROKE_WIDTH, color),
                egui::StrokeKind::Inside,
            );
        }

        if screen.width() > 40.0 && screen.height() > 16.0 {
            painter.text(
                screen.center(),
                egui::Align2::CENTER_CENTER,
                tile.element.to_string(),
                egui::FontId::monospace(10.0),
                egui::Color32::BLACK,
            );
        }
    }

    for &x in &snapshot.clipping_planes {
        let top = ndc_to_screen(glam::Vec2::new(x, 1.0), rect);
        let bottom = ndc_to_screen(glam::Vec2::new(x, -1.0), rect);
        painter.line_segment([top, bottom], egui::Stroke::new(2.0, style.clipping_plane));
    }
}

fn paint_grid(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(12));
    let steps = (2.0 / GRID_STEP).round() as i32;
    for i in 0..=steps {
        let t = -1.0 + i as f32 * GRID_STEP;
        painter.line_segment(
            [
                ndc_to_screen(glam::Vec2::new(t, -1.0), rect),
                ndc_to_screen(glam::Vec2::new(t, 1.0), rect),
            ],
            stroke,
        );
        painter.line_segment(
            [
                ndc_to_screen(glam::Vec2::new(-1.0, t), rect),
                ndc_to_screen(glam::Vec2::new(1.0, t), rect),
            ],
            stroke,
        );
    }
}

fn paint_axes(painter: &egui::Painter, rect: egui::Rect) {
    let origin = ndc_to_screen(glam::Vec2::ZERO, rect);
    let x_end = ndc_to_screen(glam::Vec2::new(0.2, 0.0), rect);
    let y_end = ndc_to_screen(glam::Vec2::new(0.0, 0.2), rect);
    painter.line_segment([origin, x_end], egui::Stroke::new(1.5, egui::Color32::RED));
    painter.line_segment([origin, y_end], egui::Stroke::new(1.5, egui::Color32::GREEN));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_to_screen_flips_y() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 100.0));

        assert_eq!(ndc_to_screen(glam::Vec2::new(-1.0, 1.0), rect), egui::pos2(0.0, 0.0));
        assert_eq!(ndc_to_screen(glam::Vec2::new(1.0, -1.0), rect), egui::pos2(200.0, 100.0));
        assert_eq!(ndc_to_screen(glam::Vec2::ZERO, rect), egui::pos2(100.0, 50.0));
    }

    #[test]
    fn test_ndc_to_screen_inverts_screen_to_ndc() {
        let rect = egui::Rect::from_min_size(egui::pos2(40.0, 20.0), egui::vec2(320.0, 240.0));
        let pos = egui::pos2(123.0, 77.0);

        let back = ndc_to_screen(crate::ui::screen_to_ndc(pos, rect), rect);
        assert!((back - pos).length() < 1e-3);
    }

    #[test]
    fn test_opaque_subset_ignores_opacity() {
        let style = SchematicStyle::from_options(&ViewerOptions::default());
        let tile = TileView {
            element: crate::engine::ElementId(1),
            ifc_type: "IFCWALL".to_string(),
            min: glam::Vec2::new(-0.5, -0.5),
            max: glam::Vec2::new(0.5, 0.5),
            kind: TileKind::Subset,
            material: Some(crate::engine::SubsetMaterial {
                color: [1.0, 0.0, 0.0],
                opacity: 0.2,
                transparent: false,
                double_sided: false,
            }),
            highlighted: false,
            prepicked: false,
            shadow: false,
        };

        assert_eq!(tile_fill(&tile, &style), egui::Color32::RED);
    }
}
