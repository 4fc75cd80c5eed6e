//! Schematisches Zeichnen der Szene mit dem egui-Painter.

mod schematic;

pub use schematic::{ndc_to_screen, paint_scene, SchematicStyle};
