//! Zentrale Konfiguration für den IFC Subset Viewer.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::SessionSettings;
use crate::engine::{LoadDispatch, SubsetMaterial};
use serde::{Deserialize, Serialize};

// ── Subset-Material ─────────────────────────────────────────────────

/// Grundfarbe des Sichtbarkeits-Subsets (RGB).
pub const SUBSET_COLOR: [f32; 3] = [0.85, 0.87, 0.92];
/// Deckkraft des Subsets (halbtransparent).
pub const SUBSET_OPACITY: f32 = 0.8;

// ── Viewport-Farben ─────────────────────────────────────────────────

/// Hintergrundfarbe des Viewports (RGBA).
pub const BACKGROUND_COLOR: [f32; 4] = [0.12, 0.13, 0.15, 1.0];
/// Farbe des rohen Modell-Meshs (RGBA: Grau).
pub const RAW_MESH_COLOR: [f32; 4] = [0.55, 0.55, 0.55, 1.0];
/// Farbe der Pick-Hervorhebung (RGBA: Magenta).
pub const HIGHLIGHT_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
/// Farbe der Hover-Hervorhebung (RGBA: Cyan).
pub const PREPICK_COLOR: [f32; 4] = [0.0, 0.8, 1.0, 1.0];
/// Farbe der Clipping-Ebenen (RGBA: Orange).
pub const CLIPPING_PLANE_COLOR: [f32; 4] = [1.0, 0.5, 0.1, 1.0];

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `ifc_subset_viewer.toml` neben der Binary gespeichert.
/// Fehlende Felder in älteren Dateien erhalten ihren Standardwert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerOptions {
    // ── Subset ──────────────────────────────────────────────────
    /// Grundfarbe des Subsets (RGB)
    pub subset_color: [f32; 3],
    /// Deckkraft des Subsets
    pub subset_opacity: f32,
    /// Alpha-Blending für das Subset
    pub subset_transparent: bool,
    /// Vorder- und Rückseiten rendern
    pub subset_double_sided: bool,

    // ── Engine ──────────────────────────────────────────────────
    /// Schattenberechnung nach dem Laden
    pub compute_shadows: bool,
    /// Hover-Hervorhebung bei Mausbewegung
    pub prepick_on_hover: bool,
    /// Raster anzeigen
    pub show_grid: bool,
    /// Achsen anzeigen
    pub show_axes: bool,
    /// Modelle im Hintergrund-Thread oder direkt laden
    pub load_dispatch: LoadDispatch,

    // ── Viewport ────────────────────────────────────────────────
    /// Hintergrundfarbe
    pub background_color: [f32; 4],
    /// Farbe des rohen Modell-Meshs
    pub raw_mesh_color: [f32; 4],
    /// Farbe der Pick-Hervorhebung
    pub highlight_color: [f32; 4],
    /// Farbe der Hover-Hervorhebung
    pub prepick_color: [f32; 4],
    /// Farbe der Clipping-Ebenen
    pub clipping_plane_color: [f32; 4],
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            subset_color: SUBSET_COLOR,
            subset_opacity: SUBSET_OPACITY,
            subset_transparent: true,
            subset_double_sided: true,

            compute_shadows: true,
            prepick_on_hover: true,
            show_grid: true,
            show_axes: true,
            load_dispatch: LoadDispatch::Background,

            background_color: BACKGROUND_COLOR,
            raw_mesh_color: RAW_MESH_COLOR,
            highlight_color: HIGHLIGHT_COLOR,
            prepick_color: PREPICK_COLOR,
            clipping_plane_color: CLIPPING_PLANE_COLOR,
        }
    }
}

impl ViewerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("ifc_subset_viewer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("ifc_subset_viewer.toml")
    }

    /// Material des Sichtbarkeits-Subsets.
    pub fn subset_material(&self) -> SubsetMaterial {
        SubsetMaterial {
            color: self.subset_color,
            opacity: self.subset_opacity.clamp(0.0, 1.0),
            transparent: self.subset_transparent,
            double_sided: self.subset_double_sided,
        }
    }

    /// Session-Einstellungen aus den Optionen.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            material: self.subset_material(),
            compute_shadows: self.compute_shadows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_fall_back_to_defaults() {
        let defaults = ViewerOptions::default();
        let value = toml::Value::try_from(&defaults).expect("Default-Optionen serialisierbar");
        let toml::Value::Table(mut table) = value else {
            panic!("Optionen müssen eine Tabelle ergeben");
        };
        table.remove("prepick_on_hover");
        table.remove("load_dispatch");
        table.remove("clipping_plane_color");

        let content = toml::to_string(&table).expect("Tabelle serialisierbar");
        let parsed: ViewerOptions = toml::from_str(&content).expect("Optionen lesbar");

        assert_eq!(parsed, defaults);
    }

    #[test]
    fn test_missing_core_fields_keep_remaining_values() {
        let defaults = ViewerOptions::default();
        let value = toml::Value::try_from(&defaults).expect("Default-Optionen serialisierbar");
        let toml::Value::Table(mut table) = value else {
            panic!("Optionen müssen eine Tabelle ergeben");
        };
        for key in [
            "subset_color",
            "subset_opacity",
            "subset_transparent",
            "subset_double_sided",
            "compute_shadows",
            "background_color",
            "raw_mesh_color",
            "highlight_color",
            "prepick_color",
        ] {
            table.remove(key);
        }
        table.insert("show_grid".to_string(), toml::Value::Boolean(false));

        let content = toml::to_string(&table).expect("Tabelle serialisierbar");
        let parsed: ViewerOptions = toml::from_str(&content).expect("Optionen lesbar");

        assert!(!parsed.show_grid);
        assert_eq!(
            parsed,
            ViewerOptions {
                show_grid: false,
                ..defaults
            }
        );
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("ifc_subset_viewer_does_not_exist.toml");
        assert_eq!(ViewerOptions::load_from_file(&path), ViewerOptions::default());
    }

    #[test]
    fn test_broken_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!(
            "ifc_subset_viewer_broken_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "subset_opacity = \"viel\"").expect("Temp-Datei schreibbar");

        let options = ViewerOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(options, ViewerOptions::default());
    }

    #[test]
    fn test_session_settings_clamp_opacity() {
        let options = ViewerOptions {
            subset_opacity: 1.7,
            compute_shadows: false,
            ..ViewerOptions::default()
        };

        let settings = options.session_settings();
        assert_eq!(settings.material.opacity, 1.0);
        assert!(!settings.compute_shadows);
        assert!(settings.material.double_sided);
    }
}
