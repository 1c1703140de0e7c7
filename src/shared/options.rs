//! Zentrale Konfiguration für den Vector Canvas Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{OptimizeConfig, SplitOptions};
use serde::{Deserialize, Serialize};

// ── History ─────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte; ältere Einträge werden verworfen.
pub const MAX_HISTORY: usize = 100;
/// Zeitfenster (ms), in dem aufeinanderfolgende Einträge zusammengeführt werden.
pub const MERGE_WINDOW_MS: u64 = 300;

// ── Geometrie ───────────────────────────────────────────────────────

/// Achsen-Toleranz (Canvas-Einheiten), unter der `optimize` Vertices verschmilzt.
pub const OPTIMIZE_VERTEX_TOLERANCE: f64 = 0.01;
/// Fang-Toleranz für neue Schnittpunkt-Vertices beim Planarisieren.
pub const PLANARIZE_TOLERANCE: f64 = 0.001;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `vector_canvas_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── History ─────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Merge-Fenster in Millisekunden
    #[serde(default = "default_merge_window_ms")]
    pub merge_window_ms: u64,

    // ── Geometrie ───────────────────────────────────────────────
    /// Vertex-Toleranz für `optimize`
    #[serde(default = "default_optimize_vertex_tolerance")]
    pub optimize_vertex_tolerance: f64,
    /// Ungenutzte Vertices bei `optimize` entfernen
    #[serde(default = "default_true")]
    pub remove_unused_vertices: bool,
    /// Fang-Toleranz beim Planarisieren
    #[serde(default = "default_planarize_tolerance")]
    pub planarize_tolerance: f64,
    /// Gerade Segmente bleiben beim Teilen gerade
    #[serde(default)]
    pub split_preserve_zero: bool,
    /// Vereinigte Netze anschließend optimieren
    #[serde(default = "default_true")]
    pub optimize_on_union: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY,
            merge_window_ms: MERGE_WINDOW_MS,

            optimize_vertex_tolerance: OPTIMIZE_VERTEX_TOLERANCE,
            remove_unused_vertices: true,
            planarize_tolerance: PLANARIZE_TOLERANCE,
            split_preserve_zero: false,
            optimize_on_union: true,
        }
    }
}

fn default_max_history() -> usize {
    MAX_HISTORY
}

fn default_merge_window_ms() -> u64 {
    MERGE_WINDOW_MS
}

fn default_optimize_vertex_tolerance() -> f64 {
    OPTIMIZE_VERTEX_TOLERANCE
}

fn default_planarize_tolerance() -> f64 {
    PLANARIZE_TOLERANCE
}

fn default_true() -> bool {
    true
}

impl EditorOptions {
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
            .unwrap_or_else(|_| std::path::PathBuf::from("vector_canvas_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("vector_canvas_editor.toml")
    }

    /// Parameter für `optimize` aus den Optionen.
    pub fn optimize_config(&self) -> OptimizeConfig {
        OptimizeConfig {
            vertex_tolerance: self.optimize_vertex_tolerance,
            remove_unused_vertices: self.remove_unused_vertices,
        }
    }

    /// Parameter für `split_segment` aus den Optionen.
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            preserve_zero: self.split_preserve_zero,
        }
    }
}
