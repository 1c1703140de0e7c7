//! Handler für Datei-Operationen (Dokument, SVG) und Optionen.

use crate::app::use_cases;
use crate::app::AppState;
use crate::shared::EditorOptions;

/// Lädt ein Dokument aus dem übergebenen Pfad.
pub fn load(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    use_cases::file_io::load_document(state, path)
}

/// Speichert das Dokument (None = aktueller Pfad).
pub fn save(state: &mut AppState, path: Option<String>) -> anyhow::Result<()> {
    use_cases::file_io::save_document(state, path)
}

pub fn import_svg(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    use_cases::file_io::import_svg(state, path)
}

pub fn export_svg(state: &AppState, path: &str) -> anyhow::Result<()> {
    use_cases::file_io::export_svg(state, path)
}

/// Übernimmt neue Optionen und speichert sie in die Konfigurationsdatei.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    state.set_options(options);
    state.options.save_to_file(&EditorOptions::config_path())?;
    log::info!("Optionen übernommen");
    Ok(())
}
