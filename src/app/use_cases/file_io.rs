//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use super::vector::normalize_vector_node;
use crate::app::state::EditorState;
use crate::app::AppState;
use crate::core::{Document, Node, NodeId};
use anyhow::{bail, Context};
use std::sync::Arc;

/// Liest ein Dokument aus JSON und prüft seine Invarianten.
pub fn parse_document(json: &str) -> anyhow::Result<Document> {
    let document: Document = serde_json::from_str(json).context("Ungültiges Dokument-JSON")?;
    document.validate()?;
    Ok(document)
}

/// Lädt ein Dokument; Auswahl und History werden zurückgesetzt.
pub fn load_document(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Dokument nicht lesbar: {}", path))?;
    let document = parse_document(&json).with_context(|| format!("Dokument {}", path))?;

    log::info!(
        "Dokument geladen: {} ({} Nodes)",
        path,
        document.node_count()
    );
    state.editor = Arc::new(EditorState::from_document(document));
    state.history.clear();
    state.current_file_path = Some(path.to_string());
    Ok(())
}

/// Speichert das Dokument als JSON.
///
/// `None` speichert unter dem aktuell bekannten Pfad.
/// `Some(p)` speichert explizit unter dem neuen Pfad `p`.
pub fn save_document(state: &mut AppState, path: Option<String>) -> anyhow::Result<()> {
    let Some(path) = path.or_else(|| state.current_file_path.clone()) else {
        bail!("Kein Speicherpfad bekannt");
    };
    let json = serde_json::to_string_pretty(&state.editor.document)?;
    std::fs::write(&path, json).with_context(|| format!("Dokument nicht schreibbar: {}", path))?;

    log::info!("Dokument gespeichert: {}", path);
    state.current_file_path = Some(path);
    Ok(())
}

/// Importiert alle Pfade einer SVG-Datei als Vector-Nodes und selektiert sie.
pub fn import_svg(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("SVG nicht lesbar: {}", path))?;
    let paths = crate::svg::parse_svg(&content).with_context(|| format!("SVG {}", path))?;
    if paths.is_empty() {
        log::warn!("SVG-Import: keine Pfade in {}", path);
        return Ok(());
    }

    let mut document = state.document().clone();
    let mut nodes: Vec<Node> = Vec::with_capacity(paths.len());
    for svg_path in paths {
        let id: NodeId = match svg_path.id {
            Some(id) if !document.contains(&id) => id,
            _ => document.next_id("vector"),
        };
        let mut node = Node::vector(id, svg_path.network);
        node.name = node.id.clone();
        normalize_vector_node(&mut node);
        // Platzhalter, damit next_id fortlaufende IDs vergibt
        document.insert_node(node.clone());
        nodes.push(node);
    }

    let count = nodes.len();
    state.apply_transition("import_svg", |s| {
        s.selection.nodes = nodes.iter().map(|n| n.id.clone()).collect();
        s.selection.vector = None;
        for node in nodes {
            s.document.insert_node(node);
        }
    })?;
    log::info!("SVG-Import: {} Vector-Nodes aus {}", count, path);
    Ok(())
}

/// Exportiert das Dokument als SVG.
pub fn export_svg(state: &AppState, path: &str) -> anyhow::Result<()> {
    let svg = crate::svg::write_svg(state.document())?;
    std::fs::write(path, svg).with_context(|| format!("SVG nicht schreibbar: {}", path))?;
    log::info!("SVG exportiert: {}", path);
    Ok(())
}
