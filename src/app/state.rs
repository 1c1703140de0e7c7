//! Application State: undofähiger Editor-Zustand plus Laufzeit-Kollaborateure.

use super::clock::{Clock, SystemClock};
use super::geometry::{DeclaredGeometry, GeometryQuery};
use super::history::HistoryManager;
use super::patch;
use super::CommandLog;
use crate::core::{Document, FrozenSegment, NetworkSelection, NodeId};
use crate::shared::EditorOptions;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Zeichenwerkzeug einer laufenden Zeichengeste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawTool {
    /// Freihand: jeder Punkt wird an die Polylinie angehängt
    Pencil,
    /// Gerade Strecke vom Startpunkt zur aktuellen Position
    Line,
}

/// Laufende Zeiger-Geste (transient, nie in der History)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    /// Segment biegen; gerechnet wird auf dem Zustand vom Gestenbeginn
    BendSegment {
        node_id: NodeId,
        segment: usize,
        frozen: FrozenSegment,
    },
    /// Zeichnen in einen neu angelegten Vector-Node
    Draw { node_id: NodeId, tool: DrawTool },
}

/// Auswahl innerhalb eines Vector-Nodes (Content-Edit-Modus)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorSelection {
    pub node_id: NodeId,
    #[serde(flatten)]
    pub items: NetworkSelection,
}

/// Auswahlzustand: selektierte Nodes und optional der Content-Edit-Node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub vector: Option<VectorSelection>,
}

impl Selection {
    /// Ob `node_id` gerade im Content-Edit-Modus bearbeitet wird.
    pub fn is_content_edit(&self, node_id: &str) -> bool {
        self.vector.as_ref().is_some_and(|v| v.node_id == node_id)
    }

    /// Setzt die Netz-Auswahl zurück, wenn sie zu `node_id` gehört.
    ///
    /// Nach strukturellen Änderungen sind die Indizes nicht mehr gültig.
    pub fn reset_items_of(&mut self, node_id: &str) {
        if let Some(vector) = self.vector.as_mut().filter(|v| v.node_id == node_id) {
            vector.items = NetworkSelection::default();
        }
    }

    /// Entfernt alle Verweise auf einen gelöschten Node.
    pub fn forget_node(&mut self, node_id: &str) {
        self.nodes.retain(|id| id != node_id);
        if self.is_content_edit(node_id) {
            self.vector = None;
        }
    }
}

/// Der undofähige Zustand: Dokument, Auswahl und transiente Felder.
///
/// Jede Mutation läuft über [`AppState::apply_transition`]; Undo/Redo
/// spielen die aufgezeichneten Patches auf genau diesen Wert zurück.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorState {
    pub document: Document,
    #[serde(default)]
    pub selection: Selection,
    /// Transient: Node unter dem Zeiger
    #[serde(default)]
    pub hovered_node: Option<NodeId>,
    /// Transient: Vertex unter dem Zeiger (Content-Edit)
    #[serde(default)]
    pub hovered_vertex: Option<usize>,
    /// Transient: laufende Geste
    #[serde(default)]
    pub gesture: Option<Gesture>,
}

impl EditorState {
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Aktueller Editor-Zustand (gleicher `Arc` = keine Änderung)
    pub editor: Arc<EditorState>,
    /// Undo/Redo-History (Patch-basiert)
    pub history: HistoryManager,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen (History-Grenzen, Toleranzen)
    pub options: EditorOptions,
    /// Zeitquelle für History-Einträge
    pub clock: Box<dyn Clock>,
    /// Löst absolute Bounding-Boxen auf (Skalieren)
    pub geometry: Box<dyn GeometryQuery>,
    /// Pfad des zuletzt geladenen/gespeicherten Dokuments
    pub current_file_path: Option<String>,
}

impl AppState {
    /// Erstellt einen leeren App-State mit Systemuhr und deklarierter Geometrie.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            editor: Arc::new(EditorState::default()),
            history: HistoryManager::from_options(&options),
            command_log: CommandLog::new(),
            options,
            clock: Box::new(SystemClock),
            geometry: Box::new(DeclaredGeometry),
            current_file_path: None,
        }
    }

    /// Ersetzt die Zeitquelle (Tests, Replay).
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Ersetzt den Geometrie-Kollaborateur.
    pub fn with_geometry(mut self, geometry: impl GeometryQuery + 'static) -> Self {
        self.geometry = Box::new(geometry);
        self
    }

    /// Startet mit einem Dokument; die History ist leer.
    pub fn with_document(mut self, document: Document) -> Self {
        self.editor = Arc::new(EditorState::from_document(document));
        self.history.clear();
        self
    }

    pub fn document(&self) -> &Document {
        &self.editor.document
    }

    /// Gibt die Anzahl der Nodes zurück.
    pub fn node_count(&self) -> usize {
        self.editor.document.node_count()
    }

    /// Undo/Redo helpers
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Führt einen Zustandsübergang aus und zeichnet ihn in der History auf.
    ///
    /// `recipe` mutiert eine Kopie des aktuellen Zustands. Ohne Änderung
    /// bleibt `editor` derselbe `Arc` und es wird nichts aufgezeichnet.
    /// Reine Änderungen transienter Felder werden übernommen, aber nicht
    /// aufgezeichnet. Liefert `true`, wenn sich der Zustand geändert hat.
    pub fn apply_transition<F>(&mut self, action_type: &str, recipe: F) -> anyhow::Result<bool>
    where
        F: FnOnce(&mut EditorState),
    {
        let (next, forward, inverse) = patch::produce_with_patches(self.editor.as_ref(), recipe)?;
        if forward.is_empty() && inverse.is_empty() {
            log::debug!("{}: keine Änderung", action_type);
            return Ok(false);
        }

        let now = self.clock.now_ms();
        if !self.history.record(action_type, forward, inverse, now) {
            log::debug!("{}: nur transiente Änderung", action_type);
        }
        self.editor = Arc::new(next);
        Ok(true)
    }

    /// Übernimmt neue Optionen inkl. History-Grenzen.
    pub fn set_options(&mut self, options: EditorOptions) {
        self.history
            .set_limits(options.max_history, options.merge_window_ms);
        self.options = options;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
