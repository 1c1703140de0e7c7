use crate::app::state::DrawTool;
use crate::core::{
    NetworkSelection, Node, NodeId, PointOnSegment, TangentControl, TangentMirroringMode,
};
use crate::shared::EditorOptions;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
///
/// Positionen und Deltas sind Canvas-Koordinaten; die Umrechnung in lokale
/// Netz-Koordinaten übernimmt der jeweilige Use-Case. Serialisiert mit
/// `type`-Tag (Replay-Dateien, Command-Log).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppCommand {
    // === Vector Network ===
    /// Vertex anhängen, optional mit Segment vom Vertex `from_vertex`
    AddVertex {
        node_id: NodeId,
        position: DVec2,
        from_vertex: Option<usize>,
        outgoing_tangent: Option<DVec2>,
    },
    /// Vertex samt anliegender Segmente löschen
    DeleteVertex { node_id: NodeId, vertex: usize },
    /// Nur das Segment löschen
    DeleteSegment { node_id: NodeId, segment: usize },
    /// Segment an `point.t` teilen
    SplitSegment { node_id: NodeId, point: PointOnSegment },
    /// Vertex verschieben
    TranslateVertex {
        node_id: NodeId,
        vertex: usize,
        delta: DVec2,
    },
    /// Beide Endpunkte eines Segments verschieben
    TranslateSegment {
        node_id: NodeId,
        segment: usize,
        delta: DVec2,
    },
    /// Aktuelle Netz-Auswahl verschieben
    TranslateVectorSelection { delta: DVec2 },
    /// Aktuelle Netz-Auswahl löschen
    DeleteVectorSelection,
    /// Aktuelle Netz-Auswahl als neuen Vector-Node kopieren
    DuplicateVectorSelection,
    /// Biege-Geste starten (friert das Segment ein)
    BeginBendSegment { node_id: NodeId, segment: usize },
    /// Biege-Geste: Kurve bei `t` durch `target` legen
    BendSegment { t: f64, target: DVec2 },
    /// Tangente setzen, Gegenstück je nach Modus spiegeln
    UpdateTangent {
        node_id: NodeId,
        segment: usize,
        control: TangentControl,
        value: DVec2,
        #[serde(default)]
        mirroring: TangentMirroringMode,
    },
    /// Tangente auf null setzen
    DeleteTangent {
        node_id: NodeId,
        segment: usize,
        control: TangentControl,
    },
    /// Beide Tangenten einer Ecke setzen (`None` löscht)
    SetCornerTangents {
        node_id: NodeId,
        vertex: usize,
        value: Option<DVec2>,
    },
    /// Ecke zwischen spitz und glatt umschalten
    BendCorner {
        node_id: NodeId,
        vertex: usize,
        preferred_side: Option<TangentControl>,
    },
    /// Schnittpunkte in Vertices zerlegen
    Planarize { node_id: NodeId },
    /// Nahe Vertices zusammenführen, doppelte Segmente entfernen
    Optimize { node_id: NodeId },
    /// Netz von `source` in `target` übernehmen; `source` wird entfernt
    UnionNetworks { target: NodeId, source: NodeId },

    // === Zeichnen ===
    /// Zeichengeste starten (legt einen neuen Vector-Node an)
    BeginDraw { tool: DrawTool, position: DVec2 },
    /// Zeichengeste fortsetzen
    DrawTo { position: DVec2 },
    /// Zeiger losgelassen: laufende Geste beenden
    EndGesture,

    // === Node-Graph ===
    /// Node einfügen (Vector-Nodes werden normalisiert)
    InsertNode { node: Node },
    /// Node entfernen
    RemoveNode { node_id: NodeId },
    /// Node verschieben
    TranslateNode { node_id: NodeId, delta: DVec2 },
    /// Rechteck/Ellipse in einen Vector-Node umwandeln
    ConvertToVector { node_id: NodeId },
    /// Selektierte Nodes um ihre gemeinsame linke obere Ecke skalieren
    ScaleSelection { factor: f64 },

    // === Selektion & Hover ===
    /// Nodes selektieren
    SelectNodes { node_ids: Vec<NodeId>, additive: bool },
    /// Selektion aufheben
    ClearSelection,
    /// Content-Edit-Modus für einen Vector-Node betreten
    EnterContentEdit { node_id: NodeId },
    /// Content-Edit-Modus verlassen
    ExitContentEdit,
    /// Vertices/Segmente/Tangenten im Content-Edit selektieren
    SelectVectorItems {
        selection: NetworkSelection,
        additive: bool,
    },
    /// Hover-Node setzen (transient)
    Hover { node_id: Option<NodeId> },
    /// Hover-Vertex setzen (transient)
    HoverVertex { vertex: Option<usize> },

    // === History ===
    /// Undo: Letzte Aktion rückgängig machen
    Undo,
    /// Redo: Rückgängig gemachte Aktion wiederherstellen
    Redo,
    /// History verwerfen
    ClearHistory,

    // === Datei-I/O & Optionen ===
    /// Dokument (JSON) laden
    LoadDocument { path: String },
    /// Dokument speichern (None = aktueller Pfad)
    SaveDocument { path: Option<String> },
    /// SVG-Pfade als Vector-Nodes importieren
    ImportSvg { path: String },
    /// Vector-Nodes als SVG exportieren
    ExportSvg { path: String },
    /// Optionen übernehmen
    ApplyOptions { options: Box<EditorOptions> },
}

impl AppCommand {
    /// Action-Typ für History-Einträge und Logs (entspricht dem `type`-Tag).
    pub fn action_type(&self) -> &'static str {
        match self {
            AppCommand::AddVertex { .. } => "add_vertex",
            AppCommand::DeleteVertex { .. } => "delete_vertex",
            AppCommand::DeleteSegment { .. } => "delete_segment",
            AppCommand::SplitSegment { .. } => "split_segment",
            AppCommand::TranslateVertex { .. } => "translate_vertex",
            AppCommand::TranslateSegment { .. } => "translate_segment",
            AppCommand::TranslateVectorSelection { .. } => "translate_vector_selection",
            AppCommand::DeleteVectorSelection => "delete_vector_selection",
            AppCommand::DuplicateVectorSelection => "duplicate_vector_selection",
            AppCommand::BeginBendSegment { .. } => "begin_bend_segment",
            AppCommand::BendSegment { .. } => "bend_segment",
            AppCommand::UpdateTangent { .. } => "update_tangent",
            AppCommand::DeleteTangent { .. } => "delete_tangent",
            AppCommand::SetCornerTangents { .. } => "set_corner_tangents",
            AppCommand::BendCorner { .. } => "bend_corner",
            AppCommand::Planarize { .. } => "planarize",
            AppCommand::Optimize { .. } => "optimize",
            AppCommand::UnionNetworks { .. } => "union_networks",
            AppCommand::BeginDraw { .. } => "begin_draw",
            AppCommand::DrawTo { .. } => "draw_to",
            AppCommand::EndGesture => "end_gesture",
            AppCommand::InsertNode { .. } => "insert_node",
            AppCommand::RemoveNode { .. } => "remove_node",
            AppCommand::TranslateNode { .. } => "translate_node",
            AppCommand::ConvertToVector { .. } => "convert_to_vector",
            AppCommand::ScaleSelection { .. } => "scale_selection",
            AppCommand::SelectNodes { .. } => "select_nodes",
            AppCommand::ClearSelection => "clear_selection",
            AppCommand::EnterContentEdit { .. } => "enter_content_edit",
            AppCommand::ExitContentEdit => "exit_content_edit",
            AppCommand::SelectVectorItems { .. } => "select_vector_items",
            AppCommand::Hover { .. } => "hover",
            AppCommand::HoverVertex { .. } => "hover_vertex",
            AppCommand::Undo => "undo",
            AppCommand::Redo => "redo",
            AppCommand::ClearHistory => "clear_history",
            AppCommand::LoadDocument { .. } => "load_document",
            AppCommand::SaveDocument { .. } => "save_document",
            AppCommand::ImportSvg { .. } => "import_svg",
            AppCommand::ExportSvg { .. } => "export_svg",
            AppCommand::ApplyOptions { .. } => "apply_options",
        }
    }
}
