//! Integrationstests für Datei-I/O: SVG-Import/-Export und Dokument-JSON.

use glam::DVec2;
use std::path::PathBuf;
use vector_canvas_editor::{
    parse_svg, write_svg, AppCommand, AppController, AppState, Document, EditorOptions, Node,
    NodeKind, Rect, VectorNetwork,
};

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vce_{}_{}", std::process::id(), name))
}

fn path_string(path: &PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_import_svg_creates_selected_vector_nodes_at_canvas_position() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <path id="dreieck" d="M 10 20 L 30 20 L 20 40 Z"/>
        <g><path d="M0 0 C 0 10 10 10 10 0"/></g>
    </svg>"#;
    let file = temp_file("import.svg");
    std::fs::write(&file, svg).expect("Temp-Datei schreibbar");

    let mut controller = AppController::new();
    let mut state = AppState::new();
    controller
        .handle_command(
            &mut state,
            AppCommand::ImportSvg {
                path: path_string(&file),
            },
        )
        .expect("Import sollte funktionieren");
    let _ = std::fs::remove_file(&file);

    assert_eq!(state.node_count(), 2);
    assert_eq!(state.editor.selection.nodes.len(), 2);

    let triangle = state.document().node("dreieck").expect("ID aus dem SVG");
    assert_eq!((triangle.left, triangle.top), (10.0, 20.0));
    let network = triangle.vector_network().expect("Vector-Node");
    assert_eq!(network.vertices.len(), 3);
    assert_eq!(network.segments.len(), 3);
    assert_eq!(network.bbox().min(), DVec2::ZERO);

    assert!(state.can_undo());
    controller
        .handle_command(&mut state, AppCommand::Undo)
        .expect("Undo");
    assert_eq!(state.node_count(), 0);
}

#[test]
fn test_import_svg_with_unsupported_command_fails() {
    let svg = r#"<svg><path d="M 0 0 Q 5 5 10 0"/></svg>"#;
    let file = temp_file("unsupported.svg");
    std::fs::write(&file, svg).expect("Temp-Datei schreibbar");

    let mut controller = AppController::new();
    let mut state = AppState::new();
    let result = controller.handle_command(
        &mut state,
        AppCommand::ImportSvg {
            path: path_string(&file),
        },
    );
    let _ = std::fs::remove_file(&file);

    assert!(result.is_err());
    assert_eq!(state.node_count(), 0);
}

#[test]
fn test_write_svg_then_parse_keeps_canvas_geometry() {
    let mut document = Document::new();
    let mut line = Node::vector(
        "v1",
        VectorNetwork::polyline(&[DVec2::new(0.0, 0.0), DVec2::new(10.0, 5.0)]),
    );
    line.left = 100.0;
    line.top = 50.0;
    document.insert_node(line);
    document.insert_node(Node::with_rect(
        "r1",
        NodeKind::Rectangle,
        Rect::new(0.0, 0.0, 20.0, 10.0),
    ));

    let svg = write_svg(&document).expect("Export sollte funktionieren");
    assert!(svg.contains("<svg xmlns"));
    assert!(svg.contains(r#"id="v1""#));

    let paths = parse_svg(&svg).expect("eigener Export ist lesbar");
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].id.as_deref(), Some("v1"));
    assert_eq!(
        paths[0].network.vertices,
        vec![DVec2::new(100.0, 50.0), DVec2::new(110.0, 55.0)]
    );
    assert_eq!(paths[1].network.vertices.len(), 4);
    assert_eq!(paths[1].network.segments.len(), 4);
}

#[test]
fn test_save_and_load_document_round_trip() {
    let file = temp_file("dokument.json");
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let commands = vec![
        AppCommand::InsertNode {
            node: Node::vector(
                "v1",
                VectorNetwork::polygon(&[
                    DVec2::new(0.0, 0.0),
                    DVec2::new(10.0, 0.0),
                    DVec2::new(5.0, 8.0),
                ]),
            ),
        },
        AppCommand::SaveDocument {
            path: Some(path_string(&file)),
        },
    ];
    controller
        .replay(&mut state, commands)
        .expect("Speichern sollte funktionieren");
    let saved = state.document().clone();

    let mut reloaded = AppState::new();
    controller
        .handle_command(
            &mut reloaded,
            AppCommand::LoadDocument {
                path: path_string(&file),
            },
        )
        .expect("Laden sollte funktionieren");
    let _ = std::fs::remove_file(&file);

    assert_eq!(reloaded.document(), &saved);
    assert!(!reloaded.can_undo());
    assert_eq!(
        reloaded.current_file_path.as_deref(),
        Some(path_string(&file).as_str())
    );
}

#[test]
fn test_save_without_known_path_fails() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let result = controller.handle_command(&mut state, AppCommand::SaveDocument { path: None });
    assert!(result.is_err());
}

#[test]
fn test_options_toml_round_trip() {
    let file = temp_file("optionen.toml");
    let options = EditorOptions {
        max_history: 25,
        merge_window_ms: 50,
        ..EditorOptions::default()
    };
    options.save_to_file(&file).expect("Optionen schreibbar");
    let loaded = EditorOptions::load_from_file(&file);
    let _ = std::fs::remove_file(&file);

    assert_eq!(loaded.max_history, 25);
    assert_eq!(loaded.merge_window_ms, 50);

    let mut state = AppState::with_options(loaded);
    assert_eq!(state.history.max_depth(), 25);
    state.set_options(EditorOptions::default());
    assert_eq!(state.history.merge_window_ms(), 300);
}
