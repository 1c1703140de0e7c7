use super::{canvas_vertices, dispatch, line_node, network, state_with, v};
use vector_canvas_editor::core::Dimension;
use vector_canvas_editor::{
    AppCommand, AppController, Document, GeometryQuery, Node, NodeKind, Rect,
};

/// Geometrie mit fest aufgelöster Textbreite, sonst deklarierte Boxen.
struct TextGeometry;

impl GeometryQuery for TextGeometry {
    fn absolute_bounding_rect(&self, document: &Document, node_id: &str) -> Option<Rect> {
        let node = document.node(node_id)?;
        match node.kind {
            NodeKind::Text { .. } => Some(Rect::new(node.left, node.top, 40.4, 20.0)),
            _ => node.declared_rect(),
        }
    }
}

#[test]
fn test_scale_selection_uses_geometry_query_and_locks_auto_size() {
    let mut controller = AppController::new();
    let mut text = Node::with_rect(
        "t1",
        NodeKind::Text {
            text: "Hallo".into(),
        },
        Rect::new(10.0, 10.0, 0.0, 20.0),
    );
    text.width = Dimension::Auto;
    let rect = Node::with_rect("r1", NodeKind::Rectangle, Rect::new(30.0, 50.0, 10.0, 10.0));
    let mut line = line_node("v1", 10.0);
    line.left = 20.0;
    line.top = 10.0;

    let (state, _clock) = state_with(vec![text, rect, line]);
    let mut state = state.with_geometry(TextGeometry);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::SelectNodes {
            node_ids: vec!["t1".into(), "r1".into(), "v1".into()],
            additive: false,
        },
    );
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::ScaleSelection { factor: 2.0 },
    );

    let doc = state.document();
    let text = doc.node("t1").expect("Text vorhanden");
    assert_eq!((text.left, text.top), (10.0, 10.0));
    assert_eq!(text.width, Dimension::Fixed(82.0));
    assert_eq!(text.height, Dimension::Fixed(40.0));

    let rect = doc.node("r1").expect("Rechteck vorhanden");
    assert_eq!((rect.left, rect.top), (50.0, 90.0));
    assert_eq!(rect.width, Dimension::Fixed(20.0));

    assert_eq!(
        canvas_vertices(&state, "v1"),
        vec![v(30.0, 10.0), v(50.0, 10.0)]
    );
}

#[test]
fn test_scale_selection_rejects_invalid_factor() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::SelectNodes {
            node_ids: vec!["v1".into()],
            additive: false,
        },
    );
    let before = std::sync::Arc::clone(&state.editor);

    for factor in [0.0, -1.0, f64::NAN] {
        let after = dispatch(
            &mut controller,
            &mut state,
            AppCommand::ScaleSelection { factor },
        );
        assert!(std::sync::Arc::ptr_eq(&before, &after));
    }
}

#[test]
fn test_union_moves_source_network_into_target() {
    let mut controller = AppController::new();
    let mut source = line_node("v2", 10.0);
    source.top = 20.0;
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0), source]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::UnionNetworks {
            target: "v1".into(),
            source: "v2".into(),
        },
    );

    assert_eq!(state.document().scene, vec!["v1".to_string()]);
    assert_eq!(
        canvas_vertices(&state, "v1"),
        vec![v(0.0, 0.0), v(10.0, 0.0), v(0.0, 20.0), v(10.0, 20.0)]
    );
    assert_eq!(network(&state, "v1").segments.len(), 2);
    let node = state.document().node("v1").expect("Ziel vorhanden");
    assert_eq!(node.height, Dimension::Fixed(20.0));

    dispatch(&mut controller, &mut state, AppCommand::Undo);
    assert_eq!(state.node_count(), 2);
    assert_eq!(canvas_vertices(&state, "v2"), vec![v(0.0, 20.0), v(10.0, 20.0)]);
}

#[test]
fn test_convert_rectangle_to_vector() {
    let mut controller = AppController::new();
    let rect = Node::with_rect("r1", NodeKind::Rectangle, Rect::new(5.0, 5.0, 10.0, 20.0));
    let (mut state, _clock) = state_with(vec![rect]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::ConvertToVector {
            node_id: "r1".into(),
        },
    );

    let node = state.document().node("r1").expect("Node vorhanden");
    assert!(node.is_vector());
    assert_eq!((node.left, node.top), (5.0, 5.0));
    assert_eq!(node.width, Dimension::Fixed(10.0));
    assert_eq!(node.height, Dimension::Fixed(20.0));
    assert_eq!(network(&state, "r1").vertices.len(), 4);
    assert_eq!(network(&state, "r1").segments.len(), 4);
}

#[test]
fn test_insert_and_remove_node_update_selection() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![]);

    let mut node = line_node("v1", 10.0);
    node.left = 7.0;
    dispatch(&mut controller, &mut state, AppCommand::InsertNode { node });
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::SelectNodes {
            node_ids: vec!["v1".into(), "ghost".into()],
            additive: false,
        },
    );
    assert_eq!(state.editor.selection.nodes, vec!["v1".to_string()]);

    clock.advance(1_000);
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::RemoveNode {
            node_id: "v1".into(),
        },
    );
    assert_eq!(state.node_count(), 0);
    assert!(state.editor.selection.nodes.is_empty());

    dispatch(&mut controller, &mut state, AppCommand::Undo);
    assert_eq!(state.document().node("v1").map(|n| n.left), Some(7.0));
    assert_eq!(state.editor.selection.nodes, vec!["v1".to_string()]);
}

#[test]
fn test_command_log_records_every_dispatch() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);

    let commands = vec![
        AppCommand::Hover {
            node_id: Some("v1".into()),
        },
        AppCommand::TranslateNode {
            node_id: "v1".into(),
            delta: v(1.0, 1.0),
        },
        AppCommand::Undo,
    ];
    controller
        .replay(&mut state, commands.clone())
        .expect("Replay sollte durchlaufen");

    assert_eq!(state.command_log.entries(), commands.as_slice());
    let json = state.command_log.to_json().expect("serialisierbar");
    let parsed: Vec<AppCommand> = serde_json::from_str(&json).expect("gültiges Replay-Format");
    assert_eq!(parsed, commands);
}
