use super::{canvas_vertices, dispatch, line_node, network, state_with, v};
use approx::assert_relative_eq;
use std::sync::Arc;
use vector_canvas_editor::core::{Dimension, NetworkSelection, PointOnSegment, Segment};
use vector_canvas_editor::{
    AppCommand, AppController, Node, NodeKind, Rect, TangentControl, TangentMirroringMode,
    VectorNetwork,
};

#[test]
fn test_delete_first_vertex_of_line() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::DeleteVertex {
            node_id: "v1".into(),
            vertex: 0,
        },
    );

    assert_eq!(canvas_vertices(&state, "v1"), vec![v(10.0, 0.0)]);
    assert!(network(&state, "v1").segments.is_empty());
    let node = state.document().node("v1").expect("Node vorhanden");
    assert_eq!(node.left, 10.0);
    assert_eq!(node.width, Dimension::Fixed(0.0));
    assert!(state.can_undo());
}

#[test]
fn test_add_vertex_on_empty_network_then_connect() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![Node::vector("v1", VectorNetwork::default())]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::AddVertex {
            node_id: "v1".into(),
            position: v(5.0, 5.0),
            from_vertex: None,
            outgoing_tangent: None,
        },
    );
    assert_eq!(canvas_vertices(&state, "v1"), vec![v(5.0, 5.0)]);

    clock.advance(1_000);
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::AddVertex {
            node_id: "v1".into(),
            position: v(15.0, 5.0),
            from_vertex: Some(0),
            outgoing_tangent: None,
        },
    );

    assert_eq!(canvas_vertices(&state, "v1"), vec![v(5.0, 5.0), v(15.0, 5.0)]);
    assert_eq!(network(&state, "v1").segments, vec![Segment::straight(0, 1)]);
    assert_eq!(state.history.past().len(), 2);
}

#[test]
fn test_network_bbox_starts_at_origin_after_edits() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);

    let commands = vec![
        AppCommand::TranslateVertex {
            node_id: "v1".into(),
            vertex: 0,
            delta: v(-5.0, -5.0),
        },
        AppCommand::AddVertex {
            node_id: "v1".into(),
            position: v(-20.0, 40.0),
            from_vertex: Some(1),
            outgoing_tangent: None,
        },
        AppCommand::TranslateSegment {
            node_id: "v1".into(),
            segment: 0,
            delta: v(3.0, 0.0),
        },
    ];
    for command in commands {
        dispatch(&mut controller, &mut state, command);
        let bbox = network(&state, "v1").bbox();
        assert_eq!(bbox.min(), v(0.0, 0.0));
        let node = state.document().node("v1").expect("Node vorhanden");
        assert_eq!(node.width, Dimension::Fixed(bbox.width));
        assert_eq!(node.height, Dimension::Fixed(bbox.height));
    }

    assert_eq!(
        canvas_vertices(&state, "v1"),
        vec![v(-2.0, -5.0), v(13.0, 0.0), v(-20.0, 40.0)]
    );
    let node = state.document().node("v1").expect("Node vorhanden");
    assert_eq!((node.left, node.top), (-20.0, -5.0));
}

#[test]
fn test_split_segment_inserts_vertex_on_curve() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::SplitSegment {
            node_id: "v1".into(),
            point: PointOnSegment {
                segment: 0,
                t: 0.5,
            },
        },
    );

    let vertices = canvas_vertices(&state, "v1");
    assert_eq!(vertices.len(), 3);
    assert_relative_eq!(vertices[2].x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(vertices[2].y, 0.0, epsilon = 1e-9);
    assert_eq!(network(&state, "v1").segments.len(), 2);
}

#[test]
fn test_update_tangent_and_bend_corner() {
    let mut controller = AppController::new();
    let node = Node::vector(
        "v1",
        VectorNetwork::polyline(&[v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0)]),
    );
    let (mut state, clock) = state_with(vec![node]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::UpdateTangent {
            node_id: "v1".into(),
            segment: 0,
            control: TangentControl::Ta,
            value: v(3.0, 4.0),
            mirroring: TangentMirroringMode::None,
        },
    );
    assert_eq!(network(&state, "v1").segments[0].ta, v(3.0, 4.0));
    assert_eq!(network(&state, "v1").segments[1].ta, v(0.0, 0.0));

    clock.advance(1_000);
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::SetCornerTangents {
            node_id: "v1".into(),
            vertex: 1,
            value: Some(v(2.0, 0.0)),
        },
    );
    let segments = &network(&state, "v1").segments;
    assert_eq!(segments[0].tb, -segments[1].ta);
    assert_ne!(segments[1].ta, v(0.0, 0.0));

    clock.advance(1_000);
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::BendCorner {
            node_id: "v1".into(),
            vertex: 1,
            preferred_side: None,
        },
    );
    let segments = &network(&state, "v1").segments;
    assert_eq!(segments[0].tb, v(0.0, 0.0));
    assert_eq!(segments[1].ta, v(0.0, 0.0));
}

#[test]
fn test_planarize_splits_crossing_diagonals() {
    let mut controller = AppController::new();
    let cross = VectorNetwork::new(
        vec![v(0.0, 0.0), v(100.0, 100.0), v(0.0, 100.0), v(100.0, 0.0)],
        vec![Segment::straight(0, 1), Segment::straight(2, 3)],
    );
    let (mut state, _clock) = state_with(vec![Node::vector("v1", cross)]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::Planarize {
            node_id: "v1".into(),
        },
    );

    let result = network(&state, "v1");
    assert_eq!(result.vertices.len(), 5);
    assert_eq!(result.segments.len(), 4);
    assert!(result.vertices[4].distance(v(50.0, 50.0)) < 1e-6);
}

#[test]
fn test_optimize_merges_duplicate_vertices() {
    let mut controller = AppController::new();
    let messy = VectorNetwork::new(
        vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)],
        vec![Segment::straight(0, 1), Segment::straight(2, 3)],
    );
    let (mut state, _clock) = state_with(vec![Node::vector("v1", messy)]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::Optimize {
            node_id: "v1".into(),
        },
    );

    let result = network(&state, "v1");
    assert_eq!(result.vertices.len(), 3);
    assert_eq!(result.segments.len(), 2);
}

#[test]
fn test_content_edit_translate_and_delete_selection() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::SelectNodes {
            node_ids: vec!["v1".into()],
            additive: false,
        },
    );
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::EnterContentEdit {
            node_id: "v1".into(),
        },
    );
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::SelectVectorItems {
            selection: NetworkSelection {
                vertices: vec![1],
                ..NetworkSelection::default()
            },
            additive: false,
        },
    );

    clock.advance(1_000);
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::TranslateVectorSelection { delta: v(0.0, 5.0) },
    );
    assert_eq!(canvas_vertices(&state, "v1"), vec![v(0.0, 0.0), v(10.0, 5.0)]);

    clock.advance(1_000);
    dispatch(&mut controller, &mut state, AppCommand::DeleteVectorSelection);
    assert_eq!(canvas_vertices(&state, "v1"), vec![v(0.0, 0.0)]);
    assert!(network(&state, "v1").segments.is_empty());

    let selection = state
        .editor
        .selection
        .vector
        .as_ref()
        .expect("Content-Edit bleibt aktiv");
    assert!(selection.items.is_empty());
}

#[test]
fn test_duplicate_vector_selection_creates_selected_copy() {
    let mut controller = AppController::new();
    let mut node = line_node("v1", 10.0);
    node.name = "Linie".into();
    node.left = 30.0;
    let (mut state, _clock) = state_with(vec![node]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::EnterContentEdit {
            node_id: "v1".into(),
        },
    );
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::SelectVectorItems {
            selection: NetworkSelection {
                vertices: vec![0, 1],
                segments: vec![0],
                ..NetworkSelection::default()
            },
            additive: false,
        },
    );
    dispatch(&mut controller, &mut state, AppCommand::DuplicateVectorSelection);

    assert_eq!(state.node_count(), 2);
    let copy_id = state.editor.selection.nodes[0].clone();
    assert_ne!(copy_id, "v1");
    assert!(state.editor.selection.vector.is_none());

    let copy = state.document().node(&copy_id).expect("Kopie vorhanden");
    assert_eq!(copy.name, "Linie (Kopie)");
    assert_eq!(
        canvas_vertices(&state, &copy_id),
        canvas_vertices(&state, "v1")
    );
    assert_eq!(network(&state, &copy_id).segments.len(), 1);
}

#[test]
fn test_unknown_or_non_vector_node_is_noop() {
    let mut controller = AppController::new();
    let rect = Node::with_rect("r1", NodeKind::Rectangle, Rect::new(0.0, 0.0, 10.0, 10.0));
    let (mut state, _clock) = state_with(vec![rect]);
    let before = Arc::clone(&state.editor);

    let after = dispatch(
        &mut controller,
        &mut state,
        AppCommand::DeleteVertex {
            node_id: "missing".into(),
            vertex: 0,
        },
    );
    assert!(Arc::ptr_eq(&before, &after));

    let after = dispatch(
        &mut controller,
        &mut state,
        AppCommand::Planarize {
            node_id: "r1".into(),
        },
    );
    assert!(Arc::ptr_eq(&before, &after));
    assert!(!state.can_undo());
    assert_eq!(state.command_log.len(), 2);
}

#[test]
#[should_panic]
fn test_out_of_range_vertex_is_a_programmer_error() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);
    let _ = controller.handle_command(
        &mut state,
        AppCommand::DeleteVertex {
            node_id: "v1".into(),
            vertex: 7,
        },
    );
}
