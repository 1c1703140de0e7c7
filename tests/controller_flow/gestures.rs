use super::{canvas_vertices, dispatch, line_node, network, state_with, v};
use approx::assert_relative_eq;
use vector_canvas_editor::app::{DrawTool, Gesture};
use vector_canvas_editor::core::PointOnSegment;
use vector_canvas_editor::{AppCommand, AppController};

#[test]
fn test_pencil_gesture_builds_polyline_and_undoes_in_one_step() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::BeginDraw {
            tool: DrawTool::Pencil,
            position: v(10.0, 10.0),
        },
    );
    let node_id = state.editor.selection.nodes[0].clone();
    assert!(matches!(
        state.editor.gesture,
        Some(Gesture::Draw {
            tool: DrawTool::Pencil,
            ..
        })
    ));

    for position in [v(20.0, 10.0), v(20.0, 30.0)] {
        dispatch(&mut controller, &mut state, AppCommand::DrawTo { position });
    }
    dispatch(&mut controller, &mut state, AppCommand::EndGesture);

    assert!(state.editor.gesture.is_none());
    assert_eq!(
        canvas_vertices(&state, &node_id),
        vec![v(10.0, 10.0), v(20.0, 10.0), v(20.0, 30.0)]
    );
    assert_eq!(network(&state, &node_id).segments.len(), 2);

    // Alle Ticks liegen im Merge-Fenster
    assert_eq!(state.history.past().len(), 1);
    dispatch(&mut controller, &mut state, AppCommand::Undo);
    assert_eq!(state.node_count(), 0);
    assert!(state.editor.selection.nodes.is_empty());
}

#[test]
fn test_line_gesture_keeps_start_point() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::BeginDraw {
            tool: DrawTool::Line,
            position: v(0.0, 0.0),
        },
    );
    let node_id = state.editor.selection.nodes[0].clone();
    for position in [v(5.0, 5.0), v(10.0, -4.0)] {
        dispatch(&mut controller, &mut state, AppCommand::DrawTo { position });
    }

    assert_eq!(
        canvas_vertices(&state, &node_id),
        vec![v(0.0, 0.0), v(10.0, -4.0)]
    );
    assert_eq!(network(&state, &node_id).segments.len(), 1);
}

#[test]
fn test_draw_to_without_gesture_is_noop() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);
    let before = std::sync::Arc::clone(&state.editor);

    let after = dispatch(
        &mut controller,
        &mut state,
        AppCommand::DrawTo {
            position: v(1.0, 1.0),
        },
    );
    assert!(std::sync::Arc::ptr_eq(&before, &after));
}

#[test]
fn test_bend_gesture_passes_through_target() {
    let mut controller = AppController::new();
    let mut node = line_node("v1", 30.0);
    node.left = 100.0;
    node.top = 50.0;
    let (mut state, _clock) = state_with(vec![node]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::BeginBendSegment {
            node_id: "v1".into(),
            segment: 0,
        },
    );
    for target in [v(115.0, 55.0), v(115.0, 60.0)] {
        dispatch(
            &mut controller,
            &mut state,
            AppCommand::BendSegment { t: 0.5, target },
        );
    }
    dispatch(&mut controller, &mut state, AppCommand::EndGesture);

    let origin = state.document().node("v1").expect("Node vorhanden").origin();
    let point = network(&state, "v1").curve(0).eval(0.5) + origin;
    assert_relative_eq!(point.x, 115.0, epsilon = 1e-9);
    assert_relative_eq!(point.y, 60.0, epsilon = 1e-9);
    assert!(state.editor.gesture.is_none());
}

#[test]
fn test_bend_near_chord_keeps_segment_straight() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 30.0)]);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::BeginBendSegment {
            node_id: "v1".into(),
            segment: 0,
        },
    );
    dispatch(
        &mut controller,
        &mut state,
        AppCommand::BendSegment {
            t: 0.5,
            target: v(15.0, 0.05),
        },
    );

    assert!(network(&state, "v1").segments[0].is_straight());
    assert!(!state.can_undo());
}

/// Teilt die Linie `v1` und startet eine Biege-Geste auf dem zweiten Teilstück.
fn split_and_begin_bend(
    controller: &mut AppController,
    state: &mut vector_canvas_editor::AppState,
    clock: &vector_canvas_editor::ManualClock,
) {
    dispatch(
        controller,
        state,
        AppCommand::SplitSegment {
            node_id: "v1".into(),
            point: PointOnSegment { segment: 0, t: 0.5 },
        },
    );
    clock.advance(1_000);
    dispatch(
        controller,
        state,
        AppCommand::BeginBendSegment {
            node_id: "v1".into(),
            segment: 1,
        },
    );
}

#[test]
fn test_undo_ends_running_bend_gesture() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);
    split_and_begin_bend(&mut controller, &mut state, &clock);

    dispatch(&mut controller, &mut state, AppCommand::Undo);
    assert!(state.editor.gesture.is_none());
    assert_eq!(network(&state, "v1").segments.len(), 1);

    let before = std::sync::Arc::clone(&state.editor);
    let after = dispatch(
        &mut controller,
        &mut state,
        AppCommand::BendSegment {
            t: 0.5,
            target: v(5.0, 5.0),
        },
    );
    assert!(std::sync::Arc::ptr_eq(&before, &after));
    assert!(network(&state, "v1").segments[0].is_straight());
}

#[test]
fn test_bend_on_removed_segment_is_noop() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);
    split_and_begin_bend(&mut controller, &mut state, &clock);

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::DeleteSegment {
            node_id: "v1".into(),
            segment: 1,
        },
    );
    assert!(state.editor.gesture.is_some());

    let before = std::sync::Arc::clone(&state.editor);
    let after = dispatch(
        &mut controller,
        &mut state,
        AppCommand::BendSegment {
            t: 0.5,
            target: v(5.0, 5.0),
        },
    );
    assert!(std::sync::Arc::ptr_eq(&before, &after));
    assert_eq!(network(&state, "v1").segments.len(), 1);
}
