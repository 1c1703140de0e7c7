use super::{dispatch, line_node, state_with, v, START_MS};
use std::sync::Arc;
use vector_canvas_editor::app::patch;
use vector_canvas_editor::{AppCommand, AppController, EditorState, HistoryManager};

fn translate_v1(dx: f64) -> AppCommand {
    AppCommand::TranslateNode {
        node_id: "v1".into(),
        delta: v(dx, 0.0),
    }
}

#[test]
fn test_actions_within_merge_window_collapse() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);

    dispatch(&mut controller, &mut state, translate_v1(1.0));
    clock.advance(100);
    dispatch(&mut controller, &mut state, translate_v1(1.0));

    assert_eq!(state.history.past().len(), 1);
    assert_eq!(state.history.past()[0].timestamp, START_MS + 100);

    dispatch(&mut controller, &mut state, AppCommand::Undo);
    assert_eq!(state.document().node("v1").map(|n| n.left), Some(0.0));
}

#[test]
fn test_actions_outside_merge_window_stay_separate() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);

    dispatch(&mut controller, &mut state, translate_v1(1.0));
    clock.advance(500);
    dispatch(&mut controller, &mut state, translate_v1(1.0));

    assert_eq!(state.history.past().len(), 2);

    dispatch(&mut controller, &mut state, AppCommand::Undo);
    assert_eq!(state.document().node("v1").map(|n| n.left), Some(1.0));
}

#[test]
fn test_merge_ignores_action_type() {
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
    clock.advance(50);
    dispatch(&mut controller, &mut state, translate_v1(4.0));

    let past = state.history.past();
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].action_type, "translate_node");
}

#[test]
fn test_history_depth_keeps_most_recent_entries() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);

    for _ in 0..105 {
        clock.advance(1_000);
        dispatch(&mut controller, &mut state, translate_v1(1.0));
    }

    let past = state.history.past();
    assert_eq!(past.len(), 100);
    assert_eq!(past[0].timestamp, START_MS + 6_000);
    assert_eq!(past[99].timestamp, START_MS + 105_000);
}

#[test]
fn test_undo_redo_walks_history_in_order() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);
    let initial = state.document().clone();

    for dx in [1.0, 2.0, 4.0] {
        clock.advance(1_000);
        dispatch(&mut controller, &mut state, translate_v1(dx));
    }
    let edited = state.document().clone();
    assert_eq!(edited.node("v1").map(|n| n.left), Some(7.0));

    for expected in [3.0, 1.0, 0.0] {
        dispatch(&mut controller, &mut state, AppCommand::Undo);
        assert_eq!(state.document().node("v1").map(|n| n.left), Some(expected));
    }
    assert_eq!(state.document(), &initial);
    assert_eq!(state.history.future().len(), 3);

    for expected in [1.0, 3.0, 7.0] {
        dispatch(&mut controller, &mut state, AppCommand::Redo);
        assert_eq!(state.document().node("v1").map(|n| n.left), Some(expected));
    }
    assert_eq!(state.document(), &edited);
    assert!(!state.can_redo());
}

#[test]
fn test_undo_and_redo_on_empty_stacks_keep_identity() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);
    let before = Arc::clone(&state.editor);

    let after_undo = dispatch(&mut controller, &mut state, AppCommand::Undo);
    let after_redo = dispatch(&mut controller, &mut state, AppCommand::Redo);

    assert!(Arc::ptr_eq(&before, &after_undo));
    assert!(Arc::ptr_eq(&before, &after_redo));
}

#[test]
fn test_no_merge_into_entry_after_undo_redo() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);

    dispatch(&mut controller, &mut state, translate_v1(1.0));
    dispatch(&mut controller, &mut state, AppCommand::Undo);
    dispatch(&mut controller, &mut state, AppCommand::Redo);
    clock.advance(50);
    dispatch(&mut controller, &mut state, translate_v1(10.0));

    assert_eq!(state.history.past().len(), 2);
    assert!(!state.can_redo());

    dispatch(&mut controller, &mut state, AppCommand::Undo);
    assert_eq!(state.document().node("v1").map(|n| n.left), Some(1.0));
}

#[test]
fn test_new_action_clears_redo_stack() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);

    dispatch(&mut controller, &mut state, translate_v1(1.0));
    dispatch(&mut controller, &mut state, AppCommand::Undo);
    assert!(state.can_redo());

    clock.advance(1_000);
    dispatch(&mut controller, &mut state, translate_v1(5.0));
    assert!(!state.can_redo());
}

#[test]
fn test_hover_and_gesture_changes_are_not_recorded() {
    let mut controller = AppController::new();
    let (mut state, _clock) = state_with(vec![line_node("v1", 10.0)]);
    let before = Arc::clone(&state.editor);

    let after = dispatch(
        &mut controller,
        &mut state,
        AppCommand::Hover {
            node_id: Some("v1".into()),
        },
    );
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.hovered_node.as_deref(), Some("v1"));

    dispatch(
        &mut controller,
        &mut state,
        AppCommand::HoverVertex { vertex: Some(0) },
    );
    assert!(!state.can_undo());
}

#[test]
fn test_clear_history_drops_both_stacks() {
    let mut controller = AppController::new();
    let (mut state, clock) = state_with(vec![line_node("v1", 10.0)]);

    dispatch(&mut controller, &mut state, translate_v1(1.0));
    clock.advance(1_000);
    dispatch(&mut controller, &mut state, translate_v1(1.0));
    dispatch(&mut controller, &mut state, AppCommand::Undo);
    dispatch(&mut controller, &mut state, AppCommand::ClearHistory);

    assert!(!state.can_undo());
    assert!(!state.can_redo());
    assert_eq!(state.document().node("v1").map(|n| n.left), Some(1.0));
}

#[test]
fn test_patches_round_trip_between_states() {
    let (state, _clock) = state_with(vec![line_node("v1", 10.0)]);
    let s0: EditorState = state.editor.as_ref().clone();

    let (s1, forward, inverse) = patch::produce_with_patches(&s0, |s| {
        if let Some(node) = s.document.node_mut("v1") {
            node.left = 42.0;
            node.name = "verschoben".into();
        }
        s.selection.nodes.push("v1".into());
    })
    .expect("Patches erzeugbar");

    assert!(!forward.is_empty());
    assert_eq!(patch::apply_to(&s0, &forward).expect("anwendbar"), s1);
    assert_eq!(patch::apply_to(&s1, &inverse).expect("anwendbar"), s0);

    let filtered = HistoryManager::filter_patches(forward.clone());
    assert_eq!(filtered.len(), forward.len());
}
