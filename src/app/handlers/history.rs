//! Handler für Undo/Redo-Operationen.

use crate::app::{AppState, EditorState};
use std::sync::Arc;

/// Undo/Redo beendet eine laufende Geste; ihre Indizes gelten nicht mehr.
fn end_gesture_after_jump(mut editor: Arc<EditorState>) -> Arc<EditorState> {
    if editor.gesture.is_some() {
        log::debug!("Laufende Geste durch Undo/Redo beendet");
        Arc::make_mut(&mut editor).gesture = None;
    }
    editor
}

/// Führt einen Undo-Schritt aus, falls vorhanden.
pub fn undo(state: &mut AppState) -> anyhow::Result<()> {
    if !state.can_undo() {
        log::debug!("Undo: nichts zu tun");
        return Ok(());
    }
    let now = state.clock.now_ms();
    state.editor = end_gesture_after_jump(state.history.undo(&state.editor, now)?);
    log::info!("Undo ausgeführt");
    Ok(())
}

/// Führt einen Redo-Schritt aus, falls vorhanden.
pub fn redo(state: &mut AppState) -> anyhow::Result<()> {
    if !state.can_redo() {
        log::debug!("Redo: nichts zu tun");
        return Ok(());
    }
    let now = state.clock.now_ms();
    state.editor = end_gesture_after_jump(state.history.redo(&state.editor, now)?);
    log::info!("Redo ausgeführt");
    Ok(())
}

/// Verwirft Undo- und Redo-Stack.
pub fn clear(state: &mut AppState) {
    state.history.clear();
    log::info!("History geleert");
}
