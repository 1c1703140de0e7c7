use super::patch::{self, Patch};
use crate::shared::EditorOptions;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Top-Level-Felder des Zustands, die nie in der History landen.
pub const TRANSIENT_FIELDS: &[&str] = &["hovered_node", "hovered_vertex", "gesture"];

/// Ein rückgängig machbarer Schritt aus Vorwärts- und Rückwärts-Patches.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Command-Typ des (zuletzt zusammengeführten) Schritts
    pub action_type: String,
    /// Zeitstempel in Millisekunden
    pub timestamp: u64,
    /// Überführt den Zustand vorher in den Zustand nachher
    pub forward_patches: Vec<Patch>,
    /// Überführt den Zustand nachher zurück in den Zustand vorher
    pub inverse_patches: Vec<Patch>,
}

/// Patch-basierter Undo/Redo-Manager mit Merge-Fenster.
///
/// Aufeinanderfolgende Einträge innerhalb des Merge-Fensters werden zu einem
/// Schritt zusammengeführt, solange seitdem kein Undo/Redo stattfand. Ob die
/// Command-Typen übereinstimmen, spielt dabei keine Rolle.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    /// Ältester zuerst
    past: Vec<HistoryEntry>,
    /// Letzter Eintrag wird als nächstes wiederholt (zuletzt rückgängig gemacht)
    future: Vec<HistoryEntry>,
    max_depth: usize,
    merge_window_ms: u64,
    /// Gesetzt nach Undo/Redo bis zum nächsten Eintrag
    merge_blocked: bool,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::from_options(&EditorOptions::default())
    }
}

impl HistoryManager {
    /// Erstellt einen neuen History-Manager mit Tiefe und Merge-Fenster.
    pub fn new(max_depth: usize, merge_window_ms: u64) -> Self {
        Self {
            past: Vec::with_capacity(max_depth.min(1024)),
            future: Vec::new(),
            max_depth,
            merge_window_ms,
            merge_blocked: false,
        }
    }

    pub fn from_options(options: &EditorOptions) -> Self {
        Self::new(options.max_history, options.merge_window_ms)
    }

    /// Übernimmt neue Grenzen; überzählige alte Einträge werden verworfen.
    pub fn set_limits(&mut self, max_depth: usize, merge_window_ms: u64) {
        self.max_depth = max_depth;
        self.merge_window_ms = merge_window_ms;
        self.evict_oldest();
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn merge_window_ms(&self) -> u64 {
        self.merge_window_ms
    }

    /// Entfernt Patches auf transiente Felder (Hover, laufende Geste).
    pub fn filter_patches(patches: Vec<Patch>) -> Vec<Patch> {
        patches
            .into_iter()
            .filter(|p| !p.root_key().is_some_and(|key| TRANSIENT_FIELDS.contains(&key)))
            .collect()
    }

    /// Zeichnet einen Schritt auf. Liefert `false`, wenn nach dem Filtern
    /// nichts übrig bleibt.
    pub fn record(
        &mut self,
        action_type: &str,
        forward: Vec<Patch>,
        inverse: Vec<Patch>,
        now_ms: u64,
    ) -> bool {
        let forward = Self::filter_patches(forward);
        let inverse = Self::filter_patches(inverse);
        if forward.is_empty() && inverse.is_empty() {
            return false;
        }

        let window = self.merge_window_ms;
        let mergable = !self.merge_blocked
            && self
                .past
                .last()
                .is_some_and(|top| now_ms.saturating_sub(top.timestamp) <= window);

        match self.past.last_mut() {
            Some(top) if mergable => {
                top.forward_patches.extend(forward);
                let mut merged_inverse = inverse;
                merged_inverse.append(&mut top.inverse_patches);
                top.inverse_patches = merged_inverse;
                top.timestamp = now_ms;
                top.action_type = action_type.to_string();
            }
            _ => {
                self.past.push(HistoryEntry {
                    action_type: action_type.to_string(),
                    timestamp: now_ms,
                    forward_patches: forward,
                    inverse_patches: inverse,
                });
                self.evict_oldest();
            }
        }

        self.future.clear();
        self.merge_blocked = false;
        true
    }

    fn evict_oldest(&mut self) {
        if self.past.len() > self.max_depth {
            let excess = self.past.len() - self.max_depth;
            self.past.drain(..excess);
        }
    }

    /// Macht den letzten Schritt rückgängig. Ohne Eintrag bleibt der
    /// Zustand identisch (gleicher `Arc`).
    pub fn undo<T>(&mut self, state: &Arc<T>, now_ms: u64) -> anyhow::Result<Arc<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(top) = self.past.last() else {
            return Ok(Arc::clone(state));
        };
        let previous = patch::apply_to(state.as_ref(), &top.inverse_patches)?;
        if let Some(mut entry) = self.past.pop() {
            entry.timestamp = now_ms;
            self.future.push(entry);
        }
        self.merge_blocked = true;
        Ok(Arc::new(previous))
    }

    /// Wiederholt den zuletzt rückgängig gemachten Schritt.
    pub fn redo<T>(&mut self, state: &Arc<T>, now_ms: u64) -> anyhow::Result<Arc<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(next) = self.future.last() else {
            return Ok(Arc::clone(state));
        };
        let redone = patch::apply_to(state.as_ref(), &next.forward_patches)?;
        if let Some(mut entry) = self.future.pop() {
            entry.timestamp = now_ms;
            self.past.push(entry);
            self.evict_oldest();
        }
        self.merge_blocked = true;
        Ok(Arc::new(redone))
    }

    /// Verwirft alle Einträge.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.merge_blocked = false;
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past(&self) -> &[HistoryEntry] {
        &self.past
    }

    pub fn future(&self) -> &[HistoryEntry] {
        &self.future
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::patch::produce_with_patches;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Sample {
        value: i32,
        items: Vec<i32>,
        hovered_node: Option<String>,
    }

    /// Führt eine Mutation aus und zeichnet sie zum Zeitpunkt `now` auf.
    fn act(
        history: &mut HistoryManager,
        state: &Arc<Sample>,
        now: u64,
        recipe: impl FnOnce(&mut Sample),
    ) -> Arc<Sample> {
        let (next, forward, inverse) =
            produce_with_patches(state.as_ref(), recipe).expect("serialisierbar");
        history.record("test", forward, inverse, now);
        Arc::new(next)
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let mut history = HistoryManager::new(10, 300);
        assert!(!history.can_undo());
        assert!(!history.can_redo());

        let state = Arc::new(Sample::default());
        let after = history.undo(&state, 0).expect("kein Fehler");
        assert!(Arc::ptr_eq(&state, &after));
        let after = history.redo(&state, 0).expect("kein Fehler");
        assert!(Arc::ptr_eq(&state, &after));
    }

    #[test]
    fn empty_patch_lists_are_not_recorded() {
        let mut history = HistoryManager::new(10, 300);
        assert!(!history.record("noop", vec![], vec![], 0));
        assert!(!history.can_undo());
    }

    #[test]
    fn actions_inside_window_are_merged() {
        let mut history = HistoryManager::new(10, 300);
        let s0 = Arc::new(Sample::default());
        let s1 = act(&mut history, &s0, 1_000, |s| s.value = 1);
        let first_forward = history.past()[0].forward_patches.clone();
        let first_inverse = history.past()[0].inverse_patches.clone();
        let s2 = act(&mut history, &s1, 1_100, |s| s.items.push(7));

        assert_eq!(history.past().len(), 1);
        let entry = &history.past()[0];
        assert_eq!(entry.timestamp, 1_100);
        assert_eq!(entry.forward_patches[..first_forward.len()], first_forward[..]);
        assert_eq!(
            entry.inverse_patches[entry.inverse_patches.len() - first_inverse.len()..],
            first_inverse[..]
        );

        let back = history.undo(&s2, 1_200).expect("undo");
        assert_eq!(*back, *s0);
    }

    #[test]
    fn actions_outside_window_stay_separate() {
        let mut history = HistoryManager::new(10, 300);
        let s0 = Arc::new(Sample::default());
        let s1 = act(&mut history, &s0, 1_000, |s| s.value = 1);
        act(&mut history, &s1, 1_500, |s| s.value = 2);
        assert_eq!(history.past().len(), 2);
    }

    #[test]
    fn no_merge_after_undo() {
        let mut history = HistoryManager::new(10, 300);
        let s0 = Arc::new(Sample::default());
        let s1 = act(&mut history, &s0, 0, |s| s.value = 1);
        let s2 = act(&mut history, &s1, 1_000, |s| s.value = 2);
        let s1b = history.undo(&s2, 1_010).expect("undo");
        act(&mut history, &s1b, 1_020, |s| s.value = 3);
        assert_eq!(history.past().len(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth_keeping_newest() {
        let mut history = HistoryManager::new(100, 300);
        let mut state = Arc::new(Sample::default());
        for i in 1..=105 {
            state = act(&mut history, &state, i as u64 * 1_000, |s| s.value = i);
        }
        assert_eq!(history.past().len(), 100);
        assert_eq!(history.past()[0].timestamp, 6_000);
        assert_eq!(history.past()[99].timestamp, 105_000);
    }

    #[test]
    fn undo_then_redo_restores_states() {
        let mut history = HistoryManager::new(10, 300);
        let s0 = Arc::new(Sample::default());
        let s1 = act(&mut history, &s0, 0, |s| s.value = 5);
        let s2 = act(&mut history, &s1, 1_000, |s| {
            s.value = 6;
            s.items = vec![1, 2];
        });

        let u1 = history.undo(&s2, 2_000).expect("undo");
        assert_eq!(*u1, *s1);
        let u0 = history.undo(&u1, 2_001).expect("undo");
        assert_eq!(*u0, *s0);

        // Redo wiederholt zuerst den zuletzt rückgängig gemachten Schritt
        let r1 = history.redo(&u0, 2_002).expect("redo");
        assert_eq!(*r1, *s1);
        let r2 = history.redo(&r1, 2_003).expect("redo");
        assert_eq!(*r2, *s2);
        assert!(!history.can_redo());
        assert_eq!(history.past().len(), 2);
        assert_eq!(history.past()[1].timestamp, 2_003);
    }

    #[test]
    fn n_undos_then_n_redos_round_trip() {
        let mut history = HistoryManager::new(50, 300);
        let mut state = Arc::new(Sample::default());
        for i in 0..8 {
            state = act(&mut history, &state, i * 1_000, |s| {
                s.value = i as i32;
                s.items.push(i as i32);
            });
        }
        let before = Arc::clone(&state);
        let past_len = history.past().len();

        for _ in 0..5 {
            state = history.undo(&state, 10_000).expect("undo");
        }
        for _ in 0..5 {
            state = history.redo(&state, 10_000).expect("redo");
        }
        assert_eq!(*state, *before);
        assert!(history.future().is_empty());
        assert_eq!(history.past().len(), past_len);
    }

    #[test]
    fn new_record_clears_redo_stack() {
        let mut history = HistoryManager::new(10, 300);
        let s0 = Arc::new(Sample::default());
        let s1 = act(&mut history, &s0, 0, |s| s.value = 1);
        let u = history.undo(&s1, 1_000).expect("undo");
        assert!(history.can_redo());
        act(&mut history, &u, 5_000, |s| s.value = 9);
        assert!(!history.can_redo());
    }

    #[test]
    fn transient_fields_are_filtered() {
        let mut history = HistoryManager::new(10, 300);
        let s0 = Arc::new(Sample::default());
        let s1 = act(&mut history, &s0, 0, |s| s.hovered_node = Some("n1".into()));
        assert!(!history.can_undo());

        let s2 = act(&mut history, &s1, 1_000, |s| {
            s.hovered_node = None;
            s.value = 3;
        });
        assert_eq!(history.past()[0].forward_patches.len(), 1);

        // Undo lässt transiente Felder unberührt
        let mut hovered = (*s2).clone();
        hovered.hovered_node = Some("n2".into());
        let back = history.undo(&Arc::new(hovered), 2_000).expect("undo");
        assert_eq!(back.value, 0);
        assert_eq!(back.hovered_node.as_deref(), Some("n2"));
    }

    #[test]
    fn set_limits_trims_oldest() {
        let mut history = HistoryManager::new(10, 300);
        let mut state = Arc::new(Sample::default());
        for i in 0..6 {
            state = act(&mut history, &state, i * 1_000, |s| s.value += 1);
        }
        history.set_limits(3, 50);
        assert_eq!(history.past().len(), 3);
        assert_eq!(history.merge_window_ms(), 50);
    }
}
