use chrono::Utc;

use super::store::{
    GrammarProgress,
    ProgressStore,
};

/// In-memory source of truth for learning progress during a session.
///
/// Starts uninitialized; `load()` transitions it to loaded exactly once,
/// substituting the empty default when the store has nothing usable. Every
/// mutation builds the full next state, persists it, then swaps it in, so
/// observers never see a half-applied toggle.
pub struct ProgressTracker {
    progress: GrammarProgress,
    loaded: bool,
    store: Box<dyn ProgressStore>,
}

impl ProgressTracker {
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        Self { progress: GrammarProgress::default(), loaded: false, store }
    }

    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        if let Some(progress) = self.store.load() {
            self.progress = progress;
        }
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_learned(&self, id: u32) -> bool {
        self.progress.learned_ids.contains(&id)
    }

    pub fn learned_count(&self) -> usize {
        self.progress.learned_ids.len()
    }

    pub fn learned_at(&self, id: u32) -> Option<i64> {
        self.progress.timestamps.get(&id).copied()
    }

    /// Marks `id` learned, or unlearned if it already was. Unlearning drops
    /// the timestamp; relearning stamps a fresh one.
    pub fn toggle_learned(&mut self, id: u32) {
        let mut next = self.progress.clone();

        if let Some(position) = next.learned_ids.iter().position(|&learned| learned == id) {
            next.learned_ids.remove(position);
            next.timestamps.remove(&id);
        } else {
            next.learned_ids.push(id);
            next.timestamps.insert(id, Utc::now().timestamp_millis());
        }

        self.store.save(&next);
        self.progress = next;
    }

    pub fn reset(&mut self) {
        self.progress = GrammarProgress::default();
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        rc::Rc,
    };

    use super::*;

    /// Store fake: remembers the last saved blob, optionally starts with
    /// stored state, and can refuse loads like a corrupted file would.
    #[derive(Default)]
    struct MemoryStore {
        stored: Rc<RefCell<Option<GrammarProgress>>>,
    }

    impl MemoryStore {
        fn with_stored(progress: GrammarProgress) -> Self {
            Self { stored: Rc::new(RefCell::new(Some(progress))) }
        }

        fn shared(&self) -> Rc<RefCell<Option<GrammarProgress>>> {
            Rc::clone(&self.stored)
        }
    }

    impl ProgressStore for MemoryStore {
        fn load(&self) -> Option<GrammarProgress> {
            self.stored.borrow().clone()
        }

        fn save(&self, progress: &GrammarProgress) {
            *self.stored.borrow_mut() = Some(progress.clone());
        }

        fn clear(&self) {
            *self.stored.borrow_mut() = None;
        }
    }

    fn loaded_tracker() -> ProgressTracker {
        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::default()));
        tracker.load();
        tracker
    }

    fn assert_consistent(tracker: &ProgressTracker, ids: &[u32]) {
        assert_eq!(tracker.learned_count(), ids.len());
        for &id in ids {
            assert!(tracker.is_learned(id));
            assert!(tracker.learned_at(id).is_some(), "missing timestamp for {}", id);
        }
    }

    #[test]
    fn starts_unloaded_and_empty() {
        let tracker = ProgressTracker::new(Box::new(MemoryStore::default()));
        assert!(!tracker.is_loaded());
        assert_eq!(tracker.learned_count(), 0);
    }

    #[test]
    fn load_with_empty_store_yields_default_state() {
        let tracker = loaded_tracker();
        assert!(tracker.is_loaded());
        assert_eq!(tracker.learned_count(), 0);
        assert!(!tracker.is_learned(1));
    }

    #[test]
    fn load_restores_stored_state() {
        let mut stored = GrammarProgress::default();
        stored.learned_ids = vec![3, 7];
        stored.timestamps.insert(3, 100);
        stored.timestamps.insert(7, 200);

        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::with_stored(stored)));
        tracker.load();

        assert_consistent(&tracker, &[3, 7]);
        assert_eq!(tracker.learned_at(3), Some(100));
    }

    #[test]
    fn load_is_idempotent() {
        let store = MemoryStore::default();
        let shared = store.shared();
        let mut tracker = ProgressTracker::new(Box::new(store));
        tracker.load();

        tracker.toggle_learned(9);
        // A second load must not clobber the session state.
        tracker.load();
        assert!(tracker.is_learned(9));
        assert!(shared.borrow().is_some());
    }

    #[test]
    fn toggle_marks_learned_and_persists() {
        let store = MemoryStore::default();
        let shared = store.shared();
        let mut tracker = ProgressTracker::new(Box::new(store));
        tracker.load();

        tracker.toggle_learned(5);

        assert_consistent(&tracker, &[5]);
        let saved = shared.borrow().clone().unwrap();
        assert_eq!(saved.learned_ids, vec![5]);
        assert!(saved.timestamps.contains_key(&5));
    }

    #[test]
    fn double_toggle_restores_prior_membership() {
        let mut tracker = loaded_tracker();

        tracker.toggle_learned(5);
        tracker.toggle_learned(5);
        assert!(!tracker.is_learned(5));
        assert_eq!(tracker.learned_at(5), None);

        tracker.toggle_learned(8);
        tracker.toggle_learned(5);
        tracker.toggle_learned(5);
        assert!(tracker.is_learned(8));
        assert!(!tracker.is_learned(5));
        assert_eq!(tracker.learned_count(), 1);
    }

    #[test]
    fn unlearn_drops_the_timestamp_and_relearn_stamps_fresh() {
        let mut tracker = loaded_tracker();

        tracker.toggle_learned(5);
        let first = tracker.learned_at(5);
        assert!(first.is_some());

        tracker.toggle_learned(5);
        assert_eq!(tracker.learned_at(5), None);

        tracker.toggle_learned(5);
        assert!(tracker.learned_at(5).is_some());
        assert!(tracker.learned_at(5) >= first);
    }

    #[test]
    fn rapid_toggling_never_accumulates_duplicates() {
        let store = MemoryStore::default();
        let shared = store.shared();
        let mut tracker = ProgressTracker::new(Box::new(store));
        tracker.load();

        for _ in 0..7 {
            tracker.toggle_learned(42);
        }

        assert_consistent(&tracker, &[42]);
        let saved = shared.borrow().clone().unwrap();
        assert_eq!(saved.learned_ids, vec![42]);
        assert_eq!(saved.timestamps.len(), 1);
    }

    #[test]
    fn counts_stay_consistent_over_arbitrary_sequences() {
        let mut tracker = loaded_tracker();

        for id in [2, 4, 6, 8, 4, 10, 2, 12] {
            tracker.toggle_learned(id);
        }

        // 4 and 2 were toggled twice.
        assert_consistent(&tracker, &[6, 8, 10, 12]);
        assert!(!tracker.is_learned(2));
        assert!(!tracker.is_learned(4));
    }

    #[test]
    fn scenario_mark_two_then_unmark_one() {
        let mut tracker = loaded_tracker();

        tracker.toggle_learned(5);
        tracker.toggle_learned(42);
        assert_eq!(tracker.learned_count(), 2);

        tracker.toggle_learned(5);
        assert_eq!(tracker.learned_count(), 1);
        assert_eq!(tracker.learned_at(5), None);
        assert!(tracker.is_learned(42));
    }

    #[test]
    fn reset_clears_memory_and_store() {
        let store = MemoryStore::default();
        let shared = store.shared();
        let mut tracker = ProgressTracker::new(Box::new(store));
        tracker.load();

        tracker.toggle_learned(1);
        tracker.reset();

        assert_eq!(tracker.learned_count(), 0);
        assert!(shared.borrow().is_none());
    }
}
