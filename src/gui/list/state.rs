use std::collections::HashSet;

use super::{
    filter::FilterMode,
    search,
};
use crate::core::GrammarEntry;

/// View state for the grammar list: which catalog indices are visible given
/// the current search text and filter mode, plus per-row expansion.
///
/// `visible_indices` is recomputed only when an input changed (dirty flag).
/// The derivation is a pure function of the catalog, the membership
/// predicate, and the filter state; it never reorders surviving entries.
pub struct ListState {
    search: String,
    filter_mode: FilterMode,
    visible_indices: Vec<usize>,
    expanded: HashSet<u32>,
    dirty: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter_mode: FilterMode::default(),
            visible_indices: Vec::new(),
            expanded: HashSet::new(),
            dirty: true,
        }
    }
}

impl ListState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: String) {
        if self.search != search {
            self.search = search;
            self.dirty = true;
        }
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        if self.filter_mode != mode {
            self.filter_mode = mode;
            self.dirty = true;
        }
    }

    /// Learned membership feeds the Learned/Unlearned modes, so the view
    /// must be rederived after every toggle.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle_expanded(&mut self, id: u32) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    /// True while a search or a non-All filter narrows the list.
    pub fn is_filtered(&self) -> bool {
        !self.search.trim().is_empty() || self.filter_mode != FilterMode::All
    }

    pub fn ensure_indices(&mut self, entries: &[GrammarEntry], is_learned: impl Fn(u32) -> bool) {
        let needs_rebuild = self.dirty
            || self.visible_indices.len() > entries.len()
            || self.visible_indices.iter().any(|&index| index >= entries.len());

        if needs_rebuild {
            self.recompute_indices(entries, is_learned);
        }
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    fn recompute_indices(&mut self, entries: &[GrammarEntry], is_learned: impl Fn(u32) -> bool) {
        self.visible_indices.clear();

        let query = self.search.trim();

        for (index, entry) in entries.iter().enumerate() {
            if !self.filter_mode.keeps(is_learned(entry.id)) {
                continue;
            }
            if !search::matches_search(entry, query) {
                continue;
            }
            self.visible_indices.push(index);
        }

        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, structure: &str, translation: &str) -> GrammarEntry {
        GrammarEntry {
            id,
            structure: structure.to_string(),
            structure_translation: translation.to_string(),
            example: format!("{}の例文です。", structure),
            example_translation: format!("An example of {}.", translation),
            notes: None,
        }
    }

    fn catalog() -> Vec<GrammarEntry> {
        vec![
            entry(1, "〜だ", "to be"),
            entry(2, "〜は", "topic marker"),
            entry(3, "〜ます", "polite ending"),
            entry(4, "〜を", "object marker"),
            entry(5, "〜ません", "polite negative"),
        ]
    }

    fn visible_ids(state: &ListState, entries: &[GrammarEntry]) -> Vec<u32> {
        state.visible_indices().iter().map(|&index| entries[index].id).collect()
    }

    #[test]
    fn unfiltered_view_is_the_whole_catalog_in_order() {
        let entries = catalog();
        let mut state = ListState::default();

        state.ensure_indices(&entries, |_| false);
        assert_eq!(visible_ids(&state, &entries), vec![1, 2, 3, 4, 5]);
        assert!(!state.is_filtered());
    }

    #[test]
    fn learned_mode_keeps_only_learned_in_order() {
        let entries = catalog();
        let mut state = ListState::default();
        state.set_filter_mode(FilterMode::Learned);

        state.ensure_indices(&entries, |id| id == 4 || id == 2);
        assert_eq!(visible_ids(&state, &entries), vec![2, 4]);
    }

    #[test]
    fn unlearned_mode_is_the_complement() {
        let entries = catalog();
        let mut state = ListState::default();
        state.set_filter_mode(FilterMode::Unlearned);

        state.ensure_indices(&entries, |id| id == 4 || id == 2);
        assert_eq!(visible_ids(&state, &entries), vec![1, 3, 5]);
    }

    #[test]
    fn search_narrows_within_the_filter_mode() {
        let entries = catalog();
        let mut state = ListState::default();
        state.set_filter_mode(FilterMode::Unlearned);
        state.set_search("polite".to_string());

        // 3 is learned; 5 is the only unlearned entry matching "polite".
        state.ensure_indices(&entries, |id| id == 3);
        assert_eq!(visible_ids(&state, &entries), vec![5]);
    }

    #[test]
    fn whitespace_only_search_means_no_search() {
        let entries = catalog();
        let mut state = ListState::default();
        state.set_search("   ".to_string());

        state.ensure_indices(&entries, |_| false);
        assert_eq!(visible_ids(&state, &entries), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_result_set_is_valid() {
        let entries = catalog();
        let mut state = ListState::default();
        state.set_search("no such text anywhere".to_string());

        state.ensure_indices(&entries, |_| false);
        assert!(state.visible_indices().is_empty());
        assert!(state.is_filtered());
    }

    #[test]
    fn every_survivor_satisfies_the_predicate_and_vice_versa() {
        let entries = catalog();
        let learned = |id: u32| id % 2 == 1;

        for mode in FilterMode::MODES {
            for query in ["", "polite", "ます", "marker"] {
                let mut state = ListState::default();
                state.set_filter_mode(mode);
                state.set_search(query.to_string());
                state.ensure_indices(&entries, learned);

                let visible = visible_ids(&state, &entries);
                for entry in &entries {
                    let keeps = mode.keeps(learned(entry.id))
                        && super::search::matches_search(entry, query.trim());
                    assert_eq!(
                        visible.contains(&entry.id),
                        keeps,
                        "mode {:?} query {:?} id {}",
                        mode,
                        query,
                        entry.id
                    );
                }

                // Canonical order is preserved.
                let mut sorted = visible.clone();
                sorted.sort_unstable();
                assert_eq!(visible, sorted);
            }
        }
    }

    #[test]
    fn recompute_happens_only_when_inputs_change() {
        let entries = catalog();
        let mut state = ListState::default();

        state.ensure_indices(&entries, |_| false);
        let before = state.visible_indices().to_vec();

        // Same search value does not dirty the state.
        state.set_search(String::new());
        state.ensure_indices(&entries, |_| true);
        assert_eq!(state.visible_indices(), before.as_slice());

        // A membership change is signalled explicitly.
        state.set_filter_mode(FilterMode::Learned);
        state.ensure_indices(&entries, |id| id == 1);
        assert_eq!(visible_ids(&state, &entries), vec![1]);
    }

    #[test]
    fn expansion_is_independent_of_filtering() {
        let mut state = ListState::default();
        assert!(!state.is_expanded(3));
        state.toggle_expanded(3);
        assert!(state.is_expanded(3));
        state.toggle_expanded(3);
        assert!(!state.is_expanded(3));
    }
}
