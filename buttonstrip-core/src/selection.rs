use std::collections::BTreeSet;

use crate::host::SelectionId;

/// Selection of fixed (unbound) tiles, by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnboundSelection {
    indexes: BTreeSet<usize>,
}

impl UnboundSelection {
    /// Multiselect toggles `index`; single select replaces the selection,
    /// or clears it when `index` is already selected.
    pub fn select(&mut self, index: usize, multiselect: bool) {
        if multiselect {
            if !self.indexes.remove(&index) {
                self.indexes.insert(index);
            }
        } else if self.indexes.contains(&index) {
            self.indexes.clear();
        } else {
            self.indexes.clear();
            self.indexes.insert(index);
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indexes.contains(&index)
    }

    pub fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.indexes.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

/// Selection state carried between passes: the unbound index set and the
/// last consistent snapshot of the host's selected keys.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    pub unbound: UnboundSelection,
    bound_keys: Vec<String>,
}

impl SelectionState {
    /// Adopt a fresh host snapshot unless some id has no key yet (the host
    /// is mid-transition); returns whether it was adopted.
    pub fn refresh_bound(&mut self, ids: &[SelectionId]) -> bool {
        let keys: Option<Vec<String>> = ids.iter().map(|id| id.key().map(str::to_string)).collect();
        match keys {
            Some(keys) => {
                self.bound_keys = keys;
                true
            }
            None => false,
        }
    }

    pub fn is_bound_selected(&self, id: &SelectionId) -> bool {
        id.key()
            .is_some_and(|key| self.bound_keys.iter().any(|k| k == key))
    }

    pub fn bound_keys(&self) -> &[String] {
        &self.bound_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(s: &UnboundSelection) -> Vec<usize> {
        s.indexes().collect()
    }

    #[test]
    fn single_select_toggles_and_replaces() {
        let mut s = UnboundSelection::default();
        s.select(1, false);
        s.select(1, false);
        assert!(s.is_empty());
        s.select(1, false);
        s.select(2, false);
        assert_eq!(selected(&s), [2]);
    }

    #[test]
    fn multiselect_is_symmetric_difference() {
        let mut s = UnboundSelection::default();
        s.select(1, true);
        s.select(3, true);
        assert_eq!(selected(&s), [1, 3]);
        s.select(1, true);
        assert_eq!(selected(&s), [3]);
    }

    #[test]
    fn single_select_of_member_clears_multi_selection() {
        let mut s = UnboundSelection::default();
        s.select(1, true);
        s.select(2, true);
        s.select(2, false);
        assert!(s.is_empty());
    }

    #[test]
    fn bound_snapshot_with_missing_keys_is_ignored() {
        let mut state = SelectionState::default();
        assert!(state.refresh_bound(&[SelectionId::new("a"), SelectionId::new("b")]));
        assert!(!state.refresh_bound(&[SelectionId::new("c"), SelectionId::pending()]));
        assert_eq!(state.bound_keys(), ["a", "b"]);
        assert!(state.is_bound_selected(&SelectionId::new("b")));
        assert!(!state.is_bound_selected(&SelectionId::pending()));
    }
}
