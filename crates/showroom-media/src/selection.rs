use uuid::Uuid;

/// How clicks on an asset change the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// At most one asset; clicking the selected asset again deselects it
    Single,
    /// At most one asset; clicking the selected asset again keeps it selected
    SingleSticky,
    /// Any number of assets; each click flips membership
    Multiple,
}

/// Ordered set of selected asset ids, in the order they were picked
#[derive(Debug, Clone)]
pub struct Selection {
    mode: SelectionMode,
    ids: Vec<Uuid>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ids: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Apply a click on `id`. Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        match self.mode {
            SelectionMode::SingleSticky => {
                self.ids.clear();
                self.ids.push(id);
                true
            }
            SelectionMode::Single => {
                let was_selected = self.contains(id);
                self.ids.clear();
                if !was_selected {
                    self.ids.push(id);
                }
                !was_selected
            }
            SelectionMode::Multiple => {
                if let Some(pos) = self.ids.iter().position(|s| *s == id) {
                    self.ids.remove(pos);
                    false
                } else {
                    self.ids.push(id);
                    true
                }
            }
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer pass `exists` (e.g. after a delete).
    pub fn retain(&mut self, exists: impl Fn(Uuid) -> bool) {
        self.ids.retain(|id| exists(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multi_toggle_twice_restores_state() {
        let mut selection = Selection::new(SelectionMode::Multiple);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        selection.toggle(a);
        let before = selection.ids().to_vec();

        assert!(selection.toggle(b));
        assert!(!selection.toggle(b));
        assert_eq!(selection.ids(), before.as_slice());

        assert!(!selection.toggle(a));
        assert!(selection.toggle(a));
        assert_eq!(selection.ids(), before.as_slice());
    }

    #[test]
    fn test_multi_keeps_pick_order() {
        let mut selection = Selection::new(SelectionMode::Multiple);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for id in ids.iter().rev() {
            selection.toggle(*id);
        }
        let expected: Vec<Uuid> = ids.iter().rev().copied().collect();
        assert_eq!(selection.ids(), expected.as_slice());
    }

    #[test]
    fn test_single_modes_never_exceed_one() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let clicks = [0, 1, 1, 2, 0, 0, 3, 3, 3, 1];
        for mode in [SelectionMode::Single, SelectionMode::SingleSticky] {
            let mut selection = Selection::new(mode);
            for &i in &clicks {
                selection.toggle(ids[i]);
                assert!(selection.len() <= 1);
            }
        }
    }

    #[test]
    fn test_single_reclick_deselects() {
        let mut selection = Selection::new(SelectionMode::Single);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert!(selection.toggle(a));
        assert!(selection.toggle(b));
        assert_eq!(selection.ids(), &[b]);
        assert!(!selection.toggle(b));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_sticky_reclick_keeps_selection() {
        let mut selection = Selection::new(SelectionMode::SingleSticky);
        let a = Uuid::new_v4();
        assert!(selection.toggle(a));
        assert!(selection.toggle(a));
        assert_eq!(selection.ids(), &[a]);
    }

    #[test]
    fn test_retain_drops_missing_ids() {
        let mut selection = Selection::new(SelectionMode::Multiple);
        let keep = Uuid::new_v4();
        let gone = Uuid::new_v4();
        selection.toggle(keep);
        selection.toggle(gone);
        selection.retain(|id| id == keep);
        assert_eq!(selection.ids(), &[keep]);
    }

    fn pool() -> Vec<Uuid> {
        (0..6).map(|_| Uuid::new_v4()).collect()
    }

    proptest! {
        #[test]
        fn prop_multi_double_toggle_is_identity(
            clicks in prop::collection::vec(0usize..6, 0..20),
            target in 0usize..6,
        ) {
            let ids = pool();
            let mut selection = Selection::new(SelectionMode::Multiple);
            for i in clicks {
                selection.toggle(ids[i]);
            }
            let before = selection.ids().to_vec();

            selection.toggle(ids[target]);
            selection.toggle(ids[target]);
            let mut after = selection.ids().to_vec();
            let mut expected = before;
            after.sort();
            expected.sort();
            prop_assert_eq!(after, expected);
        }

        #[test]
        fn prop_single_modes_hold_at_most_one(
            clicks in prop::collection::vec(0usize..6, 0..30),
        ) {
            let ids = pool();
            for mode in [SelectionMode::Single, SelectionMode::SingleSticky] {
                let mut selection = Selection::new(mode);
                for &i in &clicks {
                    let selected = selection.toggle(ids[i]);
                    prop_assert!(selection.len() <= 1);
                    prop_assert_eq!(selected, selection.contains(ids[i]));
                }
            }
        }
    }
}
