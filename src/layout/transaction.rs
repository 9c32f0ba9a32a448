//! Nestable notification scope for item-state mutation.
//!
//! The outermost `enter` snapshots every item's state; inner scopes only bump
//! the depth. The matching outermost `exit` diffs the live states against that
//! snapshot and yields at most one [`StateChange`].

use crate::layout::item::ItemState;

/// One item whose state differs across a scope
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStateChange {
    pub id: usize,
    pub before: ItemState,
    pub after: ItemState,
}

/// Net effect of a scope
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateChange {
    pub changes: Vec<ItemStateChange>,
}

impl StateChange {
    pub fn hover_changed(&self) -> impl Iterator<Item = &ItemStateChange> {
        self.changes.iter().filter(|c| c.before.hovered != c.after.hovered)
    }

    pub fn selection_changed(&self) -> impl Iterator<Item = &ItemStateChange> {
        self.changes.iter().filter(|c| c.before.selected != c.after.selected)
    }
}

#[derive(Clone, Debug, Default)]
pub struct NotificationScope {
    depth: usize,
    snapshot: Vec<ItemState>,
}

impl NotificationScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_active(&self) -> bool {
        self.depth > 0
    }

    /// Open a scope. `states` is only consulted for the outermost one.
    pub fn enter(&mut self, states: impl FnOnce() -> Vec<ItemState>) {
        if self.depth == 0 {
            self.snapshot = states();
        }
        self.depth += 1;
    }

    /// Close a scope; the outermost close reports what changed, if anything.
    pub fn exit(&mut self, states: &[ItemState]) -> Option<StateChange> {
        debug_assert!(self.depth > 0, "unbalanced notification scope");
        self.depth = self.depth.saturating_sub(1);
        if self.depth > 0 {
            return None;
        }
        let snapshot = std::mem::take(&mut self.snapshot);
        let changes: Vec<ItemStateChange> = snapshot
            .iter()
            .zip(states)
            .enumerate()
            .filter(|(_, (before, after))| before != after)
            .map(|(id, (&before, &after))| ItemStateChange { id, before, after })
            .collect();
        (!changes.is_empty()).then_some(StateChange { changes })
    }
}
