//! Change scheduling: which layout stages a mutation invalidates.

use std::collections::BTreeSet;

use crate::options::FunnelOptions;

/// Layout stages in the order they run. Each one feeds the next, so asking
/// for a stage also asks for every stage after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Filter and sort the raw rows
    DataSource,
    /// Build items: percents, figures, colors
    NodesCreate,
    /// Create and measure labels
    Labels,
    /// Reserve label room and settle the drawing rectangle
    Layout,
    /// Map figures to screen and place labels
    Tiling,
    /// Resolve per-state appearance
    Tiles,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::DataSource,
        Stage::NodesCreate,
        Stage::Labels,
        Stage::Layout,
        Stage::Tiling,
        Stage::Tiles,
    ];
}

/// Pending stages, coalesced
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pending: BTreeSet<Stage>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `stage` and everything downstream of it.
    pub fn request(&mut self, stage: Stage) {
        self.pending.extend(Stage::ALL.into_iter().filter(|s| *s >= stage));
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.pending.contains(&stage)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending stage, in run order.
    pub fn drain(&mut self) -> std::collections::btree_set::IntoIter<Stage> {
        std::mem::take(&mut self.pending).into_iter()
    }
}

/// Earliest stage invalidated by going from `old` to `new`, if any.
pub fn stage_for_options(old: &FunnelOptions, new: &FunnelOptions) -> Option<Stage> {
    if old.value_field != new.value_field
        || old.argument_field != new.argument_field
        || old.color_field != new.color_field
        || old.sort_data != new.sort_data
    {
        return Some(Stage::DataSource);
    }
    if old.algorithm != new.algorithm
        || old.neck_width != new.neck_width
        || old.neck_height != new.neck_height
        || old.inverted != new.inverted
        || old.palette != new.palette
    {
        return Some(Stage::NodesCreate);
    }
    if old.label != new.label {
        return Some(Stage::Labels);
    }
    if old.size != new.size
        || old.adaptive_layout != new.adaptive_layout
        || old.rtl_enabled != new.rtl_enabled
    {
        return Some(Stage::Layout);
    }
    if old.item != new.item
        || old.hover_enabled != new.hover_enabled
        || old.selection_mode != new.selection_mode
    {
        return Some(Stage::Tiles);
    }
    None
}
