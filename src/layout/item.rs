//! Funnel items and their interaction-dependent appearance.

use serde::Serialize;

use crate::data::DataPoint;
use crate::label::LabelDescriptor;
use crate::options::{
    BorderOptions, HatchingDirection, HatchingOptions, ItemOptions, StateStyleOptions,
};
use crate::types::{Coords, Figure};

/// Interaction flags of one item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ItemState {
    pub hovered: bool,
    pub selected: bool,
}

/// Which style set applies; selection wins over hover
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleKind {
    Normal,
    Hover,
    Selection,
}

impl ItemState {
    pub fn style_kind(self) -> StyleKind {
        if self.selected {
            StyleKind::Selection
        } else if self.hovered {
            StyleKind::Hover
        } else {
            StyleKind::Normal
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hatching {
    pub direction: &'static str,
    pub opacity: f64,
    pub step: f64,
    pub width: f64,
}

/// Paint attributes for a tile in its current state
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemAppearance {
    pub fill: String,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub hatching: Option<Hatching>,
}

impl ItemAppearance {
    pub fn resolve(color: &str, state: ItemState, options: &ItemOptions) -> Self {
        let style = match state.style_kind() {
            StyleKind::Normal => {
                return Self::with_border(color, &options.border, None);
            }
            StyleKind::Hover => &options.hover_style,
            StyleKind::Selection => &options.selection_style,
        };
        Self::with_state_style(color, style, &options.border)
    }

    fn with_state_style(color: &str, style: &StateStyleOptions, base: &BorderOptions) -> Self {
        let border = style.border.as_ref().unwrap_or(base);
        Self::with_border(color, border, hatching(&style.hatching))
    }

    fn with_border(color: &str, border: &BorderOptions, hatching: Option<Hatching>) -> Self {
        let visible = border.visible && border.width > 0.0;
        ItemAppearance {
            fill: color.to_string(),
            stroke: visible.then(|| border.color.clone()),
            stroke_width: if visible { border.width } else { 0.0 },
            hatching,
        }
    }
}

fn hatching(options: &HatchingOptions) -> Option<Hatching> {
    let direction = match options.direction {
        HatchingDirection::None => return None,
        HatchingDirection::Left => "left",
        HatchingDirection::Right => "right",
    };
    Some(Hatching {
        direction,
        opacity: options.opacity,
        step: options.step,
        width: options.width,
    })
}

/// One funnel segment
#[derive(Clone, Debug, PartialEq)]
pub struct FunnelItem {
    /// Index after filtering and sorting
    pub id: usize,
    pub data: DataPoint,
    pub percent: f64,
    /// Normalized outline, already inverted when the funnel is
    pub figure: Figure,
    /// Screen outline, empty until the first tiling pass
    pub coords: Coords,
    pub color: String,
    pub state: ItemState,
    pub appearance: ItemAppearance,
    pub label: Option<LabelDescriptor>,
}

impl FunnelItem {
    pub fn is_hovered(&self) -> bool {
        self.state.hovered
    }

    pub fn is_selected(&self) -> bool {
        self.state.selected
    }

    pub fn argument(&self) -> &str {
        &self.data.argument
    }

    pub fn value(&self) -> f64 {
        self.data.value
    }
}
