//! Adaptive layout: trade label room against a minimum drawing size.

use crate::options::{AdaptiveLayoutOptions, LabelSide};
use crate::types::Rect;

/// Outcome of fitting the label reservation into the container
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reservation {
    /// Where the figures are drawn
    pub rect: Rect,
    /// Labels must be hidden for this pass
    pub hide_labels: bool,
}

/// Shrink `container` by `need` on `side`, then apply the adaptive policy.
///
/// When the reserved rectangle is smaller than the adaptive minimum in either
/// direction, labels are either dropped (the figures get the whole container
/// back) or kept, in which case the drawing width is held at the minimum
/// width, never wider than the container.
pub fn reserve(
    container: Rect,
    need: f64,
    side: LabelSide,
    adaptive: &AdaptiveLayoutOptions,
) -> Reservation {
    let need = need.max(0.0);
    let mut rect = container;
    match side {
        LabelSide::Right => rect.x1 -= need,
        LabelSide::Left => rect.x0 += need,
    }

    let too_small = rect.width() < adaptive.width || rect.height() < adaptive.height;
    if too_small && !adaptive.keep_labels {
        crate::log::debug!(%container, "container below adaptive minimum, hiding labels");
        return Reservation {
            rect: container,
            hide_labels: true,
        };
    }

    if rect.width() < adaptive.width {
        let width = container.width().min(adaptive.width);
        match side {
            LabelSide::Right => rect.x1 = container.x0 + width,
            LabelSide::Left => rect.x0 = container.x1 - width,
        }
    }

    Reservation {
        rect,
        hide_labels: false,
    }
}
