//! Connector strategies: where a label's connector leaves the figure and
//! which corners of the label box it may attach to.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::options::{LabelPosition, LabelSide};
use crate::types::{Coords, Rect};

/// Gap between the label box edge and its connector attachment points
pub const CONNECTOR_INDENT: f64 = 4.0;

/// Pull the figure anchor this far inside the outline so the connector never
/// starts on an empty pixel
pub const PREVENT_EMPTY_PIXEL_OFFSET: f64 = 1.0;

#[enum_dispatch]
pub trait ConnectorStrategy {
    /// Outward top corner of the figure, pulled one pixel inward
    fn figure_center(&self, coords: &Coords) -> DVec2;

    fn find_figure_point(&self, coords: &Coords) -> DVec2 {
        self.figure_center(coords)
    }

    /// Attachment corners of a label box: top-left, top-right,
    /// bottom-right, bottom-left.
    fn prepare_label_points(&self, bbox: &Rect) -> [DVec2; 4];

    /// Inside and column labels draw no connector.
    fn is_label_inside(&self) -> bool;
}

/// Side and inversion; everything the geometry depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchoring {
    pub side: LabelSide,
    pub inverted: bool,
}

impl Anchoring {
    fn vertical_correction(self) -> f64 {
        if self.inverted { -PREVENT_EMPTY_PIXEL_OFFSET } else { 0.0 }
    }

    fn figure_center(self, coords: &Coords) -> DVec2 {
        let vc = self.vertical_correction();
        match self.side {
            LabelSide::Right => {
                let v = coords.vertex(1);
                dvec2(v.x - PREVENT_EMPTY_PIXEL_OFFSET, v.y + vc)
            }
            LabelSide::Left => {
                let v = coords.vertex(0);
                dvec2(v.x + PREVENT_EMPTY_PIXEL_OFFSET, v.y + vc)
            }
        }
    }

    fn label_points(self, bbox: &Rect) -> [DVec2; 4] {
        let indent = match self.side {
            LabelSide::Left => CONNECTOR_INDENT,
            LabelSide::Right => -CONNECTOR_INDENT,
        };
        let x = bbox.x0 + indent;
        let y = bbox.y0 + self.vertical_correction();
        let (w, h) = (bbox.width(), bbox.height());
        [dvec2(x, y), dvec2(x + w, y), dvec2(x + w, y + h), dvec2(x, y + h)]
    }
}

/// Labels next to their figure, joined by a connector line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutsideConnector(pub Anchoring);

/// Labels on top of the figure or lined up in a column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsideConnector(pub Anchoring);

impl ConnectorStrategy for OutsideConnector {
    fn figure_center(&self, coords: &Coords) -> DVec2 {
        self.0.figure_center(coords)
    }

    fn prepare_label_points(&self, bbox: &Rect) -> [DVec2; 4] {
        self.0.label_points(bbox)
    }

    fn is_label_inside(&self) -> bool {
        false
    }
}

impl ConnectorStrategy for InsideConnector {
    fn figure_center(&self, coords: &Coords) -> DVec2 {
        self.0.figure_center(coords)
    }

    fn prepare_label_points(&self, bbox: &Rect) -> [DVec2; 4] {
        self.0.label_points(bbox)
    }

    fn is_label_inside(&self) -> bool {
        true
    }
}

#[enum_dispatch(ConnectorStrategy)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connector {
    OutsideConnector,
    InsideConnector,
}

impl Connector {
    pub fn select(position: LabelPosition, side: LabelSide, inverted: bool) -> Self {
        let anchoring = Anchoring { side, inverted };
        match position {
            LabelPosition::Outside => OutsideConnector(anchoring).into(),
            LabelPosition::Inside | LabelPosition::Columns => InsideConnector(anchoring).into(),
        }
    }

    /// Segment from the figure to the closest label corner, or `None` when
    /// this strategy draws no connector.
    pub fn connector_line(&self, coords: &Coords, bbox: &Rect) -> Option<[DVec2; 2]> {
        if self.is_label_inside() {
            return None;
        }
        let from = self.find_figure_point(coords);
        let to = nearest(from, &self.prepare_label_points(bbox));
        Some([from, to])
    }
}

fn nearest(from: DVec2, points: &[DVec2; 4]) -> DVec2 {
    points
        .iter()
        .copied()
        .min_by(|a, b| from.distance_squared(*a).total_cmp(&from.distance_squared(*b)))
        .unwrap_or(from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outside_rect_figure() -> Coords {
        // [0, 0, 1, 0, 1, 0.5, 0, 0.5] mapped into [0, 0, 680, 600]
        Coords(vec![0.0, 0.0, 680.0, 0.0, 680.0, 300.0, 0.0, 300.0])
    }

    fn bbox() -> Rect {
        Rect::new(10.0, 15.0, 50.0, 35.0)
    }

    #[test]
    fn right_side_corner() {
        let c = Connector::select(LabelPosition::Outside, LabelSide::Right, false);
        let coords = outside_rect_figure();
        assert_eq!(c.figure_center(&coords), dvec2(679.0, 0.0));
        assert_eq!(c.find_figure_point(&coords), dvec2(679.0, 0.0));
        assert_eq!(
            c.prepare_label_points(&bbox()),
            [dvec2(6.0, 15.0), dvec2(46.0, 15.0), dvec2(46.0, 35.0), dvec2(6.0, 35.0)]
        );
        assert!(!c.is_label_inside());
    }

    #[test]
    fn left_side_corner() {
        let c = Connector::select(LabelPosition::Outside, LabelSide::Left, false);
        let coords = Coords(vec![120.0, 0.0, 800.0, 0.0, 800.0, 300.0, 120.0, 300.0]);
        assert_eq!(c.figure_center(&coords), dvec2(121.0, 0.0));
        assert_eq!(
            c.prepare_label_points(&bbox()),
            [dvec2(14.0, 15.0), dvec2(54.0, 15.0), dvec2(54.0, 35.0), dvec2(14.0, 35.0)]
        );
    }

    #[test]
    fn inverted_left_side_moves_up_a_pixel() {
        let c = Connector::select(LabelPosition::Outside, LabelSide::Left, true);
        // the inverted figure starts at the bottom edge
        let coords = Coords(vec![120.0, 600.0, 800.0, 600.0, 800.0, 300.0, 120.0, 300.0]);
        assert_eq!(c.figure_center(&coords), dvec2(121.0, 599.0));
        assert_eq!(
            c.prepare_label_points(&bbox()),
            [dvec2(14.0, 14.0), dvec2(54.0, 14.0), dvec2(54.0, 34.0), dvec2(14.0, 34.0)]
        );
    }

    #[test]
    fn inside_and_columns_have_no_connector() {
        for position in [LabelPosition::Inside, LabelPosition::Columns] {
            let c = Connector::select(position, LabelSide::Right, false);
            assert!(c.is_label_inside());
            assert_eq!(c.connector_line(&outside_rect_figure(), &bbox()), None);
        }
    }

    #[test]
    fn connector_line_goes_to_nearest_corner() {
        let c = Connector::select(LabelPosition::Outside, LabelSide::Right, false);
        let label = Rect::new(700.0, 30.0, 800.0, 40.0);
        let line = c.connector_line(&outside_rect_figure(), &label).unwrap();
        assert_eq!(line, [dvec2(679.0, 0.0), dvec2(696.0, 30.0)]);
    }
}
