//! Label placement.
//!
//! Labels are created (and measured) once per structural rebuild. Every layout
//! pass after that only moves them: it reserves room next to the funnel,
//! computes each label's anchor from its figure's screen coordinates, fits
//! column labels with an ellipsis and clamps the box into the container.
//!
//! Everything here is a plain function of its arguments: the engine hands in
//! the container, the drawing rectangle and one item at a time.
//!
//! - `text`: label text and measurement
//! - `connector`: figure anchor and connector corners
//! - `adaptive`: hide-or-keep policy for small containers

pub mod adaptive;
pub mod connector;
pub mod text;

use glam::{DVec2, dvec2};

use crate::data::DataPoint;
use crate::options::{LabelOptions, LabelPosition, LabelSide};
use crate::types::{Coords, Rect, Size};

use connector::{Connector, ConnectorStrategy};
use text::{FontOptions, TextMeasure};

/// Gap between a figure and an outside label
pub const OUTSIDE_LABEL_INDENT: f64 = 5.0;

/// Gap between the funnel and the label column
pub const COLUMNS_LABEL_INDENT: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Stroke for the line between an outside label and its figure
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorStyle {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
}

/// Everything the renderer needs to draw one label
#[derive(Clone, Debug, PartialEq)]
pub struct LabelDescriptor {
    pub item_id: usize,
    pub text: String,
    /// Size reported by the text measurer when the label was created
    pub measured: Size,
    /// Top-left corner of the label box
    pub shift: DVec2,
    /// Box at `shift`, narrowed to the ellipsis width when one is set
    pub bounding_rect: Rect,
    pub ellipsis_width: Option<f64>,
    pub visible: bool,
    pub figure_point: DVec2,
    pub connector_points: [DVec2; 4],
    /// Figure point to nearest label corner, for outside labels
    pub connector: Option<[DVec2; 2]>,
    pub is_inside: bool,
    pub text_align: TextAlign,
    pub font: FontOptions,
    /// Background fill, `None` when the background is off
    pub background: Option<String>,
    pub connector_style: ConnectorStyle,
}

impl LabelDescriptor {
    /// Width the label occupies after ellipsis fitting
    pub fn effective_size(&self) -> Size {
        Size::new(self.ellipsis_width.unwrap_or(self.measured.w), self.measured.h)
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn clear_visibility(&mut self) {
        self.visible = true;
    }

    pub fn reset_ellipsis(&mut self) {
        self.ellipsis_width = None;
    }

    /// Truncate to `width` if the label does not fit, otherwise drop any
    /// earlier truncation.
    pub fn fit(&mut self, width: f64) {
        let width = width.max(0.0);
        self.ellipsis_width = (self.measured.w > width).then_some(width);
    }
}

/// Create the label for one item, or `None` when labels are off or the value
/// is zero and zero values get no label.
pub fn create(
    options: &LabelOptions,
    measurer: &dyn TextMeasure,
    item_id: usize,
    data: &DataPoint,
    percent: f64,
    item_color: &str,
) -> Option<LabelDescriptor> {
    if !options.visible || (data.value == 0.0 && !options.show_for_zero_values) {
        return None;
    }
    let text = text::label_text(options, &data.argument, data.value, percent);
    let measured = measurer.measure(&text, options);
    crate::log::trace!(item_id, %text, w = measured.w, h = measured.h, "measured label");

    Some(LabelDescriptor {
        item_id,
        text,
        measured,
        shift: DVec2::ZERO,
        bounding_rect: Rect::from_size(measured),
        ellipsis_width: None,
        visible: true,
        figure_point: DVec2::ZERO,
        connector_points: [DVec2::ZERO; 4],
        connector: None,
        is_inside: false,
        text_align: TextAlign::Left,
        font: options.font.clone(),
        background: options
            .background
            .visible
            .then(|| options.background.fill.clone().unwrap_or_else(|| item_color.to_string())),
        connector_style: ConnectorStyle {
            color: options.connector.color.clone().unwrap_or_else(|| item_color.to_string()),
            width: options.connector.width,
            opacity: options.connector.opacity,
        },
    })
}

/// Horizontal room to set aside next to the funnel: the widest label plus
/// offset and indent. Inside labels and empty measurements need none.
pub fn required_space<'a>(
    labels: impl IntoIterator<Item = &'a LabelDescriptor>,
    options: &LabelOptions,
) -> f64 {
    if !options.position.reserves_space() {
        return 0.0;
    }
    let indent = match options.position {
        LabelPosition::Outside => OUTSIDE_LABEL_INDENT,
        _ => COLUMNS_LABEL_INDENT,
    };
    let widest = labels
        .into_iter()
        .filter(|l| !l.measured.is_empty())
        .fold(0.0_f64, |max, l| max.max(l.measured.w));
    if widest > 0.0 {
        widest + options.horizontal_offset + indent
    } else {
        0.0
    }
}

/// Per-pass placement inputs
#[derive(Clone, Copy, Debug)]
pub struct Placement<'a> {
    pub options: &'a LabelOptions,
    /// Whole widget area; labels never leave it
    pub container: Rect,
    /// Where the figures were mapped
    pub rect: Rect,
    pub inverted: bool,
    pub rtl: bool,
}

impl Placement<'_> {
    pub fn side(&self) -> LabelSide {
        self.options.horizontal_alignment.side()
    }

    pub fn connector(&self) -> Connector {
        Connector::select(self.options.position, self.side(), self.inverted)
    }

    /// Position `label` against its figure's screen coordinates.
    pub fn place(&self, label: &mut LabelDescriptor, coords: &Coords) {
        if self.options.position == LabelPosition::Columns {
            label.fit(self.available_width(coords));
        } else {
            label.reset_ellipsis();
        }

        let size = label.effective_size();
        let anchor = self.anchor(coords, size);
        label.shift = clamp_into(anchor, size, self.container);
        label.bounding_rect = Rect::from_origin_size(label.shift, size);

        let connector = self.connector();
        label.figure_point = connector.find_figure_point(coords);
        label.connector_points = connector.prepare_label_points(&label.bounding_rect);
        label.is_inside = connector.is_label_inside();
        label.connector = if self.options.connector.visible {
            connector.connector_line(coords, &label.bounding_rect)
        } else {
            None
        };
        label.text_align = self.text_align();
    }

    fn anchor(&self, coords: &Coords, size: Size) -> DVec2 {
        let o = self.options;
        let (v0, v1) = (coords.vertex(0), coords.vertex(1));
        let dy = if self.inverted { -size.h } else { 0.0 };

        match (o.position, self.side()) {
            (LabelPosition::Inside, _) => {
                let (top, bottom) = coords.vertical_extent();
                dvec2(
                    v0.x + (v1.x - v0.x) / 2.0 + o.horizontal_offset - size.w / 2.0,
                    top + o.vertical_offset + (bottom - top) / 2.0 - size.h / 2.0,
                )
            }
            (LabelPosition::Outside, LabelSide::Right) => dvec2(
                v1.x + o.horizontal_offset + OUTSIDE_LABEL_INDENT,
                v1.y + o.vertical_offset + dy,
            ),
            (LabelPosition::Outside, LabelSide::Left) => dvec2(
                v0.x - size.w - o.horizontal_offset - OUTSIDE_LABEL_INDENT,
                v0.y + o.vertical_offset + dy,
            ),
            (LabelPosition::Columns, side) => {
                let x = match (side, self.rtl) {
                    (LabelSide::Right, false) => {
                        self.rect.x1 + o.horizontal_offset + COLUMNS_LABEL_INDENT
                    }
                    (LabelSide::Right, true) => self.container.x1 - size.w,
                    (LabelSide::Left, false) => self.container.x0,
                    (LabelSide::Left, true) => {
                        self.rect.x0 - size.w - o.horizontal_offset - COLUMNS_LABEL_INDENT
                    }
                };
                dvec2(x, v1.y + o.vertical_offset + dy)
            }
        }
    }

    /// Room between an item's outside anchor and the container edge
    fn available_width(&self, coords: &Coords) -> f64 {
        let o = self.options;
        let width = match self.side() {
            LabelSide::Right => {
                self.container.x1 - coords.vertex(1).x - o.horizontal_offset - OUTSIDE_LABEL_INDENT
            }
            LabelSide::Left => {
                coords.vertex(0).x - o.horizontal_offset - OUTSIDE_LABEL_INDENT - self.container.x0
            }
        };
        width.max(0.0)
    }

    fn text_align(&self) -> TextAlign {
        match (self.options.position, self.side()) {
            (LabelPosition::Inside, _) => TextAlign::Center,
            (LabelPosition::Outside, LabelSide::Right) => TextAlign::Left,
            (LabelPosition::Outside, LabelSide::Left) => TextAlign::Right,
            (LabelPosition::Columns, _) if self.rtl => TextAlign::Right,
            (LabelPosition::Columns, _) => TextAlign::Left,
        }
    }
}

/// Move a box inward by exactly its overflow past the container, per axis.
fn clamp_into(pos: DVec2, size: Size, container: Rect) -> DVec2 {
    let axis = |p: f64, len: f64, lo: f64, hi: f64| {
        let p = if p + len > hi { hi - len } else { p };
        if p < lo { lo } else { p }
    };
    dvec2(
        axis(pos.x, size.w, container.x0, container.x1),
        axis(pos.y, size.h, container.y0, container.y1),
    )
}
