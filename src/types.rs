//! Geometric primitives shared by the tiling, mapping and label stages.
//!
//! Normalized figures and screen coordinates are kept as distinct newtypes so a
//! figure can never be drawn before it went through the mapper.

use std::fmt;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle stored as `[x0, y0, x1, y1]`
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    /// Rectangle anchored at the origin with the given size
    pub fn from_size(size: Size) -> Self {
        Rect::new(0.0, 0.0, size.w, size.h)
    }

    /// Rectangle from a top-left corner and a size
    pub fn from_origin_size(origin: DVec2, size: Size) -> Self {
        Rect::new(origin.x, origin.y, origin.x + size.w, origin.y + size.h)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Top-left corner
    pub fn origin(&self) -> DVec2 {
        dvec2(self.x0, self.y0)
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

impl From<[f64; 4]> for Rect {
    fn from(r: [f64; 4]) -> Self {
        Rect::new(r[0], r[1], r[2], r[3])
    }
}

impl From<Rect> for [f64; 4] {
    fn from(r: Rect) -> Self {
        r.to_array()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x0, self.y0, self.x1, self.y1)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const ZERO: Size = Size { w: 0.0, h: 0.0 };

    pub const fn new(w: f64, h: f64) -> Self {
        Size { w, h }
    }

    /// Degenerate measurements reserve no space
    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }
}

/// A polygon in normalized `[0,1]²` space, flattened as `x, y` pairs
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Figure(pub Vec<f64>);

impl Figure {
    pub fn new(coords: Vec<f64>) -> Self {
        Figure(coords)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flip vertically: every y becomes `1 - y`, x is untouched.
    pub fn inverted(&self) -> Figure {
        Figure(
            self.0
                .iter()
                .enumerate()
                .map(|(i, &c)| if i % 2 == 1 { 1.0 - c } else { c })
                .collect(),
        )
    }

    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        points(&self.0)
    }
}

impl From<Vec<f64>> for Figure {
    fn from(coords: Vec<f64>) -> Self {
        Figure(coords)
    }
}

/// A figure projected into screen space, same layout as [`Figure`]
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Coords(pub Vec<f64>);

impl Coords {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `i`th vertex; missing coordinates read as zero.
    pub fn vertex(&self, i: usize) -> DVec2 {
        let at = |k: usize| self.0.get(k).copied().unwrap_or_default();
        dvec2(at(2 * i), at(2 * i + 1))
    }

    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        points(&self.0)
    }

    /// Smallest and largest y over all vertices
    pub fn vertical_extent(&self) -> (f64, f64) {
        self.points()
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p.y, p.y)),
                Some((lo, hi)) => Some((lo.min(p.y), hi.max(p.y))),
            })
            .unwrap_or((0.0, 0.0))
    }
}

fn points(coords: &[f64]) -> impl Iterator<Item = DVec2> + '_ {
    coords.chunks_exact(2).map(|c| dvec2(c[0], c[1]))
}
