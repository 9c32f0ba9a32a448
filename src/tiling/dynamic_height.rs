//! Dynamic height ("pyramid"): segment heights follow the values while the
//! outline narrows linearly from full width down to the neck.

use crate::data::DataPoint;
use crate::types::Figure;

use super::{CENTER, Tiling, ratio};

const LEFT_CORNER: f64 = 0.0;
const RIGHT_CORNER: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicHeight;

impl Tiling for DynamicHeight {
    /// Values relative to their sum
    fn normalize_values(&self, data: &[DataPoint]) -> Vec<f64> {
        let sum: f64 = data.iter().map(|d| d.value).sum();
        data.iter().map(|d| ratio(d.value, sum)).collect()
    }

    fn figures(&self, percents: &[f64], neck_width: f64, neck_height: f64) -> Vec<Figure> {
        let half_neck = neck_width / 2.0;
        let neck_left = CENTER - half_neck;
        let neck_right = CENTER + half_neck;
        let funnel_height = 1.0 - neck_height;

        let mut bottom = 0.0_f64;
        let mut offset_x = 0.0_f64;

        percents
            .iter()
            .map(|&percent| {
                let x = offset_x;
                let top = bottom;
                bottom = (bottom + percent).min(1.0);
                offset_x = if funnel_height > 0.0 {
                    neck_left * (bottom / funnel_height).min(1.0)
                } else {
                    neck_left
                };

                let coords = if top <= funnel_height && bottom <= funnel_height {
                    vec![
                        x, top,
                        RIGHT_CORNER - x, top,
                        RIGHT_CORNER - offset_x, bottom,
                        LEFT_CORNER + offset_x, bottom,
                    ]
                } else if top <= funnel_height {
                    // crosses the neck line
                    vec![
                        x, top,
                        RIGHT_CORNER - x, top,
                        neck_right, funnel_height,
                        neck_right, bottom,
                        neck_left, bottom,
                        neck_left, funnel_height,
                    ]
                } else {
                    vec![
                        neck_left, top,
                        neck_right, top,
                        neck_right, bottom,
                        neck_left, bottom,
                    ]
                };
                Figure::new(coords)
            })
            .collect()
    }
}
