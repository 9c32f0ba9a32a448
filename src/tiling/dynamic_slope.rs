//! Dynamic slope ("funnel"): every segment is as tall as the others; the
//! slope of each one is set by its own value and the next one.

use crate::data::DataPoint;
use crate::types::Figure;

use super::{CENTER, Tiling, ratio};

#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicSlope;

impl Tiling for DynamicSlope {
    /// Values relative to the largest one
    fn normalize_values(&self, data: &[DataPoint]) -> Vec<f64> {
        let max = data.iter().fold(0.0_f64, |max, d| max.max(d.value));
        data.iter().map(|d| ratio(d.value, max)).collect()
    }

    fn figures(&self, percents: &[f64], neck_width: f64, neck_height: f64) -> Vec<Figure> {
        let count = percents.len();
        if count == 0 {
            return Vec::new();
        }
        let height = 1.0 / count as f64;

        percents
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let last = index + 1 == count;
                let top = height * index as f64;
                let bottom = if last { 1.0 } else { height * (index + 1) as f64 };
                let half = value / 2.0;

                if last && neck_height > 0.0 {
                    // the final segment narrows into the neck
                    let half_neck = neck_width.min(value) / 2.0;
                    let shoulder = bottom - neck_height.min(height);
                    return Figure::new(vec![
                        CENTER - half, top,
                        CENTER + half, top,
                        CENTER + half, shoulder,
                        CENTER + half_neck, bottom,
                        CENTER - half_neck, bottom,
                        CENTER - half, shoulder,
                    ]);
                }

                let next_half = percents.get(index + 1).copied().unwrap_or(value) / 2.0;
                Figure::new(vec![
                    CENTER - half, top,
                    CENTER + half, top,
                    CENTER + next_half, bottom,
                    CENTER - next_half, bottom,
                ])
            })
            .collect()
    }
}
