//! Tiling algorithms: values in, percents and normalized figures out.
//!
//! - `dynamic_slope`: equal-height trapezoids whose widths follow the values
//! - `dynamic_height`: heights follow the values, the outline narrows linearly
//! - `registry`: name lookup with a designated default

pub mod dynamic_height;
pub mod dynamic_slope;
pub mod registry;

use std::fmt;
use std::sync::Arc;

use enum_dispatch::enum_dispatch;

use crate::data::DataPoint;
use crate::types::Figure;

pub use dynamic_height::DynamicHeight;
pub use dynamic_slope::DynamicSlope;
pub use registry::TilingRegistry;

/// The horizontal center every built-in figure is symmetric around
pub(crate) const CENTER: f64 = 0.5;

/// A tiling algorithm. Both operations are total: any non-negative input
/// produces one output per item, and no input produces nothing.
#[enum_dispatch]
pub trait Tiling {
    /// One percent in `[0, 1]` per data point
    fn normalize_values(&self, data: &[DataPoint]) -> Vec<f64>;

    /// One normalized polygon per percent
    fn figures(&self, percents: &[f64], neck_width: f64, neck_height: f64) -> Vec<Figure>;
}

/// Every algorithm the registry can hand out
#[enum_dispatch(Tiling)]
#[derive(Clone, Debug)]
pub enum TilingAlgorithm {
    DynamicSlope,
    DynamicHeight,
    Custom(CustomTiling),
}

/// A host-supplied algorithm
#[derive(Clone)]
pub struct CustomTiling {
    name: String,
    inner: Arc<dyn Tiling + Send + Sync>,
}

impl CustomTiling {
    pub fn new(name: impl Into<String>, tiling: impl Tiling + Send + Sync + 'static) -> Self {
        CustomTiling {
            name: name.into(),
            inner: Arc::new(tiling),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomTiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTiling").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Tiling for CustomTiling {
    fn normalize_values(&self, data: &[DataPoint]) -> Vec<f64> {
        self.inner.normalize_values(data)
    }

    fn figures(&self, percents: &[f64], neck_width: f64, neck_height: f64) -> Vec<Figure> {
        self.inner.figures(percents, neck_width, neck_height)
    }
}

/// `value / total`, or zero when the total is not positive.
pub(crate) fn ratio(value: f64, total: f64) -> f64 {
    if total > 0.0 { (value / total).clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fixed figures and percents, for driving layout tests with exact shapes.
    pub struct FixedTiling {
        pub figures: Vec<Vec<f64>>,
    }

    impl Tiling for FixedTiling {
        fn normalize_values(&self, data: &[DataPoint]) -> Vec<f64> {
            data.iter().map(|_| 1.0).collect()
        }

        fn figures(&self, percents: &[f64], _: f64, _: f64) -> Vec<Figure> {
            percents
                .iter()
                .enumerate()
                .map(|(i, _)| Figure::new(self.figures[i % self.figures.len()].clone()))
                .collect()
        }
    }

    #[test]
    fn custom_tiling_delegates() {
        let algorithm = TilingAlgorithm::from(CustomTiling::new(
            "fixed",
            FixedTiling {
                figures: vec![vec![0.0, 0.0, 1.0, 1.0]],
            },
        ));
        let data = [DataPoint::new(3.0), DataPoint::new(1.0)];
        assert_eq!(algorithm.normalize_values(&data), vec![1.0, 1.0]);
        assert_eq!(algorithm.figures(&[1.0, 1.0], 0.0, 0.0).len(), 2);
    }

    #[test]
    fn ratio_guards_zero_total() {
        assert_eq!(ratio(0.0, 0.0), 0.0);
        assert_eq!(ratio(2.0, 4.0), 0.5);
    }

    #[test]
    fn every_builtin_is_total_over_percent_range() {
        let data: Vec<DataPoint> = [9.0, 0.0, 4.5, 3.0, 0.25]
            .into_iter()
            .map(DataPoint::new)
            .collect();
        let builtins = [
            TilingAlgorithm::from(DynamicSlope),
            TilingAlgorithm::from(DynamicHeight),
        ];
        for algorithm in builtins {
            let percents = algorithm.normalize_values(&data);
            assert_eq!(percents.len(), data.len());
            assert!(percents.iter().all(|p| (0.0..=1.0).contains(p)));
            for (nw, nh) in [(0.0, 0.0), (0.3, 0.2), (1.0, 1.0)] {
                let figures = algorithm.figures(&percents, nw, nh);
                assert_eq!(figures.len(), data.len());
                for figure in &figures {
                    assert_eq!(figure.len() % 2, 0);
                    assert!(
                        figure.as_slice().iter().all(|c| (0.0..=1.0).contains(c)),
                        "{algorithm:?} {nw}/{nh}: {figure:?}"
                    );
                }
            }
        }
    }
}
