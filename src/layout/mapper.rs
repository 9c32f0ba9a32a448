//! Normalized figures to screen coordinates.

use crate::types::{Coords, Figure, Rect};

/// Project `figure` into `rect`: even slots scale across the width, odd
/// slots across the height.
pub fn map_figure(figure: &Figure, rect: &Rect) -> Coords {
    Coords(
        figure
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i % 2 == 0 {
                    rect.x0 + rect.width() * c
                } else {
                    rect.y0 + rect.height() * c
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_maps_to_rect_corners() {
        let rect = Rect::new(120.0, 10.0, 800.0, 600.0);
        let coords = map_figure(&Figure::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]), &rect);
        assert_eq!(coords.as_slice(), &[120.0, 10.0, 800.0, 10.0, 800.0, 600.0, 120.0, 600.0]);
    }

    #[test]
    fn inverted_figure_maps_flipped() {
        let rect = Rect::new(0.0, 0.0, 680.0, 600.0);
        let figure = Figure::new(vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.5, 0.0, 0.5]);
        let coords = map_figure(&figure.inverted(), &rect);
        assert_eq!(coords.as_slice(), &[0.0, 600.0, 680.0, 600.0, 680.0, 300.0, 0.0, 300.0]);
    }

    #[test]
    fn odd_length_tail_is_mapped_as_x() {
        let coords = map_figure(&Figure::new(vec![0.5]), &Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(coords.as_slice(), &[400.0]);
    }
}
