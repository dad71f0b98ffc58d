
use vek::Vec2;

use crate::field::{DistanceStorage, SENTINEL_DISTANCE};
use crate::shape::Shape;

/// Resets the distance grid to the sentinel and the color grid to zero, then
/// marks every shape boundary: distance 0 and the shape's color at each cell
/// a polygon edge passes through. Shapes are drawn in iteration order, so at
/// shared cells the last shape's color wins.
pub(crate) fn reset_and_rasterize<'s, D, I>(
    side: usize,
    distances: &mut D,
    colors: &mut [u32],
    shapes: I,
) where
    D: DistanceStorage,
    I: IntoIterator<Item = &'s Shape>,
{
    for index in 0..side * side {
        distances.set(index, SENTINEL_DISTANCE);
    }
    colors.fill(0);

    for shape in shapes {
        let points = &shape.points;
        for i in 0..points.len() {
            let start = points[i];
            let end = points[(i + 1) % points.len()];
            draw_edge(side, distances, colors, start, end, shape.color);
        }
    }
}

/// Walks the integer Bresenham line between the cells containing the two
/// endpoints, marking every traversed cell as boundary.
///
/// An edge with an endpoint cell outside the grid is skipped entirely rather
/// than clipped; shapes must stay inside the grid or lose boundary segments.
fn draw_edge<D: DistanceStorage>(
    side: usize,
    distances: &mut D,
    colors: &mut [u32],
    start: Vec2<f32>,
    end: Vec2<f32>,
    color: u32,
) {
    let (start, end) = match (cell_of(start, side), cell_of(end, side)) {
        (Some(start), Some(end)) => (start, end),
        _ => return,
    };

    if start == end {
        mark(side, distances, colors, start, color);
        return;
    }

    let (mut x0, mut y0) = start;
    let (x1, y1) = end;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        mark(side, distances, colors, (x0, y0), color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// The cell containing a point, by truncation with a cell size of one.
/// `None` when the cell lies outside the grid on either axis.
fn cell_of(point: Vec2<f32>, side: usize) -> Option<(i64, i64)> {
    let x = point.x.floor() as i64;
    let y = point.y.floor() as i64;
    let side = side as i64;

    if x < 0 || x >= side || y < 0 || y >= side {
        None
    } else {
        Some((x, y))
    }
}

#[inline]
fn mark<D: DistanceStorage>(
    side: usize,
    distances: &mut D,
    colors: &mut [u32],
    (x, y): (i64, i64),
    color: u32,
) {
    let index = x as usize * side + y as usize;
    distances.set(index, 0.0);
    colors[index] = color;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::F32DistanceStorage;

    fn rasterize(side: usize, shapes: &[Shape]) -> (Vec<f32>, Vec<u32>) {
        let mut distances = vec![0.0_f32; side * side];
        let mut colors = vec![0_u32; side * side];
        reset_and_rasterize::<F32DistanceStorage, _>(side, &mut distances, &mut colors, shapes);
        (distances, colors)
    }

    fn marked_cells(side: usize, distances: &[f32]) -> Vec<(usize, usize)> {
        (0..side * side)
            .filter(|&index| distances[index] == 0.0)
            .map(|index| (index / side, index % side))
            .collect()
    }

    #[test]
    fn diagonal_edge_marks_every_step() {
        let shape = Shape {
            points: vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0)],
            color: 7,
        };
        let (distances, colors) = rasterize(8, &[shape]);

        assert_eq!(
            marked_cells(8, &distances),
            vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]
        );
        assert_eq!(colors[2 * 8 + 2], 7);
    }

    #[test]
    fn single_point_marks_its_truncated_cell() {
        let shape = Shape {
            points: vec![Vec2::new(4.7, 6.2)],
            color: 3,
        };
        let (distances, _) = rasterize(8, &[shape]);

        assert_eq!(marked_cells(8, &distances), vec![(4, 6)]);
    }

    #[test]
    fn out_of_bounds_edges_are_skipped_not_clipped() {
        let shape = Shape {
            points: vec![Vec2::new(2.0, 2.0), Vec2::new(50.0, 2.0)],
            color: 3,
        };
        let (distances, _) = rasterize(8, &[shape]);

        // both edges of the two-point polygon leave the grid
        assert!(marked_cells(8, &distances).is_empty());
    }

    #[test]
    fn later_shape_overwrites_color_at_shared_cells() {
        let first = Shape {
            points: vec![Vec2::new(1.0, 3.0), Vec2::new(5.0, 3.0)],
            color: 10,
        };
        let second = Shape {
            points: vec![Vec2::new(3.5, 3.5)],
            color: 20,
        };
        let (distances, colors) = rasterize(8, &[first, second]);

        assert_eq!(distances[3 * 8 + 3], 0.0);
        assert_eq!(colors[3 * 8 + 3], 20);
        assert_eq!(colors[1 * 8 + 3], 10);
    }
}
