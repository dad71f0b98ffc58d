
use vek::Vec2;

/// A closed polygon tagged with a color identifier.
///
/// Edge `i` connects point `i` to point `(i + 1) % n`; the wrap-around edge
/// is implied, so no explicit closing vertex is stored. A single point is a
/// legal degenerate polygon and rasterizes to one boundary cell.
#[derive(Clone, PartialEq, Debug)]
pub struct Shape {
    pub points: Vec<Vec2<f32>>,
    pub color: u32,
}

impl Shape {
    pub(crate) fn new(points: Vec<Vec2<f32>>, color: Option<u32>) -> Self {
        Shape {
            points,
            color: color.unwrap_or_else(random_color),
        }
    }
}

/// Color assigned to shapes added without one: pseudo-random in `[0, 255)`.
fn random_color() -> u32 {
    rand::random_range(0..255_u32)
}

#[cfg(test)]
mod tests {
    use super::random_color;

    #[test]
    fn random_colors_stay_in_byte_range() {
        for _ in 0..1000 {
            assert!(random_color() < 255);
        }
    }
}
