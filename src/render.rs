
//! Full-grid rendering with a pluggable per-cell shading function, plus the
//! ready-made shaders the engine ships with.

use crate::field::{DistanceField, DistanceStorage};

/// Everything a shading function may look at for one cell.
pub struct CellSample {
    /// Euclidean distance to the nearest boundary cell, sentinel on an
    /// empty field.
    pub distance: f32,
    /// First grid coordinate of the nearest boundary cell.
    pub closest_x: u16,
    /// Second grid coordinate of the nearest boundary cell.
    pub closest_y: u16,
    /// Color recorded at the nearest boundary cell.
    pub color: u32,
    pub row: usize,
    pub col: usize,
}

/// Color channels in `[0, 255]`. Shaders may produce values outside that
/// range; the buffer writer clamps and rounds when narrowing to a byte.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }
}

impl<D> DistanceField<D>
where
    D: DistanceStorage,
{
    /// Rasterizes the whole field into an RGBA8 buffer of `side × side`
    /// pixels with opaque alpha.
    ///
    /// The pixel for grid cell `(row, col)` lands at buffer index
    /// `(col * side + row) * 4`: the image axes are transposed relative to
    /// the grid axes, reflecting the (row, col) vs (x, y) convention split
    /// between the two.
    pub fn render<F>(&self, mut shade: F) -> Vec<u8>
    where
        F: FnMut(&CellSample) -> Rgb,
    {
        let side = self.side;
        let mut data = vec![0_u8; side * side * 4];

        for row in 0..side {
            for col in 0..side {
                let grid_index = row * side + col;
                let (closest_x, closest_y) = self.targets[grid_index];

                let color = shade(&CellSample {
                    distance: self.distances.get(grid_index),
                    closest_x,
                    closest_y,
                    color: self.colors[closest_x as usize * side + closest_y as usize],
                    row,
                    col,
                });

                let index = (col * side + row) * 4;
                data[index] = channel(color.r);
                data[index + 1] = channel(color.g);
                data[index + 2] = channel(color.b);
                data[index + 3] = 255;
            }
        }

        data
    }

    /// Renders with the default shading: a hue derived from the nearest
    /// shape's color id, darkened near-to-far.
    pub fn generate_image_data(&self) -> Vec<u8> {
        self.render(shading::combined)
    }
}

fn channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Ready-made shading functions for [`DistanceField::render`].
///
/// `combined` is the default; the rest shade by distance alone and are handy
/// for inspecting a field visually.
pub mod shading {
    use super::{CellSample, Rgb};

    /// Hue from the nearest shape's color id via three independent
    /// multiplier/modulus transforms, scaled by `1 - sqrt(distance) / 10`.
    pub fn combined(sample: &CellSample) -> Rgb {
        let scale = 1.0 - sample.distance.sqrt() / 10.0;
        Rgb::new(
            (sample.color.wrapping_mul(7) % 256) as f32 * scale,
            (sample.color.wrapping_mul(13) % 256) as f32 * scale,
            (sample.color.wrapping_mul(19) % 256) as f32 * scale,
        )
    }

    pub fn simple(sample: &CellSample) -> Rgb {
        let d = sample.distance;
        Rgb::new(250.0 - d * 2.0, 250.0 - d * 5.0, 250.0 - d * 3.0)
    }

    pub fn modulo(sample: &CellSample) -> Rgb {
        let period = 18.0;
        let modulo = sample.distance % period;
        Rgb::new(modulo * period, modulo * period / 3.0, modulo * period / 2.0)
    }

    pub fn grayscale(sample: &CellSample) -> Rgb {
        let value = 255.0 - sample.distance.abs() * 10.0;
        Rgb::new(value, value, value)
    }

    pub fn heatmap(sample: &CellSample) -> Rgb {
        let value = (255.0 - sample.distance.abs() * 10.0).clamp(0.0, 255.0);
        Rgb::new(value, 0.0, 255.0 - value)
    }

    pub fn inverted(sample: &CellSample) -> Rgb {
        let value = sample.distance.abs() % 255.0;
        Rgb::new(255.0 - value, 255.0 - value, 255.0 - value)
    }

    pub fn rainbow(sample: &CellSample) -> Rgb {
        let value = sample.distance.abs() % 255.0;
        Rgb::new(
            value * 5.0 % 255.0,
            value * 3.0 % 255.0,
            value * 7.0 % 255.0,
        )
    }
}
