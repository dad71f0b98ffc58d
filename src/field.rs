
use indexmap::IndexMap;
use tracing::trace;
use vek::Vec2;

use crate::cpt::CptSolver;
use crate::error::{Error, Result};
use crate::raster;
use crate::shape::Shape;

/// Placeholder distance meaning "no boundary anywhere"; large enough to be
/// effectively infinite at any supported resolution. Narrowing it through an
/// f16 storage turns it into a literal infinity.
pub const SENTINEL_DISTANCE: f32 = 1e12;

/// Dynamic distance and color fields over a mutable set of polygon shapes.
///
/// A field of resolution `n` covers a grid of `(n + 1)²` cells; the extra
/// cell keeps shapes touching the coordinate maximum inside the grid. Every
/// mutation re-rasterizes all shape boundaries, runs the exact closest-point
/// transform and re-derives the Euclidean distances before returning, so
/// queries never observe a stale or partial state. All grid buffers are
/// allocated at construction and overwritten in place on each recomputation.
///
/// Grid convention: a point maps to cell `(row, col) = (⌊x⌋, ⌊y⌋)`, with the
/// row as the first index of every accessor.
pub struct DistanceField<D: DistanceStorage> {
    pub(crate) side: usize,
    shapes: IndexMap<String, Shape>,
    pub(crate) distances: D,
    pub(crate) colors: Vec<u32>,
    pub(crate) targets: Vec<(u16, u16)>,
    pub(crate) has_boundary: bool,
    solver: CptSolver,
}

/// Needs less storage with sufficient precision, but derived distances are
/// rounded to f16 and conversions cost time on every access.
pub type F16DistanceStorage = Vec<half::f16>;

/// Needs more storage, keeps the full f32 precision of the derived distances.
pub type F32DistanceStorage = Vec<f32>;

pub trait DistanceStorage {
    fn new(length: usize) -> Self;

    fn get(&self, index: usize) -> f32;

    fn set(&mut self, index: usize, distance: f32);
}

impl<D> DistanceField<D>
where
    D: DistanceStorage,
{
    /// Creates an empty field for the given resolution. The resolution is
    /// fixed for the lifetime of the engine.
    pub fn new(resolution: usize) -> Result<Self> {
        if resolution == 0 || resolution >= u16::MAX as usize {
            return Err(Error::Resolution(resolution));
        }

        let side = resolution + 1;
        let mut field = DistanceField {
            side,
            shapes: IndexMap::new(),
            distances: D::new(side * side),
            colors: vec![0; side * side],
            targets: vec![(0, 0); side * side],
            has_boundary: false,
            solver: CptSolver::new(side),
        };

        field.recompute();
        Ok(field)
    }

    pub fn resolution(&self) -> usize {
        self.side - 1
    }

    /// Cells per grid axis, `resolution + 1`.
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// The color of a stored shape, if the id is known.
    pub fn shape_color(&self, id: &str) -> Option<u32> {
        self.shapes.get(id).map(|shape| shape.color)
    }

    /// Inserts or replaces the shape stored under `id`. Without an explicit
    /// color, a pseudo-random one in `[0, 255)` is assigned.
    pub fn add_shape(
        &mut self,
        id: impl Into<String>,
        points: Vec<Vec2<f32>>,
        color: Option<u32>,
    ) -> Result<()> {
        if points.is_empty() {
            return Err(Error::EmptyShape);
        }

        self.shapes.insert(id.into(), Shape::new(points, color));
        self.recompute();
        Ok(())
    }

    /// Removes a shape. An unknown id is a no-op without recomputation;
    /// returns whether anything was removed.
    pub fn remove_shape(&mut self, id: &str) -> bool {
        if self.shapes.shift_remove(id).is_some() {
            self.recompute();
            true
        } else {
            false
        }
    }

    /// Replaces an existing shape's geometry in place, keeping its color.
    /// An unknown id is a no-op without recomputation, reported as
    /// `Ok(false)`.
    pub fn update_shape(&mut self, id: &str, points: Vec<Vec2<f32>>) -> Result<bool> {
        if points.is_empty() {
            return Err(Error::EmptyShape);
        }

        match self.shapes.get_mut(id) {
            Some(shape) => {
                shape.points = points;
                self.recompute();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Euclidean distance from the cell to the nearest shape boundary, or
    /// [`SENTINEL_DISTANCE`] while no shape boundary exists.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` lies outside the grid.
    pub fn get_distance(&self, row: usize, col: usize) -> f32 {
        self.distances.get(self.flatten_index(row, col))
    }

    /// Color of the nearest shape boundary. This always reads through the
    /// cell's closest-point target: a cell's color means "color of the
    /// nearest shape", not "color rasterized at this cell". Zero while no
    /// shape boundary exists.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` lies outside the grid.
    pub fn get_color(&self, row: usize, col: usize) -> u32 {
        let index = self.flatten_index(row, col);
        if !self.has_boundary {
            return 0;
        }

        let (target_row, target_col) = self.targets[index];
        self.colors[target_row as usize * self.side + target_col as usize]
    }

    /// Grid coordinates of the nearest boundary cell, or `None` while no
    /// shape boundary exists.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` lies outside the grid.
    pub fn closest_point(&self, row: usize, col: usize) -> Option<(u16, u16)> {
        let index = self.flatten_index(row, col);
        self.has_boundary.then(|| self.targets[index])
    }

    /// Full pipeline: rasterize boundaries, transform, derive distances.
    fn recompute(&mut self) {
        raster::reset_and_rasterize(
            self.side,
            &mut self.distances,
            &mut self.colors,
            self.shapes.values(),
        );

        self.has_boundary = self.solver.solve(&self.distances, &mut self.targets);
        if self.has_boundary {
            self.derive_distances();
        }

        trace!(
            shapes = self.shapes.len(),
            boundary = self.has_boundary,
            "recomputed distance field"
        );
    }

    /// `distance(cell) = euclidean(cell, closestPoint(cell))`, written back
    /// through the storage. Only runs when the transform found sources, so
    /// the sentinel from rasterization survives on an empty field.
    fn derive_distances(&mut self) {
        for row in 0..self.side {
            for col in 0..self.side {
                let index = row * self.side + col;
                let (target_row, target_col) = self.targets[index];

                let dr = row as f32 - target_row as f32;
                let dc = col as f32 - target_col as f32;
                self.distances.set(index, (dr * dr + dc * dc).sqrt());
            }
        }
    }

    /// A wrong index must fail loudly here: `row * side + col` would
    /// otherwise silently alias a cell in a neighboring row.
    #[inline]
    fn flatten_index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.side && col < self.side,
            "cell ({}, {}) outside the {}x{} grid",
            row,
            col,
            self.side,
            self.side
        );
        row * self.side + col
    }
}

impl DistanceStorage for F16DistanceStorage {
    fn new(length: usize) -> Self {
        vec![half::f16::INFINITY; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index].to_f32()
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = half::f16::from_f32(distance)
    }
}

impl DistanceStorage for F32DistanceStorage {
    fn new(length: usize) -> Self {
        vec![f32::INFINITY; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = distance
    }
}
