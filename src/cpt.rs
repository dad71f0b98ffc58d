
//! Exact closest-point transform: for every cell of a square grid, find the
//! coordinates of the nearest source cell under the Euclidean metric.
//!
//! Two phases, both exact. Phase one scans every row and records, per cell,
//! the nearest source column within that row. Phase two sweeps every column
//! and minimizes `(row - row')² + rowDistance(row', col)²` over all rows
//! `row'` using a lower envelope of parabolas, carrying the argmin through so
//! the output is a coordinate pair rather than a distance. Ties resolve to
//! the lower column in phase one and to envelope construction order in phase
//! two, so identical input always yields identical output.

use crate::field::DistanceStorage;

const NO_SOURCE: u16 = u16::MAX;
const EMPTY: i64 = i64::MAX;

/// Solver with scratch buffers sized for one grid, allocated once and
/// reused for every recomputation.
pub(crate) struct CptSolver {
    side: usize,
    /// per cell, the nearest source column within the cell's row
    row_source: Vec<u16>,
    /// squared row-local distances of the column currently being swept
    column_f: Vec<i64>,
    /// rows whose parabolas form the current lower envelope
    hull: Vec<usize>,
    /// row positions where envelope ownership changes hands
    breaks: Vec<f64>,
}

impl CptSolver {
    pub(crate) fn new(side: usize) -> Self {
        CptSolver {
            side,
            row_source: vec![NO_SOURCE; side * side],
            column_f: vec![EMPTY; side],
            hull: vec![0; side],
            breaks: vec![0.0; side + 1],
        }
    }

    /// Writes the nearest source cell of every cell into `targets`, where a
    /// source is any cell with distance zero. Returns `false` without
    /// touching `targets` when the grid contains no source at all.
    pub(crate) fn solve<D: DistanceStorage>(
        &mut self,
        distances: &D,
        targets: &mut [(u16, u16)],
    ) -> bool {
        if !self.scan_rows(distances) {
            return false;
        }

        for col in 0..self.side {
            self.sweep_column(col, targets);
        }

        true
    }

    /// Phase one: nearest source column per cell within its own row,
    /// via a left-to-right then right-to-left sweep. Equidistant sources
    /// resolve to the lower column.
    fn scan_rows<D: DistanceStorage>(&mut self, distances: &D) -> bool {
        let side = self.side;
        let mut any_source = false;

        for row in 0..side {
            let offset = row * side;

            let mut nearest = NO_SOURCE;
            for col in 0..side {
                if distances.get(offset + col) == 0.0 {
                    nearest = col as u16;
                    any_source = true;
                }
                self.row_source[offset + col] = nearest;
            }

            let mut nearest = NO_SOURCE;
            for col in (0..side).rev() {
                if distances.get(offset + col) == 0.0 {
                    nearest = col as u16;
                }
                if nearest == NO_SOURCE {
                    continue;
                }

                let left = self.row_source[offset + col];
                if left == NO_SOURCE || (nearest as usize - col) < (col - left as usize) {
                    self.row_source[offset + col] = nearest;
                }
            }
        }

        any_source
    }

    /// Phase two: for one column, minimize over all rows the squared
    /// distance to that row's nearest source, tracking which row won.
    fn sweep_column(&mut self, col: usize, targets: &mut [(u16, u16)]) {
        let side = self.side;

        for row in 0..side {
            let source = self.row_source[row * side + col];
            self.column_f[row] = if source == NO_SOURCE {
                EMPTY
            } else {
                let d = col as i64 - source as i64;
                d * d
            };
        }

        // build the lower envelope of parabolas row -> (q - row)² + f(row)
        let mut count = 0;
        for row in 0..side {
            let f = self.column_f[row];
            if f == EMPTY {
                continue;
            }

            let mut start;
            loop {
                if count == 0 {
                    start = f64::NEG_INFINITY;
                    break;
                }
                let prev = self.hull[count - 1];
                start = intersection(prev, self.column_f[prev], row, f);
                if start <= self.breaks[count - 1] {
                    count -= 1;
                } else {
                    break;
                }
            }

            self.hull[count] = row;
            self.breaks[count] = start;
            count += 1;
        }

        debug_assert!(count > 0, "phase two ran on a grid without sources");

        // read the envelope back out
        let mut k = 0;
        for row in 0..side {
            while k + 1 < count && self.breaks[k + 1] < row as f64 {
                k += 1;
            }
            let owner = self.hull[k];
            targets[row * side + col] = (owner as u16, self.row_source[owner * side + col]);
        }
    }
}

/// Row position from which the parabola anchored at `q` dips below the one
/// anchored at `p`, for `p < q`.
fn intersection(p: usize, fp: i64, q: usize, fq: i64) -> f64 {
    let p = p as i64;
    let q = q as i64;
    ((fq + q * q) - (fp + p * p)) as f64 / (2 * (q - p)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(side: usize, sources: &[(usize, usize)]) -> Option<Vec<(u16, u16)>> {
        let mut distances = vec![f32::INFINITY; side * side];
        for &(row, col) in sources {
            distances[row * side + col] = 0.0;
        }

        let mut targets = vec![(0, 0); side * side];
        let mut solver = CptSolver::new(side);
        solver.solve(&distances, &mut targets).then_some(targets)
    }

    fn squared(a: (usize, usize), b: (u16, u16)) -> i64 {
        let dr = a.0 as i64 - b.0 as i64;
        let dc = a.1 as i64 - b.1 as i64;
        dr * dr + dc * dc
    }

    #[test]
    fn no_sources_reports_false() {
        assert!(solve(6, &[]).is_none());
    }

    #[test]
    fn single_source_claims_every_cell() {
        let targets = solve(9, &[(2, 7)]).unwrap();
        assert!(targets.iter().all(|&target| target == (2, 7)));
    }

    #[test]
    fn matches_brute_force_on_scattered_sources() {
        let side = 17;
        let sources = [(0, 0), (3, 14), (8, 8), (16, 2), (16, 16), (5, 6)];
        let targets = solve(side, &sources).unwrap();

        for row in 0..side {
            for col in 0..side {
                let reported = targets[row * side + col];
                let best = sources
                    .iter()
                    .map(|&source| squared((row, col), (source.0 as u16, source.1 as u16)))
                    .min()
                    .unwrap();

                assert_eq!(
                    squared((row, col), reported),
                    best,
                    "cell ({row}, {col}) got a non-minimal target {reported:?}"
                );
            }
        }
    }

    #[test]
    fn ties_resolve_identically_across_runs() {
        let side = 11;
        let sources = [(5, 0), (5, 10), (0, 5), (10, 5)];
        let first = solve(side, &sources).unwrap();
        let second = solve(side, &sources).unwrap();
        assert_eq!(first, second);
    }
}
