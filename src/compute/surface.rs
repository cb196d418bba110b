//! Dense landscape surface over a square coordinate grid.

use rayon::prelude::*;

use super::Landscape;
use crate::schema::Bounds;

/// Errors raised while evaluating a surface.
#[derive(Debug, thiserror::Error)]
pub enum LandscapeError {
    #[error("Landscape is not finite at ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
    #[error("Grid needs at least 2 points per axis (got {0})")]
    DegenerateGrid(usize),
}

/// Evenly spaced evaluation points spanning `bounds` on both axes,
/// endpoints included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateGrid {
    pub bounds: Bounds,
    /// Points per axis.
    pub resolution: usize,
}

impl CoordinateGrid {
    pub fn new(bounds: Bounds, resolution: usize) -> Self {
        Self { bounds, resolution }
    }

    /// Coordinate of the `i`-th point along an axis.
    #[inline]
    pub fn coordinate(&self, i: usize) -> f64 {
        if i + 1 >= self.resolution {
            return self.bounds.max;
        }
        let step = self.bounds.span() / (self.resolution - 1) as f64;
        self.bounds.min + i as f64 * step
    }

    /// All coordinates along one axis.
    pub fn axis(&self) -> Vec<f64> {
        (0..self.resolution).map(|i| self.coordinate(i)).collect()
    }
}

/// Landscape values on a [`CoordinateGrid`].
///
/// Stored row-major: row `j` holds `y = grid.coordinate(j)` with `x` running
/// along the row, so row 0 is the bottom edge of the domain.
#[derive(Debug, Clone)]
pub struct Surface {
    grid: CoordinateGrid,
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl Surface {
    /// Evaluate `landscape` at every grid point.
    ///
    /// Rows are evaluated in parallel; points are independent of each other.
    /// Any non-finite value aborts the evaluation instead of reaching the
    /// rendered heatmap.
    pub fn evaluate(grid: CoordinateGrid, landscape: Landscape) -> Result<Self, LandscapeError> {
        let n = grid.resolution;
        if n < 2 {
            return Err(LandscapeError::DegenerateGrid(n));
        }
        let axis = grid.axis();
        let mut values = vec![0.0f64; n * n];

        values
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(j, row)| {
                let y = axis[j];
                for (v, &x) in row.iter_mut().zip(axis.iter()) {
                    *v = landscape.evaluate(x, y);
                }
            });

        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(LandscapeError::NonFinite {
                x: axis[i % n],
                y: axis[i / n],
            });
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        log::debug!(
            "Evaluated {} over {}x{} grid, range [{:.6e}, {:.6e}]",
            landscape.name(),
            n,
            n,
            min,
            max
        );

        Ok(Self {
            grid,
            values,
            min,
            max,
        })
    }

    pub fn grid(&self) -> &CoordinateGrid {
        &self.grid
    }

    /// Points per axis.
    pub fn resolution(&self) -> usize {
        self.grid.resolution
    }

    /// Raw row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at column `i` (x) and row `j` (y).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.grid.resolution + i]
    }

    /// Smallest value on the surface.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest value on the surface.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Value mapped to [0, 1] against the surface range.
    #[inline]
    pub fn normalized(&self, i: usize, j: usize) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            (self.get(i, j) - self.min) / range
        } else {
            0.0
        }
    }
}
