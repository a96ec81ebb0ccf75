use serde::{Deserialize, Serialize};

/// A 2D raster grid storing cell values as f32, row-major.
/// Bounds are in map units (metres for projected data); coordinate math uses f64.
/// Non-finite cells (NaN) are nodata and are skipped by every statistic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// Row-major cell values.
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Grid {
    /// Create a new Grid filled with the given value.
    pub fn new(width: usize, height: usize, min_x: f64, max_x: f64, min_y: f64, max_y: f64, fill: f32) -> Self {
        Self {
            data: vec![fill; width * height],
            width,
            height,
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Create a Grid with unit-square bounds, filled with the given value.
    pub fn filled(width: usize, height: usize, fill: f32) -> Self {
        Self::new(width, height, 0.0, 1.0, 0.0, 1.0, fill)
    }

    /// Build a Grid with unit-square bounds directly from row-major values.
    /// Panics if `values.len()` is not `width * height`.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Self {
        assert_eq!(values.len(), width * height, "value count must match grid shape");
        Self {
            data: values,
            width,
            height,
            min_x: 0.0,
            max_x: 1.0,
            min_y: 0.0,
            max_y: 1.0,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: f32) {
        self.data[row * self.width + col] = val;
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// True if `other` covers the same pixel geometry.
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// (min, max) over finite cells. None when every cell is nodata.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut range: Option<(f32, f32)> = None;
        for &v in &self.data {
            if !v.is_finite() {
                continue;
            }
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut g = Grid::filled(4, 3, 0.0);
        g.set(2, 1, 7.5);
        assert_eq!(g.get(2, 1), 7.5);
        assert_eq!(g.get(0, 0), 0.0);
    }

    #[test]
    fn value_range_skips_nodata() {
        let g = Grid::from_values(2, 2, vec![3.0, f32::NAN, -1.0, 2.0]);
        assert_eq!(g.value_range(), Some((-1.0, 3.0)));
    }

    #[test]
    fn value_range_all_nodata_is_none() {
        let g = Grid::filled(2, 2, f32::NAN);
        assert!(g.value_range().is_none());
    }

    #[test]
    fn same_shape_ignores_bounds() {
        let a = Grid::filled(3, 2, 0.0);
        let b = Grid::new(3, 2, 100.0, 200.0, 100.0, 200.0, 1.0);
        assert!(a.same_shape(&b));
        let c = Grid::filled(2, 3, 0.0);
        assert!(!a.same_shape(&c));
    }
}
