//! Reclassification tables.
//!
//! Two table shapes feed the same apply operation: computed weight tables
//! (one exact-match entry per class, `low == high`) and hand-authored
//! discretization tables that bucket continuous rasters into classes. An
//! unbounded side is `Bound::Open` rather than the empty-string sentinel the
//! toolkit's table format uses.

use crate::grid::Grid;

/// One side of a reclassification interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Unbounded (reads as -inf on the low side, +inf on the high side).
    Open,
    Value(f64),
}

/// Interval boundary convention for a whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// `low <= x < high`. The single convention for discretization tables.
    HalfOpen,
    /// `low <= x <= high`. Used for weight tables, where `low == high`
    /// pins exactly one class value.
    Closed,
}

/// (low, high, replacement) triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReclassEntry {
    pub low: Bound,
    pub high: Bound,
    pub value: f64,
}

impl ReclassEntry {
    /// Interval entry; `None` leaves that side unbounded.
    pub fn range(low: Option<f64>, high: Option<f64>, value: f64) -> Self {
        let bound = |b: Option<f64>| b.map_or(Bound::Open, Bound::Value);
        Self {
            low: bound(low),
            high: bound(high),
            value,
        }
    }

    /// Exact-match entry (`low == high == at`), for use with `RangeMode::Closed`.
    pub fn exact(at: f64, value: f64) -> Self {
        Self {
            low: Bound::Value(at),
            high: Bound::Value(at),
            value,
        }
    }

    fn matches(&self, x: f64, mode: RangeMode) -> bool {
        let low_ok = match self.low {
            Bound::Open => true,
            Bound::Value(lo) => lo <= x,
        };
        let high_ok = match (self.high, mode) {
            (Bound::Open, _) => true,
            (Bound::Value(hi), RangeMode::HalfOpen) => x < hi,
            (Bound::Value(hi), RangeMode::Closed) => x <= hi,
        };
        low_ok && high_ok
    }
}

/// Ordered reclassification table. First matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct ReclassTable {
    pub entries: Vec<ReclassEntry>,
}

impl ReclassTable {
    pub fn new(entries: Vec<ReclassEntry>) -> Self {
        Self { entries }
    }

    /// Replacement value for `x`, or None when no entry matches.
    pub fn lookup(&self, x: f64, mode: RangeMode) -> Option<f64> {
        self.entries.iter().find(|e| e.matches(x, mode)).map(|e| e.value)
    }

    /// Reclassify a grid cell by cell. Unmatched cells take `nodata`;
    /// nodata cells in the input stay untouched.
    pub fn apply(&self, grid: &Grid, mode: RangeMode, nodata: f32) -> Grid {
        let mut out = grid.clone();
        for v in &mut out.data {
            if !v.is_finite() {
                continue;
            }
            *v = match self.lookup(*v as f64, mode) {
                Some(replacement) => replacement as f32,
                None => nodata,
            };
        }
        out
    }
}

/// Fixed classification break tables for the continuous input factors.
/// The cut points define class identity for everything downstream, so they
/// are contract, not tuning knobs. All tables use `RangeMode::HalfOpen`.
pub mod breaks {
    use super::{ReclassEntry, ReclassTable};

    fn table(rows: &[(Option<f64>, Option<f64>, f64)]) -> ReclassTable {
        ReclassTable::new(
            rows.iter().map(|&(lo, hi, v)| ReclassEntry::range(lo, hi, v)).collect(),
        )
    }

    /// Topographic wetness index.
    pub fn twi() -> ReclassTable {
        table(&[
            (None, Some(-7.0), 0.0),
            (Some(-7.0), Some(0.0), 1.0),
            (Some(0.0), Some(7.0), 2.0),
            (Some(7.0), None, 3.0),
        ])
    }

    /// Stream power index.
    pub fn spi() -> ReclassTable {
        table(&[
            (None, Some(250.0), 0.0),
            (Some(250.0), Some(500.0), 1.0),
            (Some(500.0), Some(750.0), 2.0),
            (Some(750.0), Some(1000.0), 3.0),
            (Some(1000.0), None, 4.0),
        ])
    }

    /// Slope in degrees. Class 5 is intentionally absent: the legacy class
    /// scheme jumps from 4 to 6 above 50 degrees.
    pub fn slope() -> ReclassTable {
        table(&[
            (None, Some(10.0), 0.0),
            (Some(10.0), Some(20.0), 1.0),
            (Some(20.0), Some(30.0), 2.0),
            (Some(30.0), Some(40.0), 3.0),
            (Some(40.0), Some(50.0), 4.0),
            (Some(50.0), None, 6.0),
        ])
    }

    /// Aspect in degrees, eight 45-degree octants clockwise from north.
    pub fn aspect() -> ReclassTable {
        let rows: Vec<(Option<f64>, Option<f64>, f64)> = (0..8)
            .map(|i| {
                (
                    Some(i as f64 * 45.0),
                    Some((i + 1) as f64 * 45.0),
                    i as f64,
                )
            })
            .collect();
        table(&rows)
    }

    /// Plan or profile curvature: concave (negative) vs convex.
    pub fn curvature() -> ReclassTable {
        table(&[(None, Some(0.0), 0.0), (Some(0.0), None, 1.0)])
    }

    /// Euclidean distance to the nearest road, metres.
    pub fn road_distance() -> ReclassTable {
        table(&[
            (None, Some(30.0), 0.0),
            (Some(30.0), Some(60.0), 1.0),
            (Some(60.0), Some(90.0), 2.0),
            (Some(90.0), None, 3.0),
        ])
    }

    /// Elevation above sea level, metres.
    pub fn elevation() -> ReclassTable {
        table(&[
            (None, Some(500.0), 0.0),
            (Some(500.0), Some(1000.0), 1.0),
            (Some(1000.0), Some(1500.0), 2.0),
            (Some(1500.0), Some(2000.0), 3.0),
            (Some(2000.0), None, 4.0),
        ])
    }
}
