//! Zonal statistics over in-memory grids.
//!
//! Local stand-ins for the external toolkit's zonal-stats and unique-values
//! services: the ROC sweep cross-tabulates prediction grids against ground
//! truth through these, and the pipeline tool uses them to derive the
//! per-class pixel tables that a QGIS deployment would read back from CSV.
//! Zone identity is the truncated integer value of the zone cell.

use std::collections::BTreeMap;

use crate::error::{Result, SlideError};
use crate::grid::Grid;
use crate::table::{class_label, ClassLabel};

/// Sum of `values` cells per zone of `zones`. Cells where either grid is
/// nodata are skipped. For a 0/1 indicator grid the sum is a pixel count.
pub fn zonal_sum(values: &Grid, zones: &Grid) -> Result<BTreeMap<ClassLabel, f64>> {
    if !values.same_shape(zones) {
        return Err(SlideError::shape_mismatch(values, zones));
    }
    let mut sums: BTreeMap<ClassLabel, f64> = BTreeMap::new();
    for (&v, &z) in values.data.iter().zip(zones.data.iter()) {
        if !v.is_finite() || !z.is_finite() {
            continue;
        }
        *sums.entry(class_label(z as f64)).or_insert(0.0) += v as f64;
    }
    Ok(sums)
}

/// Cell count per class of a classified grid, nodata excluded.
/// Counts are f64 to match the toolkit's CSV statistic column.
pub fn class_pixel_counts(grid: &Grid) -> BTreeMap<ClassLabel, f64> {
    let mut counts: BTreeMap<ClassLabel, f64> = BTreeMap::new();
    for &v in &grid.data {
        if !v.is_finite() {
            continue;
        }
        *counts.entry(class_label(v as f64)).or_insert(0.0) += 1.0;
    }
    counts
}

/// Distinct classes in row-major discovery order, nodata excluded.
/// Order is preserved because downstream reports are ordered by it.
pub fn unique_values(grid: &Grid) -> Vec<ClassLabel> {
    let mut seen = std::collections::BTreeSet::new();
    let mut out = Vec::new();
    for &v in &grid.data {
        if !v.is_finite() {
            continue;
        }
        let class = class_label(v as f64);
        if seen.insert(class) {
            out.push(class);
        }
    }
    out
}
