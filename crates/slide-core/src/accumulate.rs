//! Risk surface accumulation.
//!
//! Sums the per-factor weighted grids into one cumulative risk surface with
//! a pairwise left fold, holding only the running accumulator so memory
//! stays bounded at two grids regardless of factor count.

use crate::error::{Result, SlideError};
use crate::grid::Grid;

/// Cell-wise sum of two pixel-aligned grids. Nodata propagates: a nodata
/// cell on either side stays nodata in the output.
pub fn add(a: &Grid, b: &Grid) -> Result<Grid> {
    if !a.same_shape(b) {
        return Err(SlideError::shape_mismatch(a, b));
    }
    let mut out = a.clone();
    for (v, &w) in out.data.iter_mut().zip(b.data.iter()) {
        *v += w;
    }
    Ok(out)
}

/// Fold a non-empty sequence of grids into their cell-wise sum.
pub fn accumulate(grids: &[Grid]) -> Result<Grid> {
    accumulate_with(grids, |_, _| {})
}

/// `accumulate`, invoking `on_step(step, partial_sum)` after each addition
/// (step counts from 1) so callers can persist the intermediate surfaces.
pub fn accumulate_with<F>(grids: &[Grid], mut on_step: F) -> Result<Grid>
where
    F: FnMut(usize, &Grid),
{
    let (first, rest) = grids
        .split_first()
        .ok_or_else(|| SlideError::DegenerateInput("no grids to accumulate".into()))?;
    let mut sum = first.clone();
    for (i, grid) in rest.iter().enumerate() {
        sum = add(&sum, grid)?;
        on_step(i + 1, &sum);
    }
    Ok(sum)
}
