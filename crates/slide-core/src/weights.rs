//! Statistical Index (Weight-of-Evidence) weights.
//!
//! For each class of a factor raster the weight is the natural log of the
//! class landslide density over the study-area landslide density:
//!
//!   w_c = ln( (n_c / t_c) / (L / T) )
//!
//! where n_c = landslide pixels in class c, t_c = total pixels in class c,
//! L = landslide pixels in the whole study area and T = total pixels across
//! all classes of the factor. Classes with no landslide intersection get a
//! small pseudo-count in place of n_c; classes entirely outside the analysis
//! mask get weight 0 and drop out of the summed risk surface.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, SlideError};
use crate::reclass::{ReclassEntry, ReclassTable};
use crate::table::ClassLabel;

/// Tuning knobs for the weight computation.
#[derive(Debug, Clone, Copy)]
pub struct SiParams {
    /// Substituted for n_c when a class has zero landslide pixels, keeping
    /// the logarithm finite. Historical deployments used both 0.1 and
    /// 0.001; 0.1 is the documented default.
    pub pseudo_count: f64,
}

impl Default for SiParams {
    fn default() -> Self {
        Self { pseudo_count: 0.1 }
    }
}

/// Weight for a single class, in class-universe order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassWeight {
    pub class: ClassLabel,
    pub weight: f64,
}

/// Compute one weight per universe class, preserving universe order.
///
/// `landslide_px` maps class -> landslide pixel count for this factor,
/// `class_px` maps class -> total pixel count, `landslide_total` is the
/// study-area landslide pixel count. Zero-count entries in `landslide_px`
/// are treated the same as absent ones (pseudo-count substitution), since
/// both mean "no landslide intersection".
pub fn compute_weights(
    landslide_px: &BTreeMap<ClassLabel, f64>,
    class_px: &BTreeMap<ClassLabel, f64>,
    landslide_total: f64,
    universe: &[ClassLabel],
    params: &SiParams,
) -> Result<Vec<ClassWeight>> {
    if landslide_total <= 0.0 {
        return Err(SlideError::DegenerateInput(
            "no landslide pixels in the study area".into(),
        ));
    }
    let area_total: f64 = class_px.values().sum();

    let mut out = Vec::with_capacity(universe.len());
    for &class in universe {
        let landslide_count = landslide_px.get(&class).copied().filter(|&n| n > 0.0);
        let weight = match landslide_count {
            Some(n) => {
                let t = class_px.get(&class).copied().ok_or(SlideError::MissingClass {
                    class,
                    table: "class pixel",
                })?;
                density_ratio(n, t, landslide_total, area_total, class)?.ln()
            }
            None => match class_px.get(&class) {
                Some(&t) => {
                    density_ratio(params.pseudo_count, t, landslide_total, area_total, class)?.ln()
                }
                // Class never occurs inside the analysis mask.
                None => 0.0,
            },
        };
        out.push(ClassWeight { class, weight });
    }
    Ok(out)
}

/// (n/t) / (L/T) with degenerate-denominator guards.
fn density_ratio(
    n: f64,
    t: f64,
    landslide_total: f64,
    area_total: f64,
    class: ClassLabel,
) -> Result<f64> {
    if t <= 0.0 {
        return Err(SlideError::DegenerateInput(format!(
            "class {class} has a non-positive pixel count"
        )));
    }
    if area_total <= 0.0 {
        return Err(SlideError::DegenerateInput(
            "factor raster has zero total pixels".into(),
        ));
    }
    Ok((n / t) / (landslide_total / area_total))
}

/// Exact-match reclassification table replacing each class value with its
/// weight, in the same order the weights were computed.
pub fn weight_reclass_table(weights: &[ClassWeight]) -> ReclassTable {
    ReclassTable::new(
        weights
            .iter()
            .map(|w| ReclassEntry::exact(w.class as f64, w.weight))
            .collect(),
    )
}
