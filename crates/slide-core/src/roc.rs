//! ROC curve evaluation of a risk surface.
//!
//! Sweeps a threshold across the risk grid's value range, binarizes the
//! surface at each step and cross-tabulates the prediction against the
//! landslide ground truth. The sweep tests `iterations` interior thresholds:
//! step = (max - min) / (iterations + 1), thresholds min + k*step for
//! k = 1..=iterations, so neither min nor max is ever tested (both would
//! produce an all-one or all-zero prediction).

use serde::Serialize;

use crate::error::{Result, SlideError};
use crate::grid::Grid;
use crate::reclass::{RangeMode, ReclassEntry, ReclassTable};
use crate::table::ClassLabel;
use crate::zonal::{class_pixel_counts, zonal_sum};

/// One point of the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub tpr: f64,
    pub fpr: f64,
}

/// Binarize `risk` at `threshold`: cells below the threshold become 0,
/// cells at or above it become 1. Nodata stays nodata.
pub fn threshold_prediction(risk: &Grid, threshold: f64) -> Grid {
    let table = ReclassTable::new(vec![
        ReclassEntry::range(None, Some(threshold), 0.0),
        ReclassEntry::range(Some(threshold), None, 1.0),
    ]);
    table.apply(risk, RangeMode::HalfOpen, f32::NAN)
}

/// Evaluate the ROC curve of `risk` against the binary `truth` grid.
/// Points come back in threshold-increasing order.
pub fn compute_roc(risk: &Grid, truth: &Grid, iterations: usize) -> Result<Vec<RocPoint>> {
    if !risk.same_shape(truth) {
        return Err(SlideError::shape_mismatch(risk, truth));
    }
    if iterations == 0 {
        return Err(SlideError::DegenerateInput("zero-iteration ROC sweep".into()));
    }
    let (min, max) = risk
        .value_range()
        .ok_or_else(|| SlideError::DegenerateInput("risk grid has no valid cells".into()))?;
    if max <= min {
        return Err(SlideError::DegenerateInput(
            "flat risk surface, nothing to threshold".into(),
        ));
    }

    let step = (max as f64 - min as f64) / (iterations as f64 + 1.0);
    let mut points = Vec::with_capacity(iterations);
    for k in 1..=iterations {
        let threshold = min as f64 + step * k as f64;
        let prediction = threshold_prediction(risk, threshold);

        // Landslide pixels per prediction class, and the prediction's own
        // class sizes; classes eliminated by the threshold default to 0.
        let landslide_by_class = zonal_sum(truth, &prediction)?;
        let class_sizes = class_pixel_counts(&prediction);
        let count = |table: &std::collections::BTreeMap<ClassLabel, f64>, class: ClassLabel| {
            table.get(&class).copied().unwrap_or(0.0)
        };

        let tp = count(&landslide_by_class, 1);
        let false_neg = count(&landslide_by_class, 0);
        let false_pos = count(&class_sizes, 1) - tp;
        let tn = count(&class_sizes, 0) - false_neg;

        if tp + false_neg <= 0.0 {
            return Err(SlideError::DegenerateInput(
                "ground truth contains no landslide pixels".into(),
            ));
        }
        if false_pos + tn <= 0.0 {
            return Err(SlideError::DegenerateInput(
                "ground truth contains no stable pixels".into(),
            ));
        }

        points.push(RocPoint {
            threshold,
            tpr: tp / (tp + false_neg),
            fpr: false_pos / (false_pos + tn),
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_iteration_tests_the_midpoint() {
        let risk = Grid::from_values(2, 1, vec![0.0, 10.0]);
        let truth = Grid::from_values(2, 1, vec![0.0, 1.0]);
        let points = compute_roc(&risk, &truth, 1).unwrap();
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].threshold, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn sweep_excludes_min_and_max() {
        let risk = Grid::from_values(2, 1, vec![0.0, 8.0]);
        let truth = Grid::from_values(2, 1, vec![1.0, 0.0]);
        let points = compute_roc(&risk, &truth, 3).unwrap();
        let thresholds: Vec<f64> = points.iter().map(|p| p.threshold).collect();
        assert_eq!(thresholds, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn prediction_is_inclusive_at_the_threshold() {
        let risk = Grid::from_values(3, 1, vec![1.0, 2.0, 3.0]);
        let pred = threshold_prediction(&risk, 2.0);
        assert_eq!(pred.data, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn rates_match_hand_computed_cross_tab() {
        // risk [1,2,3,4], truth [1,0,1,0], thresholds 1.75 / 2.5 / 3.25
        let risk = Grid::from_values(4, 1, vec![1.0, 2.0, 3.0, 4.0]);
        let truth = Grid::from_values(4, 1, vec![1.0, 0.0, 1.0, 0.0]);
        let points = compute_roc(&risk, &truth, 3).unwrap();

        // t=1.75: predicted positive {2,3,4}: tp=1 fn=1 fp=2 tn=0
        assert_relative_eq!(points[0].tpr, 0.5);
        assert_relative_eq!(points[0].fpr, 1.0);
        // t=2.5: predicted positive {3,4}: tp=1 fn=1 fp=1 tn=1
        assert_relative_eq!(points[1].tpr, 0.5);
        assert_relative_eq!(points[1].fpr, 0.5);
        // t=3.25: predicted positive {4}: tp=0 fn=2 fp=1 tn=2
        assert_relative_eq!(points[2].tpr, 0.0);
        assert_relative_eq!(points[2].fpr, 1.0 / 3.0);
    }

    #[test]
    fn rates_are_non_increasing_in_threshold() {
        let risk = Grid::from_values(4, 1, vec![1.0, 2.0, 3.0, 4.0]);
        let truth = Grid::from_values(4, 1, vec![1.0, 0.0, 1.0, 0.0]);
        let points = compute_roc(&risk, &truth, 5).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].tpr <= pair[0].tpr, "TPR must not rise with the threshold");
            assert!(pair[1].fpr <= pair[0].fpr, "FPR must not rise with the threshold");
        }
    }

    #[test]
    fn missing_cross_tab_class_defaults_to_zero() {
        // All predicted-positive cells have nodata truth, so the cross-tab
        // table has no entry for class 1; tp must default to 0, not fail.
        let risk = Grid::from_values(4, 1, vec![1.0, 2.0, 3.0, 4.0]);
        let truth = Grid::from_values(4, 1, vec![1.0, 0.0, f32::NAN, f32::NAN]);
        let points = compute_roc(&risk, &truth, 1).unwrap();
        // threshold 2.5: tp=0, fn=1, fp=2-0=2, tn=2-1=1
        assert_relative_eq!(points[0].tpr, 0.0);
        assert_relative_eq!(points[0].fpr, 2.0 / 3.0);
    }

    #[test]
    fn flat_surface_is_degenerate() {
        let risk = Grid::filled(2, 2, 3.0);
        let truth = Grid::from_values(2, 2, vec![1.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            compute_roc(&risk, &truth, 3),
            Err(SlideError::DegenerateInput(_))
        ));
    }

    #[test]
    fn truth_without_landslides_is_degenerate() {
        let risk = Grid::from_values(2, 2, vec![0.0, 1.0, 2.0, 3.0]);
        let truth = Grid::filled(2, 2, 0.0);
        assert!(matches!(
            compute_roc(&risk, &truth, 2),
            Err(SlideError::DegenerateInput(_))
        ));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let risk = Grid::filled(2, 2, 0.0);
        let truth = Grid::filled(3, 2, 0.0);
        assert!(matches!(
            compute_roc(&risk, &truth, 2),
            Err(SlideError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn nodata_cells_are_excluded_from_the_cross_tab() {
        let risk = Grid::from_values(4, 1, vec![1.0, 2.0, 3.0, f32::NAN]);
        let truth = Grid::from_values(4, 1, vec![1.0, 0.0, 1.0, 1.0]);
        let points = compute_roc(&risk, &truth, 1).unwrap();
        // The nodata cell never reaches the counts. Threshold 2.0:
        // risk1->0 (fn), risk2->1 (fp), risk3->1 (tp); tn=0
        assert_relative_eq!(points[0].tpr, 0.5);
        assert_relative_eq!(points[0].fpr, 1.0);
    }
}
