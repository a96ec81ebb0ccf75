//! Persisted text artifacts.
//!
//! Formats are wire contract with the legacy toolchain: the per-factor
//! weight report is a single line of `"<class>: <weight>, "` repeats
//! (trailing separator included), the ROC report is one `tpr,fpr` line per
//! threshold. Output locations are always explicit parameters.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::roc::RocPoint;
use crate::weights::ClassWeight;

/// Render the weight report body.
pub fn format_weight_report(weights: &[ClassWeight]) -> String {
    let mut out = String::new();
    for w in weights {
        let _ = write!(out, "{}: {}, ", w.class, w.weight);
    }
    out
}

/// Render the ROC report body.
pub fn format_roc_report(points: &[RocPoint]) -> String {
    let mut out = String::new();
    for p in points {
        let _ = writeln!(out, "{},{}", p.tpr, p.fpr);
    }
    out
}

/// Write `<factor>_si.txt` into `dir` and return its path.
pub fn write_weight_report(dir: &Path, factor: &str, weights: &[ClassWeight]) -> Result<PathBuf> {
    let path = dir.join(format!("{factor}_si.txt"));
    fs::write(&path, format_weight_report(weights))?;
    Ok(path)
}

/// Write the ROC curve to `path` (conventionally `roc.txt`).
pub fn write_roc_report(path: &Path, points: &[RocPoint]) -> Result<()> {
    fs::write(path, format_roc_report(points))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_report_repeats_class_colon_weight() {
        let weights = vec![
            ClassWeight { class: 0, weight: 1.5 },
            ClassWeight { class: 2, weight: -0.25 },
        ];
        assert_eq!(format_weight_report(&weights), "0: 1.5, 2: -0.25, ");
    }

    #[test]
    fn empty_weight_report_is_empty() {
        assert_eq!(format_weight_report(&[]), "");
    }

    #[test]
    fn roc_report_is_one_tpr_fpr_pair_per_line() {
        let points = vec![
            RocPoint { threshold: 2.0, tpr: 1.0, fpr: 0.5 },
            RocPoint { threshold: 4.0, tpr: 0.75, fpr: 0.25 },
        ];
        assert_eq!(format_roc_report(&points), "1,0.5\n0.75,0.25\n");
    }
}
