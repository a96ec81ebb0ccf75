//! Landslide susceptibility mapping with the Statistical Index method.
//!
//! The crate covers the algorithmic core of a susceptibility pipeline:
//! zonal-statistics table ingestion, per-class log-likelihood weights,
//! reclassification tables, risk surface accumulation and ROC evaluation.
//! Raster file formats, reprojection and vector geometry stay with the
//! external geoprocessing toolkit; grids cross the boundary as serialized
//! [`Grid`] values and as the toolkit's zonal-statistics CSV tables.

pub mod accumulate;
pub mod error;
pub mod grid;
pub mod reclass;
pub mod report;
pub mod roc;
pub mod table;
pub mod weights;
pub mod zonal;

pub use accumulate::{accumulate, accumulate_with, add};
pub use error::{Result, SlideError};
pub use grid::Grid;
pub use reclass::{Bound, RangeMode, ReclassEntry, ReclassTable};
pub use roc::{compute_roc, threshold_prediction, RocPoint};
pub use table::{class_label, ClassLabel};
pub use weights::{compute_weights, weight_reclass_table, ClassWeight, SiParams};
