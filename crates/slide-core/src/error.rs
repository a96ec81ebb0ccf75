use crate::table::ClassLabel;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlideError>;

/// Error taxonomy for the susceptibility pipeline. Every computation error
/// aborts the whole run; partial outputs are not trusted.
#[derive(Debug, Error)]
pub enum SlideError {
    /// A CSV data row whose class id or statistic failed numeric parsing.
    #[error("malformed record in {path} at line {line}")]
    MalformedRecord { path: String, line: usize },

    /// A class referenced in one table is absent from another where
    /// presence was assumed.
    #[error("class {class} missing from {table} table")]
    MissingClass { class: ClassLabel, table: &'static str },

    /// Grids fed to a pixel-aligned operation differ in geometry.
    #[error("grid shape mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// Input that makes the requested computation meaningless
    /// (empty grid list, zero landslide pixels, flat risk surface).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

impl SlideError {
    /// Shape-mismatch constructor used by every pixel-aligned operation.
    pub(crate) fn shape_mismatch(expected: &crate::grid::Grid, actual: &crate::grid::Grid) -> Self {
        SlideError::DimensionMismatch {
            expected_width: expected.width,
            expected_height: expected.height,
            actual_width: actual.width,
            actual_height: actual.height,
        }
    }
}
