//! Error types for the sims-raster crate.

/// Error type for all fallible operations in the sims-raster crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RasterError {
    /// Returned when an evaluator is created for an empty grid.
    #[error("pixel grid must contain at least one pixel")]
    EmptyGrid,

    /// Returned when a pixel image does not match the evaluator grid.
    #[error("pixel count mismatch: evaluator grid has {expected} pixels, image has {got}")]
    PixelCountMismatch {
        /// Number of pixels in the evaluator grid.
        expected: usize,
        /// Number of pixels carried by the image.
        got: usize,
    },
}
