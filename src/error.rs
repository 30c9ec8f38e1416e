//! Error types for segmentation operations.

use thiserror::Error;

/// Result type for segmentation operations.
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Errors that can occur while growing, labeling or combining volumes.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SegmentError {
    /// Two volumes passed to one call have different shapes.
    #[error("dimension mismatch: expected {expected:?} (depth, height, width) but got {found:?}")]
    DimensionMismatch {
        /// Shape of the first volume.
        expected: (usize, usize, usize),
        /// Shape of the offending volume.
        found: (usize, usize, usize),
    },

    /// The mask has no foreground voxels, so there is no largest component.
    #[error("mask has no foreground voxels")]
    EmptyMask,
}
