//! Region growing and connected component labeling for 3D masks.
//!
//! Volumes are `ndarray` arrays of shape `(depth, height, width)` indexed
//! `[z, y, x]`. Any voxel value greater than zero counts as foreground.
//!
//! ```
//! use ndarray::Array3;
//! use regionnii::{grow, largest_component, Connectivity, Voxel};
//!
//! let mut mask = Array3::<u8>::zeros((1, 1, 5));
//! mask[[0, 0, 0]] = 1;
//! mask[[0, 0, 2]] = 1;
//! mask[[0, 0, 3]] = 1;
//!
//! let region = grow(mask.view(), &[Voxel::new(0, 0, 0)], Connectivity::Face6);
//! assert_eq!(region.as_slice().unwrap(), &[1, 0, 0, 0, 0]);
//!
//! let largest = largest_component(mask.view(), Connectivity::Face6).unwrap();
//! assert_eq!(largest.as_slice().unwrap(), &[0, 0, 1, 1, 0]);
//! ```

pub mod cli;
pub mod common;
pub mod connectivity;
pub mod error;
pub mod grow;
pub mod label;
pub mod nifti_io;
pub mod ops;
pub mod pipeline;

pub use common::{BinaryVolume, Dims, Foreground, LabelVolume, Voxel};
pub use connectivity::Connectivity;
pub use error::{SegmentError, SegmentResult};
pub use grow::{grow, grow_with_count};
pub use label::{label, largest_component, Component, Labeling};
pub use ops::{binarize, count_foreground, subtract};
pub use pipeline::{isolate_remainder, Isolation};
