//! Grow, subtract, keep largest.
//!
//! Used to isolate one structure from a mask that also contains its
//! neighbors, e.g. a single vertebra: seeds are placed in the neighboring
//! structures, everything reachable from them is removed, and the largest
//! piece of what remains is kept.

use log::debug;
use ndarray::ArrayView3;

use crate::common::{BinaryVolume, Foreground, Voxel};
use crate::connectivity::Connectivity;
use crate::error::SegmentResult;
use crate::grow::grow_with_count;
use crate::label::{label, Component};
use crate::ops::subtract;

/// Intermediate and final volumes of [`isolate_remainder`].
#[derive(Debug, Clone)]
pub struct Isolation {
    /// Voxels reached from the seeds.
    pub grown: BinaryVolume,
    /// Mask with the grown region removed.
    pub remainder: BinaryVolume,
    /// Largest connected component of the remainder.
    pub isolated: BinaryVolume,
    /// The component kept in `isolated`.
    pub component: Component,
    /// Number of components the remainder split into.
    pub component_count: usize,
}

pub fn isolate_remainder<T: Foreground>(
    mask: ArrayView3<'_, T>,
    seeds: &[Voxel],
    connectivity: Connectivity,
) -> SegmentResult<Isolation> {
    let (grown, reached) = grow_with_count(mask, seeds, connectivity);
    let remainder = subtract(mask, grown.view())?;
    let labeling = label(remainder.view(), connectivity);
    let component = labeling.largest()?;
    debug!(
        "removed {} grown voxels, kept component {} ({} voxels) of {}",
        reached,
        component.label,
        component.size,
        labeling.len()
    );
    let isolated = labeling.component_mask(component.label);
    Ok(Isolation {
        grown,
        remainder,
        isolated,
        component,
        component_count: labeling.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SegmentError;
    use ndarray::Array3;

    #[test]
    fn test_seeds_covering_everything() {
        let mask = Array3::<u8>::ones((3, 3, 3));
        let err = isolate_remainder(mask.view(), &[Voxel::new(1, 1, 1)], Connectivity::Face6);
        assert_eq!(err.unwrap_err(), SegmentError::EmptyMask);
    }

    #[test]
    fn test_no_seeds_keeps_largest() {
        let mut mask = Array3::<u8>::zeros((1, 1, 6));
        mask[[0, 0, 0]] = 1;
        mask[[0, 0, 2]] = 1;
        mask[[0, 0, 3]] = 1;
        let iso = isolate_remainder(mask.view(), &[], Connectivity::Vertex26).unwrap();
        assert_eq!(iso.component_count, 2);
        assert_eq!(iso.component, Component { label: 2, size: 2 });
        assert_eq!(iso.isolated.as_slice().unwrap(), &[0, 0, 1, 1, 0, 0]);
    }
}
