//! Voxelwise mask algebra.

use ndarray::{ArrayView3, Zip};

use crate::common::{BinaryVolume, Foreground};
use crate::error::{SegmentError, SegmentResult};

fn check_dims<A, B>(a: &ArrayView3<'_, A>, b: &ArrayView3<'_, B>) -> SegmentResult<()> {
    if a.dim() != b.dim() {
        return Err(SegmentError::DimensionMismatch {
            expected: a.dim(),
            found: b.dim(),
        });
    }
    Ok(())
}

/// Foreground of `mask` minus the foreground of `region`, as a new volume.
pub fn subtract<T: Foreground, R: Foreground>(
    mask: ArrayView3<'_, T>,
    region: ArrayView3<'_, R>,
) -> SegmentResult<BinaryVolume> {
    check_dims(&mask, &region)?;
    Ok(Zip::from(&mask)
        .and(&region)
        .map_collect(|m, r| u8::from(m.is_foreground() && !r.is_foreground())))
}

/// 1 for every foreground voxel, 0 elsewhere.
pub fn binarize<T: Foreground>(mask: ArrayView3<'_, T>) -> BinaryVolume {
    mask.mapv(|v| u8::from(v.is_foreground()))
}

pub fn count_foreground<T: Foreground>(mask: ArrayView3<'_, T>) -> usize {
    mask.iter().filter(|v| v.is_foreground()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr3, Array3};

    #[test]
    fn test_subtract() {
        let mask = arr3(&[[[1.0, 2.0, 0.0], [0.5, 0.0, 3.0]]]);
        let region = arr3(&[[[1u8, 0, 1], [0, 0, 1]]]);
        let out = subtract(mask.view(), region.view()).unwrap();
        assert_eq!(out, arr3(&[[[0u8, 1, 0], [1, 0, 0]]]));
        // input untouched
        assert_eq!(mask[[0, 0, 1]], 2.0);
    }

    #[test]
    fn test_subtract_dimension_mismatch() {
        let mask = Array3::<u8>::ones((2, 3, 4));
        let region = Array3::<u8>::ones((2, 4, 3));
        assert_eq!(
            subtract(mask.view(), region.view()),
            Err(SegmentError::DimensionMismatch {
                expected: (2, 3, 4),
                found: (2, 4, 3),
            })
        );
    }

    #[test]
    fn test_binarize_and_count() {
        let mask = arr3(&[[[0i32, -2, 5], [7, 0, 1]]]);
        assert_eq!(binarize(mask.view()), arr3(&[[[0u8, 0, 1], [1, 0, 1]]]));
        assert_eq!(count_foreground(mask.view()), 3);
    }
}
