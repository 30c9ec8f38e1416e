//! Connected component labeling.
//!
//! The whole foreground is scanned z, then y, then x. Each unlabeled
//! foreground voxel starts a new component which is flooded breadth-first,
//! so component ids follow scan order and are never reused.

use log::debug;
use ndarray::{Array3, ArrayView3, Zip};
use std::collections::VecDeque;

use crate::common::{unvisited_neighbor, BinaryVolume, Dims, Foreground, LabelVolume, Voxel};
use crate::connectivity::Connectivity;
use crate::error::{SegmentError, SegmentResult};

/// A labeled component and its voxel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub label: u32,
    pub size: usize,
}

/// Result of [`label`]: the label volume and one record per component.
///
/// `components[i].label == i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Labeling {
    pub labels: LabelVolume,
    pub components: Vec<Component>,
}

impl Labeling {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Total number of labeled voxels.
    pub fn foreground_count(&self) -> usize {
        self.components.iter().map(|c| c.size).sum()
    }

    /// The component with the most voxels; on ties the one found first.
    pub fn largest(&self) -> SegmentResult<Component> {
        let mut best: Option<Component> = None;
        for c in &self.components {
            match best {
                Some(b) if c.size <= b.size => {}
                _ => best = Some(*c),
            }
        }
        best.ok_or(SegmentError::EmptyMask)
    }

    /// Records ordered largest first, ties by label.
    pub fn sorted_by_size(&self) -> Vec<Component> {
        let mut sorted = self.components.clone();
        sorted.sort_by(|a, b| b.size.cmp(&a.size).then(a.label.cmp(&b.label)));
        sorted
    }

    /// 1 where the volume carries `label`, 0 elsewhere.
    pub fn component_mask(&self, label: u32) -> BinaryVolume {
        self.labels.mapv(|l| u8::from(l == label))
    }
}

/// Partitions the foreground of `mask` into connected components.
///
/// A mask without foreground gives a labeling with zero components; only
/// [`Labeling::largest`] and [`largest_component`] fail on it.
pub fn label<T: Foreground>(mask: ArrayView3<'_, T>, connectivity: Connectivity) -> Labeling {
    let dims = Dims::of(&mask);
    let offsets = connectivity.offsets();
    let mut labels: LabelVolume = Array3::zeros(dims.shape());
    let mut components = Vec::new();
    let mut queue = VecDeque::new();
    let mut next_label = 1u32;

    for z in 0..dims.depth {
        for y in 0..dims.height {
            for x in 0..dims.width {
                if !mask[[z, y, x]].is_foreground() || labels[[z, y, x]] != 0 {
                    continue;
                }
                let current = next_label;
                next_label += 1;

                labels[[z, y, x]] = current;
                queue.push_back(Voxel::new(x as i64, y as i64, z as i64));
                let mut size = 0usize;

                while let Some(v) = queue.pop_front() {
                    size += 1;
                    for &offset in &offsets {
                        if let Some((n, idx)) = unvisited_neighbor(&dims, &mask, &labels, v, offset)
                        {
                            labels[idx] = current;
                            queue.push_back(n);
                        }
                    }
                }

                components.push(Component {
                    label: current,
                    size,
                });
            }
        }
    }

    debug!(
        "labeled {} components covering {} of {} voxels ({}-connectivity, volume {})",
        components.len(),
        components.iter().map(|c| c.size).sum::<usize>(),
        dims.len(),
        connectivity,
        dims
    );
    Labeling { labels, components }
}

/// Keeps only the largest connected component of `mask`.
///
/// Fails with [`SegmentError::EmptyMask`] when `mask` has no foreground.
pub fn largest_component<T: Foreground>(
    mask: ArrayView3<'_, T>,
    connectivity: Connectivity,
) -> SegmentResult<BinaryVolume> {
    let labeling = label(mask, connectivity);
    let largest = labeling.largest()?;
    debug!(
        "largest component is {} with {} of {} voxels",
        largest.label,
        largest.size,
        labeling.foreground_count()
    );
    Ok(labeling.component_mask(largest.label))
}

/// Checks that every foreground voxel carries exactly one positive label.
pub fn is_partition<T: Foreground>(mask: ArrayView3<'_, T>, labeling: &Labeling) -> bool {
    if mask.dim() != labeling.labels.dim() {
        return false;
    }
    let mut ok = true;
    Zip::from(&mask)
        .and(&labeling.labels)
        .for_each(|m, &l| ok &= m.is_foreground() == (l != 0));
    ok && labeling.foreground_count() == mask.iter().filter(|v| v.is_foreground()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fills the box `[x0, x1) x [y0, y1) x [z0, z1)` with 1.
    fn fill(mask: &mut Array3<u8>, x: (usize, usize), y: (usize, usize), z: (usize, usize)) {
        for k in z.0..z.1 {
            for j in y.0..y.1 {
                for i in x.0..x.1 {
                    mask[[k, j, i]] = 1;
                }
            }
        }
    }

    #[test]
    fn test_largest_of_two_blobs() {
        let mut mask = Array3::<u8>::zeros((6, 6, 12));
        // 10 voxels: 5x2x1
        fill(&mut mask, (0, 5), (0, 2), (0, 1));
        // 25 voxels: 5x5x1
        fill(&mut mask, (6, 11), (0, 5), (3, 4));

        let labeling = label(mask.view(), Connectivity::Face6);
        assert_eq!(labeling.len(), 2);
        assert_eq!(labeling.components[0], Component { label: 1, size: 10 });
        assert_eq!(labeling.components[1], Component { label: 2, size: 25 });

        let largest = largest_component(mask.view(), Connectivity::Face6).unwrap();
        let mut expected = Array3::<u8>::zeros((6, 6, 12));
        fill(&mut expected, (6, 11), (0, 5), (3, 4));
        assert_eq!(largest, expected);
    }

    #[test]
    fn test_empty_mask_error() {
        let mask = Array3::<u8>::zeros((5, 5, 5));
        let labeling = label(mask.view(), Connectivity::Vertex26);
        assert!(labeling.is_empty());
        assert_eq!(labeling.largest(), Err(SegmentError::EmptyMask));
        assert_eq!(
            largest_component(mask.view(), Connectivity::Vertex26),
            Err(SegmentError::EmptyMask)
        );
    }

    #[test]
    fn test_tie_goes_to_first_label() {
        let mut mask = Array3::<u8>::zeros((1, 1, 5));
        mask[[0, 0, 0]] = 1;
        mask[[0, 0, 1]] = 1;
        mask[[0, 0, 3]] = 1;
        mask[[0, 0, 4]] = 1;
        let labeling = label(mask.view(), Connectivity::Face6);
        assert_eq!(labeling.largest().unwrap().label, 1);
        let largest = largest_component(mask.view(), Connectivity::Face6).unwrap();
        assert_eq!(largest.as_slice().unwrap(), &[1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_partition_property() {
        let mut mask = Array3::<u8>::zeros((4, 4, 4));
        for (i, v) in mask.iter_mut().enumerate() {
            // sparse, irregular pattern
            *v = u8::from(i % 3 == 0 || i % 7 == 1);
        }
        for c in [Connectivity::Face6, Connectivity::Edge18, Connectivity::Vertex26] {
            let labeling = label(mask.view(), c);
            assert!(is_partition(mask.view(), &labeling));
            for (i, comp) in labeling.components.iter().enumerate() {
                assert_eq!(comp.label as usize, i + 1);
                let counted = labeling.labels.iter().filter(|&&l| l == comp.label).count();
                assert_eq!(counted, comp.size);
            }
        }
    }

    #[test]
    fn test_coarser_connectivity_merges() {
        // diagonal staircase: 4 components face-wise, 1 vertex-wise
        let mut mask = Array3::<u8>::zeros((4, 4, 4));
        for i in 0..4 {
            mask[[i, i, i]] = 1;
        }
        assert_eq!(label(mask.view(), Connectivity::Face6).len(), 4);
        assert_eq!(label(mask.view(), Connectivity::Edge18).len(), 4);
        assert_eq!(label(mask.view(), Connectivity::Vertex26).len(), 1);
    }

    #[test]
    fn test_scan_order_labels() {
        let mut mask = Array3::<u8>::zeros((2, 1, 3));
        mask[[1, 0, 0]] = 1;
        mask[[0, 0, 2]] = 1;
        let labeling = label(mask.view(), Connectivity::Face6);
        // z is scanned first, so the z = 0 voxel gets label 1
        assert_eq!(labeling.labels[[0, 0, 2]], 1);
        assert_eq!(labeling.labels[[1, 0, 0]], 2);
    }

    #[test]
    fn test_deterministic_and_sorted() {
        let mut mask = Array3::<u8>::zeros((3, 3, 9));
        fill(&mut mask, (0, 1), (0, 1), (0, 1));
        fill(&mut mask, (2, 5), (0, 3), (0, 1));
        fill(&mut mask, (6, 9), (0, 1), (0, 1));
        let a = label(mask.view(), Connectivity::Vertex26);
        let b = label(mask.view(), Connectivity::Vertex26);
        assert_eq!(a, b);
        let sizes: Vec<usize> = a.sorted_by_size().iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![9, 3, 1]);
        assert_eq!(a.components[2], Component { label: 3, size: 3 });
    }
}
