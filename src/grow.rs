//! Seeded region growing.

use log::debug;
use ndarray::{Array3, ArrayView3};
use std::collections::VecDeque;

use crate::common::{unvisited_neighbor, BinaryVolume, Dims, Foreground, Voxel};
use crate::connectivity::Connectivity;

/// Marks every foreground voxel reachable from `seeds`.
///
/// Seeds that lie outside the volume or on background are dropped. The
/// result has the shape of `mask`, 1 for reached voxels and 0 elsewhere;
/// with several seeds it is the union of the fills from each one.
pub fn grow<T: Foreground>(
    mask: ArrayView3<'_, T>,
    seeds: &[Voxel],
    connectivity: Connectivity,
) -> BinaryVolume {
    grow_with_count(mask, seeds, connectivity).0
}

/// Same as [`grow`], also returning the number of reached voxels.
pub fn grow_with_count<T: Foreground>(
    mask: ArrayView3<'_, T>,
    seeds: &[Voxel],
    connectivity: Connectivity,
) -> (BinaryVolume, usize) {
    let dims = Dims::of(&mask);
    let offsets = connectivity.offsets();
    let mut region: BinaryVolume = Array3::zeros(dims.shape());
    let mut queue = VecDeque::new();
    let mut reached = 0usize;

    for &seed in seeds {
        let Some(idx) = dims.index(seed) else {
            continue;
        };
        if mask[idx].is_foreground() && region[idx] == 0 {
            region[idx] = 1;
            reached += 1;
            queue.push_back(seed);
        }
    }
    let honored = reached;

    while let Some(current) = queue.pop_front() {
        for &offset in &offsets {
            if let Some((next, idx)) = unvisited_neighbor(&dims, &mask, &region, current, offset)
            {
                region[idx] = 1;
                reached += 1;
                queue.push_back(next);
            }
        }
    }

    debug!(
        "grew {} voxels from {}/{} seeds ({}-connectivity, volume {})",
        reached,
        honored,
        seeds.len(),
        connectivity,
        dims
    );
    (region, reached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn count(v: &BinaryVolume) -> usize {
        v.iter().map(|&x| x as usize).sum()
    }

    /// Two 3x3x3 cubes separated along x by an empty plane.
    fn two_cubes() -> Array3<u8> {
        let mut mask = Array3::<u8>::zeros((3, 3, 7));
        for z in 0..3 {
            for y in 0..3 {
                for x in 0..3 {
                    mask[[z, y, x]] = 1;
                    mask[[z, y, x + 4]] = 1;
                }
            }
        }
        mask
    }

    #[test]
    fn test_single_voxel() {
        let mask = Array3::<u8>::ones((1, 1, 1));
        for c in [6, 18, 26] {
            let region = grow(mask.view(), &[Voxel::new(0, 0, 0)], Connectivity::from_legacy(c));
            assert_eq!(region[[0, 0, 0]], 1);
        }
    }

    #[test]
    fn test_empty_seeds() {
        let mask = two_cubes();
        let (region, reached) = grow_with_count(mask.view(), &[], Connectivity::Vertex26);
        assert_eq!(reached, 0);
        assert_eq!(count(&region), 0);
        assert_eq!(region.dim(), mask.dim());
    }

    #[test]
    fn test_background_and_out_of_bounds_seeds_dropped() {
        let mask = two_cubes();
        let seeds = [
            Voxel::new(3, 1, 1),
            Voxel::new(-1, 0, 0),
            Voxel::new(100, 0, 0),
            Voxel::new(0, 0, 3),
        ];
        let region = grow(mask.view(), &seeds, Connectivity::Vertex26);
        assert_eq!(count(&region), 0);
    }

    #[test]
    fn test_disconnected_seeds_union() {
        let mask = two_cubes();
        let a = Voxel::new(0, 0, 0);
        let b = Voxel::new(6, 2, 2);
        let left = grow(mask.view(), &[a], Connectivity::Vertex26);
        let right = grow(mask.view(), &[b], Connectivity::Vertex26);
        let both = grow(mask.view(), &[a, b], Connectivity::Vertex26);
        assert_eq!(count(&left), 27);
        assert_eq!(count(&right), 27);
        assert_eq!(both, &left + &right);
    }

    #[test]
    fn test_seed_containment_and_determinism() {
        let mask = two_cubes();
        let seeds = [Voxel::new(1, 1, 1), Voxel::new(5, 0, 2), Voxel::new(1, 1, 1)];
        let first = grow(mask.view(), &seeds, Connectivity::Face6);
        let second = grow(mask.view(), &seeds, Connectivity::Face6);
        assert_eq!(first, second);
        assert_eq!(first[[1, 1, 1]], 1);
        assert_eq!(first[[2, 0, 5]], 1);
        assert_eq!(count(&first), 54);
    }

    #[test]
    fn test_connectivity_monotone() {
        // voxels touching only along an edge, and a third only at a corner
        let mut mask = Array3::<u8>::zeros((3, 3, 3));
        mask[[0, 0, 0]] = 1;
        mask[[0, 1, 1]] = 1;
        mask[[1, 2, 2]] = 1;
        let seed = [Voxel::new(0, 0, 0)];
        let face = grow(mask.view(), &seed, Connectivity::Face6);
        let edge = grow(mask.view(), &seed, Connectivity::Edge18);
        let vertex = grow(mask.view(), &seed, Connectivity::Vertex26);
        assert_eq!(count(&face), 1);
        assert_eq!(count(&edge), 2);
        assert_eq!(count(&vertex), 3);
        for ((f, e), v) in face.iter().zip(edge.iter()).zip(vertex.iter()) {
            assert!(f <= e && e <= v);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let mask = two_cubes();
        let before = mask.clone();
        let _ = grow(mask.view(), &[Voxel::new(0, 0, 0)], Connectivity::Face6);
        assert_eq!(mask, before);
    }

    #[test]
    fn test_float_mask() {
        let mut mask = Array3::<f64>::zeros((1, 1, 4));
        mask[[0, 0, 0]] = 0.3;
        mask[[0, 0, 1]] = 2.0;
        mask[[0, 0, 3]] = 1.0;
        let region = grow(mask.view(), &[Voxel::new(0, 0, 0)], Connectivity::Face6);
        assert_eq!(region.as_slice().unwrap(), &[1, 1, 0, 0]);
    }
}
