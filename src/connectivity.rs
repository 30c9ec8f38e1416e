//! Voxel neighborhoods.

use crate::common::Voxel;
use std::fmt;

/// Which voxels in the surrounding 3x3x3 cube count as adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Shared face, Manhattan distance 1.
    Face6,
    /// Shared face or edge, Manhattan distance <= 2.
    Edge18,
    /// Any voxel of the cube.
    #[default]
    Vertex26,
}

impl Connectivity {
    /// Maps the integer selector used on the command line. 6 and 18 select
    /// their neighborhoods, every other value falls back to 26.
    pub fn from_legacy(n: i64) -> Self {
        match n {
            6 => Connectivity::Face6,
            18 => Connectivity::Edge18,
            _ => Connectivity::Vertex26,
        }
    }

    /// Whether `n` names a neighborhood directly rather than via the fallback.
    pub fn is_known(n: i64) -> bool {
        matches!(n, 6 | 18 | 26)
    }

    pub fn neighbor_count(&self) -> usize {
        match self {
            Connectivity::Face6 => 6,
            Connectivity::Edge18 => 18,
            Connectivity::Vertex26 => 26,
        }
    }

    fn max_manhattan(&self) -> i64 {
        match self {
            Connectivity::Face6 => 1,
            Connectivity::Edge18 => 2,
            Connectivity::Vertex26 => 3,
        }
    }

    /// Offsets to every neighbor in this neighborhood, z slowest: the
    /// Chebyshev distance 1 shell filtered by Manhattan distance.
    pub fn offsets(&self) -> Vec<Voxel> {
        let max = self.max_manhattan();
        let mut offsets = Vec::with_capacity(self.neighbor_count());
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let d = Voxel::new(dx, dy, dz);
                    if d.chebyshev() == 1 && d.manhattan() <= max {
                        offsets.push(d);
                    }
                }
            }
        }
        offsets
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.neighbor_count())
    }
}

/// Neighbor offsets for an integer connectivity selector (6, 18 or 26).
pub fn offsets(connectivity: i64) -> Vec<Voxel> {
    Connectivity::from_legacy(connectivity).offsets()
}
