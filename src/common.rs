use ndarray::{Array3, ArrayView3};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// A 0/1 volume, e.g. the voxels reached by region growing.
pub type BinaryVolume = Array3<u8>;
/// A 0/label volume produced by connected component labeling.
pub type LabelVolume = Array3<u32>;

/// Anything that can be read as foreground (> 0) or background.
pub trait Foreground: Copy {
    fn is_foreground(&self) -> bool;
}

macro_rules! impl_foreground {
    ($($t:ty),*) => {
        $(
            impl Foreground for $t {
                #[inline]
                fn is_foreground(&self) -> bool {
                    *self > (0 as $t)
                }
            }
        )*
    };
}

impl_foreground!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl Foreground for bool {
    #[inline]
    fn is_foreground(&self) -> bool {
        *self
    }
}

/// Integer voxel coordinate, x fastest-varying.
///
/// Components are signed so that neighbor offsets and seeds outside the
/// volume can be represented and rejected by a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Voxel {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Voxel {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Sum of absolute components.
    pub fn manhattan(&self) -> i64 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Largest absolute component.
    pub fn chebyshev(&self) -> i64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }
}

impl Add for Voxel {
    type Output = Voxel;

    fn add(self, rhs: Voxel) -> Voxel {
        Voxel::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl fmt::Display for Voxel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for Voxel {
    type Err = String;

    /// Parses `"x,y,z"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected x,y,z but got '{s}'"));
        }
        let mut coords = [0i64; 3];
        for (c, p) in coords.iter_mut().zip(parts) {
            *c = p
                .parse::<i64>()
                .map_err(|e| format!("invalid coordinate '{p}': {e}"))?;
        }
        Ok(Voxel::new(coords[0], coords[1], coords[2]))
    }
}

/// Shape of a volume as (depth, height, width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub depth: usize,
    pub height: usize,
    pub width: usize,
}

impl Dims {
    pub fn of<T>(grid: &ArrayView3<'_, T>) -> Self {
        let (depth, height, width) = grid.dim();
        Self {
            depth,
            height,
            width,
        }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.depth, self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.depth * self.height * self.width
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, v: Voxel) -> bool {
        v.x >= 0
            && v.y >= 0
            && v.z >= 0
            && (v.x as u64) < self.width as u64
            && (v.y as u64) < self.height as u64
            && (v.z as u64) < self.depth as u64
    }

    /// Array index `[z, y, x]` for `v`, or `None` when it lies outside.
    pub fn index(&self, v: Voxel) -> Option<[usize; 3]> {
        if self.contains(v) {
            Some([v.z as usize, v.y as usize, v.x as usize])
        } else {
            None
        }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.depth, self.height, self.width)
    }
}

/// Bounds-checked neighbor step shared by the traversals.
///
/// Returns the index of `from + offset` if it is inside `dims`, is
/// foreground in `mask` and is still 0 in `visited`.
#[inline]
pub(crate) fn unvisited_neighbor<T: Foreground, L: Copy + Default + PartialEq>(
    dims: &Dims,
    mask: &ArrayView3<'_, T>,
    visited: &Array3<L>,
    from: Voxel,
    offset: Voxel,
) -> Option<(Voxel, [usize; 3])> {
    let candidate = from + offset;
    let idx = dims.index(candidate)?;
    if mask[idx].is_foreground() && visited[idx] == L::default() {
        Some((candidate, idx))
    } else {
        None
    }
}
