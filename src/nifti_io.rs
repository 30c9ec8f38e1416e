//! Reading masks from and writing volumes to nifti files.
//!
//! The nifti crate hands out arrays indexed `[i, j, k]` (x fastest on disk).
//! Volumes in this crate are indexed `[z, y, x]`, so axes are reversed on the
//! way in and on the way out.

use anyhow::{anyhow, bail, Context};
use glob::glob;
use log::debug;
use nalgebra::Point4;
use ndarray::{Array3, Ix3};
use nifti::writer::WriterOptions;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::common::Voxel;

/// Loads a 3D nifti file as a `[z, y, x]` volume together with its header.
pub fn load_mask(path: &Path) -> anyhow::Result<(NiftiHeader, Array3<f64>)> {
    let obj = ReaderOptions::new()
        .read_file(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let header = obj.header().clone();
    let img = obj
        .into_volume()
        .into_ndarray::<f64>()
        .with_context(|| format!("could not convert {} to an array", path.display()))?;
    if img.ndim() != 3 {
        bail!(
            "{} has {} dimensions, expected a 3D mask. Tip: You can use a utility like `fslsplit` to split a 4D file into 3D files.",
            path.display(),
            img.ndim()
        );
    }
    let img = img.into_dimensionality::<Ix3>()?;
    debug!("loaded {} with shape {:?}", path.display(), img.shape());
    let volume = img.permuted_axes([2, 1, 0]).as_standard_layout().into_owned();
    Ok((header, volume))
}

/// Writes a `[z, y, x]` volume as float data using `header` as reference.
pub fn save_volume<A>(path: &Path, header: &NiftiHeader, volume: &Array3<A>) -> anyhow::Result<()>
where
    A: Copy + Into<f64>,
{
    let ijk: Array3<f64> = volume
        .view()
        .permuted_axes([2, 1, 0])
        .mapv(Into::<f64>::into)
        .as_standard_layout()
        .into_owned();
    WriterOptions::new(path)
        .reference_header(header)
        .write_nifti(&ijk)
        .with_context(|| format!("could not write {}", path.display()))?;
    debug!("wrote {}", path.display());
    Ok(())
}

/// A point in scanner (world) coordinates, parsed from `"x,y,z"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl FromStr for WorldPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected x,y,z but got '{s}'"));
        }
        let mut coords = [0f64; 3];
        for (c, p) in coords.iter_mut().zip(parts) {
            *c = p
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate '{p}': {e}"))?;
        }
        Ok(WorldPoint {
            x: coords[0],
            y: coords[1],
            z: coords[2],
        })
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Maps a world point to the nearest voxel using the inverse of the header affine.
pub fn world_to_voxel(header: &NiftiHeader, point: &WorldPoint) -> anyhow::Result<Voxel> {
    let affine = header.affine::<f64>();
    let inv_affine = affine
        .try_inverse()
        .ok_or_else(|| anyhow!("header affine is not invertible"))?;
    let pos_vox = inv_affine * Point4::new(point.x, point.y, point.z, 1.0);
    Ok(Voxel::new(
        pos_vox[0].round() as i64,
        pos_vox[1].round() as i64,
        pos_vox[2].round() as i64,
    ))
}

/// Input files matching a path or glob pattern, sorted by path.
pub fn expand_inputs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = glob(pattern)
        .with_context(|| format!("invalid input pattern '{pattern}'"))?
        .filter_map(Result::ok)
        .collect();
    if paths.is_empty() {
        bail!("no input files match '{pattern}'");
    }
    paths.sort();
    Ok(paths)
}

/// File name without `.nii` / `.nii.gz`.
pub fn basename(path: &Path) -> anyhow::Result<String> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("could not parse input file name {}", path.display()))?;
    let stem = name
        .strip_suffix(".nii.gz")
        .or_else(|| name.strip_suffix(".nii"))
        .unwrap_or(name);
    Ok(stem.to_string())
}

/// Where to write the result for `input`.
///
/// A single input is written to `output` directly unless it is an existing
/// directory; batches always go into `output` as `{basename}_{suffix}.nii`.
pub fn output_path(
    input: &Path,
    output: &Path,
    suffix: &str,
    batch: bool,
) -> anyhow::Result<PathBuf> {
    if !batch && !output.is_dir() {
        return Ok(output.to_path_buf());
    }
    let name = format!("{}_{suffix}.nii", basename(input)?);
    Ok(output.join(name))
}
