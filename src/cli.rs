//! Pieces shared by the command line tools.

use anyhow::Context;
use flexi_logger::{Logger, LoggerHandle};
use log::{debug, warn};
use nifti::NiftiHeader;

use crate::common::{Dims, Voxel};
use crate::connectivity::Connectivity;
use crate::nifti_io::{world_to_voxel, WorldPoint};

/// Starts logging to stderr. `RUST_LOG` takes precedence over `level`.
///
/// Keep the returned handle alive until the program ends.
pub fn init_logging(level: &str) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str(level)
        .with_context(|| format!("invalid log level '{level}'"))?
        .log_to_stderr()
        .start()
        .context("logger initialization failed")
}

/// Turns the `--connectivity` argument into a neighborhood, warning on fallback.
pub fn resolve_connectivity(n: i64) -> Connectivity {
    let connectivity = Connectivity::from_legacy(n);
    if !Connectivity::is_known(n) {
        warn!("Unknown connectivity {n}, using {connectivity}-connectivity");
    }
    connectivity
}

/// Collects voxel seeds and world seeds (mapped through `header`) into one list,
/// warning about any that fall outside the volume.
pub fn collect_seeds(
    voxels: &[Voxel],
    world: &[WorldPoint],
    header: &NiftiHeader,
    dims: &Dims,
) -> anyhow::Result<Vec<Voxel>> {
    let mut seeds = voxels.to_vec();
    for p in world {
        let v = world_to_voxel(header, p)?;
        debug!("world seed {p} -> voxel {v}");
        seeds.push(v);
    }
    for s in &seeds {
        if !dims.contains(*s) {
            warn!("Seed {s} lies outside the {dims} volume and will be ignored");
        }
    }
    Ok(seeds)
}

/// Reports `e` and exits with the tools' error status.
pub fn fail(e: anyhow::Error) -> ! {
    eprintln!("Error! {e:#}");
    std::process::exit(-2);
}
