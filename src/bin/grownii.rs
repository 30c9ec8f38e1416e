//! Quick commandline utility to grow a region from seed voxels in a nifti mask.
//!
//! Every foreground voxel connected to one of the seeds is marked 1 in the
//! output, everything else 0.

use clap::Parser;
use log::{info, warn};
use std::path::Path;

use regionnii::cli::{collect_seeds, fail, init_logging, resolve_connectivity};
use regionnii::nifti_io::{expand_inputs, load_mask, output_path, save_volume, WorldPoint};
use regionnii::{grow_with_count, Dims, Voxel};

// use clap to create commandline interface
#[derive(Parser, Debug)]
#[command(author, about, version, long_about)]
struct Args {
    /// the input nifti mask, or a glob pattern matching several masks
    #[arg(short, long)]
    input: String,

    /// the output nifti file, or a directory when several inputs match
    #[arg(short, long, default_value = "./")]
    output: String,

    /// a seed voxel x,y,z. Can be repeated.
    #[arg(short, long = "seed", value_name = "X,Y,Z", allow_hyphen_values = true)]
    seeds: Vec<Voxel>,

    /// a seed in scanner coordinates (mm). Can be repeated.
    #[arg(short, long = "world-seed", value_name = "X,Y,Z", allow_hyphen_values = true)]
    world_seeds: Vec<WorldPoint>,

    /// Neighborhood: 6, 18 or 26. Any other value uses 26.
    #[arg(short, long, default_value_t = 26, allow_negative_numbers = true)]
    connectivity: i64,

    /// log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn run(cli: Args) -> anyhow::Result<()> {
    let _logger = init_logging(&cli.log_level)?;
    let connectivity = resolve_connectivity(cli.connectivity);
    if cli.seeds.is_empty() && cli.world_seeds.is_empty() {
        anyhow::bail!("No seeds given. Use -s x,y,z or -w x,y,z to add seeds.");
    }

    let inputs = expand_inputs(&cli.input)?;
    let batch = inputs.len() > 1;
    if batch {
        std::fs::create_dir_all(&cli.output)?;
    }
    for input in &inputs {
        info!("Loading: {}", input.display());
        let (header, mask) = load_mask(input)?;
        let dims = Dims::of(&mask.view());
        let seeds = collect_seeds(&cli.seeds, &cli.world_seeds, &header, &dims)?;

        let (region, reached) = grow_with_count(mask.view(), &seeds, connectivity);
        if reached == 0 {
            warn!("No seed of {} lies on foreground", input.display());
        }
        info!("Grew {} voxels with {}-connectivity", reached, connectivity);

        let output_file = output_path(input, Path::new(&cli.output), "grown", batch)?;
        info!("Output: {}", output_file.display());
        save_volume(&output_file, &header, &region)?;
    }
    Ok(())
}

fn main() {
    let cli = Args::parse();
    run(cli).unwrap_or_else(|e| fail(e));
}
