//! Commandline utility to isolate one structure from a nifti mask.
//!
//! Seeds are placed in the structures neighboring the target. Everything
//! reachable from the seeds is removed from the mask and the largest connected
//! piece of what remains is saved, e.g. a single vertebra out of a spine mask.

use clap::Parser;
use log::{info, warn};
use std::path::Path;

use regionnii::cli::{collect_seeds, fail, init_logging, resolve_connectivity};
use regionnii::nifti_io::{expand_inputs, load_mask, output_path, save_volume, WorldPoint};
use regionnii::{count_foreground, isolate_remainder, Connectivity, Dims, SegmentError, Voxel};

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

    /// a seed voxel x,y,z inside a neighboring structure. Can be repeated.
    #[arg(short, long = "seed", value_name = "X,Y,Z", allow_hyphen_values = true)]
    seeds: Vec<Voxel>,

    /// a seed in scanner coordinates (mm), mapped through the header affine.
    /// Can be repeated.
    #[arg(short, long = "world-seed", value_name = "X,Y,Z", allow_hyphen_values = true)]
    world_seeds: Vec<WorldPoint>,

    /// Neighborhood used for growing and labeling:
    ///     6 -> faces, 18 -> faces and edges, 26 -> faces, edges and corners.
    ///     Any other value uses 26.
    #[arg(short, long, default_value_t = 26, allow_negative_numbers = true)]
    connectivity: i64,

    /// also save the grown neighbor region next to each result
    #[arg(long)]
    save_grown: bool,

    /// log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn process(
    input: &Path,
    cli: &Args,
    connectivity: Connectivity,
    batch: bool,
) -> anyhow::Result<()> {
    info!("Loading: {}", input.display());
    let (header, mask) = load_mask(input)?;
    let dims = Dims::of(&mask.view());
    let seeds = collect_seeds(&cli.seeds, &cli.world_seeds, &header, &dims)?;
    info!(
        "Mask {} with {} foreground voxels, {} seeds",
        dims,
        count_foreground(mask.view()),
        seeds.len()
    );

    let isolation = match isolate_remainder(mask.view(), &seeds, connectivity) {
        Ok(isolation) => isolation,
        Err(SegmentError::EmptyMask) => anyhow::bail!(
            "nothing is left of {} after removing the grown region",
            input.display()
        ),
        Err(e) => return Err(e.into()),
    };
    info!(
        "Kept component {} of {} with {} voxels",
        isolation.component.label, isolation.component_count, isolation.component.size
    );

    let output = Path::new(&cli.output);
    let output_file = output_path(input, output, "isolated", batch)?;
    info!("Output: {}", output_file.display());
    save_volume(&output_file, &header, &isolation.isolated)?;

    if cli.save_grown {
        let grown_dir = output_file.parent().unwrap_or(Path::new("."));
        let grown_file = output_path(input, grown_dir, "grown", true)?;
        info!("Grown region: {}", grown_file.display());
        save_volume(&grown_file, &header, &isolation.grown)?;
    }
    Ok(())
}

fn run(cli: Args) -> anyhow::Result<()> {
    let _logger = init_logging(&cli.log_level)?;
    let connectivity = resolve_connectivity(cli.connectivity);
    if cli.seeds.is_empty() && cli.world_seeds.is_empty() {
        warn!("No seeds given, only the largest component will be kept");
    }

    let inputs = expand_inputs(&cli.input)?;
    let batch = inputs.len() > 1;
    if batch {
        std::fs::create_dir_all(&cli.output)?;
    }
    for input in &inputs {
        process(input, &cli, connectivity, batch)?;
    }
    Ok(())
}

/// Main function that parses commandline arguments and runs the program.
fn main() {
    let cli = Args::parse();
    run(cli).unwrap_or_else(|e| fail(e));
}
