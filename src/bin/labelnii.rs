//! Quick commandline utility to label the connected components of a nifti mask.
//!
//! Writes a label volume (0 for background, 1..n for components in scan
//! order) and prints the component sizes, or with `--largest` writes only the
//! biggest component as a binary mask.

use clap::Parser;
use log::info;
use std::path::Path;

use regionnii::cli::{fail, init_logging, resolve_connectivity};
use regionnii::nifti_io::{expand_inputs, load_mask, output_path, save_volume};
use regionnii::{label, Dims, SegmentError};

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

    /// Neighborhood: 6, 18 or 26. Any other value uses 26.
    #[arg(short, long, default_value_t = 26, allow_negative_numbers = true)]
    connectivity: i64,

    /// only keep the largest component
    #[arg(short, long)]
    largest: bool,

    /// How many of the biggest components to list
    #[arg(short, long, default_value_t = 10)]
    top: usize,

    /// log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn run(cli: Args) -> anyhow::Result<()> {
    let _logger = init_logging(&cli.log_level)?;
    let connectivity = resolve_connectivity(cli.connectivity);

    let inputs = expand_inputs(&cli.input)?;
    let batch = inputs.len() > 1;
    if batch {
        std::fs::create_dir_all(&cli.output)?;
    }
    for input in &inputs {
        info!("Loading: {}", input.display());
        let (header, mask) = load_mask(input)?;
        let dims = Dims::of(&mask.view());

        let labeling = label(mask.view(), connectivity);
        info!(
            "Found {} components in {} ({} foreground voxels)",
            labeling.len(),
            dims,
            labeling.foreground_count()
        );
        for c in labeling.sorted_by_size().iter().take(cli.top) {
            println!("{}\t{}", c.label, c.size);
        }

        if cli.largest {
            let largest = match labeling.largest() {
                Ok(c) => c,
                Err(SegmentError::EmptyMask) => {
                    anyhow::bail!("{} has no foreground voxels", input.display())
                }
                Err(e) => return Err(e.into()),
            };
            info!("Largest component: {} ({} voxels)", largest.label, largest.size);
            let output_file = output_path(input, Path::new(&cli.output), "largest", batch)?;
            info!("Output: {}", output_file.display());
            save_volume(&output_file, &header, &labeling.component_mask(largest.label))?;
        } else {
            let output_file = output_path(input, Path::new(&cli.output), "labels", batch)?;
            info!("Output: {}", output_file.display());
            save_volume(&output_file, &header, &labeling.labels)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Args::parse();
    run(cli).unwrap_or_else(|e| fail(e));
}
