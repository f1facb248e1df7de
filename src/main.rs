//! BedWig CLI entry point
//!
//! Single-pass converter between bedGraph interval listings and Wiggle step
//! signals. The input format is sniffed from the first line; the output is
//! written to `converted_file.wig` or `converted_file.bed` in the working
//! directory.

use bedwig::formats::{self, TrackFormat};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "bedwig")]
#[command(about = "Convert between bedGraph interval listings and Wiggle step signals")]
#[command(version)]
#[command(author = "BedWig Contributors")]
struct Cli {
    /// Input bedGraph or Wiggle file
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let format = formats::detect_file(&cli.input)
        .map_err(|e| anyhow::anyhow!("cannot convert {:?}: {}", cli.input, e))?;
    let output_path = formats::default_output_path(format.target());

    match format {
        TrackFormat::BedGraph => {
            eprintln!("Converting bedGraph file: {:?} -> {:?}", cli.input, output_path);
            let stats = formats::convert_bedgraph(&cli.input, &output_path)?;

            eprintln!("\n=== Conversion Statistics ===");
            eprintln!("Records:         {}", stats.records);
            eprintln!("Runs:            {}", stats.runs);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
        TrackFormat::Wiggle => {
            eprintln!("Converting Wiggle file: {:?} -> {:?}", cli.input, output_path);
            let stats = formats::convert_wig(&cli.input, &output_path)?;

            eprintln!("\n=== Conversion Statistics ===");
            eprintln!("Records:         {}", stats.records);
            eprintln!("Blocks:          {}", stats.blocks);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
