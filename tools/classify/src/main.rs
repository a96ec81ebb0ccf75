//! Discretize a raw continuous factor grid into classes.
//! Applies one of the fixed break tables (slope, TWI, SPI, aspect,
//! curvature, road distance, elevation) so the result can feed the
//! susceptibility pipeline. Raw derivation of the factor itself (slope from
//! a DEM, proximity from a road network) stays with the external toolkit.

use anyhow::{bail, Context, Result};
use clap::Parser;
use slide_core::reclass::breaks;
use slide_core::{Grid, RangeMode, ReclassTable};
use std::fs;

#[derive(Parser, Debug)]
#[command(name = "classify", about = "Bucket a continuous factor grid into discrete classes")]
struct Args {
    /// Raw factor grid JSON file.
    #[arg(short, long)]
    input: String,

    /// Break table: slope, twi, spi, aspect, curvature, road-distance, elevation.
    #[arg(short, long)]
    table: String,

    /// Output grid JSON file.
    #[arg(short, long)]
    output: String,
}

fn break_table(name: &str) -> Result<ReclassTable> {
    Ok(match name {
        "slope" => breaks::slope(),
        "twi" => breaks::twi(),
        "spi" => breaks::spi(),
        "aspect" => breaks::aspect(),
        "curvature" => breaks::curvature(),
        "road-distance" => breaks::road_distance(),
        "elevation" => breaks::elevation(),
        other => bail!("unknown break table {other:?}"),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let table = break_table(&args.table)?;

    let text = fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input))?;
    let grid: Grid = serde_json::from_str(&text).with_context(|| format!("parsing grid {}", args.input))?;

    let classified = table.apply(&grid, RangeMode::HalfOpen, f32::NAN);
    fs::write(&args.output, serde_json::to_string(&classified)?)
        .with_context(|| format!("writing {}", args.output))?;

    eprintln!("{} -> {} ({} classes)", args.input, args.output, table.entries.len());
    Ok(())
}
