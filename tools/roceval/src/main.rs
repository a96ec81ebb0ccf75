//! ROC evaluation of a susceptibility map.
//! Sweeps interior thresholds over the risk surface, cross-tabulates each
//! binarized prediction against the landslide inventory and writes the
//! resulting curve to `roc.txt` (one `tpr,fpr` line per threshold).

use anyhow::{Context, Result};
use clap::Parser;
use slide_core::{compute_roc, report, Grid};
use std::{fs, path::Path};

#[derive(Parser, Debug)]
#[command(name = "roceval", about = "Evaluate a risk map against landslide ground truth via an ROC sweep")]
struct Args {
    /// Risk surface grid JSON file (output of simap).
    #[arg(short, long)]
    riskmap: String,

    /// Landslide inventory grid JSON file (binary indicator).
    #[arg(short, long)]
    landslides: String,

    /// Number of interior thresholds to test.
    #[arg(short, long)]
    iterations: usize,

    /// Output directory for roc.txt.
    #[arg(short, long)]
    output: String,
}

fn load_grid(path: &str) -> Result<Grid> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing grid {path}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let risk = load_grid(&args.riskmap)?;
    let truth = load_grid(&args.landslides)?;

    let points = compute_roc(&risk, &truth, args.iterations)
        .with_context(|| format!("ROC sweep over {}", args.riskmap))?;

    let out_dir = Path::new(&args.output);
    fs::create_dir_all(out_dir)?;
    let out_path = out_dir.join("roc.txt");
    report::write_roc_report(&out_path, &points)?;

    eprintln!(
        "{} ROC points over thresholds {:.4} .. {:.4} -> {}",
        points.len(),
        points.first().map(|p| p.threshold).unwrap_or(f64::NAN),
        points.last().map(|p| p.threshold).unwrap_or(f64::NAN),
        out_path.display()
    );
    Ok(())
}
