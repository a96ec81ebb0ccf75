//! Statistical Index susceptibility pipeline.
//! Reads classified, viewshed-clipped factor grids plus a landslide
//! inventory grid, computes per-class Statistical Index weights for every
//! factor, reclassifies each factor to its weights and folds the weighted
//! grids into the cumulative risk surface. Artifacts mirror the legacy
//! toolchain: `<factor>_si.txt` weight reports, weighted grids under
//! `si_value_data/`, numbered partial sums under `si_raster_addition/`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use slide_core::zonal::{class_pixel_counts, unique_values, zonal_sum};
use slide_core::{
    accumulate_with, compute_weights, report, weight_reclass_table, ClassWeight, Grid, RangeMode,
    SiParams,
};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "simap", about = "Build a landslide susceptibility map from classified factor grids")]
struct Args {
    /// Directory of classified factor grid JSON files, one per factor.
    #[arg(short, long)]
    factors_dir: String,

    /// Landslide inventory grid JSON file (binary indicator, 1 = landslide).
    #[arg(short, long)]
    landslides: String,

    /// Output directory for reports, weighted grids and the risk surface.
    #[arg(short, long)]
    output: String,

    /// Pseudo-count substituted for classes with zero landslide overlap.
    #[arg(long, default_value_t = 0.1)]
    pseudo_count: f64,
}

// ── Grid file helpers ─────────────────────────────────────────────────────────

fn load_grid(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing grid {}", path.display()))
}

fn save_grid(path: &Path, grid: &Grid) -> Result<()> {
    let text = serde_json::to_string(grid)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

/// Factor grid files in name order, so outputs are deterministic.
fn discover_factors(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut factors = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "json") {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .with_context(|| format!("non-utf8 factor name: {}", path.display()))?;
            factors.push((name, path));
        }
    }
    factors.sort();
    Ok(factors)
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

struct FactorResult {
    name: String,
    weights: Vec<ClassWeight>,
    weighted: Grid,
}

/// Weights and weighted grid for one factor.
fn process_factor(
    name: &str,
    path: &Path,
    truth: &Grid,
    landslide_total: f64,
    params: &SiParams,
) -> Result<FactorResult> {
    let factor = load_grid(path)?;
    let universe = unique_values(&factor);
    let landslide_px = zonal_sum(truth, &factor)
        .with_context(|| format!("zonal statistics for factor {name}"))?;
    let class_px = class_pixel_counts(&factor);
    let weights = compute_weights(&landslide_px, &class_px, landslide_total, &universe, params)
        .with_context(|| format!("statistical index weights for factor {name}"))?;
    let weighted = weight_reclass_table(&weights).apply(&factor, RangeMode::Closed, f32::NAN);
    Ok(FactorResult {
        name: name.to_string(),
        weights,
        weighted,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let out_dir = Path::new(&args.output);
    let value_dir = out_dir.join("si_value_data");
    let addition_dir = out_dir.join("si_raster_addition");
    fs::create_dir_all(&value_dir)?;
    fs::create_dir_all(&addition_dir)?;

    let truth = load_grid(Path::new(&args.landslides))?;
    let landslide_total = match class_pixel_counts(&truth).get(&1) {
        Some(&count) => count,
        None => bail!("no landslide pixels (class 1) in {}", args.landslides),
    };

    let factors = discover_factors(Path::new(&args.factors_dir))?;
    if factors.is_empty() {
        bail!("no factor grids in {}", args.factors_dir);
    }
    eprintln!(
        "Processing {} factors against {} landslide pixels ...",
        factors.len(),
        landslide_total
    );

    let params = SiParams {
        pseudo_count: args.pseudo_count,
    };
    let results: Vec<FactorResult> = factors
        .par_iter()
        .map(|(name, path)| process_factor(name, path, &truth, landslide_total, &params))
        .collect::<Result<_>>()?;

    // All artifact writes stay on this thread, in factor order.
    let mut weight_summary: BTreeMap<String, Vec<ClassWeight>> = BTreeMap::new();
    for result in &results {
        report::write_weight_report(out_dir, &result.name, &result.weights)?;
        save_grid(
            &value_dir.join(format!("si_values_{}.json", result.name)),
            &result.weighted,
        )?;
        weight_summary.insert(result.name.clone(), result.weights.clone());
        eprintln!("  {} -> {} classes", result.name, result.weights.len());
    }
    fs::write(
        out_dir.join("weights.json"),
        serde_json::to_string_pretty(&weight_summary)?,
    )?;

    let weighted: Vec<Grid> = results.into_iter().map(|r| r.weighted).collect();
    let mut step_err: Option<anyhow::Error> = None;
    let risk = accumulate_with(&weighted, |step, partial| {
        if step_err.is_some() {
            return;
        }
        let path = addition_dir.join(format!("landslides_risk_si_{step}.json"));
        if let Err(e) = save_grid(&path, partial) {
            step_err = Some(e);
        }
    })
    .context("accumulating weighted factor grids")?;
    if let Some(e) = step_err {
        return Err(e);
    }
    save_grid(&out_dir.join("landslides_risk_map.json"), &risk)?;

    eprintln!("Done. Risk surface written to {}", out_dir.join("landslides_risk_map.json").display());
    Ok(())
}
