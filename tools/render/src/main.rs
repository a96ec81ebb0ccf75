//! Diagnostic risk map renderer — writes a risk grid as a PNG heat image.
//! Not part of the main pipeline; no tests, no clippy target.

use std::env;
use std::fs;

use image::{Rgb, RgbImage};
use slide_core::Grid;

/// Risk value scaled to [0, 1] → white (low) to deep red (high).
fn heat_to_rgb(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let cool = (255.0 * (1.0 - t)) as u8;
    [255, cool, cool]
}

/// Nodata cells render as neutral gray.
const NODATA_RGB: [u8; 3] = [128, 128, 128];

fn main() {
    let mut args = env::args().skip(1);
    let input = args.next().expect("usage: render <risk_grid.json> [out.png]");
    let output = args.next().unwrap_or_else(|| "risk.png".to_string());

    let text = fs::read_to_string(&input).expect("cannot read input grid");
    let grid: Grid = serde_json::from_str(&text).expect("cannot parse input grid");

    let (lo, hi) = grid.value_range().unwrap_or((0.0, 0.0));
    let span = if hi > lo { hi - lo } else { 1.0 };
    println!("Rendering {}x{} grid, range {lo:.4} .. {hi:.4}", grid.width, grid.height);

    let mut img = RgbImage::new(grid.width as u32, grid.height as u32);
    for row in 0..grid.height {
        for col in 0..grid.width {
            let v = grid.get(row, col);
            let rgb = if v.is_finite() {
                heat_to_rgb((v - lo) / span)
            } else {
                NODATA_RGB
            };
            img.put_pixel(col as u32, row as u32, Rgb(rgb));
        }
    }
    img.save(&output).expect("cannot write PNG");
    println!("-> {output}");
}
