use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use datapick_core::{scene_points_to_logical, Calibration, Pt2, Real};

/// Map picked plot-image pixels to data coordinates.
#[derive(Debug, Parser)]
#[command(author, version, about = "Map picked plot-image pixels to data coordinates")]
struct Args {
    /// Path to a JSON calibration (three reference points plus axis type).
    #[arg(long)]
    calibration: String,

    /// Path to a JSON list of picked pixel positions, as `[[x, y], ...]`.
    #[arg(long)]
    points: String,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

fn map_points(calibration_path: &str, points_path: &str) -> Result<String> {
    let calibration: Calibration = load_json_file(Path::new(calibration_path))?;
    let picked: Vec<[Real; 2]> = load_json_file(Path::new(points_path))?;

    let scene: Vec<Pt2> = picked.iter().map(|p| Pt2::new(p[0], p[1])).collect();
    let logical = scene_points_to_logical(&scene, &calibration)
        .context("check your calibration points")?;

    let rows: Vec<[Real; 3]> = logical.iter().map(|v| [v.x, v.y, v.z]).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn main() {
    env_logger::init();
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let json = map_points(&args.calibration, &args.points)?;
    println!("{json}");
    Ok(())
}
