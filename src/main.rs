use std::path::PathBuf;

use anyhow::{bail, Context};
use mda_widget::replay::{self, ImageSize, ReplayScript};

const USAGE: &str = "usage: mda-replay <script.json> [--image <file>]";

fn main() -> anyhow::Result<()> {
    mda_widget::logging::init();

    let mut script_path = None;
    let mut image_path = None;
    let mut args = std::env::args_os().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--image" {
            let path = args.next().context("--image expects a file path")?;
            image_path = Some(PathBuf::from(path));
        } else if script_path.is_none() {
            script_path = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument {arg:?}\n{USAGE}");
        }
    }
    let Some(script_path) = script_path else {
        bail!(USAGE);
    };

    let json = std::fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read {}", script_path.display()))?;
    let mut script = ReplayScript::from_json(&json)?;

    // Natural size from the image header overrides the one in the script.
    if let Some(image_path) = image_path {
        let (width, height) = image::image_dimensions(&image_path)
            .with_context(|| format!("failed to read image size of {}", image_path.display()))?;
        tracing::info!(width, height, path = %image_path.display(), "using image dimensions");
        script.image = ImageSize {
            width: f64::from(width),
            height: f64::from(height),
        };
    }

    let report = replay::run(&script)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
