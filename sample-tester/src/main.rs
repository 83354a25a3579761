use std::env;

use anyhow::{bail, Context};
use opencv::{
    highgui::{imshow, wait_key},
    imgcodecs::{self, IMREAD_COLOR},
    prelude::*,
};
use sample_vision::{params::RecognitionParams, SamplePipeline};

fn main() -> anyhow::Result<()> {
    setup_logging();

    let mut args = env::args().skip(1);
    let image_path = args
        .next()
        .context("usage: sample-tester <image> [BLUE|RED]")?;
    let alliance = args.next().unwrap_or_else(|| "RED".to_string());

    let selector = match alliance.to_uppercase().as_str() {
        "BLUE" => 1.0,
        "RED" => 2.0,
        _ => bail!("unknown alliance {alliance}"),
    };

    let image = imgcodecs::imread(&image_path, IMREAD_COLOR)?;
    if image.empty() {
        bail!("could not read image {image_path}");
    }

    log::info!("running recognition on {image_path} for the {alliance} alliance");
    let pipeline = SamplePipeline::new(RecognitionParams::default());
    let (contour, annotated, lloutput) = pipeline.run_pipeline(&image, &[selector]);

    log::info!("selected contour has {} points", contour.len());
    log::info!("diagnostic output {lloutput:?}");

    imshow(&format!("{alliance} alliance samples"), &annotated)?;
    wait_key(0)?;

    Ok(())
}

fn setup_logging() {
    simple_log::quick!();
}
