use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;

mod app;
mod constants;
mod engine;
mod error;
mod icon;
mod image_block;
mod launcher;
mod slider;
mod state;
mod texture_loader;

use crate::app::{SliderApp, window_height};
use crate::constants::*;
use crate::engine::Widget;
use crate::launcher::SystemOpener;
use crate::slider::ImageSlider;
use crate::texture_loader::load_sorted_image_paths;

/// Shows one image at a time; click the chevron for the next one, click the image to open it.
#[derive(Debug, Parser)]
#[command(name = "image-slider", version)]
struct Args {
    /// Image paths or http(s) URLs, shown in this order
    images: Vec<String>,

    /// Directory whose images are appended, sorted by file name
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Height of the displayed image in pixels
    #[arg(long)]
    height: f32,

    /// Initial window width in pixels
    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    width: i32,

    /// Window title
    #[arg(long, default_value = "Image Slider")]
    title: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut images = args.images;
    if let Some(dir) = &args.dir {
        let paths = load_sorted_image_paths(dir)
            .with_context(|| format!("Error loading images from '{}'", dir.display()))?;
        images.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
    }

    // Rejected before any window exists
    let slider = ImageSlider::new(images, args.height)?;
    tracing::info!(
        images = slider.images().len(),
        height = slider.height(),
        "starting image slider"
    );

    let (mut rl, thread) = raylib::init()
        .size(args.width, window_height(slider.height()))
        .title(&args.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut app = SliderApp::new(slider, SystemOpener);

    // --- Main Loop ---
    while !rl.window_should_close() {
        app.update(&mut rl, &thread);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        app.draw(&mut d);
    }

    tracing::info!(
        last_index = app.slider().selected_index(),
        "image slider closed"
    );
    Ok(())
}
