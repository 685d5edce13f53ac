use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;
use sketchloop::{CairoRasterizer, Canvas, Config, FrameController};
use std::fs;
use std::path::PathBuf;

mod demo;

use demo::{Demo, DemoKind};

#[derive(Parser, Debug)]
#[command(name = "sketchloop")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHLOOP_GIT_HASH"), ")"),
    about = "Runs a built-in sketch headless and saves its last frame as PNG"
)]
struct Cli {
    /// Config file to use instead of ~/.config/sketchloop/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Built-in sketch to run
    #[arg(long, short = 's', value_enum, default_value_t = DemoKind::Orbit)]
    sketch: DemoKind,

    /// Number of frames to render before quitting
    #[arg(long, short = 'n', default_value_t = 60)]
    frames: u64,

    /// Frames per second (overrides the config file)
    #[arg(long, value_name = "FPS", allow_negative_numbers = true)]
    frame_rate: Option<i32>,

    /// Canvas width in pixels (overrides the config file)
    #[arg(long)]
    width: Option<i32>,

    /// Canvas height in pixels (overrides the config file)
    #[arg(long)]
    height: Option<i32>,

    /// PNG to write the last frame to (default: <output dir>/<frame>.PNG)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write a documented config file to ~/.config/sketchloop and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .with_canvas_size(cli.width, cli.height);

    let raster = CairoRasterizer::new(config.canvas.width, config.canvas.height)
        .context("Failed to create frame buffer")?;
    let canvas = Canvas::from_config(raster, &config);
    let sketch = Demo::new(cli.sketch, cli.frames, cli.frame_rate);

    info!(
        "Running {:?} for {} frames at {}x{}",
        cli.sketch, cli.frames, config.canvas.width, config.canvas.height
    );

    let mut controller =
        FrameController::new(canvas, sketch).with_reset_after_loop(config.frame_loop.reset_after_loop);
    controller.run()?;

    let canvas = controller.canvas();
    let output = match cli.output {
        Some(path) => path,
        None => {
            let dir = config.output.resolved_directory();
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            dir.join(format!("{}.PNG", canvas.frame_count()))
        }
    };

    let saved = canvas
        .save(Some(output.as_path()))
        .with_context(|| format!("Failed to save frame to {}", output.display()))?;
    println!("{}", saved.display());

    if controller.failures() > 0 {
        anyhow::bail!("{} sketch errors, see log output", controller.failures());
    }
    Ok(())
}
