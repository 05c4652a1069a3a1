//! whitted CLI - render the demo scene
//!
//! Builds the demo scene, traces it and writes the image as PNG.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use whitted_raytrace::{render, Framebuffer, Scene, Texture};

mod config;
mod logger;
mod scene;
mod texture;

use config::Config;
use logger::LogLevel;
use texture::ImageTexture;

#[derive(Parser)]
#[command(name = "whitted")]
#[command(about = "Recursive ray tracer", long_about = None)]
struct Cli {
    /// Set the logging level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demo scene to a PNG file
    Render {
        /// Output file
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Earth texture (BMP or PNG); overrides the config file
        #[arg(short, long)]
        texture: Option<PathBuf>,
        /// Cells per axis; overrides the config file
        #[arg(short, long)]
        resolution: Option<u32>,
        /// Trace one ray per pixel instead of four
        #[arg(long)]
        no_antialias: bool,
    },
    /// List the surfaces of the demo scene
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.log_level);

    match cli.command {
        Commands::Render {
            output,
            config,
            texture,
            resolution,
            no_antialias,
        } => {
            let mut config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            if let Some(texture) = texture {
                config.texture = texture;
            }
            if let Some(resolution) = resolution {
                config.render.plane.resolution = resolution;
            }
            if no_antialias {
                config.render.antialias = false;
            }
            render_to_file(&config, &output)?;
        }
        Commands::Info => {
            show_info(&scene::demo_scene(None)?);
        }
    }

    Ok(())
}

/// Load the earth texture, falling back to a flat color when it is missing.
fn load_texture(path: &Path) -> Option<Arc<dyn Texture>> {
    match ImageTexture::open(path) {
        Ok(texture) => {
            info!("Loaded texture {}", path.display());
            Some(Arc::new(texture))
        }
        Err(e) => {
            warn!("{e:#}; using a flat color instead");
            None
        }
    }
}

fn render_to_file(config: &Config, output: &Path) -> Result<()> {
    let scene = scene::demo_scene(load_texture(&config.texture))?;
    let n = config.render.plane.resolution;
    info!("Rendering {} surfaces at {n}x{n}", scene.len());

    let image = render(&scene, &config.render)?;
    save_png(&image, output)?;
    info!("Wrote {}", output.display());
    Ok(())
}

fn save_png(frame: &Framebuffer, output: &Path) -> Result<()> {
    image::save_buffer_with_format(
        output,
        &frame.to_rgb8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("failed to write {}", output.display()))
}

fn show_info(scene: &Scene) {
    println!("Demo scene: {} surfaces", scene.len());
    for (i, surface) in scene.surfaces().iter().enumerate() {
        println!(
            "  {:>2}: {:<8} pattern: {:<9} finish: {}",
            i,
            surface.shape.kind(),
            surface.material.pattern.name(),
            surface.material.finish.name()
        );
    }
}
