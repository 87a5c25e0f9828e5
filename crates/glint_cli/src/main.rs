//! `glint` - render a sphere scene to a PPM image.

mod builtin;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glint_renderer::{height_for, render, save_ppm, write_ppm, SceneDescription};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Builtin {
    /// Ground, diffuse, metal and hollow glass spheres
    ThreeSpheres,
    /// Random field of small spheres around three large ones
    Cover,
}

#[derive(Parser, Debug)]
#[command(name = "glint", version, about = "Path trace a scene of spheres into a PPM image")]
struct Args {
    /// Scene description (JSON)
    #[arg(long, conflicts_with = "builtin")]
    scene: Option<PathBuf>,

    /// Built-in scene to render when no scene file is given
    #[arg(long, value_enum, default_value_t = Builtin::Cover)]
    builtin: Builtin,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "image.ppm")]
    output: String,

    /// Image width; height follows the camera aspect ratio
    #[arg(short, long)]
    width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Random seed; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    log::info!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut scene = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => match args.builtin {
            Builtin::ThreeSpheres => builtin::three_spheres(),
            Builtin::Cover => builtin::cover(&mut rng),
        },
    };

    if let Some(width) = args.width {
        scene.render.image_width = width;
        scene.render.image_height = height_for(width, scene.camera.aspect_ratio);
    }
    if let Some(samples) = args.samples {
        scene.render.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        scene.render.max_depth = max_depth;
    }

    let world = scene.build_world().context("Invalid scene")?;
    let camera = scene.camera.build();
    log::debug!(
        "Camera at {} with lens radius {}",
        camera.origin(),
        camera.lens_radius()
    );

    let image = render(&camera, &world, &scene.render, &mut rng);

    if args.output == "-" {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        write_ppm(&image, &mut lock).context("Failed to write image to stdout")?;
        lock.flush()?;
    } else {
        save_ppm(&image, &args.output)
            .with_context(|| format!("Failed to save {}", args.output))?;
        log::info!("Saved to {}", args.output);
    }

    Ok(())
}
