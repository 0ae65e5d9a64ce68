//! Batch-render entry point.
//!
//! Wires the parameter surface to the renderer: build a world (JSON scene
//! file or the procedural cover scene), place the camera, render once, and
//! write the image. Output format follows the file extension: `.png` goes
//! through the PNG encoder, everything else is a PPM text stream.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ember_math::Vec3;
use ember_renderer::{output, render, scene, Camera, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[clap(about = "Offline Monte Carlo path tracer for scenes of implicit surfaces")]
struct CliArguments {
    /// Image width in pixels
    #[clap(short = 'w', long, default_value = "360")]
    width: u32,

    /// Image height in pixels
    #[clap(long, default_value = "360")]
    height: u32,

    /// Samples per pixel
    #[clap(short = 's', long, default_value = "100")]
    samples: u32,

    /// Maximum scattering events per path
    #[clap(long, default_value = "50")]
    max_depth: u32,

    /// Seed for the random generator; drawn from the OS when omitted
    #[clap(long)]
    seed: Option<u64>,

    /// JSON scene description; renders the procedural scene when omitted
    #[clap(long)]
    scene: Option<PathBuf>,

    /// Camera position as "x,y,z"
    #[clap(long, default_value = "4,3,3", value_parser = parse_vec3)]
    look_from: Vec3,

    /// Point the camera looks at, as "x,y,z"
    #[clap(long, default_value = "0,0,-1", value_parser = parse_vec3)]
    look_at: Vec3,

    /// Camera up vector, as "x,y,z"
    #[clap(long, default_value = "0,1,0", value_parser = parse_vec3)]
    vup: Vec3,

    /// Vertical field of view in degrees
    #[clap(long, default_value = "90.0")]
    vfov: f32,

    /// Lens aperture; 0 disables depth of field
    #[clap(long, default_value = "0.0")]
    aperture: f32,

    /// Focus distance; defaults to the look_from/look_at distance
    #[clap(long)]
    focus_dist: Option<f32>,

    /// Output image path (.png for PNG, anything else for PPM)
    #[clap(short = 'o', long, default_value = "render.ppm")]
    output: PathBuf,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let components: Vec<f32> = s
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid component in '{s}': {e}"))?;

    match components.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected three components, got '{s}'")),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArguments::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();
    let world = match &args.scene {
        Some(path) => scene::load_scene(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => scene::random_scene(&mut rng),
    };
    log::info!("scene built in {:?}", start.elapsed());

    let aspect = args.width as f32 / args.height as f32;
    let focus_dist = args
        .focus_dist
        .unwrap_or_else(|| (args.look_from - args.look_at).length());
    let camera = if args.aperture > 0.0 {
        Camera::thin_lens(
            args.look_from,
            args.look_at,
            args.vup,
            args.vfov,
            aspect,
            args.aperture,
            focus_dist,
        )
    } else {
        Camera::look_at(args.look_from, args.look_at, args.vup, args.vfov, aspect)
    };

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
    };

    log::info!(
        "rendering {}x{} @ {} spp, depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();
    let image = render(&camera, &world, &config, &mut rng);
    log::info!("rendered in {:?}", start.elapsed());

    let is_png = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        output::save_png(&image, &args.output)
    } else {
        output::save_ppm(&image, &args.output)
    }
    .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("saved to {}", args.output.display());
    Ok(())
}
