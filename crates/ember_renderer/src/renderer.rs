//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive radiance estimation with a hard depth cutoff
//! - Anti-aliasing via jittered multi-sampling
//! - A sky-gradient environment for escaping rays

use crate::{Camera, Color, Hittable, Ray};
use crate::sampling::uniform;
use ember_math::Interval;
use rand::RngCore;

/// Minimum hit parameter. Restarted rays skip a small interval so they
/// cannot re-intersect the surface they just left (shadow acne).
pub const T_MIN: f32 = 1e-4;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing and noise suppression
    pub samples_per_pixel: u32,
    /// Maximum number of scattering events per path
    pub max_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 360,
            height: 360,
            samples_per_pixel: 100,
            max_depth: 50,
        }
    }
}

/// Estimate the radiance arriving along a ray.
///
/// This is the core path tracing function: intersect, scatter, recurse.
/// `depth` is the number of scattering events still allowed; when it runs
/// out, or when a material absorbs the ray, the path contributes black.
/// Rays that escape the scene see the sky gradient.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) {
        if depth > 0 {
            if let Some((attenuation, scattered)) = rec.material.scatter(ray, &rec, rng) {
                return attenuation * ray_color(&scattered, world, depth - 1, rng);
            }
        }
        // Absorbed, or out of bounces
        return Color::ZERO;
    }

    sky_gradient(ray)
}

/// Compute the sky gradient for a ray that hits nothing.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - t) * white + t * blue
}

/// Render a single pixel with multi-sampling.
///
/// (x, y) are raster coordinates with y = 0 at the top row. Returns the
/// averaged linear color; gamma correction happens at encode time.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + uniform(rng)) / config.width as f32;
        let t = ((config.height - 1 - y) as f32 + uniform(rng)) / config.height as f32;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Simple image buffer for storing render output.
///
/// Pixels are averaged linear colors in raster order, row 0 at the top.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }
}

/// Render the entire scene to an image buffer.
///
/// Single logical thread: one generator drives the whole image, pixels in
/// raster order. Scene data is immutable throughout, so a parallel driver
/// only needs an independent generator per worker.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);

    for y in 0..config.height {
        log::debug!("scanline {}/{}", y + 1, config.height);
        for x in 0..config.width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    image
}
