//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounded bounce budget
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction

use crate::{Camera, Color, Hittable, Ray};
use glint_math::{gen_f32, Interval};
use rand::RngCore;
use serde::Serialize;

/// Lower bound of the hit range, keeps scattered rays off their own surface.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, Serialize)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub image_width: u32,
    /// Output image height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
}

impl RenderConfig {
    /// Derive the image height from a width and aspect ratio.
    pub fn from_aspect_ratio(image_width: u32, aspect_ratio: f32) -> Self {
        Self {
            image_width,
            image_height: height_for(image_width, aspect_ratio),
            ..Self::default()
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let image_width = 384;
        Self {
            image_width,
            image_height: height_for(image_width, 16.0 / 9.0),
            samples_per_pixel: 100,
            max_depth: 50,
        }
    }
}

/// `trunc(width / aspect)`, never less than one row.
pub fn height_for(image_width: u32, aspect_ratio: f32) -> u32 {
    ((image_width as f32 / aspect_ratio) as u32).max(1)
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and
/// attenuating by each material until the ray escapes to the sky,
/// is absorbed, or the depth budget runs out.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Compute sky gradient background: white at the horizon below, blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an accumulated sample sum to 8-bit RGB.
///
/// Averages over `samples_per_pixel`, gamma corrects, clamps to
/// `[0, 0.999]` and scales by 256 so each channel lands in `[0, 255]`.
pub fn color_to_rgb(pixel_sum: Color, samples_per_pixel: u32) -> [u8; 3] {
    let scale = 1.0 / samples_per_pixel.max(1) as f32;
    let intensity = Interval::new(0.0, 0.999);

    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c * scale))) as u8;
    [to_byte(pixel_sum.x), to_byte(pixel_sum.y), to_byte(pixel_sum.z)]
}

/// Accumulate all samples for pixel (i, j); `j = 0` is the bottom scanline.
///
/// Returns the sum of the samples. Pass it to [`color_to_rgb`] to finalize.
pub fn sample_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // A single column or row has no span to divide; sample it at [0, 1)
    let u_span = config.image_width.saturating_sub(1).max(1) as f32;
    let v_span = config.image_height.saturating_sub(1).max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / u_span;
        let v = (j as f32 + gen_f32(rng)) / v_span;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }
    pixel_color
}

/// 8-bit RGB image, stored top scanline first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; width as usize * height as usize],
        }
    }

    /// Set the pixel at (x, y), y counted down from the top.
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = rgb;
    }

    /// Iterate scanlines from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 3]]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded; scanlines are traced from the top (`j = height - 1`)
/// down, left to right, so a given seed always yields the same image.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    if config.samples_per_pixel == 0 {
        log::warn!("samples_per_pixel is 0, image will be black");
    }
    if config.max_depth == 0 {
        log::warn!("max_depth is 0, image will be black");
    }

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = std::time::Instant::now();

    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    for y in 0..config.image_height {
        let j = config.image_height - 1 - y;
        log::debug!("Scanlines remaining: {}", j + 1);

        for i in 0..config.image_width {
            let sum = sample_pixel(camera, world, i, j, config, rng);
            image.set(i, y, color_to_rgb(sum, config.samples_per_pixel));
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
