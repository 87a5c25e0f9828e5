//! Glint - a small CPU path tracer for sphere scenes.
//!
//! Rays are fired through a thin-lens camera, bounced off diffuse, metal
//! and glass spheres, and lit only by a sky gradient.

mod ray;
mod hittable;
mod material;
mod sphere;
mod camera;
mod renderer;
mod ppm;
mod scene;

pub use ray::Ray;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Material, ScatterResult, Color, Lambertian, Metal, Dielectric};
pub use sphere::Sphere;
pub use camera::{Camera, CameraSettings};
pub use renderer::{
    RenderConfig, ImageBuffer, render, sample_pixel, ray_color, sky_gradient, color_to_rgb,
    linear_to_gamma, height_for, SHADOW_ACNE_EPSILON,
};
pub use ppm::{write_ppm, save_ppm};
pub use scene::{SceneDescription, SceneError, MaterialDesc, SphereDesc};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Vec3, Interval};
