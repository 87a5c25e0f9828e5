//! Camera for ray generation.

use crate::Ray;
use glint_math::{random_in_unit_disk, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Camera placement and lens parameters.
///
/// Call [`CameraSettings::build`] to get a [`Camera`] that can generate rays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    // Camera positioning
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f32,       // Vertical field of view in degrees
    pub aperture: f32,   // Lens diameter, 0 disables depth of field
    pub focus_dist: f32, // Distance from camera to plane of perfect focus

    pub aspect_ratio: f32,
}

impl CameraSettings {
    /// Create camera settings with default values.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            aspect_ratio: 16.0 / 9.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Compute the camera basis and viewport.
    ///
    /// `look_from` must differ from `look_at` and `vup` must not be
    /// parallel to the view direction.
    pub fn build(&self) -> Camera {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = self.look_from;
        let horizontal = self.focus_dist * viewport_width * u;
        let vertical = self.focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - self.focus_dist * w;

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin-lens camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Generate a ray through viewport coordinate (s, t), both in [0, 1].
    ///
    /// (0, 0) is the lower-left corner of the viewport. The origin is
    /// jittered over the lens disk for depth of field.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_camera_basis() {
        let camera = CameraSettings::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .build();

        assert_eq!(camera.origin(), Vec3::ZERO);
        assert!(approx(camera.w, Vec3::Z));
        assert!(approx(camera.u, Vec3::X));
        assert!(approx(camera.v, Vec3::Y));
    }

    #[test]
    fn test_camera_viewport_geometry() {
        // 90 degree vfov: h = 1, viewport 2 high and 4 wide at aspect 2
        let camera = CameraSettings::new()
            .with_lens(90.0, 0.0, 1.0)
            .with_aspect_ratio(2.0)
            .build();

        assert!(approx(camera.horizontal, Vec3::new(4.0, 0.0, 0.0)));
        assert!(approx(camera.vertical, Vec3::new(0.0, 2.0, 0.0)));
        assert!(approx(camera.lower_left_corner, Vec3::new(-2.0, -1.0, -1.0)));
    }

    #[test]
    fn test_focus_dist_scales_viewport() {
        let camera = CameraSettings::new()
            .with_lens(90.0, 0.0, 3.0)
            .with_aspect_ratio(1.0)
            .build();

        assert!(approx(camera.horizontal, Vec3::new(6.0, 0.0, 0.0)));
        assert!(approx(camera.lower_left_corner, Vec3::new(-3.0, -3.0, -3.0)));
    }

    #[test]
    fn test_pinhole_rays() {
        let camera = CameraSettings::new().with_aspect_ratio(1.0).build();
        let mut rng = StdRng::seed_from_u64(42);

        let center = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(center.origin(), Vec3::ZERO);
        assert!(approx(center.direction(), Vec3::new(0.0, 0.0, -1.0)));

        let corner = camera.get_ray(0.0, 0.0, &mut rng);
        assert!(approx(corner.direction(), Vec3::new(-1.0, -1.0, -1.0)));
    }

    #[test]
    fn test_aperture_jitters_origin_but_keeps_focus() {
        let camera = CameraSettings::new()
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 2.0, 5.0)
            .build();
        assert_eq!(camera.lens_radius(), 1.0);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            let offset = ray.origin() - camera.origin();

            // Origin stays on the lens disk, perpendicular to the view axis
            assert!(offset.length() < 1.0 + 1e-5);
            assert!(offset.dot(camera.w).abs() < 1e-5);

            // Every lens sample converges on the focus plane
            assert!(approx(ray.at(1.0), Vec3::ZERO));
        }
    }

    #[test]
    fn test_settings_from_json_defaults() {
        let settings: CameraSettings =
            serde_json::from_str(r#"{ "vfov": 20.0, "look_from": [13.0, 2.0, 3.0] }"#)
                .expect("valid json");

        assert_eq!(settings.vfov, 20.0);
        assert_eq!(settings.look_from, Vec3::new(13.0, 2.0, 3.0));
        assert_eq!(settings.look_at, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(settings.focus_dist, 1.0);
    }
}
