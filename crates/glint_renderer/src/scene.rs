//! Declarative scene descriptions.
//!
//! A scene file names its materials once and lets any number of spheres
//! refer to them, so one material instance is shared by every sphere that
//! uses it.
//!
//! ```json
//! {
//!   "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 90 },
//!   "render": { "image_width": 384, "samples_per_pixel": 100 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
//!     "glass":  { "type": "dielectric", "refractive_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
//!     { "center": [-1, 0, -1], "radius": -0.45, "material": "glass" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    height_for, CameraSettings, Color, Dielectric, HittableList, Lambertian, Material, Metal,
    RenderConfig, Sphere,
};

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// A material definition in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDesc {
    Lambertian { albedo: Color },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric { refractive_index: f32 },
}

impl MaterialDesc {
    /// Instantiate the material.
    pub fn build(&self) -> Arc<dyn Material> {
        match self {
            MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(*albedo)),
            MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(*albedo, *fuzz)),
            MaterialDesc::Dielectric { refractive_index } => {
                Arc::new(Dielectric::new(*refractive_index))
            }
        }
    }
}

/// A sphere in a scene file. A negative radius makes a hollow shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: String,
}

/// Everything needed to render an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "SceneFile")]
pub struct SceneDescription {
    pub camera: CameraSettings,
    pub render: RenderConfig,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

/// On-disk form of [`SceneDescription`]; every section may be omitted.
#[derive(Deserialize, Default)]
#[serde(default)]
struct SceneFile {
    camera: CameraSettings,
    render: RenderSection,
    materials: BTreeMap<String, MaterialDesc>,
    spheres: Vec<SphereDesc>,
}

/// On-disk form of [`RenderConfig`]. A missing height follows the camera aspect ratio.
#[derive(Deserialize)]
#[serde(default)]
struct RenderSection {
    image_width: u32,
    image_height: Option<u32>,
    samples_per_pixel: u32,
    max_depth: u32,
}

impl Default for RenderSection {
    fn default() -> Self {
        let config = RenderConfig::default();
        Self {
            image_width: config.image_width,
            image_height: None,
            samples_per_pixel: config.samples_per_pixel,
            max_depth: config.max_depth,
        }
    }
}

impl From<SceneFile> for SceneDescription {
    fn from(file: SceneFile) -> Self {
        let section = file.render;
        let image_height = section
            .image_height
            .unwrap_or_else(|| height_for(section.image_width, file.camera.aspect_ratio));

        Self {
            render: RenderConfig {
                image_width: section.image_width,
                image_height,
                samples_per_pixel: section.samples_per_pixel,
                max_depth: section.max_depth,
            },
            camera: file.camera,
            materials: file.materials,
            spheres: file.spheres,
        }
    }
}

impl SceneDescription {
    /// Parse a scene from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        log::info!("Loading scene from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Add a named material, replacing any previous one with that name.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Add a sphere using a previously named material.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: impl Into<String>) {
        self.spheres.push(SphereDesc {
            center,
            radius,
            material: material.into(),
        });
    }

    /// Check references and parameters that would otherwise produce NaNs.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !self.materials.contains_key(&sphere.material) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                });
            }
            if sphere.radius == 0.0 || !sphere.radius.is_finite() || !sphere.center.is_finite() {
                return Err(SceneError::Invalid(format!(
                    "sphere {index} needs a finite center and a finite non-zero radius"
                )));
            }
        }

        let camera = &self.camera;
        if !(camera.look_from.is_finite() && camera.look_at.is_finite() && camera.vup.is_finite()) {
            return Err(SceneError::Invalid("camera vectors must be finite".into()));
        }
        if !(camera.aspect_ratio.is_finite() && camera.aspect_ratio > 0.0) {
            return Err(SceneError::Invalid(format!(
                "camera aspect_ratio must be positive, got {}",
                camera.aspect_ratio
            )));
        }
        if !(camera.vfov > 0.0 && camera.vfov < 180.0) {
            return Err(SceneError::Invalid(format!(
                "camera vfov must be between 0 and 180 degrees, got {}",
                camera.vfov
            )));
        }
        if !(camera.focus_dist.is_finite() && camera.focus_dist > 0.0) {
            return Err(SceneError::Invalid(format!(
                "camera focus_dist must be positive, got {}",
                camera.focus_dist
            )));
        }
        if !(camera.aperture.is_finite() && camera.aperture >= 0.0) {
            return Err(SceneError::Invalid(format!(
                "camera aperture must be non-negative, got {}",
                camera.aperture
            )));
        }
        if camera.look_from == camera.look_at {
            return Err(SceneError::Invalid("camera look_from equals look_at".into()));
        }
        let forward = camera.look_at - camera.look_from;
        if camera.vup.cross(forward).length_squared() == 0.0 {
            return Err(SceneError::Invalid("camera vup is parallel to the view direction".into()));
        }
        if self.render.image_width == 0 || self.render.image_height == 0 {
            return Err(SceneError::Invalid("image dimensions must be positive".into()));
        }

        Ok(())
    }

    /// Build the renderable world, sharing one material instance per name.
    pub fn build_world(&self) -> Result<HittableList, SceneError> {
        self.validate()?;

        let materials: BTreeMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.build()))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;
            world.add(Box::new(Sphere::new(
                sphere.center,
                sphere.radius,
                Arc::clone(material),
            )));
        }

        log::info!(
            "Built scene with {} spheres and {} materials",
            world.len(),
            materials.len()
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Ray};
    use glint_math::Interval;

    const SCENE: &str = r#"{
        "camera": { "vfov": 90.0, "aspect_ratio": 2.0 },
        "render": { "image_width": 40, "image_height": 20, "samples_per_pixel": 4 },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "gold":   { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.3 },
            "glass":  { "type": "dielectric", "refractive_index": 1.5 }
        },
        "spheres": [
            { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" },
            { "center": [1.0, 0.0, -1.0], "radius": 0.5, "material": "gold" },
            { "center": [-1.0, 0.0, -1.0], "radius": 0.5, "material": "glass" },
            { "center": [-1.0, 0.0, -1.0], "radius": -0.45, "material": "glass" }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene = SceneDescription::from_json_str(SCENE).expect("valid scene");

        assert_eq!(scene.spheres.len(), 4);
        assert_eq!(scene.materials.len(), 3);
        assert_eq!(scene.render.image_width, 40);
        assert_eq!(scene.render.max_depth, 50);
        assert_eq!(scene.camera.aspect_ratio, 2.0);
        assert_eq!(
            scene.materials["gold"],
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 0.3
            }
        );
        assert_eq!(scene.spheres[3].radius, -0.45);
    }

    #[test]
    fn test_build_world_hits() {
        let scene = SceneDescription::from_json_str(SCENE).expect("valid scene");
        let world = scene.build_world().expect("builds");
        assert_eq!(world.len(), 4);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0));
        let rec = world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("hits the gold sphere");
        assert!(rec.front_face);
    }

    #[test]
    fn test_materials_are_shared() {
        let scene = SceneDescription::from_json_str(SCENE).expect("valid scene");
        let world = scene.build_world().expect("builds");

        // Outer and inner glass shells resolve to the same material instance
        let ray = Ray::new(Vec3::ZERO, Vec3::new(-1.0, 0.0, -1.0));
        let outer = world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("outer shell");
        let inner = world
            .hit(&ray, Interval::new(outer.t + 0.001, f32::INFINITY))
            .expect("inner shell");

        assert!(std::ptr::addr_eq(outer.material, inner.material));
        assert!(outer.front_face);
        // Hollow shell: entering the air bubble looks like leaving glass
        assert!(!inner.front_face);
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{ "spheres": [ { "center": [0, 0, -1], "radius": 0.5, "material": "nope" } ] }"#;
        let err = SceneDescription::from_json_str(json).unwrap_err();

        assert!(matches!(err, SceneError::UnknownMaterial { index: 0, ref name } if name == "nope"));
    }

    #[test]
    fn test_zero_radius_rejected() {
        let mut scene = SceneDescription::default();
        scene.add_material("grey", MaterialDesc::Lambertian { albedo: Color::splat(0.5) });
        scene.add_sphere(Vec3::ZERO, 0.0, "grey");

        assert!(matches!(scene.build_world(), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_degenerate_camera_rejected() {
        let mut scene = SceneDescription::default();
        scene.camera = scene.camera.with_position(Vec3::ZERO, Vec3::Y, Vec3::Y);

        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_height_follows_aspect_ratio() {
        let scene = SceneDescription::from_json_str(
            r#"{ "camera": { "aspect_ratio": 1.0 }, "render": { "image_width": 800 } }"#,
        )
        .expect("valid scene");
        assert_eq!(scene.render.image_width, 800);
        assert_eq!(scene.render.image_height, 800);

        // No render section at all still follows the camera
        let scene = SceneDescription::from_json_str(r#"{ "camera": { "aspect_ratio": 2.0 } }"#)
            .expect("valid scene");
        assert_eq!(scene.render.image_width, 384);
        assert_eq!(scene.render.image_height, 192);

        // An explicit height wins
        let scene = SceneDescription::from_json_str(
            r#"{ "camera": { "aspect_ratio": 1.0 }, "render": { "image_width": 800, "image_height": 100 } }"#,
        )
        .expect("valid scene");
        assert_eq!(scene.render.image_height, 100);
    }

    #[test]
    fn test_bad_camera_lens_rejected() {
        for camera in [
            r#"{ "aspect_ratio": 0.0 }"#,
            r#"{ "aspect_ratio": -1.5 }"#,
            r#"{ "focus_dist": 0.0 }"#,
            r#"{ "focus_dist": -2.0 }"#,
            r#"{ "vfov": 0.0 }"#,
            r#"{ "vfov": 180.0 }"#,
            r#"{ "aperture": -0.1 }"#,
        ] {
            let json = format!(r#"{{ "camera": {camera}, "render": {{ "image_width": 10 }} }}"#);
            assert!(
                matches!(SceneDescription::from_json_str(&json), Err(SceneError::Invalid(_))),
                "accepted camera {camera}"
            );
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut scene = SceneDescription::default();
        scene.camera.aspect_ratio = f32::NAN;
        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));

        let mut scene = SceneDescription::default();
        scene.camera.vfov = f32::INFINITY;
        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));

        let mut scene = SceneDescription::default();
        scene.add_material("grey", MaterialDesc::Lambertian { albedo: Color::splat(0.5) });
        scene.add_sphere(Vec3::new(0.0, f32::NAN, -1.0), 0.5, "grey");
        assert!(matches!(scene.build_world(), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_bad_json() {
        let err = SceneDescription::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SceneError::Parse(_)));
    }

    #[test]
    fn test_unknown_material_type() {
        let json = r#"{ "materials": { "x": { "type": "plastic" } } }"#;
        assert!(matches!(
            SceneDescription::from_json_str(json),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_scene_is_valid() {
        let scene = SceneDescription::from_json_str("{}").expect("defaults");
        let world = scene.build_world().expect("builds");
        assert!(world.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneDescription::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
