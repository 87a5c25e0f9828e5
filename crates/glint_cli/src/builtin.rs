//! Built-in demo scenes.

use glint_math::{gen_f32, gen_range_f32, random_vec, Vec3};
use glint_renderer::{CameraSettings, Color, MaterialDesc, RenderConfig, SceneDescription};
use rand::RngCore;

/// Ground, a diffuse ball, a metal ball and a hollow glass ball.
pub fn three_spheres() -> SceneDescription {
    let aspect_ratio = 16.0 / 9.0;
    let mut scene = SceneDescription {
        camera: CameraSettings::new()
            .with_position(Vec3::new(-2.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(20.0, 0.0, 1.0)
            .with_aspect_ratio(aspect_ratio),
        render: RenderConfig::from_aspect_ratio(384, aspect_ratio),
        ..Default::default()
    };

    scene.add_material("ground", MaterialDesc::Lambertian { albedo: Color::new(0.8, 0.8, 0.0) });
    scene.add_material("center", MaterialDesc::Lambertian { albedo: Color::new(0.1, 0.2, 0.5) });
    scene.add_material("glass", MaterialDesc::Dielectric { refractive_index: 1.5 });
    scene.add_material(
        "gold",
        MaterialDesc::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzz: 0.0,
        },
    );

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "ground");
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, "center");
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "glass");
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, "glass");
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "gold");

    scene
}

/// A field of small random spheres around three large ones.
pub fn cover(rng: &mut dyn RngCore) -> SceneDescription {
    let aspect_ratio = 16.0 / 9.0;
    let mut scene = SceneDescription {
        camera: CameraSettings::new()
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(20.0, 0.1, 10.0)
            .with_aspect_ratio(aspect_ratio),
        render: RenderConfig::from_aspect_ratio(384, aspect_ratio),
        ..Default::default()
    };

    scene.add_material("ground", MaterialDesc::Lambertian { albedo: Color::splat(0.5) });
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

    // Every small glass sphere shares one material
    scene.add_material("glass", MaterialDesc::Dielectric { refractive_index: 1.5 });

    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat = gen_f32(rng);
            let name = if choose_mat < 0.8 {
                let albedo = random_vec(rng, 0.0, 1.0) * random_vec(rng, 0.0, 1.0);
                let name = format!("diffuse_{a}_{b}");
                scene.add_material(name.clone(), MaterialDesc::Lambertian { albedo });
                name
            } else if choose_mat < 0.95 {
                let albedo = random_vec(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                let name = format!("metal_{a}_{b}");
                scene.add_material(name.clone(), MaterialDesc::Metal { albedo, fuzz });
                name
            } else {
                "glass".to_string()
            };

            scene.add_sphere(center, 0.2, name);
        }
    }

    scene.add_material("brown", MaterialDesc::Lambertian { albedo: Color::new(0.4, 0.2, 0.1) });
    scene.add_material(
        "steel",
        MaterialDesc::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    );

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, "glass");
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, "brown");
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, "steel");

    scene
}
