//! Reflection and refraction of direction vectors.

use glam::Vec3;

/// Reflect a vector about a normal.
///
/// `n` must be unit length; `v` may have any length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface (Snell's law, vector form).
///
/// - `uv`: unit incident direction
/// - `n`: unit normal on the incident side
/// - `etai_over_etat`: ratio of refractive indices (incident / transmitted)
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_mirror() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let n = Vec3::Y;
        assert_eq!(reflect(v, n), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_reflect_head_on() {
        assert_eq!(reflect(-Vec3::Z, Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_refract_same_medium_passes_straight() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, Vec3::Y, 1.0);
        assert!((out - uv).length() < 1e-6);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        // Entering glass from air: sin(theta_t) = sin(theta_i) / 1.5
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, Vec3::Y, 1.0 / 1.5);

        assert!((out.length() - 1.0).abs() < 1e-5);
        let sin_in = uv.x;
        let sin_out = out.x;
        assert!((sin_out - sin_in / 1.5).abs() < 1e-5);
        assert!(out.y < 0.0);
    }
}
