//! Glint math - vectors, intervals and sampling helpers.
//!
//! `Vec3` and friends come straight from glam; this crate adds the pieces
//! the path tracer needs on top of it.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod optics;
mod random;

pub use interval::Interval;
pub use optics::{reflect, refract};
pub use random::{
    gen_f32, gen_range_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vec,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::splat(3.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn test_vec3_length_and_unit() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);

        let unit = v.normalize();
        assert!((unit.length() - 1.0).abs() < 1e-6);
        assert!((unit - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);
    }
}
