// Copyright @yucwang 2026

use crate::math::constants::{Float, PI, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Pinhole camera described by its eye point and the image-plane basis.
/// `upper_left + right * u + down * v` spans the image plane for
/// `u, v` in `[0, 1]`. A degenerate basis is not validated.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vector3f,
    pub down: Vector3f,
    pub right: Vector3f,
    pub upper_left: Vector3f,
}

impl Camera {
    pub fn new(eye: Vector3f, down: Vector3f, right: Vector3f, upper_left: Vector3f) -> Self {
        Self { eye, down, right, upper_left }
    }

    /// Builds the image plane through `look_at`. The vertical extent scales
    /// with `atan(fov / 2)`, not `tan`; existing scene files are framed
    /// against that.
    pub fn look_at(eye: Vector3f,
                   look_at: Vector3f,
                   up: Vector3f,
                   fov_degrees: Float,
                   aspect: Float) -> Self {
        let fov = fov_degrees * PI / 180.0;
        let look = look_at - eye;
        let view_height = (fov / 2.0).atan().abs() * look.norm() * 2.0;
        let view_width = view_height * aspect;

        let up_on_look = look * (up.dot(&look) / look.norm_squared());
        let down = (up_on_look - up).normalize() * view_height;
        let right = look.cross(&down).normalize() * view_width;
        let upper_left = look_at - down * 0.5 - right * 0.5;

        Self { eye, down, right, upper_left }
    }

    /// Ray through image-plane point `film` (in `[0, 1]^2`) from an origin
    /// nudged by `lens` along the right/down basis.
    pub fn generate_ray(&self, film: &Vector2f, lens: &Vector2f) -> Ray3f {
        let origin = self.eye + self.right * lens.x + self.down * lens.y;
        let target = self.upper_left + self.right * film.x + self.down * film.y;
        Ray3f::new(origin, target - origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_basis() {
        let cam = Camera::look_at(
            Vector3f::new(0.0, 0.0, -5.0),
            Vector3f::zeros(),
            Vector3f::new(0.0, 1.0, 0.0),
            60.0,
            2.0,
        );
        let vh = (PI / 6.0).atan() * 10.0;
        assert!((cam.down - Vector3f::new(0.0, -vh, 0.0)).norm() < 1e-4);
        assert!((cam.right - Vector3f::new(2.0 * vh, 0.0, 0.0)).norm() < 1e-4);
        assert!((cam.upper_left - Vector3f::new(-vh, 0.5 * vh, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = Camera::look_at(
            Vector3f::new(1.0, 2.0, 3.0),
            Vector3f::new(1.0, 2.0, 13.0),
            Vector3f::new(0.0, 1.0, 0.0),
            45.0,
            1.0,
        );
        let ray = cam.generate_ray(&Vector2f::new(0.5, 0.5), &Vector2f::zeros());
        assert_eq!(ray.origin(), Vector3f::new(1.0, 2.0, 3.0));
        let dir = ray.dir().normalize();
        assert!((dir - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_lens_offset_moves_origin_only() {
        let cam = Camera::new(
            Vector3f::zeros(),
            Vector3f::new(0.0, -2.0, 0.0),
            Vector3f::new(2.0, 0.0, 0.0),
            Vector3f::new(-1.0, 1.0, 1.0),
        );
        let ray = cam.generate_ray(&Vector2f::new(0.0, 0.0), &Vector2f::new(0.01, -0.01));
        assert!((ray.origin() - Vector3f::new(0.02, 0.02, 0.0)).norm() < 1e-6);
        assert!((ray.at(1.0) - Vector3f::new(-1.0, 1.0, 1.0)).norm() < 1e-6);
    }
}
