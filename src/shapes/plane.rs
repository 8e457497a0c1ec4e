// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Infinite plane `normal . p = offset` with a tangent frame for tiling
/// texture coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    normal: Vector3f,
    center: Vector3f,
    tangent_u: Vector3f,
    tangent_v: Vector3f,
}

impl Plane {
    pub fn new(normal: Vector3f, offset: Float) -> Self {
        let normal = normal.normalize();
        let center = normal * offset;
        let mut tangent_u = normal.cross(&Vector3f::x());
        if tangent_u.norm_squared() < EPSILON {
            tangent_u = normal.cross(&Vector3f::y());
        }
        let tangent_u = tangent_u.normalize();
        let tangent_v = normal.cross(&tangent_u);
        Self::from_frame(normal, center, tangent_u, tangent_v)
    }

    pub fn from_frame(normal: Vector3f, center: Vector3f, tangent_u: Vector3f, tangent_v: Vector3f) -> Self {
        Self { normal, center, tangent_u, tangent_v }
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let denom = self.normal.dot(&ray.dir());
        if denom.abs() <= EPSILON {
            return None;
        }

        let t = (self.center - ray.origin()).dot(&self.normal) / denom;
        if t < 0.0 {
            return None;
        }

        let p = ray.at(t);
        let offset = p - self.center;
        let u = self.tangent_u.dot(&offset);
        let v = self.tangent_v.dot(&offset);
        let uv = Vector2f::new(u - u.floor(), v - v.floor());
        Some(SurfaceIntersection::new(p, self.normal, uv, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_ray_never_hits() {
        let plane = Plane::new(Vector3f::new(0.0, 1.0, 0.0), -1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.00001, 0.0));
        assert!(plane.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_hit_distance_and_tiled_uv() {
        let plane = Plane::new(Vector3f::new(0.0, 2.0, 0.0), -1.0);
        assert!((plane.center() - Vector3f::new(0.0, -1.0, 0.0)).norm() < 1e-6);

        let ray = Ray3f::new(Vector3f::new(3.25, 1.0, -7.5), Vector3f::new(0.0, -1.0, 0.0));
        let hit = plane.ray_intersection(&ray).expect("expected hit");
        assert!((hit.t() - 2.0).abs() < 1e-6);
        assert!((hit.p().y + 1.0).abs() < 1e-6);
        assert_eq!(hit.normal(), Vector3f::new(0.0, 1.0, 0.0));

        let uv = hit.uv();
        assert!(uv.x >= 0.0 && uv.x < 1.0);
        assert!(uv.y >= 0.0 && uv.y < 1.0);
        // Tangents for a +y normal are -z and -x.
        assert!((uv.x - 0.5).abs() < 1e-5);
        assert!((uv.y - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_plane_behind_ray_is_rejected() {
        let plane = Plane::new(Vector3f::new(0.0, 0.0, 1.0), 5.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0));
        assert!(plane.ray_intersection(&ray).is_none());
    }
}
