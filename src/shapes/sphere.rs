// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::math::constants::{Float, INV_PI, INV_TWO_PI, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    /// Entry hit only: the smaller quadratic root, reported when the
    /// discriminant is positive. A ray starting inside the sphere gets a
    /// negative root here and never resolves its exit point.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let oc = ray.origin() - self.center;
        let d = ray.dir();
        let a = d.norm_squared();
        let half_b = oc.dot(&d);
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if !(discriminant > 0.0) {
            return None;
        }

        let t = (-half_b - discriminant.sqrt()) / a;
        let p = ray.at(t);
        let n = (p - self.center).normalize();
        let uv = Vector2f::new(n.x.atan2(n.z) * INV_TWO_PI + 0.5, n.y.clamp(-1.0, 1.0).acos() * INV_PI);
        Some(SurfaceIntersection::new(p, n, uv, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_from_outside_lands_on_surface() {
        let center = Vector3f::new(1.0, 2.0, 3.0);
        let sphere = Sphere::new(center, 1.5);
        let origin = Vector3f::new(1.0, 2.0, -7.0);
        let ray = Ray3f::new(origin, (center - origin) * 0.3);

        let hit = sphere.ray_intersection(&ray).expect("expected hit");
        assert!(hit.t() > 0.0);
        assert!(((hit.p() - center).norm() - 1.5).abs() < 1e-4);
        assert!((hit.normal() - Vector3f::new(0.0, 0.0, -1.0)).norm() < 1e-4);
    }

    #[test]
    fn test_miss_and_tangent_rays() {
        let sphere = Sphere::new(Vector3f::zeros(), 1.0);
        let miss = Ray3f::new(Vector3f::new(0.0, 2.0, -5.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(sphere.ray_intersection(&miss).is_none());

        let tangent = Ray3f::new(Vector3f::new(0.0, 1.0, -5.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(sphere.ray_intersection(&tangent).is_none());
    }

    #[test]
    fn test_origin_inside_reports_near_root_only() {
        let sphere = Sphere::new(Vector3f::zeros(), 1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0));
        let hit = sphere.ray_intersection(&ray).expect("discriminant is positive");
        assert!((hit.t() + 1.0).abs() < 1e-6);
    }
}
