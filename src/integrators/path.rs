// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::material::Material;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::constants::{Float, INV_PI, INV_TWO_PI, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::random_unit_vector;

/// Iterative path tracer. Emissive surfaces and the background are the only
/// light sources; a path that neither reaches one nor escapes within
/// `max_bounces` contributes black.
pub struct PathIntegrator {
    pub max_bounces: u32,
}

impl PathIntegrator {
    pub fn new(max_bounces: u32) -> Self {
        Self { max_bounces }
    }
}

/// Equirectangular coordinates of a direction; +y is `v = 0`.
pub fn direction_to_uv(d: &Vector3f) -> Vector2f {
    let u = d.x.atan2(d.z) * INV_TWO_PI + 0.5;
    let v = (d.y / d.norm()).clamp(-1.0, 1.0).acos() * INV_PI;
    Vector2f::new(u, v)
}

fn reflect(d: &Vector3f, n: &Vector3f) -> Vector3f {
    d - n * (2.0 * d.dot(n))
}

impl Integrator for PathIntegrator {
    fn radiance(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng) -> RGBSpectrum {
        let mut throughput = RGBSpectrum::white();
        let mut ray = *ray;

        for _ in 0..self.max_bounces {
            let hit = match scene.ray_intersection(&ray) {
                Some(hit) => hit,
                None => {
                    let uv = direction_to_uv(&ray.dir());
                    return throughput * scene.background().sample(uv.x, uv.y);
                }
            };

            let material = scene.material(hit.material());
            let uv = hit.uv();
            throughput *= material.texture().sample(uv.x, uv.y);

            let dir = match material {
                Material::Diffuse(_) => random_unit_vector(rng) + hit.normal(),
                Material::Specular(_) => reflect(&ray.dir(), &hit.normal()),
                Material::Emissive(_) => return throughput,
            };
            ray = Ray3f::new(hit.p(), dir);
        }

        RGBSpectrum::black()
    }
}
