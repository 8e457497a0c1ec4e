// Copyright @yucwang 2023

use crate::core::material::MaterialId;
use crate::math::constants::{ Float, Vector2f, Vector3f };

/// Only constructed for a positive, finite hit distance.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceIntersection {
    p: Vector3f,
    normal: Vector3f,
    uv: Vector2f,
    t: Float,
    material: MaterialId,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_normal: Vector3f,
               new_uv: Vector2f,
               new_t: Float) -> Self {
        Self { p: new_p, normal: new_normal, uv: new_uv, t: new_t, material: MaterialId::DEFAULT }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn uv(&self) -> Vector2f {
        self.uv
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn with_material(self, material: MaterialId) -> Self {
        Self { material, ..self }
    }
}
