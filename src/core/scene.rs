// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::material::{Material, MaterialId};
use crate::core::shape::Shape;
use crate::core::texture::Texture;
use crate::emitters::envmap::BackgroundDistribution;
use crate::math::constants::EPSILON;
use crate::math::ray::Ray3f;
use crate::sensors::camera::Camera;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("background is already set")]
    BackgroundAlreadySet,
    #[error("unknown material id {0}")]
    UnknownMaterial(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: MaterialId,
}

impl SceneObject {
    pub fn new(shape: Shape, material: MaterialId) -> Self {
        Self { shape, material }
    }
}

/// Read-only once built. Materials are append-only with the default grey
/// diffuse at index 0; shapes refer to them by `MaterialId`.
#[derive(Debug)]
pub struct Scene {
    camera: Camera,
    objects: Vec<SceneObject>,
    materials: Vec<Material>,
    background: Texture,
    background_distribution: Option<BackgroundDistribution>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            objects: Vec::new(),
            materials: vec![Material::default()],
            background: Texture::solid(0.0, 0.0, 0.0),
            background_distribution: None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn add_shape(&mut self, shape: impl Into<Shape>, material: MaterialId) -> Result<(), SceneError> {
        if material.0 >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(material.0));
        }
        self.objects.push(SceneObject::new(shape.into(), material));
        Ok(())
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Stores the background and builds its importance table. Allowed once.
    pub fn set_background(&mut self, texture: Texture) -> Result<(), SceneError> {
        if self.background_distribution.is_some() {
            return Err(SceneError::BackgroundAlreadySet);
        }
        let distribution = BackgroundDistribution::build(&texture);
        self.background = texture;
        self.background_distribution = Some(distribution);
        Ok(())
    }

    pub fn has_background(&self) -> bool {
        self.background_distribution.is_some()
    }

    pub fn background(&self) -> &Texture {
        &self.background
    }

    pub fn background_distribution(&self) -> Option<&BackgroundDistribution> {
        self.background_distribution.as_ref()
    }

    /// Nearest hit with `t > EPSILON` over every object, linear in object count.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut best: Option<SurfaceIntersection> = None;
        for object in &self.objects {
            let hit = match object.shape.ray_intersection(ray) {
                Some(hit) => hit,
                None => continue,
            };
            if !(hit.t() > EPSILON) {
                continue;
            }
            if best.as_ref().map_or(true, |b| hit.t() < b.t()) {
                best = Some(hit.with_material(object.material));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector3f;
    use crate::shapes::plane::Plane;
    use crate::shapes::sphere::Sphere;

    fn test_camera() -> Camera {
        Camera::look_at(Vector3f::new(0.0, 0.0, -5.0), Vector3f::zeros(), Vector3f::y(), 60.0, 1.0)
    }

    #[test]
    fn test_default_material_is_grey_diffuse() {
        let scene = Scene::new(test_camera());
        assert_eq!(scene.materials().len(), 1);
        assert_eq!(scene.material(MaterialId::DEFAULT), &Material::Diffuse(Texture::solid(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_scene_ray_intersection_closest_hit() {
        let mut scene = Scene::new(test_camera());
        let far = scene.add_material(Material::Specular(Texture::solid(1.0, 0.0, 0.0)));
        let near = scene.add_material(Material::Emissive(Texture::solid(0.0, 1.0, 0.0)));
        scene.add_shape(Sphere::new(Vector3f::new(0.0, 0.0, 10.0), 2.0), far).unwrap();
        scene.add_shape(Sphere::new(Vector3f::new(0.0, 0.0, 9.0), 2.0), near).unwrap();
        scene.add_shape(Plane::new(Vector3f::new(0.0, 0.0, -1.0), -20.0), MaterialId::DEFAULT).unwrap();

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0));
        let hit = scene.ray_intersection(&ray).expect("expected intersection");
        assert_eq!(hit.material(), near);
        assert!((hit.t() - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_hits_closer_than_epsilon_are_ignored() {
        let mut scene = Scene::new(test_camera());
        scene.add_shape(Plane::new(Vector3f::new(0.0, 0.0, 1.0), 0.0), MaterialId::DEFAULT).unwrap();
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0));
        assert!(scene.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_background_set_once() {
        let mut scene = Scene::new(test_camera());
        assert!(!scene.has_background());
        scene.set_background(Texture::solid(0.2, 0.4, 0.8)).unwrap();
        assert!(scene.background_distribution().is_some());
        assert_eq!(scene.set_background(Texture::solid(1.0, 1.0, 1.0)), Err(SceneError::BackgroundAlreadySet));
        assert_eq!(scene.background(), &Texture::solid(0.2, 0.4, 0.8));
    }

    #[test]
    fn test_unknown_material_rejected() {
        let mut scene = Scene::new(test_camera());
        let err = scene.add_shape(Sphere::new(Vector3f::zeros(), 1.0), MaterialId(3));
        assert_eq!(err, Err(SceneError::UnknownMaterial(3)));
        assert!(scene.is_empty());
    }
}
