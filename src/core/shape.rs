// Copyright @yucwang 2023

use crate::core::interaction::SurfaceIntersection;
use crate::math::ray::Ray3f;
use crate::shapes::plane::Plane;
use crate::shapes::sphere::Sphere;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
}

impl Shape {
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        match self {
            Shape::Sphere(sphere) => sphere.ray_intersection(ray),
            Shape::Plane(plane) => plane.ray_intersection(ray),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}
