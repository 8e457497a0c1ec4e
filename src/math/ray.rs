// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

/// A ray whose direction is kept as given; callers that need unit length
/// normalise themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f) -> Self {
        Self { origin: o, dir: d }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::Vector3f;
    use super::Ray3f;

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(1.0, 0.0, 0.0);
        let d = Vector3f::new(0.0, 0.0, 2.0);
        let ray = Ray3f::new(o, d);
        assert_eq!(o, ray.origin());
        assert_eq!(d, ray.dir());

        let p = ray.at(1.5);
        assert!((p - Vector3f::new(1.0, 0.0, 3.0)).norm() < 1e-6);
    }
}
