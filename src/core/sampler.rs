// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::math::constants::{Float, Vector2f};
use crate::math::ray::Ray3f;
use crate::math::warp::radical_inverse;
use crate::sensors::camera::Camera;

/// Sub-pixel positions for sample `i` of `samples`: a stratified offset on
/// the horizontal axis and the base-2 radical inverse on the vertical axis.
/// Only the lens jitter draws from the random stream.
#[derive(Clone, Debug)]
pub struct PixelSampler {
    samples: u32,
    jitter: Float,
}

impl PixelSampler {
    pub fn new(samples: u32, jitter: Float) -> Self {
        Self { samples, jitter }
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn subpixel_offset(&self, index: u32) -> Vector2f {
        Vector2f::new(
            (index + 1) as Float / (self.samples + 1) as Float,
            radical_inverse(index + 1),
        )
    }

    /// Uniform offset in `[-jitter, jitter)` on both lens axes.
    pub fn lens_offset(&self, rng: &mut LcgRng) -> Vector2f {
        let du = (rng.next_float() - 0.5) * 2.0 * self.jitter;
        let dv = (rng.next_float() - 0.5) * 2.0 * self.jitter;
        Vector2f::new(du, dv)
    }

    pub fn generate_ray(&self,
                        camera: &Camera,
                        pixel: (usize, usize),
                        resolution: (usize, usize),
                        index: u32,
                        rng: &mut LcgRng) -> Ray3f {
        let offset = self.subpixel_offset(index);
        let film = Vector2f::new(
            (pixel.0 as Float + offset.x) / resolution.0 as Float,
            (pixel.1 as Float + offset.y) / resolution.1 as Float,
        );
        let lens = self.lens_offset(rng);
        camera.generate_ray(&film, &lens)
    }
}
