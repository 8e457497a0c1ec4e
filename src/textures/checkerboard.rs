// Copyright @yucwang 2026

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

/// Hard-edged checks, `scale` cells per unit of u and v on each axis pair.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckerboardTexture {
    scale: Float,
    even: RGBSpectrum,
    odd: RGBSpectrum,
}

impl CheckerboardTexture {
    pub fn new(scale: Float, even: RGBSpectrum, odd: RGBSpectrum) -> Self {
        Self { scale, even, odd }
    }

    pub fn scale(&self) -> Float {
        self.scale
    }

    pub fn eval(&self, u: Float, v: Float) -> RGBSpectrum {
        let x = (self.scale * 2.0 * u).floor() as i64;
        let y = (self.scale * 2.0 * v).floor() as i64;
        if (x + y).rem_euclid(2) == 0 {
            self.even
        } else {
            self.odd
        }
    }
}
