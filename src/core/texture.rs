// Copyright @yucwang 2026

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;
use crate::textures::checkerboard::CheckerboardTexture;
use crate::textures::image::ImageTexture;

#[derive(Clone, Debug, PartialEq)]
pub enum Texture {
    Solid(RGBSpectrum),
    Checkerboard(CheckerboardTexture),
    Image(ImageTexture),
}

impl Texture {
    pub fn solid(r: Float, g: Float, b: Float) -> Self {
        Texture::Solid(RGBSpectrum::new(r, g, b))
    }

    pub fn sample(&self, u: Float, v: Float) -> RGBSpectrum {
        match self {
            Texture::Solid(color) => *color,
            Texture::Checkerboard(checks) => checks.eval(u, v),
            Texture::Image(image) => image.sample_bilinear(u, v),
        }
    }

    /// Scalar weight for importance tables; not used for shading.
    pub fn sample_intensity(&self, u: Float, v: Float) -> Float {
        match self {
            Texture::Solid(color) => color.sum(),
            Texture::Checkerboard(checks) => checks.eval(u, v).sum(),
            Texture::Image(image) => image.texel_intensity(u, v),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Texture::Solid(_) => String::from("SolidTexture"),
            Texture::Checkerboard(_) => String::from("CheckerboardTexture"),
            Texture::Image(image) => {
                let (w, h) = image.dimensions();
                format!("ImageTexture({}x{})", w, h)
            }
        }
    }
}
