// Copyright @yucwang 2026

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;
use image::io::Reader as ImageReader;
use image::GenericImageView;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to open image {path}: {source}")]
    Open { path: String, source: std::io::Error },
    #[error("failed to decode image {path}: {source}")]
    Decode { path: String, source: image::ImageError },
    #[error("image {path} has invalid resolution {width}x{height}")]
    Empty { path: String, width: usize, height: usize },
}

/// Row-major float texels, top row first. Loaded once, read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageTexture {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<Float>,
}

fn srgb_to_linear(v: Float) -> Float {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

impl ImageTexture {
    /// Panics if `data` does not hold `width * height * channels` values.
    pub fn from_data(width: usize, height: usize, channels: usize, data: Vec<Float>) -> Self {
        assert_eq!(data.len(), width * height * channels, "texel buffer size mismatch");
        Self { width, height, channels, data }
    }

    /// Loads an LDR or HDR image. LDR sources are converted from sRGB to
    /// linear; grey sources keep a single channel.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let img = ImageReader::open(path)
            .map_err(|source| TextureError::Open { path: display.clone(), source })?
            .with_guessed_format()
            .map_err(|source| TextureError::Open { path: display.clone(), source })?
            .decode()
            .map_err(|source| TextureError::Decode { path: display.clone(), source })?;

        let (width, height) = img.dimensions();
        let (width, height) = (width as usize, height as usize);
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { path: display, width, height });
        }

        let linear = matches!(img.color(), image::ColorType::Rgb32F | image::ColorType::Rgba32F);
        let channels = if img.color().channel_count() < 3 { 1 } else { 3 };
        let rgba = img.to_rgba32f();

        let mut data = Vec::with_capacity(width * height * channels);
        for p in rgba.pixels() {
            for c in 0..channels {
                let v = p[c];
                data.push(if linear { v } else { srgb_to_linear(v) });
            }
        }

        log::debug!("loaded image texture {} ({}x{}, {} channel(s))", display, width, height, channels);
        Ok(Self::from_data(width, height, channels, data))
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Texel at wrapped integer coordinates. Single-channel sources are
    /// replicated to grey; otherwise the first three channels are used.
    pub fn texel(&self, x: isize, y: isize) -> RGBSpectrum {
        let x = x.rem_euclid(self.width as isize) as usize;
        let y = y.rem_euclid(self.height as isize) as usize;
        let base = (y * self.width + x) * self.channels;
        if self.channels < 3 {
            RGBSpectrum::grey(self.data[base])
        } else {
            RGBSpectrum::new(self.data[base], self.data[base + 1], self.data[base + 2])
        }
    }

    /// Bilinear filter of the four texels around `(u * width, v * height)`,
    /// wrapping at both edges. Integer-aligned coordinates return the texel.
    pub fn sample_bilinear(&self, u: Float, v: Float) -> RGBSpectrum {
        let x = u * self.width as Float;
        let y = v * self.height as Float;
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;
        let (xi, yi) = (x0 as isize, y0 as isize);

        let up = self.texel(xi, yi).lerp(&self.texel(xi + 1, yi), tx);
        let down = self.texel(xi, yi + 1).lerp(&self.texel(xi + 1, yi + 1), tx);
        up.lerp(&down, ty)
    }

    /// Channel sum of the nearest texel, each channel clamped to [0, 1].
    pub fn texel_intensity(&self, u: Float, v: Float) -> Float {
        let x = (u * self.width as Float).floor() as isize;
        let y = (v * self.height as Float).floor() as isize;
        let c = self.texel(x, y).clamp(0.0, 1.0);
        if self.channels < 3 {
            3.0 * c.r()
        } else {
            c.sum()
        }
    }
}
