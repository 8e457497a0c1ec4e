// Copyright @yucwang 2023

use crate::core::texture::Texture;
use crate::math::spectrum::RGBSpectrum;

/// Handle into the scene's material list. Index 0 is the default material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

impl MaterialId {
    pub const DEFAULT: MaterialId = MaterialId(0);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Scatters around the normal; the texture is the albedo.
    Diffuse(Texture),
    /// Perfect mirror tinted by the texture.
    Specular(Texture),
    /// Terminates the path; the texture is the emitted radiance.
    Emissive(Texture),
}

impl Default for Material {
    fn default() -> Self {
        Material::Diffuse(Texture::Solid(RGBSpectrum::grey(0.5)))
    }
}

impl Material {
    pub fn texture(&self) -> &Texture {
        match self {
            Material::Diffuse(texture) | Material::Specular(texture) | Material::Emissive(texture) => texture,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Material::Diffuse(_) => "diffuse",
            Material::Specular(_) => "specular",
            Material::Emissive(_) => "emissive",
        }
    }
}
