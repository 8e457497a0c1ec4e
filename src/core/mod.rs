// Copyright @yucwang 2021

pub mod film;
pub mod integrator;
pub mod interaction;
pub mod material;
pub mod rng;
pub mod sampler;
pub mod scene;
pub mod scene_loader;
pub mod settings;
pub mod shape;
pub mod texture;
