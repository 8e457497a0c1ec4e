// Copyright @yucwang 2026

use crate::math::constants::Float;

pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;
pub const DEFAULT_SAMPLES: u32 = 64;
pub const DEFAULT_MAX_BOUNCES: u32 = 2;
/// Lens jitter as a fraction of the image-plane basis vectors.
pub const DEFAULT_JITTER: Float = 0.01;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub samples: u32,
    pub max_bounces: u32,
    pub jitter: Float,
    pub seed: u64,
    pub threads: usize,
    pub show_progress: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            samples: DEFAULT_SAMPLES,
            max_bounces: DEFAULT_MAX_BOUNCES,
            jitter: DEFAULT_JITTER,
            seed: 0,
            threads: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            show_progress: true,
        }
    }
}

impl RenderSettings {
    pub fn aspect_ratio(&self) -> Float {
        self.width as Float / self.height as Float
    }
}
