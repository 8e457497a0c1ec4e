// Copyright @yucwang 2021

use crate::core::film::{RenderError, RowSink};
use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::sampler::PixelSampler;
use crate::core::scene::Scene;
use crate::core::settings::RenderSettings;
use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

pub use super::renderer::Renderer;

/// Clamp to [0, 1], gamma 2 via `sqrt`, scale to bytes (truncating).
pub fn tone_map(color: &RGBSpectrum) -> [u8; 3] {
    let c = color.clamp(0.0, 1.0).sqrt() * 255.0;
    [c.r() as u8, c.g() as u8, c.b() as u8]
}

pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    settings: RenderSettings,
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene, sink: &mut dyn RowSink) -> Result<(), RenderError> {
        let (width, height) = (self.settings.width, self.settings.height);
        sink.begin(width, height)?;
        if width == 0 || height == 0 {
            return sink.finish();
        }

        let samples = match self.settings.samples {
            0 => 1,
            v => v,
        };
        let sampler = PixelSampler::new(samples, self.settings.jitter);
        let thread_count = self.settings.threads.clamp(1, height);
        log::info!(
            "Rendering {}x{} at {} spp, {} bounce(s), {} thread(s).",
            width, height, samples, self.settings.max_bounces,thread_count
        );

        let progress = if self.settings.show_progress {
            let bar = ProgressBar::new(height as u64);
            bar.set_style(
                ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let started = Instant::now();
        let next_row = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<(usize, Vec<u8>)>();

        let result = thread::scope(|scope| -> Result<(), RenderError> {
            for _ in 0..thread_count {
                let tx = tx.clone();
                let next_row = &next_row;
                let sampler = &sampler;
                scope.spawn(move || loop {
                    let y = next_row.fetch_add(1, Ordering::Relaxed);
                    if y >= height {
                        break;
                    }
                    let row = self.render_row(scene, sampler, y);
                    if tx.send((y, row)).is_err() {
                        break;
                    }
                });
            }
            drop(tx);

            // Owning the receiver here means an early return hangs up on
            // the workers instead of letting them finish the frame.
            let rx = rx;
            let mut pending: BTreeMap<usize, Vec<u8>> = BTreeMap::new();
            let mut next_flush = 0usize;
            for (y, row) in rx.iter() {
                pending.insert(y, row);
                while let Some(row) = pending.remove(&next_flush) {
                    sink.write_row(&row)?;
                    next_flush += 1;
                    progress.inc(1);
                }
            }
            Ok(())
        });
        progress.finish_and_clear();
        result?;

        log::info!("Render finished in {:.2?}.", started.elapsed());
        sink.finish()
    }
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, settings: RenderSettings) -> Self {
        Self { integrator, settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Tone-mapped bytes for row `y`. The row's random stream depends only on
    /// the seed and `y`.
    fn render_row(&self, scene: &Scene, sampler: &PixelSampler, y: usize) -> Vec<u8> {
        let (width, height) = (self.settings.width, self.settings.height);
        let mut rng = LcgRng::for_stream(self.settings.seed, y as u64);
        let mut row = Vec::with_capacity(width * 3);
        for x in 0..width {
            let mut color = RGBSpectrum::black();
            for i in 0..sampler.samples() {
                let ray = sampler.generate_ray(scene.camera(), (x, y), (width, height), i, &mut rng);
                color += self.integrator.radiance(scene, &ray, &mut rng);
            }
            row.extend_from_slice(&tone_map(&(color / sampler.samples() as Float)));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_map_gamma_and_clamp() {
        assert_eq!(tone_map(&RGBSpectrum::new(0.0, 1.0, 4.0)), [0, 255, 255]);
        assert_eq!(tone_map(&RGBSpectrum::new(0.25, -1.0, 0.0)), [127, 0, 0]);
        let expected = [
            (0.2f32.sqrt() * 255.0) as u8,
            (0.4f32.sqrt() * 255.0) as u8,
            (0.8f32.sqrt() * 255.0) as u8,
        ];
        assert_eq!(expected, [114, 161, 228]);
        assert_eq!(tone_map(&RGBSpectrum::new(0.2, 0.4, 0.8)), expected);
    }
}
