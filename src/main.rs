// Copyright 2020 TwoCookingMice

use clap::Parser;
use pathlet::core::scene_loader::{load_scene, load_scene_from_str};
use pathlet::core::settings::{RenderSettings, DEFAULT_JITTER, DEFAULT_MAX_BOUNCES, DEFAULT_SAMPLES};
use pathlet::integrators::path::PathIntegrator;
use pathlet::io::png_utils::PngRowWriter;
use pathlet::math::constants::Float;
use pathlet::renderers::simple::{Renderer, SimpleRenderer};

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Geometry {
    width: usize,
    height: usize,
}

fn parse_geometry(s: &str) -> Result<Geometry, String> {
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width = w.trim().parse::<usize>().map_err(|e| format!("bad width '{}': {}", w, e))?;
    let height = h.trim().parse::<usize>().map_err(|e| format!("bad height '{}': {}", h, e))?;
    if width == 0 || height == 0 {
        return Err(format!("image size must be positive, got {}x{}", width, height));
    }
    Ok(Geometry { width, height })
}

/// Renders a scene description to an 8-bit PNG.
#[derive(Parser, Debug)]
#[command(name = "pathlet", version, about)]
struct Cli {
    /// Output size.
    #[arg(short = 'g', long, value_name = "WIDTHxHEIGHT", value_parser = parse_geometry, default_value = "640x480")]
    geometry: Geometry,

    /// Samples per pixel.
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES, value_parser = clap::value_parser!(u32).range(1..))]
    samples: u32,

    /// Maximum number of bounces per path.
    #[arg(short, long, default_value_t = DEFAULT_MAX_BOUNCES, value_parser = clap::value_parser!(u32).range(1..))]
    bounces: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads [default: available parallelism]
    #[arg(long)]
    threads: Option<usize>,

    /// Lens jitter amplitude.
    #[arg(long, default_value_t = DEFAULT_JITTER)]
    jitter: Float,

    /// Output PNG path; stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    no_progress: bool,

    /// Scene file, or `-` for stdin.
    input: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> RenderSettings {
        let defaults = RenderSettings::default();
        RenderSettings {
            width: self.geometry.width,
            height: self.geometry.height,
            samples: self.samples,
            max_bounces: self.bounces,
            jitter: self.jitter,
            seed: self.seed,
            threads: self.threads.unwrap_or(defaults.threads),
            show_progress: !self.no_progress,
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let settings = cli.settings();
    let aspect = settings.aspect_ratio();

    let scene = match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => load_scene(path, aspect)?,
        _ => {
            log::info!("Reading scene from stdin.");
            let mut src = String::new();
            io::stdin().read_to_string(&mut src)?;
            load_scene_from_str(&src, aspect, Path::new("."))?
        }
    };

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => {
            let stdout = io::stdout();
            if stdout.is_terminal() {
                return Err("refusing to write PNG data to a terminal; use -o or redirect stdout".into());
            }
            Box::new(BufWriter::new(stdout.lock()))
        }
    };

    let integrator = PathIntegrator::new(settings.max_bounces);
    let renderer = SimpleRenderer::new(Box::new(integrator), settings);
    let mut writer = PngRowWriter::new(out);
    renderer.render(&scene, &mut writer)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
