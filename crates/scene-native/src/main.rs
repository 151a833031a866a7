use anyhow::{bail, Context, Result};
use glam::Vec3;
use rand::prelude::*;
use scene_core::{LayerKind, ParticleLayer, SceneCoordinator};
use std::env;
use std::time::Instant;

const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_FPS: f32 = 60.0;

const USAGE: &str = "usage: scene-prerender [--frames N] [--seed S] [--fps F] [--expect HEX]";

// wandering pointer: per-frame jitter and pull back toward the center
const WANDER_STEP: f32 = 0.02;
const WANDER_RECENTER: f32 = 0.01;

#[derive(Debug)]
struct Options {
    frames: u32,
    seed: u64,
    fps: f32,
    /// Fingerprint reported by another build (the wasm frontend) to check
    /// against, as hex.
    expect: Option<u64>,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options {
        frames: DEFAULT_FRAMES,
        seed: DEFAULT_SEED,
        fps: DEFAULT_FPS,
        expect: None,
    };
    let mut args = env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = || args.next().with_context(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--frames" => opts.frames = value()?.parse().context("--frames")?,
            "--seed" => opts.seed = value()?.parse().context("--seed")?,
            "--fps" => opts.fps = value()?.parse().context("--fps")?,
            "--expect" => {
                let hex = value()?;
                let hex = hex.trim_start_matches("0x");
                opts.expect = Some(u64::from_str_radix(hex, 16).context("--expect")?);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument `{other}`"),
        }
    }
    if !(opts.fps.is_finite() && opts.fps > 0.0) {
        bail!("--fps must be a positive number, got {}", opts.fps);
    }
    Ok(opts)
}

/// Random walk over the normalized viewport, nudged back toward the middle.
struct WanderingPointer {
    rng: StdRng,
    x: f32,
    y: f32,
}

impl WanderingPointer {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            x: 0.5,
            y: 0.5,
        }
    }

    fn step(&mut self) -> (f32, f32) {
        self.x += self.rng.gen_range(-WANDER_STEP..WANDER_STEP) + (0.5 - self.x) * WANDER_RECENTER;
        self.y += self.rng.gen_range(-WANDER_STEP..WANDER_STEP) + (0.5 - self.y) * WANDER_RECENTER;
        self.x = self.x.clamp(0.0, 1.0);
        self.y = self.y.clamp(0.0, 1.0);
        (self.x, self.y)
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = parse_args()?;
    log::info!("[prerender] {:?}", opts);

    // pre-render and hydration passes must agree before anything moves
    let mut scene = SceneCoordinator::with_seed(opts.seed);
    let hydrated = SceneCoordinator::with_seed(opts.seed);
    let (a, b) = (scene.fingerprint(), hydrated.fingerprint());
    if a != b {
        let seed = opts.seed;
        bail!("hydration mismatch for seed {seed}: {a:016x} != {b:016x}");
    }
    // the browser build prints the same hex from `Scene::fingerprint`
    if let Some(expected) = opts.expect {
        if a != expected {
            bail!("fingerprint {a:016x} != expected {expected:016x}");
        }
        log::info!("[prerender] matches the expected fingerprint");
    }
    log::info!(
        "[prerender] seed {} fingerprint {a:016x}, {} particles",
        opts.seed,
        scene.population()
    );
    for kind in LayerKind::ALL {
        log::info!("  {:<15} {:>5}", kind.name(), scene.layer(kind).len());
    }

    let mut pointer = WanderingPointer::new(opts.seed);
    let frames_per_report = opts.fps.round().max(1.0) as u32;
    let wall = Instant::now();

    for frame in 1..=opts.frames {
        let (x, y) = pointer.step();
        scene.ingest_pointer(x, y);
        scene.ingest_scroll(frame as f32 / opts.frames.max(1) as f32);
        scene.tick(frame as f32 / opts.fps);

        if frame % frames_per_report == 0 {
            let camera: Vec3 = scene.camera().state().position;
            log::info!(
                "[t={:>6.2}s] motes mean {:.4} max {:.4} | nucleus {:.3?} | camera {:.3?}",
                scene.elapsed(),
                scene.motes().mean_displacement(),
                scene.motes().max_displacement(),
                scene.atom().nucleus().position.to_array(),
                camera.to_array(),
            );
        }
    }

    let non_finite = scene
        .layers()
        .iter()
        .flat_map(|l| l.particles().iter())
        .filter(|p| !p.position.is_finite())
        .count();
    if non_finite > 0 {
        bail!("{non_finite} particles left the finite range");
    }

    log::info!(
        "[prerender] {} frames in {:.2?}, final fingerprint {:016x}",
        scene.frame_count(),
        wall.elapsed(),
        scene.fingerprint()
    );
    Ok(())
}
