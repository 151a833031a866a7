use crate::camera::CameraController;
use crate::config::{ConfigError, SceneConfig};
use crate::constants::MAX_FRAME_DT;
use crate::energy::EnergyField;
use crate::frame::{sanitize_dt, FrameInput};
use crate::layers::{
    BreathingRaysLayer, CloseBokehLayer, DriftFogLayer, ForceMotesLayer, LayerKind, ParticleLayer,
    PulsingBokehLayer, WrappingDustLayer,
};
use crate::orbital::OrbitalBody;
use crate::pointer::{PointerInbox, PointerInputTracker, PointerState, ScrollState};
use fnv::FnvHasher;
use glam::Vec3;
use std::hash::Hasher;
use std::sync::Arc;


/// Owns every piece of scene state and advances it once per frame.
///
/// Nothing is global: any number of coordinators can live side by side, and
/// two built from the same seed and config produce identical particles.
pub struct SceneCoordinator {
    config: SceneConfig,
    seed: u64,
    tracker: PointerInputTracker,
    fog: DriftFogLayer,
    bokeh: PulsingBokehLayer,
    dust: WrappingDustLayer,
    rays: BreathingRaysLayer,
    motes: ForceMotesLayer,
    close_bokeh: CloseBokehLayer,
    atom: OrbitalBody,
    energy: EnergyField,
    camera: CameraController,
    elapsed: f32,
    frame_count: u64,
}

impl SceneCoordinator {
    pub fn new(config: SceneConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Default tuning with the given seed. The defaults always validate.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(SceneConfig::default(), seed)
    }

    fn build(config: SceneConfig, seed: u64) -> Self {
        let scene = Self {
            config,
            seed,
            tracker: PointerInputTracker::new(config.pointer),
            fog: DriftFogLayer::new(config.fog, seed),
            bokeh: PulsingBokehLayer::new(config.bokeh, seed),
            dust: WrappingDustLayer::new(config.dust, seed),
            rays: BreathingRaysLayer::new(config.rays, seed),
            motes: ForceMotesLayer::new(config.motes, seed),
            close_bokeh: CloseBokehLayer::new(config.close_bokeh, seed),
            atom: OrbitalBody::new(config.orbital, seed),
            energy: EnergyField::new(config.energy),
            camera: CameraController::new(config.camera),
            elapsed: 0.0,
            frame_count: 0,
        };
        log::debug!(
            "scene seeded with {}: {} particles across {} layers, {} orbits",
            seed,
            scene.population(),
            LayerKind::ALL.len(),
            scene.atom.orbits().len()
        );
        scene
    }

    #[inline]
    pub fn ingest_pointer(&self, raw_x: f32, raw_y: f32) {
        self.tracker.ingest_pointer(raw_x, raw_y);
    }

    #[inline]
    pub fn ingest_scroll(&self, progress: f32) {
        self.tracker.ingest_scroll(progress);
    }

    /// Shared handle for input handlers that outlive a borrow of the scene.
    pub fn inbox(&self) -> Arc<PointerInbox> {
        self.tracker.inbox()
    }

    /// Advance the scene to `elapsed_seconds` since mount.
    ///
    /// A non-finite time repeats the previous one; time running backwards is
    /// taken as is with `dt = 0`, so motion computed from elapsed time follows
    /// the new clock while integrated state (mote velocities, the nucleus and
    /// camera followers) stays put. The pointer and nucleus are updated before
    /// any layer reads them.
    pub fn tick(&mut self, elapsed_seconds: f32) -> FrameInput {
        let elapsed = if elapsed_seconds.is_finite() {
            elapsed_seconds
        } else {
            let held = self.elapsed;
            log::trace!("non-finite frame time {elapsed_seconds}, holding {held}");
            self.elapsed
        };
        let raw_dt = elapsed - self.elapsed;
        if raw_dt > MAX_FRAME_DT {
            log::warn!("frame gap of {raw_dt:.3}s clamped to {MAX_FRAME_DT}s");
        }
        let dt = sanitize_dt(raw_dt);
        self.elapsed = elapsed;
        self.frame_count += 1;

        self.tracker.tick();
        let (pointer, scroll) = (self.tracker.state(), self.tracker.scroll());
        let frame = FrameInput::new(elapsed, dt, pointer, scroll);

        self.atom.update_nucleus(&frame);
        for layer in self.layers_mut() {
            layer.update(&frame);
        }
        self.atom.update_electrons(&frame);
        self.camera.update(&frame);
        frame
    }

    pub fn layers(&self) -> [&dyn ParticleLayer; 6] {
        [
            &self.fog,
            &self.bokeh,
            &self.dust,
            &self.rays,
            &self.motes,
            &self.close_bokeh,
        ]
    }

    fn layers_mut(&mut self) -> [&mut dyn ParticleLayer; 6] {
        [
            &mut self.fog,
            &mut self.bokeh,
            &mut self.dust,
            &mut self.rays,
            &mut self.motes,
            &mut self.close_bokeh,
        ]
    }

    pub fn layer(&self, kind: LayerKind) -> &dyn ParticleLayer {
        match kind {
            LayerKind::DriftFog => &self.fog,
            LayerKind::PulsingBokeh => &self.bokeh,
            LayerKind::WrappingDust => &self.dust,
            LayerKind::BreathingRays => &self.rays,
            LayerKind::ForceMotes => &self.motes,
            LayerKind::CloseBokeh => &self.close_bokeh,
        }
    }

    pub fn fog(&self) -> &DriftFogLayer {
        &self.fog
    }

    pub fn bokeh(&self) -> &PulsingBokehLayer {
        &self.bokeh
    }

    pub fn dust(&self) -> &WrappingDustLayer {
        &self.dust
    }

    pub fn rays(&self) -> &BreathingRaysLayer {
        &self.rays
    }

    pub fn motes(&self) -> &ForceMotesLayer {
        &self.motes
    }

    pub fn motes_mut(&mut self) -> &mut ForceMotesLayer {
        &mut self.motes
    }

    pub fn close_bokeh(&self) -> &CloseBokehLayer {
        &self.close_bokeh
    }

    pub fn atom(&self) -> &OrbitalBody {
        &self.atom
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn energy_field(&self) -> &EnergyField {
        &self.energy
    }

    /// Pointer on the mote plane, for evaluating the energy field.
    pub fn pointer_world(&self) -> Vec3 {
        self.motes.pointer_world()
    }

    pub fn pointer(&self) -> PointerState {
        self.tracker.state()
    }

    pub fn scroll(&self) -> ScrollState {
        self.tracker.scroll()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total particles across all layers; constant for the scene's lifetime.
    pub fn population(&self) -> usize {
        self.layers().iter().map(|l| l.len()).sum()
    }

    /// FNV-1a over the bit patterns of every layer particle and electron
    /// position. Equal fingerprints mean byte-identical positions.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FnvHasher::default();
        let mut feed = |v: Vec3| {
            for lane in v.to_array() {
                // little-endian so every target hashes the same bytes
                hasher.write(&lane.to_bits().to_le_bytes());
            }
        };
        for layer in self.layers() {
            for p in layer.particles() {
                feed(p.position);
            }
        }
        for orbit in self.atom.orbits() {
            feed(orbit.position);
        }
        hasher.finish()
    }
}
