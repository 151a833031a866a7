#![cfg(target_arch = "wasm32")]
use instant::Instant;
use js_sys::Float32Array;
use scene_core::{
    normalize_pointer_px, scroll_progress, LayerKind, ParticleInstance, ParticleLayer, SceneConfig,
    SceneCoordinator,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web ready");
    Ok(())
}

/// Browser handle to one scene.
///
/// Pointer and scroll handlers call the `ingest_*` methods whenever they
/// fire; the animation frame callback calls `tick` (or `tick_now`) and then
/// pulls flat instance buffers, `ParticleInstance::LANES` floats per instance.
#[wasm_bindgen]
pub struct Scene {
    inner: SceneCoordinator,
    mounted: Instant,
    scratch: Vec<ParticleInstance>,
}

#[wasm_bindgen]
impl Scene {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Result<Scene, JsValue> {
        log::info!("[scene] mount seed={seed}");
        let config = SceneConfig::default();
        let inner = SceneCoordinator::new(config, u64::from(seed)).map_err(|e| {
            log::error!("[scene] invalid config: {e}");
            JsValue::from_str(&e.to_string())
        })?;
        Ok(Scene {
            inner,
            mounted: Instant::now(),
            scratch: Vec::new(),
        })
    }

    pub fn ingest_pointer(&self, x: f32, y: f32) {
        self.inner.ingest_pointer(x, y);
    }

    /// Pointer in CSS pixels relative to a viewport of `width` × `height`.
    pub fn ingest_pointer_px(&self, px: f32, py: f32, width: f32, height: f32) {
        let (x, y) = normalize_pointer_px(px, py, width, height);
        self.inner.ingest_pointer(x, y);
    }

    pub fn ingest_scroll(&self, progress: f32) {
        self.inner.ingest_scroll(progress);
    }

    pub fn ingest_scroll_px(&self, scroll_top: f32, scroll_height: f32, viewport_height: f32) {
        let progress = scroll_progress(scroll_top, scroll_height, viewport_height);
        self.inner.ingest_scroll(progress);
    }

    pub fn tick(&mut self, elapsed_seconds: f32) {
        self.inner.tick(elapsed_seconds);
    }

    /// Tick with the time since this scene was constructed.
    pub fn tick_now(&mut self) {
        let elapsed = self.mounted.elapsed().as_secs_f32();
        self.inner.tick(elapsed);
    }

    pub fn layer_count(&self) -> u32 {
        LayerKind::ALL.len() as u32
    }

    pub fn layer_name(&self, kind: u32) -> Result<String, JsValue> {
        Ok(layer_kind(kind)?.name().to_string())
    }

    pub fn layer_instances(&mut self, kind: u32) -> Result<Float32Array, JsValue> {
        let kind = layer_kind(kind)?;
        self.inner.layer(kind).write_instances(&mut self.scratch);
        Ok(self.flush())
    }

    /// `[offset.x, offset.y, offset.z, rotation_z]` for the layer group.
    pub fn layer_group(&self, kind: u32) -> Result<Float32Array, JsValue> {
        let g = self.inner.layer(layer_kind(kind)?).group();
        let v = [g.offset.x, g.offset.y, g.offset.z, g.rotation_z];
        Ok(Float32Array::from(&v[..]))
    }

    pub fn trail_instances(&mut self) -> Float32Array {
        let atom = self.inner.atom();
        atom.write_trail_instances(&mut self.scratch);
        self.flush()
    }

    pub fn electron_instances(&mut self) -> Float32Array {
        let atom = self.inner.atom();
        atom.write_electron_instances(&mut self.scratch);
        self.flush()
    }

    /// `[x, y, z, scale]`.
    pub fn nucleus(&self) -> Float32Array {
        let n = self.inner.atom().nucleus();
        let v = [n.position.x, n.position.y, n.position.z, n.scale];
        Float32Array::from(&v[..])
    }

    /// Camera position followed by look target.
    pub fn camera(&self) -> Float32Array {
        let s = self.inner.camera().state();
        let v = [
            s.position.x,
            s.position.y,
            s.position.z,
            s.look_target.x,
            s.look_target.y,
            s.look_target.z,
        ];
        Float32Array::from(&v[..])
    }

    /// Column-major view matrix.
    pub fn view_matrix(&self) -> Float32Array {
        let m = self.inner.camera().view_matrix().to_cols_array();
        Float32Array::from(&m[..])
    }

    /// Pointer on the mote plane, for evaluating the energy field in a shader.
    pub fn pointer_world(&self) -> Float32Array {
        let p = self.inner.pointer_world();
        Float32Array::from(&p.to_array()[..])
    }

    /// Hex fingerprint of all particle positions; compare against the value
    /// the pre-render step recorded to detect hydration drift.
    pub fn fingerprint(&self) -> String {
        format!("{:016x}", self.inner.fingerprint())
    }

    pub fn population(&self) -> u32 {
        self.inner.population() as u32
    }
}

impl Scene {
    fn flush(&self) -> Float32Array {
        let lanes: &[f32] = bytemuck::cast_slice(self.scratch.as_slice());
        Float32Array::from(lanes)
    }
}

fn layer_kind(index: u32) -> Result<LayerKind, JsValue> {
    LayerKind::from_index(index).ok_or_else(|| {
        log::warn!("[scene] unknown layer index {index}");
        JsValue::from_str(&format!("unknown layer index {index}"))
    })
}
