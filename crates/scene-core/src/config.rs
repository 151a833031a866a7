//! Per-component tuning parameters and their validation.
//!
//! Every `*Params` struct defaults to the values in [`crate::constants`].
//! Validation happens once, when a scene is built; per-frame code assumes a
//! valid configuration and never fails.

use crate::constants::*;
use glam::{Vec2, Vec3};
use thiserror::Error;

/// Invalid scene tuning detected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("layer `{layer}` must contain at least one particle")]
    EmptyLayer { layer: &'static str },
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("mote orbit radius {orbit} exceeds influence radius {influence}")]
    OrbitOutsideInfluence { orbit: f32, influence: f32 },
    #[error("orbit trails need at least one sample")]
    EmptyTrail,
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    in_range(field, value, 0.0, f32::MAX)
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Smoothing factors are per-tick blend weights in `(0, 1]`.
fn blend(field: &'static str, value: f32) -> Result<(), ConfigError> {
    positive(field, value)?;
    in_range(field, value, 0.0, 1.0)
}

fn populated(layer: &'static str, count: usize) -> Result<(), ConfigError> {
    if count == 0 {
        Err(ConfigError::EmptyLayer { layer })
    } else {
        Ok(())
    }
}

fn positive_vec3(field: &'static str, v: Vec3) -> Result<(), ConfigError> {
    positive(field, v.min_element())?;
    finite(field, v.max_element())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerParams {
    pub smoothing: f32,
    pub velocity_scale: f32,
}

impl Default for PointerParams {
    fn default() -> Self {
        Self {
            smoothing: POINTER_SMOOTHING,
            velocity_scale: POINTER_VELOCITY_SCALE,
        }
    }
}

impl PointerParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        blend("pointer.smoothing", self.smoothing)?;
        non_negative("pointer.velocity_scale", self.velocity_scale)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogParams {
    pub count: usize,
    pub omega: f32,
    pub opacity_omega: f32,
    pub drift: Vec3,
    pub parallax: f32,
    pub scroll_fade: f32,
}

impl Default for FogParams {
    fn default() -> Self {
        Self {
            count: FOG_COUNT,
            omega: FOG_OMEGA,
            opacity_omega: FOG_OPACITY_OMEGA,
            drift: Vec3::from(FOG_DRIFT),
            parallax: FOG_PARALLAX,
            scroll_fade: FOG_SCROLL_FADE,
        }
    }
}

impl FogParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        populated("drift-fog", self.count)?;
        positive("fog.omega", self.omega)?;
        finite("fog.opacity_omega", self.opacity_omega)?;
        finite("fog.drift", self.drift.length())?;
        finite("fog.parallax", self.parallax)?;
        in_range("fog.scroll_fade", self.scroll_fade, 0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BokehParams {
    pub count: usize,
    pub bounds: Vec3,
    pub pulse_omega: f32,
    pub pulse_amp: f32,
    pub opacity_omega: f32,
    pub float_omega: f32,
    pub float_amp: f32,
    pub min_opacity: f32,
    pub edge_gain: f32,
    pub parallax: f32,
}

impl Default for BokehParams {
    fn default() -> Self {
        Self {
            count: BOKEH_COUNT,
            bounds: Vec3::from(BOKEH_BOUNDS),
            pulse_omega: BOKEH_PULSE_OMEGA,
            pulse_amp: BOKEH_PULSE_AMP,
            opacity_omega: BOKEH_OPACITY_OMEGA,
            float_omega: BOKEH_FLOAT_OMEGA,
            float_amp: BOKEH_FLOAT_AMP,
            min_opacity: BOKEH_MIN_OPACITY,
            edge_gain: BOKEH_EDGE_GAIN,
            parallax: BOKEH_PARALLAX,
        }
    }
}

impl BokehParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        populated("pulsing-bokeh", self.count)?;
        positive_vec3("bokeh.bounds", self.bounds)?;
        finite("bokeh.pulse_omega", self.pulse_omega)?;
        // scale must stay positive at the trough of the pulse
        in_range("bokeh.pulse_amp", self.pulse_amp, 0.0, 0.95)?;
        finite("bokeh.opacity_omega", self.opacity_omega)?;
        finite("bokeh.float_omega", self.float_omega)?;
        finite("bokeh.float_amp", self.float_amp)?;
        in_range("bokeh.min_opacity", self.min_opacity, 0.0, 1.0)?;
        non_negative("bokeh.edge_gain", self.edge_gain)?;
        finite("bokeh.parallax", self.parallax)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DustParams {
    pub count: usize,
    pub bounds: Vec3,
    pub speed: f32,
    pub noise_freq: f32,
    pub noise_speed: f32,
    pub noise_amp: f32,
    pub parallax: f32,
}

impl Default for DustParams {
    fn default() -> Self {
        Self {
            count: DUST_COUNT,
            bounds: Vec3::from(DUST_BOUNDS),
            speed: DUST_SPEED,
            noise_freq: DUST_NOISE_FREQ,
            noise_speed: DUST_NOISE_SPEED,
            noise_amp: DUST_NOISE_AMP,
            parallax: DUST_PARALLAX,
        }
    }
}

impl DustParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        populated("wrapping-dust", self.count)?;
        positive_vec3("dust.bounds", self.bounds)?;
        non_negative("dust.speed", self.speed)?;
        finite("dust.noise_freq", self.noise_freq)?;
        finite("dust.noise_speed", self.noise_speed)?;
        non_negative("dust.noise_amp", self.noise_amp)?;
        finite("dust.parallax", self.parallax)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaysParams {
    pub count: usize,
    pub breath_omega: f32,
    pub breath_amp: f32,
    pub sway_omega: f32,
    pub sway: f32,
    pub flicker_speed: f32,
    pub pointer_coupling: f32,
    pub rotation_alpha: f32,
}

impl Default for RaysParams {
    fn default() -> Self {
        Self {
            count: RAYS_COUNT,
            breath_omega: RAYS_BREATH_OMEGA,
            breath_amp: RAYS_BREATH_AMP,
            sway_omega: RAYS_SWAY_OMEGA,
            sway: RAYS_SWAY,
            flicker_speed: RAYS_FLICKER_SPEED,
            pointer_coupling: RAYS_POINTER_COUPLING,
            rotation_alpha: RAYS_ROTATION_ALPHA,
        }
    }
}

impl RaysParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        populated("breathing-rays", self.count)?;
        finite("rays.breath_omega", self.breath_omega)?;
        in_range("rays.breath_amp", self.breath_amp, 0.0, 0.95)?;
        finite("rays.sway_omega", self.sway_omega)?;
        finite("rays.sway", self.sway)?;
        finite("rays.flicker_speed", self.flicker_speed)?;
        finite("rays.pointer_coupling", self.pointer_coupling)?;
        blend("rays.rotation_alpha", self.rotation_alpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotesParams {
    pub count: usize,
    /// Half extents of the mote plane; also maps centered pointer to world.
    pub world_extent: Vec2,
    pub pointer_alpha: f32,
    pub epsilon: f32,
    pub influence_radius: f32,
    pub orbit_radius: f32,
    pub attraction: f32,
    pub orbit_speed: f32,
    pub release_threshold: f32,
    pub release_gain: f32,
    /// Ticks a mote ignores further release impulses; 0 disables.
    pub release_cooldown_ticks: u16,
    pub return_stiffness: f32,
    pub ambient: f32,
    pub ambient_omega: f32,
    pub damping: f32,
}

impl Default for MotesParams {
    fn default() -> Self {
        Self {
            count: MOTES_COUNT,
            world_extent: Vec2::from(MOTES_WORLD_EXTENT),
            pointer_alpha: MOTES_POINTER_ALPHA,
            epsilon: MOTE_EPSILON,
            influence_radius: MOTES_INFLUENCE_RADIUS,
            orbit_radius: MOTES_ORBIT_RADIUS,
            attraction: MOTES_ATTRACTION,
            orbit_speed: MOTES_ORBIT_SPEED,
            release_threshold: MOTES_RELEASE_THRESHOLD,
            release_gain: MOTES_RELEASE_GAIN,
            release_cooldown_ticks: MOTES_RELEASE_COOLDOWN,
            return_stiffness: MOTES_RETURN_STIFFNESS,
            ambient: MOTES_AMBIENT,
            ambient_omega: MOTES_AMBIENT_OMEGA,
            damping: MOTES_DAMPING,
        }
    }
}

impl MotesParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        populated("force-motes", self.count)?;
        positive("motes.world_extent", self.world_extent.min_element())?;
        finite("motes.world_extent", self.world_extent.max_element())?;
        blend("motes.pointer_alpha", self.pointer_alpha)?;
        positive("motes.epsilon", self.epsilon)?;
        positive("motes.influence_radius", self.influence_radius)?;
        non_negative("motes.orbit_radius", self.orbit_radius)?;
        if self.orbit_radius > self.influence_radius {
            return Err(ConfigError::OrbitOutsideInfluence {
                orbit: self.orbit_radius,
                influence: self.influence_radius,
            });
        }
        non_negative("motes.attraction", self.attraction)?;
        finite("motes.orbit_speed", self.orbit_speed)?;
        non_negative("motes.release_threshold", self.release_threshold)?;
        non_negative("motes.release_gain", self.release_gain)?;
        // stiffness at or above 1 overshoots the base every tick
        in_range("motes.return_stiffness", self.return_stiffness, 0.0, 0.5)?;
        non_negative("motes.ambient", self.ambient)?;
        finite("motes.ambient_omega", self.ambient_omega)?;
        // without damping below 1 the swarm is not dissipative
        positive("motes.damping", self.damping)?;
        in_range("motes.damping", self.damping, 0.0, 0.999)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloseBokehParams {
    pub count: usize,
    pub omega: f32,
    pub drift: f32,
    pub parallax: f32,
    pub max_radius: f32,
}

impl Default for CloseBokehParams {
    fn default() -> Self {
        Self {
            count: CLOSE_BOKEH_COUNT,
            omega: CLOSE_BOKEH_OMEGA,
            drift: CLOSE_BOKEH_DRIFT,
            parallax: CLOSE_BOKEH_PARALLAX,
            max_radius: CLOSE_BOKEH_MAX_RADIUS,
        }
    }
}

impl CloseBokehParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        populated("close-bokeh", self.count)?;
        finite("close_bokeh.omega", self.omega)?;
        finite("close_bokeh.drift", self.drift)?;
        finite("close_bokeh.parallax", self.parallax)?;
        positive("close_bokeh.max_radius", self.max_radius)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalParams {
    pub count: usize,
    pub base_radius: f32,
    pub radius_step: f32,
    pub base_speed: f32,
    /// Tilt gain per unit of smoothed pointer: x from pointer y, y and z from pointer x.
    pub mouse_gain: Vec3,
    pub sensitivity_falloff: f32,
    pub trail_length: usize,
    pub nucleus_reach: f32,
    pub nucleus_follow_rate: f32,
    pub breath_omega: f32,
    pub breath: f32,
}

impl Default for OrbitalParams {
    fn default() -> Self {
        Self {
            count: ORBIT_COUNT,
            base_radius: ORBIT_BASE_RADIUS,
            radius_step: ORBIT_RADIUS_STEP,
            base_speed: ORBIT_BASE_SPEED,
            mouse_gain: Vec3::from(ORBIT_MOUSE_GAIN),
            sensitivity_falloff: ORBIT_SENSITIVITY_FALLOFF,
            trail_length: TRAIL_LENGTH,
            nucleus_reach: NUCLEUS_REACH,
            nucleus_follow_rate: NUCLEUS_FOLLOW_RATE,
            breath_omega: NUCLEUS_BREATH_OMEGA,
            breath: NUCLEUS_BREATH,
        }
    }
}

impl OrbitalParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        populated("orbital-body", self.count)?;
        positive("orbital.base_radius", self.base_radius)?;
        non_negative("orbital.radius_step", self.radius_step)?;
        finite("orbital.base_speed", self.base_speed)?;
        finite("orbital.mouse_gain", self.mouse_gain.length())?;
        positive("orbital.sensitivity_falloff", self.sensitivity_falloff)?;
        if self.trail_length == 0 {
            return Err(ConfigError::EmptyTrail);
        }
        finite("orbital.nucleus_reach", self.nucleus_reach)?;
        blend("orbital.nucleus_follow_rate", self.nucleus_follow_rate)?;
        finite("orbital.breath_omega", self.breath_omega)?;
        finite("orbital.breath", self.breath)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyFieldParams {
    pub frequency: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub attraction_radius: f32,
    pub attraction_strength: f32,
    pub fresnel_power: f32,
    pub base_opacity: f32,
    pub epsilon: f32,
    /// Unit direction the viewer looks along.
    pub view_dir: Vec3,
}

impl Default for EnergyFieldParams {
    fn default() -> Self {
        Self {
            frequency: ENERGY_FREQUENCY,
            speed: ENERGY_SPEED,
            amplitude: ENERGY_AMPLITUDE,
            attraction_radius: ENERGY_ATTRACTION_RADIUS,
            attraction_strength: ENERGY_ATTRACTION_STRENGTH,
            fresnel_power: ENERGY_FRESNEL_POWER,
            base_opacity: ENERGY_BASE_OPACITY,
            epsilon: MOTE_EPSILON,
            view_dir: Vec3::NEG_Z,
        }
    }
}

impl EnergyFieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("energy.frequency", self.frequency)?;
        finite("energy.speed", self.speed)?;
        finite("energy.amplitude", self.amplitude)?;
        positive("energy.attraction_radius", self.attraction_radius)?;
        finite("energy.attraction_strength", self.attraction_strength)?;
        positive("energy.fresnel_power", self.fresnel_power)?;
        in_range("energy.base_opacity", self.base_opacity, 0.0, 1.0)?;
        positive("energy.epsilon", self.epsilon)?;
        positive("energy.view_dir", self.view_dir.length())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub base_position: Vec3,
    pub base_look_target: Vec3,
    pub drift_omega: Vec2,
    pub drift_amp: Vec2,
    pub parallax_gain: f32,
    pub look_gain: f32,
    pub smoothing: f32,
    pub scroll_lift: f32,
    pub scroll_dolly: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            base_position: Vec3::from(CAMERA_BASE_POSITION),
            base_look_target: Vec3::ZERO,
            drift_omega: Vec2::from(CAMERA_DRIFT_OMEGA),
            drift_amp: Vec2::from(CAMERA_DRIFT_AMP),
            parallax_gain: CAMERA_PARALLAX_GAIN,
            look_gain: CAMERA_LOOK_GAIN,
            smoothing: CAMERA_SMOOTHING,
            scroll_lift: CAMERA_SCROLL_LIFT,
            scroll_dolly: CAMERA_SCROLL_DOLLY,
        }
    }
}

impl CameraParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("camera.base_position", self.base_position.length())?;
        finite("camera.base_look_target", self.base_look_target.length())?;
        finite("camera.drift_omega", self.drift_omega.length())?;
        finite("camera.drift_amp", self.drift_amp.length())?;
        finite("camera.parallax_gain", self.parallax_gain)?;
        in_range(
            "camera.look_gain",
            self.look_gain,
            -self.parallax_gain.abs(),
            self.parallax_gain.abs(),
        )?;
        blend("camera.smoothing", self.smoothing)?;
        finite("camera.scroll_lift", self.scroll_lift)?;
        finite("camera.scroll_dolly", self.scroll_dolly)
    }
}

/// Complete scene tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneConfig {
    pub pointer: PointerParams,
    pub fog: FogParams,
    pub bokeh: BokehParams,
    pub dust: DustParams,
    pub rays: RaysParams,
    pub motes: MotesParams,
    pub close_bokeh: CloseBokehParams,
    pub orbital: OrbitalParams,
    pub energy: EnergyFieldParams,
    pub camera: CameraParams,
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pointer.validate()?;
        self.fog.validate()?;
        self.bokeh.validate()?;
        self.dust.validate()?;
        self.rays.validate()?;
        self.motes.validate()?;
        self.close_bokeh.validate()?;
        self.orbital.validate()?;
        self.energy.validate()?;
        self.camera.validate()
    }
}
