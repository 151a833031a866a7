pub mod camera;
pub mod config;
pub mod constants;
pub mod energy;
pub mod frame;
pub mod layers;
pub mod orbital;
pub mod particle;
pub mod pointer;
pub mod scene;
pub mod seeded;

pub use camera::*;
pub use config::*;
pub use energy::*;
pub use frame::FrameInput;
pub use layers::{
    BreathingRaysLayer, CloseBokehLayer, DriftFogLayer, ForceMotesLayer, GroupTransform, LayerKind,
    ParticleLayer, PulsingBokehLayer, WrappingDustLayer,
};
pub use orbital::*;
pub use particle::*;
pub use pointer::*;
pub use scene::SceneCoordinator;
pub use seeded::*;
