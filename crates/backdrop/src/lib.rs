pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod runtime;

// Re-export key types at crate root for convenience
pub use api::config::FieldConfig;
pub use api::error::{ConfigError, MountError, SurfaceError};
pub use crate::core::field::{Connection, ParticleField, PARTICLE_COLOR};
pub use crate::core::particle::Particle;
pub use crate::core::rng::Rng;
pub use input::event::InputEvent;
pub use renderer::surface::{Color, DrawCommand, DrawList, Surface};
pub use runtime::mount::{FieldHandle, Mount};
pub use runtime::runner::FieldRunner;
pub use runtime::scheduler::{FrameCallback, FrameScheduler, ManualScheduler};

#[cfg(feature = "vectors")]
pub use renderer::vector::{TessellatedSurface, VectorVertex};
