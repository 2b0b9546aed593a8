use glam::Vec2;

use super::rng::Rng;
use crate::api::config::FieldConfig;

/// A single point in the field. Radius and opacity are fixed at creation
/// and only matter for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity,
        }
    }

    /// Draw a particle uniformly inside `[0, width) x [0, height)`.
    pub fn random(rng: &mut Rng, width: f32, height: f32, config: &FieldConfig) -> Self {
        let position = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));
        let velocity = Vec2::new(
            rng.range(-config.max_speed, config.max_speed),
            rng.range(-config.max_speed, config.max_speed),
        );
        let radius = rng.range(config.min_radius, config.max_radius);
        let opacity = rng.range(config.min_opacity, config.max_opacity);
        Self::new(position, velocity, radius, opacity)
    }
}
