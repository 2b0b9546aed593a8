//! The particle field: a fixed population of drifting points that bounce off
//! the surface edges, shy away from the pointer, and are joined by faint lines
//! when close to each other.
//!
//! One frame is `advance()` followed by `render()`. `advance` is the only
//! mutation; `render` borrows the field immutably, so drawing the same state
//! twice produces the same output.
//!
//! Speed is expressed in pixels per frame. There is no delta-time scaling:
//! the field is meant to be stepped once per display refresh.

use glam::Vec2;

use super::particle::Particle;
use super::rng::Rng;
use crate::api::config::FieldConfig;
use crate::renderer::surface::{Color, Surface};

/// Fill and stroke color for particles and connections. Alpha is per primitive.
pub const PARTICLE_COLOR: Color = Color::WHITE;

/// A pair of particles close enough to be joined by a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle. Always `a < b`.
    pub a: usize,
    /// Index of the second particle.
    pub b: usize,
    pub distance: f32,
    /// Line alpha, `(1 - distance / threshold) * connection_alpha`.
    pub alpha: f32,
}

/// Owns the population, the pointer position and the surface bounds.
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    pointer: Vec2,
    width: f32,
    height: f32,
    rng: Rng,
}

impl ParticleField {
    /// Create a field over a `width` x `height` surface and populate it.
    ///
    /// `config` is used as given; hosts should run [`FieldConfig::validate`] first.
    pub fn new(config: FieldConfig, width: f32, height: f32, seed: u64) -> Self {
        let pointer = Vec2::from(config.idle_pointer);
        let mut field = Self {
            particles: Vec::with_capacity(config.particle_count),
            config,
            pointer,
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            rng: Rng::new(seed),
        };
        field.init();
        field
    }

    /// Replace the whole population with fresh particles inside the current bounds.
    pub fn init(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.particle_count {
            let p = Particle::random(&mut self.rng, self.width, self.height, &self.config);
            self.particles.push(p);
        }
    }

    /// Physics step for one frame.
    ///
    /// Per particle, in order: integrate, reflect velocity at the bounds
    /// (sign flip only, position is not clamped), then push away from the
    /// pointer when inside the interaction radius. The push is a velocity
    /// change that falls off linearly with distance and is not clamped.
    pub fn advance(&mut self) {
        let width = self.width;
        let height = self.height;
        let pointer = self.pointer;
        let radius = self.config.interaction_radius;
        let push = self.config.repulsion * self.config.velocity_blend;

        for p in &mut self.particles {
            p.position += p.velocity;

            if p.position.x < 0.0 || p.position.x > width {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y < 0.0 || p.position.y > height {
                p.velocity.y = -p.velocity.y;
            }

            let to_pointer = pointer - p.position;
            let distance = to_pointer.length();
            // Coincident pointer has no direction; skip this frame.
            if distance > 0.0 && distance < radius {
                let force = (radius - distance) / radius;
                p.velocity -= to_pointer / distance * force * push;
            }
        }
    }

    /// Draw the current state: clear, one circle per particle, then one line
    /// per connected pair.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.width, self.height);

        for p in &self.particles {
            surface.fill_circle(p.position, p.radius, PARTICLE_COLOR.with_alpha(p.opacity));
        }

        for c in self.connections() {
            surface.stroke_line(
                self.particles[c.a].position,
                self.particles[c.b].position,
                self.config.line_width,
                PARTICLE_COLOR.with_alpha(c.alpha),
            );
        }
    }

    /// All unordered pairs closer than the connection threshold.
    ///
    /// Brute-force over every pair; the population is small enough that a
    /// spatial index would not pay for itself. Coincident particles are not
    /// connected.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.config.connection_distance;
        let dim = self.config.connection_alpha;
        let particles = &self.particles;

        (0..particles.len()).flat_map(move |a| {
            (a + 1..particles.len()).filter_map(move |b| {
                let distance = particles[a].position.distance(particles[b].position);
                if distance > 0.0 && distance < threshold {
                    Some(Connection {
                        a,
                        b,
                        distance,
                        alpha: (1.0 - distance / threshold) * dim,
                    })
                } else {
                    None
                }
            })
        })
    }

    /// Adopt new surface bounds and repopulate. Old positions are discarded.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() {
            log::warn!("particle field: ignoring non-finite resize {}x{}", width, height);
            return;
        }
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        self.init();
        log::debug!(
            "particle field: resized to {}x{}, {} particles",
            self.width,
            self.height,
            self.particles.len()
        );
    }

    /// Record the latest pointer position. Applied as-is on the next `advance`.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pointer = Vec2::new(x, y);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Direct access for hosts that place particles by hand (and for tests).
    /// The population length cannot be changed through this slice.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawCommand, DrawList};
    use std::collections::HashSet;

    fn field(count: usize) -> ParticleField {
        let config = FieldConfig {
            particle_count: count,
            ..FieldConfig::default()
        };
        ParticleField::new(config, 800.0, 600.0, 42)
    }

    #[test]
    fn init_creates_exact_population() {
        let f = field(70);
        assert_eq!(f.len(), 70);
        assert_eq!(f.pointer(), Vec2::new(-1000.0, -1000.0));
    }

    #[test]
    fn population_size_survives_advance() {
        let mut f = field(70);
        f.on_pointer_move(400.0, 300.0);
        for _ in 0..500 {
            f.advance();
        }
        assert_eq!(f.len(), 70);
    }

    #[test]
    fn init_is_repeatable() {
        let mut f = field(30);
        f.init();
        f.init();
        assert_eq!(f.len(), 30);
    }

    #[test]
    fn same_seed_same_population() {
        let a = field(20);
        let b = field(20);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn overshoot_flips_x_velocity_only() {
        let mut f = field(1);
        f.particles_mut()[0] = Particle::new(Vec2::new(800.5, 300.0), Vec2::new(0.1, 0.05), 1.0, 0.5);
        f.advance();
        let p = f.particles()[0];
        assert!(p.velocity.x < 0.0, "vx should flip, got {}", p.velocity.x);
        assert_eq!(p.velocity.x, -0.1);
        assert_eq!(p.velocity.y, 0.05);
        // Reflection does not clamp.
        assert!(p.position.x > 800.0);
    }

    #[test]
    fn overshoot_flips_y_at_top_edge() {
        let mut f = field(1);
        f.particles_mut()[0] = Particle::new(Vec2::new(100.0, 0.05), Vec2::new(0.1, -0.1), 1.0, 0.5);
        f.advance();
        let p = f.particles()[0];
        assert_eq!(p.velocity.y, 0.1);
        assert_eq!(p.velocity.x, 0.1);
    }

    #[test]
    fn distant_pointer_leaves_speeds_unchanged() {
        let mut f = field(70);
        f.on_pointer_move(5000.0, 5000.0);
        let before: Vec<Vec2> = f.particles().iter().map(|p| p.velocity).collect();
        f.advance();
        for (p, v) in f.particles().iter().zip(before) {
            assert_eq!(p.velocity.x.abs(), v.x.abs());
            assert_eq!(p.velocity.y.abs(), v.y.abs());
        }
    }

    #[test]
    fn pointer_repels_nearby_particle() {
        let mut f = field(1);
        f.particles_mut()[0] = Particle::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 1.0, 0.5);
        f.on_pointer_move(450.0, 300.0);
        f.advance();

        let p = f.particles()[0];
        let away = p.position - f.pointer();
        assert!(p.velocity.dot(away) > 0.0, "delta must point away from pointer");

        // force = (250 - 50) / 250 = 0.8, push = 0.6 * 0.05
        let expected = -0.8 * 0.6 * 0.05;
        assert!((p.velocity.x - expected).abs() < 1e-6, "vx = {}", p.velocity.x);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn repulsion_direction_holds_for_any_offset() {
        let offsets = [
            Vec2::new(10.0, 10.0),
            Vec2::new(-120.0, 30.0),
            Vec2::new(0.0, -249.0),
            Vec2::new(0.5, 0.0),
        ];
        for offset in offsets {
            let mut f = field(1);
            let start = Vec2::new(400.0, 300.0);
            let velocity = Vec2::new(0.05, -0.02);
            f.particles_mut()[0] = Particle::new(start, velocity, 1.0, 0.5);
            let pointer = start + velocity + offset;
            f.on_pointer_move(pointer.x, pointer.y);
            f.advance();

            let p = f.particles()[0];
            let delta = p.velocity - velocity;
            assert!(delta.dot(p.position - pointer) >= 0.0, "offset {:?}", offset);
            assert!(delta.length() > 0.0, "offset {:?}", offset);
        }
    }

    #[test]
    fn coincident_pointer_is_skipped() {
        let mut f = field(1);
        f.particles_mut()[0] = Particle::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 1.0, 0.5);
        f.on_pointer_move(400.0, 300.0);
        f.advance();
        let p = f.particles()[0];
        assert_eq!(p.velocity, Vec2::ZERO);
        assert!(p.position.is_finite());
    }

    #[test]
    fn velocity_is_not_clamped_near_pointer() {
        let mut f = field(1);
        f.particles_mut()[0] = Particle::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 1.0, 0.5);
        f.on_pointer_move(401.0, 300.0);
        for _ in 0..60 {
            f.advance();
        }
        assert!(f.particles()[0].velocity.length() > 0.15);
    }

    #[test]
    fn non_finite_pointer_is_ignored() {
        let mut f = field(5);
        f.on_pointer_move(10.0, 20.0);
        f.on_pointer_move(f32::NAN, 5.0);
        assert_eq!(f.pointer(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn connections_are_unique_ordered_pairs() {
        let f = field(70);
        let mut seen = HashSet::new();
        for c in f.connections() {
            assert!(c.a < c.b, "pair ({}, {}) not ordered", c.a, c.b);
            assert!(seen.insert((c.a, c.b)), "duplicate pair ({}, {})", c.a, c.b);
            assert!(c.distance < 180.0);
            assert!(c.alpha > 0.0 && c.alpha <= 0.2);
        }
        assert!(!seen.is_empty(), "70 particles on 800x600 should have some neighbors");
    }

    #[test]
    fn connection_alpha_falls_off_linearly() {
        let mut f = field(3);
        f.particles_mut()[0] = Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 1.0, 0.5);
        f.particles_mut()[1] = Particle::new(Vec2::new(190.0, 100.0), Vec2::ZERO, 1.0, 0.5);
        f.particles_mut()[2] = Particle::new(Vec2::new(700.0, 500.0), Vec2::ZERO, 1.0, 0.5);

        let conns: Vec<Connection> = f.connections().collect();
        assert_eq!(conns.len(), 1);
        assert_eq!((conns[0].a, conns[0].b), (0, 1));
        assert!((conns[0].alpha - 0.1).abs() < 1e-6);
    }

    #[test]
    fn coincident_particles_are_not_connected() {
        let mut f = field(2);
        f.particles_mut()[0] = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 1.0, 0.5);
        f.particles_mut()[1] = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 1.0, 0.5);
        assert_eq!(f.connections().count(), 0);
    }

    #[test]
    fn render_draws_circles_then_lines() {
        let f = field(70);
        let mut list = DrawList::with_size(800, 600);
        f.render(&mut list);

        let cmds = list.commands();
        assert_eq!(cmds[0], DrawCommand::Clear { width: 800.0, height: 600.0 });
        assert_eq!(list.circles().count(), 70);
        assert_eq!(list.lines().count(), f.connections().count());

        for (cmd, p) in cmds[1..71].iter().zip(f.particles()) {
            match cmd {
                DrawCommand::Circle { center, radius, color } => {
                    assert_eq!(*center, p.position);
                    assert_eq!(*radius, p.radius);
                    assert_eq!(color.a, p.opacity);
                    assert_eq!((color.r, color.g, color.b), (1.0, 1.0, 1.0));
                }
                other => panic!("Expected Circle, got {:?}", other),
            }
        }
        for cmd in &cmds[71..] {
            match cmd {
                DrawCommand::Line { width, .. } => assert_eq!(*width, 0.5),
                other => panic!("Expected Line, got {:?}", other),
            }
        }
    }

    #[test]
    fn render_is_idempotent() {
        let f = field(40);
        let mut first = DrawList::new();
        let mut second = DrawList::new();
        f.render(&mut first);
        f.render(&mut second);
        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn resize_reinitializes_within_new_bounds() {
        let mut f = field(70);
        let before: Vec<Vec2> = f.particles().iter().map(|p| p.position).collect();
        f.on_resize(300.0, 200.0);

        assert_eq!(f.len(), 70);
        assert_eq!((f.width(), f.height()), (300.0, 200.0));
        for p in f.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 300.0);
            assert!(p.position.y >= 0.0 && p.position.y < 200.0);
        }
        let after: Vec<Vec2> = f.particles().iter().map(|p| p.position).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn non_finite_resize_is_ignored() {
        let mut f = field(10);
        let before = f.particles().to_vec();
        f.on_resize(f32::NAN, 100.0);
        assert_eq!(f.width(), 800.0);
        assert_eq!(f.particles(), &before[..]);
    }

    #[test]
    fn thousand_frames_without_pointer_stay_in_bounds() {
        let mut f = ParticleField::new(FieldConfig::default(), 800.0, 600.0, 7);
        f.on_pointer_move(-1000.0, -1000.0);
        for _ in 0..1000 {
            f.advance();
        }
        assert_eq!(f.len(), 70);
        for p in f.particles() {
            assert!(p.position.x >= -1.0 && p.position.x <= 801.0, "x = {}", p.position.x);
            assert!(p.position.y >= -1.0 && p.position.y <= 601.0, "y = {}", p.position.y);
            assert!(p.velocity.x.abs() <= 0.15);
            assert!(p.velocity.y.abs() <= 0.15);
        }
    }
}
