use crate::api::config::FieldConfig;
use crate::core::field::ParticleField;
use crate::input::event::InputEvent;
use crate::renderer::surface::Surface;

/// Wires a [`ParticleField`] to its surface and drives one frame at a time.
///
/// Once stopped, the runner ignores frames and events for good.
pub struct FieldRunner<S: Surface> {
    field: ParticleField,
    surface: S,
    frames: u64,
    stopped: bool,
}

impl<S: Surface> FieldRunner<S> {
    /// Size the surface to `width` x `height` and populate the field.
    pub fn new(config: FieldConfig, mut surface: S, width: f32, height: f32, seed: u64) -> Self {
        let field = ParticleField::new(config, width, height, seed);
        surface.resize(to_pixels(field.width()), to_pixels(field.height()));
        Self {
            field,
            surface,
            frames: 0,
            stopped: false,
        }
    }

    /// One frame: advance the physics, then render. The two never interleave.
    pub fn frame(&mut self) {
        if self.stopped {
            return;
        }
        self.field.advance();
        self.field.render(&mut self.surface);
        self.frames += 1;
    }

    /// Apply a host event immediately.
    pub fn handle(&mut self, event: InputEvent) {
        if self.stopped || !event.is_finite() {
            return;
        }
        match event {
            InputEvent::PointerMove { x, y } => self.field.on_pointer_move(x, y),
            InputEvent::Resize { width, height } => {
                self.field.on_resize(width, height);
                self.surface
                    .resize(to_pixels(self.field.width()), to_pixels(self.field.height()));
            }
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

fn to_pixels(extent: f32) -> u32 {
    extent.round().max(0.0) as u32
}
