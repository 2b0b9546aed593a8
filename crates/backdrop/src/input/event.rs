/// Host events the field reacts to.
/// Coordinates are surface pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The drawing surface changed size.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    /// True when every coordinate carried by the event is finite.
    pub fn is_finite(&self) -> bool {
        match *self {
            InputEvent::PointerMove { x, y } => x.is_finite() && y.is_finite(),
            InputEvent::Resize { width, height } => width.is_finite() && height.is_finite(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_check() {
        assert!(InputEvent::PointerMove { x: 10.0, y: 20.0 }.is_finite());
        assert!(!InputEvent::PointerMove { x: f32::NAN, y: 0.0 }.is_finite());
        assert!(!InputEvent::Resize { width: f32::INFINITY, height: 1.0 }.is_finite());
    }
}
