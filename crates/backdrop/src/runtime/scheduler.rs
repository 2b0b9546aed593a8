/// Callback invoked once per display frame.
pub type FrameCallback = Box<dyn FnMut()>;

/// "Run this callback once per display refresh until cancelled."
///
/// The browser bridge implements this with `requestAnimationFrame`;
/// [`ManualScheduler`] lets tests and headless hosts step frames by hand.
pub trait FrameScheduler {
    /// Register the per-frame callback and begin scheduling it.
    /// Replaces any previously registered callback.
    fn start(&mut self, callback: FrameCallback);

    /// Stop scheduling and drop the callback. Idempotent.
    fn cancel(&mut self);

    /// True while a callback is registered.
    fn is_active(&self) -> bool;
}

/// Deterministic scheduler: frames only happen when [`pump`](Self::pump) is called.
#[derive(Default)]
pub struct ManualScheduler {
    callback: Option<FrameCallback>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run up to `frames` frames. Returns how many actually ran
    /// (0 when nothing is registered).
    pub fn pump(&mut self, frames: usize) -> usize {
        match self.callback.as_mut() {
            Some(callback) => {
                for _ in 0..frames {
                    callback();
                }
                frames
            }
            None => 0,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn start(&mut self, callback: FrameCallback) {
        self.callback = Some(callback);
    }

    fn cancel(&mut self) {
        self.callback = None;
    }

    fn is_active(&self) -> bool {
        self.callback.is_some()
    }
}
