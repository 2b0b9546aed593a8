use std::cell::{Cell, RefCell};
use std::rc::Rc;

use backdrop::{FrameCallback, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

type TickClosure = Closure<dyn FnMut()>;

/// [`FrameScheduler`] on top of `requestAnimationFrame`.
///
/// The tick closure re-requests itself after every frame. It lives in
/// `slot`, which it also captures; `cancel` empties the slot to break that
/// cycle. `cancel` must not be called from inside the frame callback.
pub struct AnimationFrameScheduler {
    window: Window,
    slot: Rc<RefCell<Option<TickClosure>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            slot: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
        }
    }
}

fn request(window: &Window, tick: &TickClosure) -> Option<i32> {
    window
        .request_animation_frame(tick.as_ref().unchecked_ref())
        .ok()
}

impl FrameScheduler for AnimationFrameScheduler {
    fn start(&mut self, callback: FrameCallback) {
        self.cancel();

        let slot = Rc::clone(&self.slot);
        let pending = Rc::clone(&self.pending);
        let window = self.window.clone();
        let mut callback = callback;

        let tick = Closure::<dyn FnMut()>::new(move || {
            pending.set(None);
            callback();
            let next = slot.borrow().as_ref().and_then(|tick| request(&window, tick));
            pending.set(next);
        });

        let first = request(&self.window, &tick);
        if first.is_none() {
            log::warn!("particle field: requestAnimationFrame unavailable");
        }
        *self.slot.borrow_mut() = Some(tick);
        self.pending.set(first);
    }

    fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.slot.borrow_mut().take();
    }

    fn is_active(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl Drop for AnimationFrameScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
