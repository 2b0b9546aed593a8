use backdrop::{FieldHandle, Surface};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, Window};

use crate::error::BridgeError;

/// Window-level `resize` and `mousemove` listeners feeding a mounted field.
/// Removed on [`detach`](Self::detach) or drop.
pub struct WindowListeners {
    window: Window,
    resize: Closure<dyn FnMut(Event)>,
    pointer: Closure<dyn FnMut(MouseEvent)>,
    attached: bool,
}

impl WindowListeners {
    pub fn attach<S: Surface + 'static>(
        window: &Window,
        handle: FieldHandle<S>,
    ) -> Result<Self, BridgeError> {
        let resize_handle = handle.clone();
        let resize_window = window.clone();
        let resize = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let (width, height) = viewport_size(&resize_window);
            resize_handle.on_resize(width, height);
        });

        let pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            handle.on_pointer_move(event.client_x() as f32, event.client_y() as f32);
        });

        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|_| BridgeError::Listener("resize"))?;

        if window
            .add_event_listener_with_callback("mousemove", pointer.as_ref().unchecked_ref())
            .is_err()
        {
            let _ = window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
            return Err(BridgeError::Listener("mousemove"));
        }

        Ok(Self {
            window: window.clone(),
            resize,
            pointer,
            attached: true,
        })
    }

    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("mousemove", self.pointer.as_ref().unchecked_ref());
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Drop for WindowListeners {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Current viewport size in CSS pixels, `(0, 0)` when unreadable.
pub fn viewport_size(window: &Window) -> (f32, f32) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}
