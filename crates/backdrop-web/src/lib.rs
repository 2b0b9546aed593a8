//! Browser bridge for the particle field.
//!
//! The host page calls `backdrop_mount("bg-canvas", "{}")` once the canvas is
//! in the DOM and `backdrop_unmount()` when the view goes away. Everything in
//! between (frame loop, resize, pointer tracking) is owned here.
//!
//! Nothing thrown past the boundary: if the canvas or its 2D context is
//! missing, mounting logs a warning and returns `false`, leaving the page
//! without a background.

pub mod canvas;
pub mod chat;
pub mod error;
pub mod listeners;
pub mod raf;

use std::cell::RefCell;

use backdrop::{FieldConfig, Mount, MountError, SurfaceError};
use wasm_bindgen::prelude::*;

pub use canvas::Canvas2dSurface;
pub use error::BridgeError;
pub use listeners::{viewport_size, WindowListeners};
pub use raf::AnimationFrameScheduler;

/// A live background: the mounted field plus its window listeners.
struct Mounted {
    mount: Mount<Canvas2dSurface, AnimationFrameScheduler>,
    listeners: WindowListeners,
}

impl Mounted {
    fn teardown(mut self) {
        self.listeners.detach();
        self.mount.stop();
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// Parse the host-supplied config. Blank means defaults.
pub fn parse_config(config_json: &str) -> Result<FieldConfig, BridgeError> {
    if config_json.trim().is_empty() {
        return Ok(FieldConfig::default());
    }
    Ok(FieldConfig::from_json(config_json)?)
}

fn mount_on(canvas_id: &str, config_json: &str) -> Result<Mounted, BridgeError> {
    let config = parse_config(config_json)?;
    let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;

    let surface = window
        .document()
        .ok_or(SurfaceError::NoWindow)
        .and_then(|document| Canvas2dSurface::find(&document, canvas_id));

    let (width, height) = viewport_size(&window);
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
    let scheduler = AnimationFrameScheduler::new(window.clone());

    let mount = Mount::start(config, surface, width, height, seed, scheduler)
        .map_err(BridgeError::from)?;
    let listeners = WindowListeners::attach(&window, mount.handle())?;

    Ok(Mounted { mount, listeners })
}

/// Mount the particle background on the canvas with id `canvas_id`.
///
/// `config_json` is a (possibly partial) `FieldConfig` object; pass `""` or
/// `"{}"` for defaults. Replaces any background already mounted. Returns
/// `false` if the background could not be started.
#[wasm_bindgen]
pub fn backdrop_mount(canvas_id: &str, config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    backdrop_unmount();

    match mount_on(canvas_id, config_json) {
        Ok(mounted) => {
            MOUNTED.with(|cell| *cell.borrow_mut() = Some(mounted));
            true
        }
        Err(BridgeError::Mount(MountError::Surface(err))) => {
            log::warn!("backdrop: no render target, background disabled: {}", err);
            false
        }
        Err(err) => {
            log::warn!("backdrop: background disabled: {}", err);
            false
        }
    }
}

/// Stop the frame loop and remove the window listeners. Safe to call when
/// nothing is mounted.
#[wasm_bindgen]
pub fn backdrop_unmount() {
    let mounted = MOUNTED.with(|cell| cell.borrow_mut().take());
    if let Some(mounted) = mounted {
        mounted.teardown();
    }
}

/// Whether a background is currently animating.
#[wasm_bindgen]
pub fn backdrop_is_running() -> bool {
    MOUNTED.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|m| m.mount.is_running() && m.listeners.is_attached())
            .unwrap_or(false)
    })
}
