use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::runner::FieldRunner;
use super::scheduler::FrameScheduler;
use crate::api::config::FieldConfig;
use crate::api::error::{MountError, SurfaceError};
use crate::input::event::InputEvent;
use crate::renderer::surface::Surface;

/// A running particle field bound to a host surface and frame scheduler.
///
/// Created with [`Mount::start`]; torn down with [`Mount::stop`] (or on drop).
/// Host event listeners talk to it through a [`FieldHandle`].
pub struct Mount<S: Surface + 'static, Sch: FrameScheduler> {
    runner: Rc<RefCell<FieldRunner<S>>>,
    scheduler: Sch,
    stopped: bool,
}

impl<S: Surface + 'static, Sch: FrameScheduler> Mount<S, Sch> {
    /// Validate the config, take the surface and start the frame loop.
    ///
    /// If the surface could not be acquired the loop is never registered and
    /// the error is returned for the host to log.
    pub fn start(
        config: FieldConfig,
        surface: Result<S, SurfaceError>,
        width: f32,
        height: f32,
        seed: u64,
        mut scheduler: Sch,
    ) -> Result<Self, MountError> {
        let surface = surface?;
        config.validate()?;

        let count = config.particle_count;
        let runner = Rc::new(RefCell::new(FieldRunner::new(config, surface, width, height, seed)));

        let frame_runner = Rc::clone(&runner);
        scheduler.start(Box::new(move || {
            if let Ok(mut runner) = frame_runner.try_borrow_mut() {
                runner.frame();
            }
        }));

        log::info!(
            "particle field: mounted {}x{} with {} particles on {}",
            width,
            height,
            count,
            runner.borrow().surface().backend()
        );

        Ok(Self {
            runner,
            scheduler,
            stopped: false,
        })
    }

    /// Event sink for host listeners. Becomes inert once the mount is stopped.
    pub fn handle(&self) -> FieldHandle<S> {
        FieldHandle {
            runner: Rc::clone(&self.runner),
        }
    }

    /// Cancel the frame loop and stop accepting events. Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.scheduler.cancel();
        if let Ok(mut runner) = self.runner.try_borrow_mut() {
            runner.stop();
        }
        self.stopped = true;
        log::info!("particle field: unmounted");
    }

    pub fn is_running(&self) -> bool {
        !self.stopped && self.scheduler.is_active()
    }

    /// Borrow the runner for inspection.
    pub fn runner(&self) -> Ref<'_, FieldRunner<S>> {
        self.runner.borrow()
    }

    pub fn scheduler_mut(&mut self) -> &mut Sch {
        &mut self.scheduler
    }
}

impl<S: Surface + 'static, Sch: FrameScheduler> Drop for Mount<S, Sch> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Push-style event forwarding into a mounted field.
pub struct FieldHandle<S: Surface> {
    runner: Rc<RefCell<FieldRunner<S>>>,
}

impl<S: Surface> Clone for FieldHandle<S> {
    fn clone(&self) -> Self {
        Self {
            runner: Rc::clone(&self.runner),
        }
    }
}

impl<S: Surface> FieldHandle<S> {
    pub fn on_resize(&self, width: f32, height: f32) {
        self.dispatch(InputEvent::Resize { width, height });
    }

    pub fn on_pointer_move(&self, x: f32, y: f32) {
        self.dispatch(InputEvent::PointerMove { x, y });
    }

    pub fn dispatch(&self, event: InputEvent) {
        match self.runner.try_borrow_mut() {
            Ok(mut runner) => runner.handle(event),
            Err(_) => log::warn!("particle field: dropped {:?} during a frame", event),
        }
    }
}
