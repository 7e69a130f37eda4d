//! The mounted ball pit: field, camera, frame loop, listeners and surface.
//!
//! [`Ballpit::mount`] acquires everything the component needs (a running
//! frame loop, host listeners for pointer and resize, a render surface) and
//! [`Ballpit::teardown`] gives all of it back. Teardown is idempotent and also
//! runs on drop, so no exit path leaks a frame loop or a listener.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::info;

use crate::body::{sort_back_to_front, BodyInstance};
use crate::camera::SwayCamera;
use crate::config::SimulationConfig;
use crate::field::ParticleField;
use crate::listeners::{EventHub, HostEvent, ListenerGuard};
use crate::pointer::PointerSlot;
use crate::scheduler::{FrameScheduler, FrameTime, Scheduler, Tick};
use crate::surface::RenderSurface;
use crate::time::Clock;

/// Simulation state advanced by the frame loop.
#[derive(Debug)]
pub struct Scene {
    pub field: ParticleField,
    pub camera: SwayCamera,
}

/// A particle field mounted on a host.
pub struct Ballpit<S: Scheduler, R: RenderSurface> {
    scene: Rc<RefCell<Scene>>,
    surface: Rc<RefCell<Option<R>>>,
    scheduler: S,
    listeners: Option<ListenerGuard>,
    pointer: PointerSlot,
    instances: Vec<BodyInstance>,
    mounted: bool,
}

impl<S: Scheduler, R: RenderSurface + 'static> Ballpit<S, R> {
    /// Build a field from `config` and mount it.
    pub fn mount(config: &SimulationConfig, scheduler: S, surface: R, hub: &EventHub) -> Self {
        Self::mount_field(ParticleField::new(config), scheduler, surface, hub)
    }

    /// Mount an existing field: start the frame loop and attach listeners.
    pub fn mount_field(field: ParticleField, mut scheduler: S, surface: R, hub: &EventHub) -> Self {
        let (width, height) = surface.size();
        let body_count = field.len();
        let scene = Rc::new(RefCell::new(Scene {
            field,
            camera: SwayCamera::for_viewport(width, height),
        }));
        let surface = Rc::new(RefCell::new(Some(surface)));
        let pointer = PointerSlot::new();

        let listeners = {
            let pointer = pointer.clone();
            let scene = Rc::downgrade(&scene);
            let surface = Rc::downgrade(&surface);
            hub.subscribe(move |event| match *event {
                HostEvent::PointerMoved(p) => pointer.set(p),
                HostEvent::Resized { width, height } => {
                    if let Some(scene) = scene.upgrade() {
                        scene.borrow_mut().camera.set_viewport(width, height);
                    }
                    if let Some(surface) = surface.upgrade() {
                        if let Some(surface) = surface.borrow_mut().as_mut() {
                            surface.resize(width, height);
                        }
                    }
                }
            })
        };

        let tick: Tick = {
            let scene = Rc::clone(&scene);
            let pointer = pointer.clone();
            Box::new(move |frame: &FrameTime| {
                let mut scene = scene.borrow_mut();
                scene.field.step(&pointer);
                scene.camera.update(frame.elapsed_ms());
            })
        };
        scheduler.start(tick);

        info!(
            "Ballpit mounted with {} bodies on a {}x{} surface",
            body_count, width, height
        );

        Self {
            scene,
            surface,
            scheduler,
            listeners: Some(listeners),
            pointer,
            instances: Vec::with_capacity(body_count),
            mounted: true,
        }
    }
}

impl<S: Scheduler, R: RenderSurface> Ballpit<S, R> {
    /// Hand the current body transforms to the surface, farthest from the
    /// camera first.
    ///
    /// Does nothing once torn down.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let mut surface = self.surface.borrow_mut();
        let Some(surface) = surface.as_mut() else {
            return Ok(());
        };
        let scene = self.scene.borrow();
        self.instances.clear();
        self.instances.extend(scene.field.instances());
        sort_back_to_front(&mut self.instances, scene.camera.position);
        surface.render(&scene.camera, &self.instances)
    }

    /// Stop the frame loop, detach listeners, release the surface and drop
    /// every body. Returns `false` if already torn down.
    pub fn teardown(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        self.mounted = false;

        self.scheduler.stop();
        if let Some(mut listeners) = self.listeners.take() {
            listeners.release();
        }
        let surface = self.surface.borrow_mut().take();
        if let Some(mut surface) = surface {
            surface.release();
        }
        self.scene.borrow_mut().field.clear();
        self.instances = Vec::new();

        info!("Ballpit torn down");
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.scene.borrow().field.len()
    }

    pub fn scene(&self) -> Ref<'_, Scene> {
        self.scene.borrow()
    }

    /// The slot host pointer events are written to.
    pub fn pointer(&self) -> &PointerSlot {
        &self.pointer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<C: Clock, R: RenderSurface> Ballpit<FrameScheduler<C>, R> {
    /// Run one frame and draw it. Returns `Ok(false)` once stopped.
    pub fn frame(&mut self) -> Result<bool, wgpu::SurfaceError> {
        if !self.scheduler.fire() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }
}

impl<S: Scheduler, R: RenderSurface> Drop for Ballpit<S, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
