use std::sync::Arc;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::ballpit::Ballpit;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::gpu::Renderer;
use crate::input::Input;
use crate::listeners::{EventHub, HostEvent};
use crate::scheduler::FrameScheduler;
use crate::time::SystemClock;

type WindowBallpit = Ballpit<FrameScheduler<SystemClock>, Renderer>;

/// winit host that owns the window and the mounted ball pit.
pub struct BallpitApp {
    config: SimulationConfig,
    window: Option<Arc<Window>>,
    hub: EventHub,
    input: Input,
    ballpit: Option<WindowBallpit>,
    error: Option<SimulationError>,
}

impl BallpitApp {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            window: None,
            hub: EventHub::new(),
            input: Input::default(),
            ballpit: None,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<SimulationError> {
        self.error.take()
    }

    pub fn into_result(mut self) -> Result<(), SimulationError> {
        match self.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn create(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title("Ball Pit")
            .with_transparent(true)
            .with_inner_size(LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.input = Input::new(size.width, size.height);

        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            self.config.lighting(),
            self.config.count,
        ))?;
        let scheduler = FrameScheduler::new(SystemClock::new());
        self.ballpit = Some(Ballpit::mount(&self.config, scheduler, renderer, &self.hub));

        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Some(mut ballpit) = self.ballpit.take() {
            ballpit.teardown();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ballpit) = &mut self.ballpit else {
            return;
        };
        match ballpit.frame() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.hub.dispatch(&HostEvent::Resized {
                        width: size.width,
                        height: size.height,
                    });
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Surface out of memory, exiting");
                self.shutdown();
                event_loop.exit();
                return;
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for BallpitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create(event_loop) {
            error!("Failed to start: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let Some(host_event) = self.input.handle_event(&other) {
                    self.hub.dispatch(&host_event);
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
