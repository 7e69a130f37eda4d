//! Translation of raw window events into [`HostEvent`]s.
//!
//! `Input` keeps just enough window state (cursor position, window size) to
//! normalize pointer coordinates the same way regardless of window size.

use glam::Vec2;
use winit::event::WindowEvent;

use crate::listeners::HostEvent;
use crate::pointer::normalize_pointer;

/// Pointer and viewport state tracked from window events.
#[derive(Debug, Default)]
pub struct Input {
    // Mouse position
    mouse_position: Vec2,
    mouse_ndc: Vec2,

    // Window size for NDC calculation
    window_size: (u32, u32),
}

impl Input {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            ..Default::default()
        }
    }

    /// Get the mouse position in screen pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Get the mouse position in normalized coordinates (-1 to 1).
    ///
    /// Origin is at center of window. X increases to the right, Y increases upward.
    pub fn mouse_ndc(&self) -> Vec2 {
        self.mouse_ndc
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Process a winit window event, returning the host event it maps to.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<HostEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::Resized(size) => self.resized(size.width, size.height),
            _ => None,
        }
    }

    fn cursor_moved(&mut self, x: f32, y: f32) -> Option<HostEvent> {
        self.mouse_position = Vec2::new(x, y);
        let (w, h) = self.window_size;
        let ndc = normalize_pointer(x, y, w, h)?;
        self.mouse_ndc = ndc;
        Some(HostEvent::PointerMoved(ndc))
    }

    fn resized(&mut self, width: u32, height: u32) -> Option<HostEvent> {
        self.window_size = (width, height);
        Some(HostEvent::Resized { width, height })
    }
}
