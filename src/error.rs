//! Error types for the ball pit.
//!
//! The simulator itself cannot fail. Everything here belongs to the edges:
//! GPU initialization, loading a configuration file, and running the host
//! window.

use std::fmt;

/// Failures while bringing up the renderer for a window.
#[derive(Debug)]
pub enum GpuError {
    /// The window could not back a wgpu surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the window's surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused to open a device.
    Device(wgpu::RequestDeviceError),
    /// The surface lists no texture format for the chosen adapter.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::Surface(e) => write!(f, "window cannot be drawn to: {}", e),
            GpuError::Adapter(e) => write!(f, "no GPU adapter can present to this window: {}", e),
            GpuError::Device(e) => write!(f, "GPU device request failed: {}", e),
            GpuError::NoSurfaceFormat => f.write_str("window surface offers no texture format"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::Surface(e) => Some(e),
            GpuError::Adapter(e) => Some(e),
            GpuError::Device(e) => Some(e),
            GpuError::NoSurfaceFormat => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::Surface(e)
    }
}

impl From<wgpu::RequestAdapterError> for GpuError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        GpuError::Adapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::Device(e)
    }
}

/// Errors that can occur while loading or checking a [`SimulationConfig`].
///
/// [`SimulationConfig`]: crate::SimulationConfig
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    Io(std::io::Error),
    /// The text is not valid YAML for a config, or a config could not be
    /// written back out.
    Yaml(serde_yaml::Error),
    /// A numeric parameter is outside its sane range.
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Yaml(e) => write!(f, "config YAML error: {}", e),
            ConfigError::OutOfRange { field, reason } => {
                write!(f, "config value `{}` {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Yaml(e)
    }
}

/// Anything that stops the windowed ball pit from starting or running.
#[derive(Debug)]
pub enum SimulationError {
    /// The winit event loop could not be created or exited abnormally.
    EventLoop(winit::error::EventLoopError),
    /// The window could not be opened.
    Window(winit::error::OsError),
    Gpu(GpuError),
    Config(ConfigError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::EventLoop(e) => write!(f, "event loop failed: {}", e),
            SimulationError::Window(e) => write!(f, "could not open the ball pit window: {}", e),
            SimulationError::Gpu(e) => write!(f, "renderer setup failed: {}", e),
            SimulationError::Config(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::EventLoop(e) => Some(e),
            SimulationError::Window(e) => Some(e),
            SimulationError::Gpu(e) => Some(e),
            SimulationError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for SimulationError {
    fn from(e: winit::error::EventLoopError) -> Self {
        SimulationError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for SimulationError {
    fn from(e: winit::error::OsError) -> Self {
        SimulationError::Window(e)
    }
}

impl From<GpuError> for SimulationError {
    fn from(e: GpuError) -> Self {
        SimulationError::Gpu(e)
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_out_of_range_message_names_field() {
        let err = ConfigError::OutOfRange {
            field: "friction",
            reason: "must be in (0, 1]",
        };
        let msg = err.to_string();
        assert!(msg.contains("friction"));
        assert!(msg.contains("(0, 1]"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_config_error_wraps_into_simulation_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let err: SimulationError = ConfigError::from(io).into();
        assert!(matches!(err, SimulationError::Config(ConfigError::Io(_))));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_missing_surface_format_has_no_source() {
        let err: SimulationError = GpuError::NoSurfaceFormat.into();
        assert_eq!(
            err.to_string(),
            "renderer setup failed: window surface offers no texture format"
        );
        assert!(err.source().is_some_and(|e| e.source().is_none()));
    }
}
