//! Application error type

use std::fmt;

use gfx_geometry::GeometryError;
use gfx_render::RenderError;

use crate::config::ConfigError;

/// Anything that can stop a demo run
#[derive(Debug)]
pub enum AppError {
    /// Configuration could not be loaded
    Config(ConfigError),
    /// A demo's mesh could not be built
    Geometry(GeometryError),
    /// Drawing or writing frames failed
    Render(RenderError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Geometry(e) => write!(f, "Geometry error: {}", e),
            AppError::Render(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Geometry(e) => Some(e),
            AppError::Render(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<GeometryError> for AppError {
    fn from(e: GeometryError) -> Self {
        AppError::Geometry(e)
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e)
    }
}
