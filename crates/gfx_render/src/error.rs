//! Render error types

use std::fmt;
use std::io;

/// Error type for drawing and image output
#[derive(Debug)]
pub enum RenderError {
    /// A framebuffer needs a non-zero size
    InvalidViewport { width: u32, height: u32 },
    /// IO error while writing output
    Io(io::Error),
    /// PNG encoding failed
    Image(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidViewport { width, height } => {
                write!(f, "Invalid viewport size {}x{}", width, height)
            }
            RenderError::Io(err) => write!(f, "Render IO error: {}", err),
            RenderError::Image(err) => write!(f, "Image encoding error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::InvalidViewport { .. } => None,
            RenderError::Io(err) => Some(err),
            RenderError::Image(err) => Some(err),
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Image(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = RenderError::InvalidViewport { width: 0, height: 10 };
        assert_eq!(err.to_string(), "Invalid viewport size 0x10");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_io() {
        let err: RenderError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, RenderError::Io(_)));
        assert!(err.source().is_some());
    }
}
