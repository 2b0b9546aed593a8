use thiserror::Error;

/// Errors produced while loading or validating a [`FieldConfig`](super::config::FieldConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("Failed to parse field config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A parameter is outside the range the simulation accepts.
    #[error("Invalid field config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

/// The drawing surface could not be acquired from the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// No host window/document is available.
    #[error("No host window available")]
    NoWindow,

    /// The canvas element was not found.
    #[error("Canvas element `{0}` not found")]
    CanvasNotFound(String),

    /// The element exists but is not a canvas.
    #[error("Element `{0}` is not a canvas")]
    NotACanvas(String),

    /// The host refused to provide a 2D rendering context.
    #[error("2D rendering context unavailable")]
    ContextUnavailable,
}

/// Reasons the particle field failed to mount. The loop never starts in these cases.
#[derive(Error, Debug)]
pub enum MountError {
    #[error("Render target unavailable: {0}")]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_error_messages() {
        let err = SurfaceError::CanvasNotFound("bg".into());
        assert_eq!(err.to_string(), "Canvas element `bg` not found");
    }

    #[test]
    fn mount_error_wraps_surface_error() {
        let err: MountError = SurfaceError::ContextUnavailable.into();
        assert!(matches!(err, MountError::Surface(SurfaceError::ContextUnavailable)));
        assert_eq!(err.to_string(), "Render target unavailable: 2D rendering context unavailable");
    }
}
