use backdrop::{ConfigError, MountError, SurfaceError};
use thiserror::Error;

/// Reasons the browser bridge could not bring the background up.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Mount(#[from] MountError),

    #[error("Failed to register `{0}` listener")]
    Listener(&'static str),
}

impl From<SurfaceError> for BridgeError {
    fn from(err: SurfaceError) -> Self {
        Self::Mount(MountError::Surface(err))
    }
}

impl From<ConfigError> for BridgeError {
    fn from(err: ConfigError) -> Self {
        Self::Mount(MountError::Config(err))
    }
}
