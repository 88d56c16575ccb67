//! Error types for the socket service.

use cmdring::DeviceError;
use thiserror::Error;

/// Errors that can occur while running the service.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Creating, binding, or listening on the server socket failed.
    ///
    /// Fatal at startup: the process exits nonzero.
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    /// A transport-level I/O failure on an established connection.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The device rejected an operation.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

impl ServerError {
    /// Returns `true` for errors a connection handler survives by logging
    /// and continuing its loop.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Device(err) => err.is_recoverable(),
            Self::Bind(_) | Self::Io(_) => false,
        }
    }
}
