//! Error types for device operations.

use std::io;
use thiserror::Error;

/// Errors that can occur in device operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Growing the partial-write buffer failed; device state is preserved.
    #[error("out of memory")]
    OutOfMemory,

    /// A seek or seek-to-command target was out of bounds; the handle
    /// position is unchanged.
    #[error("invalid argument")]
    InvalidArgument,

    /// Acquiring the device mutex was aborted (a writer panicked while
    /// holding it). The caller may retry.
    #[error("device lock interrupted")]
    Interrupted,
}

impl DeviceError {
    /// Returns `true` if the operation can be retried against an unchanged
    /// device.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::OutOfMemory | Self::Interrupted)
    }
}

impl From<DeviceError> for io::Error {
    fn from(err: DeviceError) -> Self {
        let kind = match err {
            DeviceError::OutOfMemory => io::ErrorKind::OutOfMemory,
            DeviceError::InvalidArgument => io::ErrorKind::InvalidInput,
            DeviceError::Interrupted => io::ErrorKind::Interrupted,
        };
        io::Error::new(kind, err)
    }
}
