//! Coalescing of partial write chunks into newline-terminated commands.

use crate::error::DeviceError;

/// Accumulates incoming byte chunks until a newline completes a command.
///
/// A command is every byte received since the last completed command, up to
/// and including the chunk that carries a newline: when a newline arrives,
/// the **entire** accumulated buffer becomes a single command blob, trailing
/// bytes included. The partial buffer therefore never contains a newline.
#[derive(Debug, Default)]
pub struct WriteAssembler {
    /// Bytes received but not yet terminated by a newline.
    partial: Vec<u8>,
}

impl WriteAssembler {
    /// Creates an assembler with no pending bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes pending in the partial buffer.
    #[inline]
    pub fn partial_len(&self) -> usize {
        self.partial.len()
    }

    /// Appends `chunk` to the partial buffer and completes a command if the
    /// chunk carries a newline.
    ///
    /// Returns `Ok(Some(blob))` when a command completed (the partial buffer
    /// is consumed into the blob), `Ok(None)` when the bytes were retained as
    /// partial data. On allocation failure the partial buffer is untouched
    /// and `OutOfMemory` is returned, so a failed write can be retried.
    pub fn accept_chunk(&mut self, chunk: &[u8]) -> Result<Option<Box<[u8]>>, DeviceError> {
        // Reserve before mutating: a failed grow must leave the pending
        // bytes exactly as they were.
        self.partial
            .try_reserve(chunk.len())
            .map_err(|_| DeviceError::OutOfMemory)?;
        self.partial.extend_from_slice(chunk);

        if chunk.contains(&b'\n') {
            let blob = std::mem::take(&mut self.partial).into_boxed_slice();
            Ok(Some(blob))
        } else {
            Ok(None)
        }
    }
}
