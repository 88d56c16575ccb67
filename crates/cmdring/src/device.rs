//! File-like device over the command history and write assembler.
//!
//! One [`Device`] owns the shared mutable state (history + partial-write
//! buffer) behind a single mutex. Each open produces a [`Handle`] carrying
//! its own logical position, which needs no locking. The lock is held for at
//! most one ring walk plus one bounded copy per operation.

use crate::assembler::WriteAssembler;
use crate::error::DeviceError;
use crate::history::CommandHistory;
use crate::invariants::debug_assert_pos_in_range;
use std::io::{self, SeekFrom};
use std::sync::{Arc, Mutex, MutexGuard};

/// The shared command-logging device.
///
/// Created once at startup and shared by reference with every connection
/// handler. Dropping the device drops the history (every live blob) and any
/// pending partial write.
#[derive(Debug, Default)]
pub struct Device {
    shared: Mutex<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    history: CommandHistory,
    assembler: WriteAssembler,
}

impl Device {
    /// Creates a device with an empty history and no pending partial write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a handle with its logical position at 0, consuming one shared
    /// reference to the device (clone the `Arc` to open more).
    ///
    /// Handles are independent; releasing one is simply dropping it and
    /// affects no shared state.
    pub fn open(self: Arc<Self>) -> Handle {
        Handle {
            device: self,
            pos: 0,
        }
    }

    /// Acquires the device mutex.
    ///
    /// A poisoned mutex (a holder panicked) surfaces as `Interrupted`; the
    /// shared state itself is never left half-updated because every mutation
    /// completes or fails before any field changes.
    fn lock(&self) -> Result<MutexGuard<'_, Shared>, DeviceError> {
        self.shared.lock().map_err(|_| DeviceError::Interrupted)
    }
}

/// One open of the device: a shared reference plus a private logical
/// position into the virtual concatenation of live commands.
#[derive(Debug)]
pub struct Handle {
    device: Arc<Device>,
    pos: u64,
}

impl Handle {
    /// Current logical position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Reads from the current position into `dst`.
    ///
    /// Copies at most to the end of the containing command; a read never
    /// spans commands, so callers loop to drain the history. Returns `Ok(0)`
    /// at end-of-data, and keeps returning it until a write adds data.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize, DeviceError> {
        let shared = self.device.lock()?;

        let Some((entry, intra)) = shared.history.find(self.pos as usize) else {
            return Ok(0);
        };

        let n = dst.len().min(entry.len() - intra);
        dst[..n].copy_from_slice(&entry[intra..intra + n]);
        drop(shared);

        self.pos += n as u64;
        Ok(n)
    }

    /// Feeds `src` to the write assembler, storing a completed command in
    /// the history.
    ///
    /// Always reports the full chunk consumed on success, whether the bytes
    /// completed a command or were retained as partial data. On allocation
    /// failure the partial buffer is unchanged and the write can be retried.
    pub fn write(&mut self, src: &[u8]) -> Result<usize, DeviceError> {
        let mut shared = self.device.lock()?;

        if let Some(blob) = shared.assembler.accept_chunk(src)? {
            // The evicted blob leaves the history here; dropping it is this
            // caller's disposal decision.
            let evicted = shared.history.push(blob);
            drop(evicted);
        }

        Ok(src.len())
    }

    /// Repositions the handle per `whence`, with `End` relative to the total
    /// size of the live history.
    ///
    /// Valid targets are `[0, total_size]`; anything else (including signed
    /// overflow) returns `InvalidArgument` and leaves the position unchanged.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, DeviceError> {
        let shared = self.device.lock()?;
        let total = shared.history.total_size() as u64;

        let new_pos = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
            SeekFrom::End(delta) => total.checked_add_signed(delta),
        };
        let new_pos = new_pos
            .filter(|p| *p <= total)
            .ok_or(DeviceError::InvalidArgument)?;

        debug_assert_pos_in_range!(new_pos, total);
        self.pos = new_pos;
        Ok(new_pos)
    }

    /// Repositions the handle to byte `offset` of the command at logical
    /// index `cmd` (0 = oldest live command).
    ///
    /// Valid iff `cmd` addresses a live command and `offset` is strictly
    /// inside it. On success the position becomes the sum of the lengths of
    /// all preceding commands plus `offset`, and that position is returned.
    pub fn seek_to_command(&mut self, cmd: u32, offset: u32) -> Result<u64, DeviceError> {
        let shared = self.device.lock()?;
        let history = &shared.history;
        let cmd = cmd as usize;
        let offset = offset as usize;

        let target = history.get(cmd).ok_or(DeviceError::InvalidArgument)?;
        if offset >= target.len() {
            return Err(DeviceError::InvalidArgument);
        }

        let preceding: usize = history.iter().take(cmd).map(<[u8]>::len).sum();
        let new_pos = (preceding + offset) as u64;

        debug_assert_pos_in_range!(new_pos, history.total_size() as u64);
        self.pos = new_pos;
        Ok(new_pos)
    }
}

// ---------------------------------------------------------------------
// STD IO TRAIT ADAPTERS
// ---------------------------------------------------------------------

impl io::Read for Handle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Handle::read(self, buf).map_err(io::Error::from)
    }
}

impl io::Write for Handle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Handle::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        // Writes land in the shared state immediately; nothing is buffered
        // on the handle side.
        Ok(())
    }
}

impl io::Seek for Handle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Handle::seek(self, pos).map_err(io::Error::from)
    }
}
