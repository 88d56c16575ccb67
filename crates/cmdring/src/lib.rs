//! cmdring - Bounded Command History Device
//!
//! A fixed-capacity circular store of newline-terminated command blobs
//! behind a character-device style contract: stateful per-handle positions,
//! bounded reads that never span commands, byte-offset and
//! command-plus-offset seeking, and overwrite-oldest eviction.
//!
//! The crate is synchronous and runtime-agnostic. One [`Device`] owns the
//! history and the partial-write buffer behind a single mutex; any number
//! of [`Handle`]s share it, each with a private logical position.
//!
//! # Example
//!
//! ```
//! use cmdring::Device;
//! use std::io::SeekFrom;
//! use std::sync::Arc;
//!
//! let device = Arc::new(Device::new());
//! let mut handle = device.open();
//!
//! // Chunks coalesce until a newline completes a command
//! handle.write(b"hel").unwrap();
//! handle.write(b"lo\n").unwrap();
//!
//! let mut buf = [0u8; 16];
//! let n = handle.read(&mut buf).unwrap();
//! assert_eq!(&buf[..n], b"hello\n");
//!
//! // Reposition by byte offset or by (command, offset)
//! handle.seek(SeekFrom::Start(0)).unwrap();
//! handle.seek_to_command(0, 3).unwrap();
//! ```

mod assembler;
mod device;
mod error;
mod history;
mod invariants;

pub use assembler::WriteAssembler;
pub use device::{Device, Handle};
pub use error::DeviceError;
pub use history::{CommandHistory, HISTORY_CAPACITY};
