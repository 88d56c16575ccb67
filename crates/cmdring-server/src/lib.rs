//! Line-Framed TCP Service over the cmdring Device
//!
//! Accepts TCP connections on port 9000 and feeds every received byte into
//! a shared [`cmdring::Device`]. Newline-terminated commands land in the
//! bounded history; any chunk that completes a command is answered with the
//! entire current history, and the in-band control command
//! `AESDCHAR_IOCSEEKTO:<cmd>,<off>\n` repositions the reply instead of
//! being stored.
//!
//! Each connection runs as its own tokio task; a cloneable
//! [`ShutdownSignal`] (wired to `SIGINT`/`SIGTERM` by
//! [`listen_for_signals`]) stops the accept loop and drains live handlers.
//!
//! # Example
//!
//! ```no_run
//! use cmdring_server::{Server, ServerConfig, ShutdownSignal};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cmdring_server::ServerError> {
//!     let shutdown = ShutdownSignal::new();
//!     let _signal_task = cmdring_server::listen_for_signals(shutdown.clone())?;
//!
//!     let server = Server::bind(ServerConfig::default())?;
//!     server.run(shutdown).await
//! }
//! ```

mod config;
mod connection;
mod control;
mod daemon;
mod error;
mod server;
mod shutdown;

pub use config::{ServerConfig, DEFAULT_PORT, RECV_CHUNK};
pub use control::{parse_seek, SEEK_PREFIX};
pub use daemon::daemonize;
pub use error::ServerError;
pub use server::Server;
pub use shutdown::{listen_for_signals, ShutdownSignal};
