//! Configuration for the socket service.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 9000;

/// Size of one receive chunk from the transport.
pub const RECV_CHUNK: usize = 1024;

/// Configuration for [`Server`](crate::Server).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener on.
    ///
    /// Default: `0.0.0.0` (all IPv4 interfaces).
    pub bind_addr: IpAddr,

    /// TCP port to listen on.
    ///
    /// Default: 9000. Port 0 binds an ephemeral port, which tests use.
    pub port: u16,

    /// Receive chunk size per transport read.
    ///
    /// Default: 1024. Command framing is independent of this value; it only
    /// bounds how much one read call can deliver.
    pub chunk_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            chunk_size: RECV_CHUNK,
        }
    }
}

impl ServerConfig {
    /// Sets the bind address.
    pub fn with_bind_addr(mut self, addr: IpAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the receive chunk size.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is 0; a zero-sized receive buffer would read
    /// as immediate EOF on every connection.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be nonzero");
        self.chunk_size = chunk_size;
        self
    }

    /// The socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
