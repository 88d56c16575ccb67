//! Listener setup and the accept/supervise loop.

use crate::config::ServerConfig;
use crate::connection;
use crate::error::ServerError;
use crate::shutdown::ShutdownSignal;
use cmdring::Device;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket};
use tokio::task::JoinSet;
use tracing::{info, warn};

/// The socket service: one shared device, one listener, one handler task
/// per accepted connection.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    device: Arc<Device>,
    config: ServerConfig,
}

impl Server {
    /// Binds the listening socket with `SO_REUSEADDR` and the system
    /// maximum backlog.
    ///
    /// Must be called within a tokio runtime. Any socket, bind, or listen
    /// failure is fatal startup ([`ServerError::Bind`]).
    pub fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let addr = config.socket_addr();
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(ServerError::Bind)?;

        socket.set_reuseaddr(true).map_err(ServerError::Bind)?;
        socket.bind(addr).map_err(ServerError::Bind)?;
        let listener = socket
            .listen(libc::SOMAXCONN as u32)
            .map_err(ServerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ServerError::Bind)?;

        Ok(Self {
            listener,
            local_addr,
            device: Arc::new(Device::new()),
            config,
        })
    }

    /// The address actually bound (resolves ephemeral ports).
    #[inline]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// A shared reference to the device behind this server.
    pub fn device(&self) -> Arc<Device> {
        Arc::clone(&self.device)
    }

    /// Accepts connections until `shutdown` triggers, then drains every
    /// live handler before returning.
    ///
    /// The listener is dropped the moment the accept loop exits, so no new
    /// connections land while handlers finish. The device is torn down when
    /// the last reference drops after this returns.
    pub async fn run(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let Self {
            listener,
            local_addr: _,
            device,
            config,
        } = self;
        let mut handlers = JoinSet::new();

        loop {
            tokio::select! {
                () = shutdown.wait() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        info!("Accepted connection from {}", peer.ip());
                        let device = Arc::clone(&device);
                        let chunk_size = config.chunk_size;
                        handlers.spawn(async move {
                            if let Err(err) = connection::serve(stream, peer, device, chunk_size).await {
                                warn!(%peer, %err, "connection ended with error");
                            }
                            info!("Closed connection from {}", peer.ip());
                        });
                    }
                    Err(err) => {
                        if shutdown.is_triggered() {
                            break;
                        }
                        warn!(%err, "accept failed");
                    }
                },
            }
        }

        // Stop accepting before draining the handler registry.
        drop(listener);
        while let Some(joined) = handlers.join_next().await {
            if let Err(err) = joined {
                warn!(%err, "connection handler panicked");
            }
        }

        info!("server stopped");
        Ok(())
    }
}
