//! `aesdsocket` - the socket service entrypoint.
//!
//! Binds TCP port 9000, serves the command-history protocol, and shuts
//! down gracefully on `SIGINT`/`SIGTERM`. With `-d` the process
//! daemonizes before the runtime starts.
//!
//! Run with: `cargo run -p cmdring-server --bin aesdsocket [-- -d]`

use cmdring_server::{listen_for_signals, Server, ServerConfig, ServerError, ShutdownSignal};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let mut daemon = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-d" => daemon = true,
            other => {
                eprintln!("unknown argument: {other}");
                eprintln!("usage: aesdsocket [-d]");
                return ExitCode::FAILURE;
            }
        }
    }

    // Daemonize before anything spawns a thread; forking a live runtime is
    // not survivable.
    if daemon {
        if let Err(err) = cmdring_server::daemonize() {
            eprintln!("failed to daemonize: {err}");
            return ExitCode::FAILURE;
        }
    }

    tracing_subscriber::fmt().init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(%err, "failed to build runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let shutdown = ShutdownSignal::new();
    let _signal_task = listen_for_signals(shutdown.clone())?;

    let server = Server::bind(ServerConfig::default())?;
    info!("listening on {}", server.local_addr());
    server.run(shutdown).await
}
