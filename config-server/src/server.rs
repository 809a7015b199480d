//! Server setup and lifecycle for the configuration server.

use conf_core::{ConfigHost, ConfigTree};
use config::ServerConfig;
use profile::{BASE_PROFILE, MemoryHost, ProfileIsolation};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::{Result, ServerError};
use crate::routes::create_router;
use crate::state::AppState;

/// A configuration server that has not started listening yet.
pub struct ConfigServer<H> {
    state: Arc<AppState<H>>
}

impl<H: ConfigHost + 'static> ConfigServer<H> {
    /// Creates a server for `host`.
    ///
    /// The host's active profile is remembered here, so stopping the server
    /// restores it even if no request ever switched profiles.
    pub fn new(config: ServerConfig, host: H) -> Result<Self> {
        let isolation = ProfileIsolation::new(host, config.profile_name.clone())?;
        Ok(Self {
            state: Arc::new(AppState::new(isolation, config))
        })
    }

    /// Binds the listener and serves requests on a background task.
    ///
    /// Returns as soon as the listener is bound.
    pub async fn start(self) -> Result<RunningServer<H>> {
        let addr = self.state.config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        // A second handle on the socket keeps the port bound until the
        // profile has been restored, even after `serve` drops its listener.
        let (listener, reserved) = duplicate_listener(listener)
            .map_err(|source| ServerError::Bind { addr, source })?;

        let router = create_router(self.state.clone());
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown_rx.await.ok();
                })
                .await
                .map_err(|e| ServerError::Server(e.to_string()))
        });

        tracing::info!(
            addr = %local_addr,
            profile = %self.state.config.profile_name,
            "Configuration server started"
        );

        Ok(RunningServer {
            state: self.state,
            local_addr,
            shutdown,
            task,
            reserved
        })
    }

    /// Runs the server until Ctrl+C or SIGTERM, then stops it.
    pub async fn run(self) -> Result<()> {
        let running = self.start().await?;
        shutdown_signal().await;
        running.stop().await?;
        Ok(())
    }
}

/// A configuration server serving requests in the background.
///
/// Dropping it without calling [`RunningServer::stop`] leaves the host in
/// whatever profile the last request put it in.
pub struct RunningServer<H> {
    state: Arc<AppState<H>>,
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<()>>,
    reserved: std::net::TcpListener
}

impl<H: ConfigHost + 'static> RunningServer<H> {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections, waits for in-flight requests, restores
    /// the profile that was active before isolation, releases the port and
    /// hands the host back.
    ///
    /// A failed restore is logged, not returned: there is no client left to
    /// report it to.
    pub async fn stop(self) -> Result<H> {
        let Self {
            state,
            local_addr,
            shutdown,
            task,
            reserved
        } = self;

        // The serving task may already have exited on its own.
        shutdown.send(()).ok();

        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Serving task ended with an error"),
            Err(e) => tracing::error!(error = %e, "Serving task panicked")
        }

        let mut isolation = state
            .take_isolation()
            .await
            .ok_or(ServerError::ShuttingDown)?;

        if let Err(e) = isolation.leave_isolation() {
            tracing::warn!(error = %e, "Failed to restore the original profile");
        }

        drop(reserved);
        tracing::info!(addr = %local_addr, "Configuration server stopped");
        Ok(isolation.into_host())
    }
}

fn duplicate_listener(
    listener: TcpListener
) -> std::io::Result<(TcpListener, std::net::TcpListener)> {
    let listener = listener.into_std()?;
    let reserved = listener.try_clone()?;
    Ok((TcpListener::from_std(listener)?, reserved))
}

/// Signal handler for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        () = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}

/// Loads the base configuration for the standalone host.
pub fn load_seed(path: &Path) -> Result<ConfigTree> {
    let seed_error = |reason: String| ServerError::Seed {
        path: path.display().to_string(),
        reason
    };

    let contents = std::fs::read(path).map_err(|e| seed_error(e.to_string()))?;
    ConfigTree::from_slice(&contents).map_err(|e| seed_error(e.to_string()))
}

/// Entry point for running the standalone server from environment variables.
///
/// Serves an in-memory host whose base profile is seeded from
/// `CONFIG_SERVER_SEED` when set.
pub async fn run_from_env() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    let config = config::load_from_env()?;
    let base = match &config.seed_file {
        Some(path) => load_seed(path)?,
        None => ConfigTree::new()
    };

    let host = MemoryHost::new(BASE_PROFILE, base);
    ConfigServer::new(config, host)?.run().await
}
