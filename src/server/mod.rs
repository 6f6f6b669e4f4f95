//! HTTP server for the book CRUD contract.

pub mod error;
pub mod handlers;
pub mod health;
pub mod router;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::ConfigStore;
use crate::repository::BookRepository;
use crate::server::router::{build_router, AppState};
use crate::server::shutdown::ShutdownManager;

pub use error::{ApiError, ErrorBody};

pub struct BookServer {
    pub addr: SocketAddr,
    /// The bound listener. Populated by bind(), consumed by run().
    listener: Option<TcpListener>,
    state: AppState,
    static_dir: Option<PathBuf>,
    shutdown: Arc<ShutdownManager>,
}

impl BookServer {
    pub fn new(config: &ConfigStore, repository: Arc<dyn BookRepository>) -> anyhow::Result<Self> {
        let config = config.get();
        let addr = config.bind_socket_addr()?;
        Ok(Self {
            addr,
            listener: None,
            state: AppState::new(repository),
            static_dir: config.server.static_dir,
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    /// Bind the configured address. Port `0` picks a free port; the actual
    /// address is returned and stored in `self.addr`.
    pub async fn bind(&mut self) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;
        self.addr = listener.local_addr()?;
        self.listener = Some(listener);
        tracing::info!("Book server bound to {}", self.addr);
        Ok(self.addr)
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until shutdown is signalled.
    ///
    /// Binds first if [`bind`](Self::bind) was not called.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => {
                self.bind().await?;
                self.listener
                    .take()
                    .context("listener missing after bind")?
            }
        };

        tracing::info!("Starting book server on http://{}", self.addr);
        if let Some(dir) = &self.static_dir {
            tracing::info!("Serving static client from {}", dir.display());
        }

        let app = build_router(self.state.clone(), self.static_dir.as_deref());
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::error!("Failed to listen for shutdown signals: {}", e);
                }
            })
            .into_future()
            .await?;

        tracing::info!("Book server stopped");
        Ok(())
    }
}

/// Cloneable handle for stopping a running server.
#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
