//! # RSVP Server
//!
//! Serves the event details and the registration API on `Axum`, persisting to `SurrealDB`.
//!
//! ## Example
//! ```no_run
//! use rsvp_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result, anyhow, bail};
use axum::Router;
use axum_server::Handle;
use rsvp::domain::config::{ApiConfig, SslConfig};
use rsvp::kernel::server::ApiState;
use rsvp_database::Database;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    async fn connect_database(&self) -> Result<Database> {
        let db_cfg = &self.cfg.database;
        let mut builder =
            Database::builder().url(&db_cfg.url).session(&db_cfg.namespace, &db_cfg.database);

        if let Some(creds) = &db_cfg.credentials {
            builder = builder.auth(&creds.username, &creds.password);
        }

        builder.init().await.context("Failed to establish database connection")
    }

    /// Connects the store, runs migrations and registers the feature slices.
    ///
    /// # Errors
    /// * Configured TLS files are missing.
    /// * The database is unreachable, rejects the credentials or a migration.
    /// * A slice fails to initialize.
    pub async fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_tls_files(ssl)?;
        }

        let db = self.connect_database().await?;
        let slices = rsvp::init(&db).map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;

        let state = ApiState::builder()
            .config(self.cfg)
            .db(db)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;

        info!(slices = ?state.slice_names().collect::<Vec<_>>(), "Feature slices registered");
        Ok(Server { state })
    }
}

fn check_tls_files(ssl: &SslConfig) -> Result<()> {
    if !ssl.cert.exists() {
        bail!("SSL certificate not found at: {}", ssl.cert.display());
    }
    if !ssl.key.exists() {
        bail!("SSL key not found at: {}", ssl.key.display());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if ssl.key.metadata()?.permissions().mode() & 0o077 != 0 {
            warn!(key = %ssl.key.display(), "SSL private key is readable by others (expected 600)");
        }
    }

    Ok(())
}

/// A fully initialized server, ready to [`run`](Self::run).
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Application state shared with the handlers.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// The complete HTTP application: API routes, tracing and Scalar docs at `/api`.
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Serves HTTP (or HTTPS when `server.ssl` is set) until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// Binding the address or loading the TLS material fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);
        let app = self.router();

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(graceful_shutdown(handle.clone()));

        match &cfg.server.ssl {
            Some(ssl) => {
                info!("Listening on https://{address}");
                let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load SSL/TLS certificates")?;

                axum_server::bind_rustls(address, tls)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .context("HTTPS server failed")?;
            },
            None => {
                info!("Listening on http://{address}");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .context("HTTP server failed")?;
            },
        }

        info!("Server shutdown complete");
        Ok(())
    }
}

async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    if let Err(e) = shutdown_signal().await {
        error!("Error while waiting for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received, draining connections...");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res,
        res = terminate => res,
    }
}
