//! Server runtime
//!
//! [`ServerHandle`] owns the server lifecycle: application context, demo
//! data, the Prometheus recorder, the REST API and graceful shutdown. The
//! CLI binary and the integration tests both start the service through it.

use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::api::create_api_router;
use crate::application::{seed_demo_data, AppContext, SharedContext};
use crate::config::AppConfig;
use crate::shared::errors::AppError;
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Overrides `config.seed.demo_data` when set
    pub seed_demo_data: Option<bool>,
}

impl ServerOptions {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            seed_demo_data: None,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// ```rust,no_run
/// use ev_charging::config::AppConfig;
/// use ev_charging::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::new(AppConfig::default())).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub ctx: SharedContext,
    pub config: AppConfig,
    /// Address the API is bound to; the real port when configured as 0
    pub local_addr: SocketAddr,

    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Build the context, optionally seed it, bind the listener and spawn
    /// the API server.
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let config = opts.config;
        config.validate()?;

        let ctx = AppContext::from_config(&config)?.shared();
        if opts.seed_demo_data.unwrap_or(config.seed.demo_data) {
            let summary = seed_demo_data(&ctx)?;
            info!(stations = summary.stations, "Sample catalogue ready");
        }

        let metrics_handle = if config.server.metrics {
            prometheus_handle()
        } else {
            None
        };

        let router = create_api_router(ctx.clone(), metrics_handle);
        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API received shutdown signal");
            });
            if let Err(e) = server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            ctx,
            config,
            local_addr,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM or SIGINT.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to stop. In-flight requests get
    /// `server.shutdown_timeout` seconds once shutdown is triggered.
    pub async fn wait(self) {
        let shutdown = self.shutdown.clone();
        let grace = Duration::from_secs(self.config.server.shutdown_timeout);
        let mut api_task = self.api_task;

        tokio::select! {
            result = &mut api_task => {
                log_task_result(result);
                return;
            }
            _ = shutdown.wait() => {}
        }

        match tokio::time::timeout(grace, &mut api_task).await {
            Ok(result) => log_task_result(result),
            Err(_) => {
                warn!(timeout_secs = grace.as_secs(), "Graceful shutdown timed out, aborting");
                api_task.abort();
            }
        }
        info!("Shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

fn log_task_result(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global Prometheus recorder. It can only be installed once per
/// process, so later starts reuse the first handle. `None` when another
/// recorder is already installed.
pub fn prometheus_handle() -> Option<PrometheusHandle> {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = HANDLE.get() {
        return Some(handle.clone());
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("Prometheus metrics recorder installed");
            Some(HANDLE.get_or_init(|| handle).clone())
        }
        Err(e) => {
            warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
            HANDLE.get().cloned()
        }
    }
}

/// Set up the global tracing subscriber. `RUST_LOG` wins over
/// `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.metrics = false;
        config.server.shutdown_timeout = 2;
        config
    }

    #[tokio::test]
    async fn starts_seeded_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions::new(test_config()))
            .await
            .unwrap();
        assert_ne!(handle.local_addr.port(), 0);
        assert!(handle.is_running());
        assert_eq!(handle.ctx.station_service.list().unwrap().len(), 15);

        tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .expect("server stops within the grace period");
    }

    #[tokio::test]
    async fn seeding_can_be_skipped() {
        let mut opts = ServerOptions::new(test_config());
        opts.seed_demo_data = Some(false);
        let handle = ServerHandle::start(opts).await.unwrap();
        assert!(handle.ctx.user_service.list().unwrap().is_empty());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_config_is_refused() {
        let mut config = test_config();
        config.logging.format = "xml".into();
        assert!(matches!(
            ServerHandle::start(ServerOptions::new(config)).await,
            Err(AppError::Config(_))
        ));
    }
}
