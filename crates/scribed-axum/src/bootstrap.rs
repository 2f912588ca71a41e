//! Server bootstrap - the composition root.
//!
//! The only place where the runtime and core crates are wired together
//! for the web adapter.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use scribed_core::{SettingsStore, paths};
use scribed_runtime::{DEFAULT_LOG_CAPACITY, LogBroker, WorkerSupervisor};

/// Name of the worker executable, resolved through `PATH` by default.
pub const DEFAULT_WORKER_PROGRAM: &str = "faster-whisper-hotkey";

/// Default port the panel listens on.
pub const DEFAULT_PORT: u16 = 7860;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the web adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Worker executable to supervise.
    pub worker_program: PathBuf,
    /// Location of the panel settings file.
    pub settings_path: PathBuf,
    /// Location of the derived worker settings file.
    pub worker_settings_path: PathBuf,
    /// Log queue capacity in lines.
    pub log_capacity: usize,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Self {
        Self {
            port: DEFAULT_PORT,
            worker_program: PathBuf::from(DEFAULT_WORKER_PROGRAM),
            settings_path: paths::default_settings_path(),
            worker_settings_path: paths::worker_settings_path(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            cors: CorsConfig::default(),
        }
    }
}

/// Application context for the web adapter.
pub struct AppContext {
    /// Supervisor of the single worker process.
    pub supervisor: WorkerSupervisor,
    /// Shared log queue between the supervisor's reader task and viewers.
    pub broker: Arc<LogBroker>,
    /// Panel settings persistence.
    pub settings: SettingsStore,
    /// Where the derived worker settings are written before each start.
    pub worker_settings_path: PathBuf,
}

/// Assemble the application context from a server configuration.
pub fn bootstrap(config: &ServerConfig) -> AppContext {
    let broker = Arc::new(LogBroker::new(config.log_capacity));
    let supervisor = WorkerSupervisor::new(&config.worker_program, Arc::clone(&broker));

    info!(
        worker = %config.worker_program.display(),
        settings = %config.settings_path.display(),
        log_capacity = config.log_capacity,
        "bootstrap resolved configuration"
    );

    AppContext {
        supervisor,
        broker,
        settings: SettingsStore::new(&config.settings_path),
        worker_settings_path: config.worker_settings_path.clone(),
    }
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config);
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("scribed panel listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
