use crate::shutdown;
use eventsphere::api::{ApiClient, HttpAuthService, HttpEventService};
use eventsphere::config::Config;
use eventsphere::error::Error;
use eventsphere::session::SessionCodec;
use eventsphere::web::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,hyper=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the services and serve the pages until a shutdown signal arrives
pub async fn start_server(config: Config) -> miette::Result<()> {
    if config.session_secret == eventsphere::config::DEFAULT_SESSION_SECRET {
        warn!("SESSION_SECRET is not set, using the development secret");
    }

    let client = ApiClient::from_config(&config)?;
    info!("Using backend at {}", config.api_base_url);

    let state = AppState {
        events: Arc::new(HttpEventService::new(client.clone())),
        auth: Arc::new(HttpAuthService::new(client)),
        codec: Arc::new(SessionCodec::new(&config.session_secret)),
        timezone: config.timezone()?,
    };

    let app = web::router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.listen_port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(Error::from)?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(Error::from)?;

    info!("Server shut down");
    Ok(())
}
