use merutto::ai::GeminiGenerator;
use merutto::config::Config;
use merutto::error::{config_error, other_error, Error};
use merutto::geo::{GeoLocator, HttpLocator};
use merutto::web::{router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::shutdown;

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| other_error(&format!("Failed to set up logging: {}", e)))?;

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

/// Build the app state and serve until a shutdown signal arrives
pub async fn start_server(config: Config) -> miette::Result<()> {
    rust_i18n::set_locale(&config.locale);
    info!("Setting locale to {}", config.locale);

    let locator: Option<Arc<dyn GeoLocator>> = match &config.geolocation_url {
        Some(url) => {
            info!("Resolving route origins via {}", url);
            Some(Arc::new(HttpLocator::new(url)) as Arc<dyn GeoLocator>)
        }
        None => None,
    };

    let state = AppState {
        generator: Arc::new(GeminiGenerator::from_config(&config)),
        locator,
        timezone: config.tz()?,
        geolocation_timeout: config.geolocation_timeout(),
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| config_error(&format!("Invalid listen address {}:{}", config.host, config.port)))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(Error::from)?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(Error::from)?;

    info!("Server stopped");
    Ok(())
}
