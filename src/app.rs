use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::{AppConfig, CorsConfig, StorageBackend},
    database,
    error::{AppError, Result},
    routes,
    store::{MemoryProductStore, PgProductStore, ProductStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let store: Arc<dyn ProductStore> = match config.storage.backend {
        StorageBackend::Postgres => {
            let db_config = config.storage.database.as_ref().ok_or_else(|| {
                AppError::ConfigError("Postgres backend selected without DB_URL".to_string())
            })?;
            let pool = database::create_pool(db_config).await?;
            Arc::new(PgProductStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory product store; data is lost on restart");
            Arc::new(MemoryProductStore::new())
        }
    };

    router(AppState::new(store), config)
}

/// Wires middleware and routes around an already constructed state.
pub fn router(state: AppState, config: &AppConfig) -> Result<Router> {
    let cors = cors_layer(&config.cors)?;

    if !config.mock_api_enabled {
        tracing::info!("Mock product endpoints disabled");
    }

    let app = routes::create_router(config.mock_api_enabled)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let Some(origins) = &config.allowed_origins else {
        tracing::warn!(
            "CORS allows any origin with credentials; development only, set CORS_ALLOWED_ORIGINS for production"
        );

        // `Any` cannot be combined with credentials, so echo the request back.
        return Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true));
    };

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_origin(allowed_origins)
        .allow_credentials(true))
}
