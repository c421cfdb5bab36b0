//! Timetable Backend
//!
//! Serves filtered views of a school timetable from an in-memory index that is rebuilt
//! from the upstream schedule every refresh interval.

mod api;
mod config;
mod errors;
mod etag;
mod index;
mod models;
mod query;
mod refresh;
mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use index::ScheduleIndexBuilder;
use refresh::{HttpScheduleSource, RefreshScheduler};
use store::SnapshotStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Timetable Backend");
    tracing::info!("Schedule source: {}", config.source_url);
    tracing::info!("Refresh interval: {:?}", config.refresh_interval);
    tracing::info!("Change kinds: {:?}", config.change_kinds);

    // No queries are served before the first snapshot exists.
    let source = HttpScheduleSource::from_config(&config)?;
    let scheduler = RefreshScheduler::new(
        source,
        ScheduleIndexBuilder::new(config.change_kinds),
        config.refresh_interval,
    );
    let store = match scheduler.initial_store().await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Initial schedule load failed: {}", e);
            return Err(e.into());
        }
    };

    let _refresh = scheduler.spawn(store.clone());

    let app = create_router(AppState { store });

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/classes", get(api::list_classes))
        .route("/lessons", get(api::get_lessons))
        .route("/health", get(api::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod fixtures;
