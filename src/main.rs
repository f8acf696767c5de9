use std::sync::{Arc, Mutex};

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bookline::config::AppConfig;
use bookline::db;
use bookline::handlers;
use bookline::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url, &config.migrations_dir)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings/:uid", get(handlers::bookings::get_booking))
        .route(
            "/api/bookings/:uid/rescheduled",
            get(handlers::bookings::get_rescheduled_booking),
        )
        .route(
            "/api/bookings/recurring/:uid",
            get(handlers::bookings::get_recurring_bookings),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
