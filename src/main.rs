use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

use config::Config;
use db::PgStore;
use services::daily_weather::{self, DailyWeatherJob};
use services::diary::DiaryService;
use services::weather::{OpenWeatherMapFetcher, WeatherService};

#[derive(Clone)]
pub struct AppState {
    pub diary: Arc<DiaryService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_diary_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env().context("Invalid configuration")?);

    // Database
    let db = db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let store = Arc::new(PgStore::new(db));
    let fetcher = Arc::new(
        OpenWeatherMapFetcher::new(config.weather_api.clone())
            .context("Failed to build weather client")?,
    );
    let weather = WeatherService::new(fetcher);

    let diary = DiaryService::new(store.clone(), store.clone(), weather.clone());

    // Keep the scheduler handle alive for the lifetime of the server.
    let _scheduler = if config.daily_weather_enabled {
        let job = Arc::new(DailyWeatherJob::new(weather, store));
        let scheduler = daily_weather::schedule(job, &config.daily_weather_cron)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to schedule daily weather job: {e}"))?;
        Some(scheduler)
    } else {
        tracing::info!("Daily weather job disabled");
        None
    };

    let state = AppState {
        diary: Arc::new(diary),
    };

    let allowed_origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::router(state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
