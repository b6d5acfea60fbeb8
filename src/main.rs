mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod mail;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::config::Config;
use crate::db::db::DBClient;
use crate::mail::sendmail::Mailer;
use crate::routes::create_router;

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub mailer: Arc<Mailer>,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = Config::init();

    let level = if config.is_development() {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("connected to the database");
            pool
        }
        Err(err) => {
            tracing::error!("failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let db_client = DBClient::new(pool);

    let mailer = match Mailer::new(&config) {
        Ok(mailer) => mailer,
        Err(err) => {
            tracing::error!("failed to build mail transport: {}", err);
            std::process::exit(1);
        }
    };

    let local_origin = format!("http://localhost:{}", config.port);
    let allowed_origins: Vec<HeaderValue> = [
        config.frontend_url.as_str(),
        "http://localhost:5173",
        local_origin.as_str(),
    ]
    .iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    let app_state = Arc::new(AppState {
        env: config.clone(),
        db_client: Arc::new(db_client),
        mailer: Arc::new(mailer),
    });

    let app = create_router(app_state).layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("server is running on http://localhost:{}", config.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", err);
    }
}
