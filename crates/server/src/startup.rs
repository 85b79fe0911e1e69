use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Connect using config.toml pool settings when present, plain DATABASE_URL
/// otherwise.
async fn connect_db() -> anyhow::Result<DatabaseConnection> {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.database.normalize_from_env();
            if cfg.database.validate().is_ok() {
                models::db::connect_with_config(&cfg.database).await
            } else {
                models::db::connect().await
            }
        }
        Err(_) => models::db::connect().await,
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // Process-scoped connection pool, created once and injected into handlers.
    let db = connect_db().await?;

    // Schema creation is lenient: a failure is logged and the server still
    // starts; later requests surface the unusable schema themselves.
    if let Err(e) = migration::Migrator::up(&db, None).await {
        error!(error = %e, "schema creation failed; continuing startup");
    }

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(db, cors);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting interview store");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
