//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use credential::{CredentialConfig, credential_router};
use platform::password::WorkFactor;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,credential=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Credential configuration
    let base_config = if cfg!(debug_assertions) {
        CredentialConfig::development()
    } else {
        CredentialConfig::default()
    };
    let work_factor = work_factor_from_env(
        env::var("CREDENTIAL_WORK_FACTOR").ok(),
        base_config.work_factor,
    )?;
    let credential_config = base_config.with_work_factor(work_factor);

    tracing::info!(work_factor = %work_factor, "Credential verifier configured");

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string());

    let cors = CorsLayer::new()
        .allow_origin(parse_origins(&frontend_origins))
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let app = Router::new()
        .merge(credential_router(credential_config))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = port_from_env(env::var("API_PORT").ok())?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API running at http://localhost:{}", port);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn not_found() -> AppError {
    AppError::not_found("No such route").with_action("GET / runs the credential self-check")
}

/// Apply `CREDENTIAL_WORK_FACTOR` over the profile default
fn work_factor_from_env(raw: Option<String>, fallback: WorkFactor) -> anyhow::Result<WorkFactor> {
    let Some(raw) = raw else {
        return Ok(fallback);
    };

    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|e| AppError::from(e).with_action("Set CREDENTIAL_WORK_FACTOR to an integer"))?;

    Ok(WorkFactor::new(value)?)
}

/// Read `API_PORT`, falling back to [`DEFAULT_PORT`] when unset
fn port_from_env(raw: Option<String>) -> AppResult<u16> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PORT);
    };

    raw.trim()
        .parse::<u16>()
        .map_err(|e| AppError::from(e).with_action("Set API_PORT to a port number"))
}

fn parse_origins(origins: &str) -> Vec<http::HeaderValue> {
    origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_factor_from_env() {
        let fallback = WorkFactor::new(6).unwrap();

        assert_eq!(work_factor_from_env(None, fallback).unwrap(), fallback);
        assert_eq!(
            work_factor_from_env(Some(" 10 ".into()), fallback)
                .unwrap()
                .get(),
            10
        );
        assert_eq!(
            work_factor_from_env(Some("2".into()), fallback)
                .unwrap()
                .get(),
            4
        );
        assert!(work_factor_from_env(Some("0".into()), fallback).is_err());
        assert!(work_factor_from_env(Some("-1".into()), fallback).is_err());
        assert!(work_factor_from_env(Some("six".into()), fallback).is_err());
    }

    #[test]
    fn test_work_factor_parse_error_is_bad_request() {
        let fallback = WorkFactor::new(6).unwrap();
        let err = work_factor_from_env(Some("six".into()), fallback).unwrap_err();
        let app_err = err.downcast_ref::<AppError>().unwrap();

        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
        assert_eq!(app_err.action(), Some("Set CREDENTIAL_WORK_FACTOR to an integer"));
    }

    #[test]
    fn test_port_from_env() {
        use std::error::Error;

        assert_eq!(port_from_env(None).unwrap(), DEFAULT_PORT);
        assert_eq!(port_from_env(Some(" 8080 ".into())).unwrap(), 8080);

        let err = port_from_env(Some("70000".into())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.action(), Some("Set API_PORT to a port number"));
        assert!(err.source().is_some());

        assert!(port_from_env(Some("http".into())).is_err());
    }

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://localhost:5173, http://127.0.0.1:5173");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "http://127.0.0.1:5173");
    }

    #[tokio::test]
    async fn test_not_found_is_problem_json() {
        use axum::response::IntoResponse;

        let response = not_found().await.into_response();
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
    }
}
