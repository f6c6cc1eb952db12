//! # suvidha-api: Axum API Services for the Suvidha Kiosk
//!
//! HTTP surface behind the kiosk's registration and profile screens.
//!
//! ## API Surface
//!
//! | Prefix              | Module                 | Purpose                         |
//! |---------------------|------------------------|---------------------------------|
//! | `/v1/identity/*`    | [`routes::identity`]   | Validate and verify numbers     |
//! | `/v1/citizens/*`    | [`routes::citizens`]   | Registration and profile        |
//! | `/metrics`          | [`middleware::metrics`]| Request counters                |
//! | `/openapi.json`     | [`openapi`]            | Generated OpenAPI document      |
//! | `/health/*`         | this module            | Liveness and readiness probes   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//! ```

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::auth::AuthConfig;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the auth middleware
/// so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::identity::router())
        .merge(routes::citizens::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_snapshot))
        .layer(from_fn(auth::auth_middleware))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(auth_config))
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the registry is in-process, so ready once started.
async fn readiness() -> &'static str {
    "ready"
}
