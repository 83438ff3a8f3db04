//! # jwtgate Server
//!
//! Router and serve loop for the `jwtgate` binary. Every route except
//! `/health` sits behind the authorization pipeline; `/admin` additionally
//! requires a `role: "admin"` claim.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, Request},
    middleware::{Next, from_fn, from_fn_with_state},
    response::Response,
    routing::get,
};
use jwtgate_auth::{
    AttributeFilter, AuthError, AuthPipeline, RequireAuth, attribute_filter_middleware,
    jwt_auth_middleware,
};
use jwtgate_config::Config;
use serde_json::{Map, Value, json};
use tracing::{Instrument, info};

/// Filter guarding `/admin`
pub fn admin_filter() -> Result<AttributeFilter> {
    AttributeFilter::from_json(json!([{"role": "admin"}])).context("Invalid admin filter")
}

/// Create the HTTP router
pub fn build_router(pipeline: Arc<AuthPipeline>) -> Result<Router> {
    let admins = Arc::new(admin_filter()?);

    // Protected routes that require authentication
    let protected_routes = Router::new()
        .route("/whoami", get(whoami))
        .route("/profile/{claim}", get(profile_claim))
        .route(
            "/admin",
            get(admin).route_layer(from_fn_with_state(admins, attribute_filter_middleware)),
        )
        .layer(from_fn_with_state(pipeline, jwt_auth_middleware));

    Ok(Router::new()
        .route("/health", get(health))
        .merge(protected_routes)
        // Outermost, so the auth middleware records into this request's span
        .layer(from_fn(trace_request)))
}

async fn trace_request(request: Request, next: Next) -> Response {
    let span = jwtgate_observe::request_span(request.method().as_str(), request.uri().path());
    next.run(request).instrument(span).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn whoami(RequireAuth(auth): RequireAuth) -> Json<Value> {
    Json(json!({
        "identity": auth.identity,
        "claims": auth.claims.as_map(),
    }))
}

async fn admin(RequireAuth(auth): RequireAuth) -> Json<Value> {
    Json(json!({
        "identity": auth.identity,
        "message": format!("Welcome, {}", auth.identity),
    }))
}

async fn profile_claim(
    RequireAuth(auth): RequireAuth,
    Path(name): Path<String>,
) -> Result<Json<Value>, AuthError> {
    let value = auth.claim::<Value>(&name)?;
    let mut body = Map::new();
    body.insert(name, value);
    Ok(Json(Value::Object(body)))
}

/// Graceful shutdown signal handler
///
/// Waits for SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Bind the configured address and serve until a shutdown signal arrives
pub async fn serve(config: &Config, pipeline: Arc<AuthPipeline>) -> Result<()> {
    let app = build_router(pipeline)?;

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!("Failed to bind {}:{}", config.server.host, config.server.port)
        })?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}
