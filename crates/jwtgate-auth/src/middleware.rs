//! Axum middleware for JWT authorization
//!
//! - [`jwt_auth_middleware`] runs the [`AuthPipeline`] and injects the
//!   [`AuthContext`] into request extensions before calling the handler.
//! - [`attribute_filter_middleware`] gates a single route on an
//!   [`AttributeFilter`], reading the context left by the auth middleware.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use axum::{Router, middleware::from_fn_with_state, routing::get};
//! use jwtgate_auth::{AttributeFilter, AuthPipeline, PublicKey, TokenVerifier};
//! use jwtgate_auth::middleware::{attribute_filter_middleware, jwt_auth_middleware};
//! use serde_json::json;
//!
//! # fn build() -> Result<Router, Box<dyn std::error::Error>> {
//! let key = PublicKey::from_file("keys/public_key.pem")?;
//! let pipeline = Arc::new(AuthPipeline::new(TokenVerifier::new(key)));
//! let admins = Arc::new(AttributeFilter::from_json(json!([{"role": "admin"}]))?);
//!
//! let app = Router::new()
//!     .route(
//!         "/admin",
//!         get(|| async { "hello admin" })
//!             .route_layer(from_fn_with_state(admins, attribute_filter_middleware)),
//!     )
//!     .route("/me", get(|| async { "hello" }))
//!     .layer(from_fn_with_state(pipeline, jwt_auth_middleware));
//! # Ok(app)
//! # }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Span;

use crate::{
    context::AuthContext,
    error::AuthError,
    filter::AttributeFilter,
    pipeline::{AuthDecision, AuthPipeline},
};

/// Message for routes reached without an auth context
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required but not present";

/// Authorize the request, then call the next layer with the
/// [`AuthContext`] attached; the handler's response is returned unchanged.
pub async fn jwt_auth_middleware(
    State(pipeline): State<Arc<AuthPipeline>>,
    mut request: Request,
    next: Next,
) -> Response {
    let span = Span::current();

    match pipeline.authorize_headers(request.headers()) {
        AuthDecision::Authorized(ctx) => {
            span.record("identity", ctx.identity.as_str());
            span.record("decision", "authorized");
            request.extensions_mut().insert(ctx);
            next.run(request).await
        },
        AuthDecision::Denied(denial) => {
            if let Some(identity) = &denial.identity {
                span.record("identity", identity.as_str());
            }
            span.record("decision", denial.kind().as_str());
            denial.into_response()
        },
    }
}

/// Reject the request unless its claims satisfy the route's filter
pub async fn attribute_filter_middleware(
    State(filter): State<Arc<AttributeFilter>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(ctx) = request.extensions().get::<AuthContext>() else {
        return AuthError::MissingCredentials(AUTH_REQUIRED_MESSAGE.into()).into_response();
    };

    if let Err(e) = filter.enforce(&ctx.claims) {
        Span::current().record("decision", "filter_mismatch");
        return e.into_response();
    }

    next.run(request).await
}
