//! Axum extractors for authentication
//!
//! This module provides convenient extractors for accessing the
//! authorization context in Axum handlers:
//!
//! - `RequireAuth`: Requires authentication, returns 401 if not present
//! - `OptionalAuth`: Optional authentication, returns None if not present

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};

use crate::{context::AuthContext, error::AuthError, middleware::AUTH_REQUIRED_MESSAGE};

/// Extractor that requires authentication
///
/// Returns 401 Unauthorized if the [`AuthContext`] is not present in the
/// request extensions (i.e., the auth middleware didn't run on this route).
///
/// # Example
///
/// ```rust,no_run
/// use axum::Json;
/// use jwtgate_auth::extractor::RequireAuth;
/// use serde_json::{Value, json};
///
/// async fn whoami(RequireAuth(auth): RequireAuth) -> Json<Value> {
///     Json(json!({ "identity": auth.identity }))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>().cloned().map(RequireAuth).ok_or_else(|| {
            AuthError::MissingCredentials(AUTH_REQUIRED_MESSAGE.into()).into_response()
        })
    }
}

/// Extractor for optional authentication
///
/// Yields `Some(AuthContext)` if authentication is present, `None` otherwise.
/// Never rejects.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthContext>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::claims::Claims;

    fn create_test_auth_context() -> AuthContext {
        let claims = Claims::try_from(json!({"sub": "alice", "role": "admin"})).unwrap();
        AuthContext::new("alice", claims)
    }

    #[tokio::test]
    async fn test_require_auth_with_context() {
        let mut req = Request::builder().body(()).unwrap();
        req.extensions_mut().insert(create_test_auth_context());

        let (mut parts, _) = req.into_parts();
        let RequireAuth(auth) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(auth.identity, "alice");
        assert_eq!(auth.claim::<String>("role").unwrap(), "admin");
    }

    #[tokio::test]
    async fn test_require_auth_without_context() {
        let req = Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let response = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_optional_auth_with_context() {
        let mut req = Request::builder().body(()).unwrap();
        req.extensions_mut().insert(create_test_auth_context());

        let (mut parts, _) = req.into_parts();
        let OptionalAuth(auth) = OptionalAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(auth.unwrap().identity, "alice");
    }

    #[tokio::test]
    async fn test_optional_auth_without_context() {
        let req = Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let OptionalAuth(auth) = OptionalAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(auth.is_none());
    }
}
