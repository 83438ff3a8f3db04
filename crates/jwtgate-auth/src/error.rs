use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Authentication and authorization errors
///
/// Every variant is a routine outcome of untrusted input and ends the request
/// with 401 Unauthorized. Only the `Display` text reaches the client.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No Authorization header, or no extractable bearer token in it
    #[error("{0}")]
    MissingCredentials(String),

    /// Signature, structure or algorithm check failed
    #[error("{0}")]
    InvalidToken(String),

    /// One or more temporal or custom-check failures
    #[error("{}", .0.join(", "))]
    ValidationFailure(Vec<String>),

    /// The revocation check rejected the token
    #[error("{0}")]
    Revoked(String),

    /// No template of a route's attribute filter matched the claims
    #[error("Unauthorized")]
    FilterMismatch,

    /// Public key could not be read or parsed
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// A route asked for a claim the token does not carry
    #[error("Missing claim: {0}")]
    MissingClaim(String),

    /// A claim is present but has the wrong shape for the route
    #[error("Invalid claim {name}: {reason}")]
    InvalidClaim {
        /// Claim name
        name: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// The five ways a request can be denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    /// See [`AuthError::MissingCredentials`]
    MissingCredentials,
    /// See [`AuthError::InvalidToken`]
    InvalidToken,
    /// See [`AuthError::ValidationFailure`]
    ValidationFailure,
    /// See [`AuthError::Revoked`]
    Revoked,
    /// See [`AuthError::FilterMismatch`]
    FilterMismatch,
}

impl DenialKind {
    /// Stable name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialKind::MissingCredentials => "missing_credentials",
            DenialKind::InvalidToken => "invalid_token",
            DenialKind::ValidationFailure => "validation_failure",
            DenialKind::Revoked => "revoked",
            DenialKind::FilterMismatch => "filter_mismatch",
        }
    }
}

impl std::fmt::Display for DenialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidToken => AuthError::InvalidToken("Invalid JWT structure".into()),
            ErrorKind::InvalidSignature => AuthError::InvalidToken("Invalid signature".into()),
            ErrorKind::InvalidAlgorithm => {
                AuthError::InvalidToken("Algorithm not supported".into())
            },
            ErrorKind::InvalidRsaKey(msg) => AuthError::InvalidPublicKey(msg.clone()),
            ErrorKind::InvalidKeyFormat => {
                AuthError::InvalidPublicKey("Unrecognized key format".into())
            },
            _ => AuthError::InvalidToken(format!("JWT error: {}", err)),
        }
    }
}

/// Create an unauthorized response with a WWW-Authenticate header
pub fn unauthorized_response(message: &str) -> Response {
    let mut response = (StatusCode::UNAUTHORIZED, message.to_string()).into_response();
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Bearer realm=\"jwtgate\", error=\"invalid_token\""),
    );
    response
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        unauthorized_response(&self.to_string())
    }
}

/// Result type alias for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;
