//! Authorization decision pipeline
//!
//! One request walks a fixed sequence of stages and stops at the first
//! failure:
//!
//! ```text
//! header? -> bearer token? -> signature ok? -> claims valid? -> not revoked? -> Authorized
//! ```
//!
//! Every denial carries two messages: the terse [`AuthError`] returned to the
//! client and a diagnostic payload (raw header, token or claims) that only
//! ever goes to the debug log.

use std::sync::Arc;

use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jwtgate_config::{AuthConfig, ValidationPolicy};
use tracing::debug;

use crate::{
    audit::{AuditEvent, log_audit_event},
    bearer::{authorization_header, extract_bearer_token},
    claims::UNKNOWN_IDENTITY,
    clock::{Clock, SystemClock},
    context::AuthContext,
    error::{AuthError, DenialKind, Result},
    hooks::{CustomCheck, NeverRevoked, RevocationCheck},
    jwt::{PublicKey, TokenVerifier},
    validation::validate_claims,
};

/// User-facing message when no Authorization header is present
pub const NO_HEADER_MESSAGE: &str = "No Authorization Header";
/// User-facing message when the header holds no bearer token
pub const INVALID_HEADER_MESSAGE: &str = "Invalid Authorization Header";
/// User-facing message when the token fails verification
pub const UNDECODABLE_TOKEN_MESSAGE: &str =
    "Invalid Authorization Header (couldn't decode the JWT)";

/// Outcome of running the pipeline on one request
#[derive(Debug)]
pub enum AuthDecision {
    /// Request may proceed with this context
    Authorized(AuthContext),
    /// Request must be rejected
    Denied(Denial),
}

impl AuthDecision {
    /// Whether the request was authorized
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthDecision::Authorized(_))
    }

    /// Convert into a `Result`, dropping the diagnostic payload
    pub fn into_result(self) -> Result<AuthContext> {
        match self {
            AuthDecision::Authorized(ctx) => Ok(ctx),
            AuthDecision::Denied(denial) => Err(denial.error),
        }
    }
}

/// A rejected request
#[derive(Debug)]
pub struct Denial {
    /// What the client is told
    pub error: AuthError,
    /// What the operator sees in the debug log
    pub diagnostic: String,
    /// Identity, when the token was decoded far enough to have one
    pub identity: Option<String>,
}

impl Denial {
    /// Which of the denial outcomes this is
    pub fn kind(&self) -> DenialKind {
        match self.error {
            AuthError::MissingCredentials(_) => DenialKind::MissingCredentials,
            AuthError::ValidationFailure(_) => DenialKind::ValidationFailure,
            AuthError::Revoked(_) => DenialKind::Revoked,
            AuthError::FilterMismatch => DenialKind::FilterMismatch,
            _ => DenialKind::InvalidToken,
        }
    }

    /// Message suitable for the 401 body
    pub fn user_message(&self) -> String {
        self.error.to_string()
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        self.error.into_response()
    }
}

/// The configured authorization pipeline
///
/// Built once at startup and shared read-only (usually behind an `Arc`)
/// by every request.
pub struct AuthPipeline {
    verifier: TokenVerifier,
    max_lifetime_seconds: i64,
    identity_claim: String,
    policy: ValidationPolicy,
    revocation_check: Arc<dyn RevocationCheck>,
    custom_check: Option<Arc<dyn CustomCheck>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AuthPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthPipeline")
            .field("verifier", &self.verifier)
            .field("max_lifetime_seconds", &self.max_lifetime_seconds)
            .field("identity_claim", &self.identity_claim)
            .field("policy", &self.policy)
            .field("custom_check", &self.custom_check.is_some())
            .finish_non_exhaustive()
    }
}

impl AuthPipeline {
    /// Create a pipeline with default settings: 24h max lifetime, identity
    /// from `sub`, nothing revoked, no custom check, wall-clock time
    pub fn new(verifier: TokenVerifier) -> Self {
        Self::with_config(verifier, &AuthConfig::default())
    }

    /// Create a pipeline using the settings of `config` but an already
    /// loaded verifier
    pub fn with_config(verifier: TokenVerifier, config: &AuthConfig) -> Self {
        Self {
            verifier,
            max_lifetime_seconds: config.max_lifetime_seconds,
            identity_claim: config.identity_claim.clone(),
            policy: config.validation_policy,
            revocation_check: Arc::new(NeverRevoked),
            custom_check: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Load the public key named by `config` and build the pipeline
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let key = PublicKey::from_file(&config.public_key_path)?;
        Ok(Self::with_config(TokenVerifier::new(key), config))
    }

    /// Set the maximum token age in seconds
    pub fn with_max_lifetime(mut self, seconds: i64) -> Self {
        self.max_lifetime_seconds = seconds;
        self
    }

    /// Set the claim holding the user identifier
    pub fn with_identity_claim(mut self, claim: impl Into<String>) -> Self {
        self.identity_claim = claim.into();
        self
    }

    /// Set how custom-check errors combine with time errors
    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Install the revocation check
    pub fn with_revocation_check(mut self, check: impl RevocationCheck + 'static) -> Self {
        self.revocation_check = Arc::new(check);
        self
    }

    /// Install the custom claim check
    pub fn with_custom_check(mut self, check: impl CustomCheck + 'static) -> Self {
        self.custom_check = Some(Arc::new(check));
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run the pipeline on the request headers
    pub fn authorize_headers(&self, headers: &HeaderMap) -> AuthDecision {
        self.authorize(authorization_header(headers))
    }

    /// Run the pipeline on a raw `Authorization` header value
    pub fn authorize(&self, authorization: Option<&str>) -> AuthDecision {
        let Some(header) = authorization else {
            return self.deny(
                AuthError::MissingCredentials(NO_HEADER_MESSAGE.into()),
                "request has no Authorization header".into(),
                None,
            );
        };

        let Some(token) = extract_bearer_token(Some(header)) else {
            return self.deny(
                AuthError::MissingCredentials(INVALID_HEADER_MESSAGE.into()),
                format!("authorization header: {:?}", header),
                None,
            );
        };

        let Some(claims) = self.verifier.verify(token) else {
            return self.deny(
                AuthError::InvalidToken(UNDECODABLE_TOKEN_MESSAGE.into()),
                format!("token: {}", token),
                None,
            );
        };

        let identity = claims.identity(&self.identity_claim);

        let errors = validate_claims(
            &claims,
            self.max_lifetime_seconds,
            self.custom_check.as_deref(),
            self.policy,
            self.clock.as_ref(),
        );
        if !errors.is_empty() {
            return self.deny(
                AuthError::ValidationFailure(errors),
                format!("claims: {}", claims.dump()),
                Some(identity.unwrap_or_else(|| UNKNOWN_IDENTITY.to_string())),
            );
        }

        let identity = identity.unwrap_or_else(|| UNKNOWN_IDENTITY.to_string());

        if self.revocation_check.is_revoked(&claims) {
            return self.deny(
                AuthError::Revoked(format!("JWT revoked for {}", identity)),
                format!("claims: {}", claims.dump()),
                Some(identity),
            );
        }

        log_audit_event(AuditEvent::AuthenticationSuccess {
            identity: identity.clone(),
            timestamp: Utc::now(),
        });

        AuthDecision::Authorized(AuthContext::new(identity, claims))
    }

    fn deny(&self, error: AuthError, diagnostic: String, identity: Option<String>) -> AuthDecision {
        let denial = Denial { error, diagnostic, identity };

        debug!(
            kind = %denial.kind(),
            diagnostic = %denial.diagnostic,
            "Authorization denied (diagnostic)"
        );
        log_audit_event(AuditEvent::AuthenticationFailure {
            identity: denial.identity.clone(),
            kind: denial.kind().to_string(),
            reason: denial.user_message(),
            timestamp: Utc::now(),
        });

        AuthDecision::Denied(denial)
    }
}
