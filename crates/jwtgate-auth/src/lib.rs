//! # jwtgate Authorization
//!
//! Request authorization in front of an HTTP service: bearer tokens carrying
//! RS256-signed claims are verified, checked against their time window and a
//! deployment-wide maximum lifetime, passed through pluggable custom and
//! revocation checks, and optionally gated per route by attribute filters.
//!
//! ## Pipeline
//!
//! 1. [`bearer`] pulls the token out of the `Authorization` header
//! 2. [`jwt`] verifies the signature and decodes the [`Claims`]
//! 3. [`validation`] checks `nbf`, `exp`, `iat` + max lifetime and runs the custom check
//! 4. the revocation check runs
//! 5. [`middleware`] attaches the resulting [`AuthContext`] to the request
//!
//! Every failure is terminal and answered with 401 Unauthorized.
//!
//! ## Security
//!
//! - Only RS256 is accepted; every other algorithm is rejected
//! - Client-facing messages never include tokens or claims
//! - No unsafe code is allowed in this crate
//!
//! ## Example
//!
//! ```ignore
//! use jwtgate_auth::{AuthPipeline, AuthDecision};
//!
//! let pipeline = AuthPipeline::from_config(&config.auth)?
//!     .with_revocation_check(|claims: &Claims| revoked.contains(&claims.identity("sub")));
//!
//! match pipeline.authorize(Some("Bearer eyJ...")) {
//!     AuthDecision::Authorized(ctx) => println!("hello {}", ctx.identity),
//!     AuthDecision::Denied(denial) => println!("denied: {}", denial.user_message()),
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Audit logging for authorization events
pub mod audit;
/// Bearer token extraction
pub mod bearer;
/// Decoded token claims
pub mod claims;
/// Injectable time source
pub mod clock;
/// Request-scoped authorization context
pub mod context;
/// Human-readable durations
pub mod duration;
/// Authorization errors
pub mod error;
/// Axum extractors for authentication
pub mod extractor;
/// Per-route attribute filters
pub mod filter;
/// Revocation and custom-check hooks
pub mod hooks;
/// Public key loading and signature verification
pub mod jwt;
/// Axum middleware for authorization
pub mod middleware;
/// The authorization decision pipeline
pub mod pipeline;
/// Temporal and custom claim validation
pub mod validation;

// Re-export key types
pub use audit::{AuditEvent, log_audit_event};
pub use claims::{Claims, UNKNOWN_IDENTITY};
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::AuthContext;
pub use duration::format_duration;
pub use error::{AuthError, DenialKind};
pub use extractor::{OptionalAuth, RequireAuth};
pub use filter::AttributeFilter;
pub use hooks::{CustomCheck, NeverRevoked, RevocationCheck};
pub use jwt::{PublicKey, TokenVerifier};
pub use jwtgate_config::{AuthConfig, ValidationPolicy};
pub use middleware::{attribute_filter_middleware, jwt_auth_middleware};
pub use pipeline::{AuthDecision, AuthPipeline, Denial};
pub use validation::validate_claims;
