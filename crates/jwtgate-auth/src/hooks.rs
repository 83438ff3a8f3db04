//! Pluggable policy hooks invoked after temporal validation
//!
//! Both hooks are strategy objects handed to the pipeline at construction.
//! Closures work directly through the blanket implementations:
//!
//! ```
//! use jwtgate_auth::{Claims, hooks::{CustomCheck, RevocationCheck}};
//!
//! let revoked = |claims: &Claims| claims.identity("sub").as_deref() == Some("mallory");
//! let check = |claims: &Claims| {
//!     if claims.contains("tenant") { vec![] } else { vec!["tenant claim required".to_string()] }
//! };
//!
//! let claims = Claims::default();
//! assert!(!revoked.is_revoked(&claims));
//! assert_eq!(check.check(&claims), vec!["tenant claim required".to_string()]);
//! ```

use crate::claims::Claims;

/// Decides whether an otherwise valid token must be rejected
pub trait RevocationCheck: Send + Sync {
    /// `true` rejects the request
    fn is_revoked(&self, claims: &Claims) -> bool;
}

impl<F> RevocationCheck for F
where
    F: Fn(&Claims) -> bool + Send + Sync,
{
    fn is_revoked(&self, claims: &Claims) -> bool {
        self(claims)
    }
}

/// Application-specific claim checks
pub trait CustomCheck: Send + Sync {
    /// Errors found, in order; empty means the claims pass.
    /// Empty strings are ignored.
    fn check(&self, claims: &Claims) -> Vec<String>;
}

impl<F> CustomCheck for F
where
    F: Fn(&Claims) -> Vec<String> + Send + Sync,
{
    fn check(&self, claims: &Claims) -> Vec<String> {
        self(claims)
    }
}

/// Default revocation check: nothing is ever revoked
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverRevoked;

impl RevocationCheck for NeverRevoked {
    fn is_revoked(&self, _claims: &Claims) -> bool {
        false
    }
}
