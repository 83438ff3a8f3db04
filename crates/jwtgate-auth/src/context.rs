use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::{claims::Claims, error::AuthError};

/// Identity and claims of an authorized request
///
/// Inserted into the request extensions by the auth middleware before the
/// wrapped handler runs. Cloning is cheap; the claims are shared.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthContext {
    /// Value of the identity claim, or [`crate::claims::UNKNOWN_IDENTITY`]
    pub identity: String,

    /// Verified claims, unchanged since decoding
    pub claims: Arc<Claims>,
}

impl AuthContext {
    /// Create a context for `identity`
    pub fn new(identity: impl Into<String>, claims: Claims) -> Self {
        Self { identity: identity.into(), claims: Arc::new(claims) }
    }

    /// Read a claim by name and deserialize it
    pub fn claim<T: DeserializeOwned>(&self, name: &str) -> Result<T, AuthError> {
        self.claims.claim(name)
    }
}
