//! RS256 public keys and token signature verification

use std::{fmt, path::Path};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::warn;

use crate::{
    claims::Claims,
    error::{AuthError, Result},
};

/// The only signature algorithm accepted
pub const SIGNATURE_ALGORITHM: Algorithm = Algorithm::RS256;

/// RSA public key used to verify token signatures
#[derive(Clone)]
pub struct PublicKey {
    key: DecodingKey,
}

impl PublicKey {
    /// Parse a PEM-encoded RSA public key (SPKI `PUBLIC KEY` or PKCS#1 `RSA PUBLIC KEY`)
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| AuthError::InvalidPublicKey(format!("Failed to parse PEM: {}", e)))?;
        Ok(Self { key })
    }

    /// Read and parse a PEM file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|e| {
            AuthError::InvalidPublicKey(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_pem(&pem)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey").field("algorithm", &SIGNATURE_ALGORITHM).finish()
    }
}

/// Verifies RS256 signatures and decodes claims
///
/// Only the signature and algorithm are checked here. Time claims are left
/// to [`crate::validation`] so their failures can be reported precisely.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key: PublicKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for `key`
    pub fn new(key: PublicKey) -> Self {
        let mut validation = Validation::new(SIGNATURE_ALGORITHM);
        validation.validate_exp = false; // We do custom validation
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self { key, validation }
    }

    /// Verify the signature and decode the claims
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for malformed tokens, signature
    /// mismatches and any algorithm other than RS256.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.key.key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verify a token, folding every failure into `None`
    ///
    /// Failures are logged at warn level.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match self.decode(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!(error = %e, "JWT verification failed");
                None
            },
        }
    }
}
