#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use jwtgate_auth::{AuthPipeline, FixedClock, PublicKey, TokenVerifier};
use serde_json::{Value, json};

pub const PUBLIC_KEY: &str = include_str!("../fixtures/public_key.pem");
pub const PRIVATE_KEY: &str = include_str!("../fixtures/private_key.pem");
pub const OTHER_PRIVATE_KEY: &str = include_str!("../fixtures/other_private_key.pem");

/// Reference instant used by the tests (2020-09-13T12:26:40Z)
pub const T: i64 = 1_600_000_000;
pub const DAY: i64 = 86_400;
pub const WEEK: i64 = 7 * DAY;

/// Sign `claims` with the fixture key the pipeline trusts
pub fn sign_token(claims: &Value) -> String {
    sign_with(claims, PRIVATE_KEY)
}

/// Sign `claims` with a key the pipeline does not trust
pub fn sign_with_untrusted_key(claims: &Value) -> String {
    sign_with(claims, OTHER_PRIVATE_KEY)
}

fn sign_with(claims: &Value, private_pem: &str) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).expect("fixture private key");
    encode(&Header::new(Algorithm::RS256), claims, &key).expect("token signing")
}

/// `Authorization` header value for `token`
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn verifier() -> TokenVerifier {
    TokenVerifier::new(PublicKey::from_pem(PUBLIC_KEY.as_bytes()).expect("fixture public key"))
}

/// Pipeline with default settings and time frozen at `now`
pub fn pipeline_at(now: i64) -> (AuthPipeline, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(now));
    let pipeline = AuthPipeline::new(verifier()).with_clock(clock.clone());
    (pipeline, clock)
}

/// Claims valid for a week around `T`, for user `alice`
pub fn valid_claims() -> Value {
    json!({
        "sub": "alice",
        "iat": T,
        "nbf": T - 60,
        "exp": T + WEEK,
        "role": "admin",
    })
}

/// A week-long token issued at `T`, usable from a week before `T`
pub fn decoded_jwt_2() -> Value {
    json!({
        "sub": "bob",
        "iat": T,
        "exp": T + WEEK,
        "nbf": T - WEEK,
    })
}
