//! Temporal and custom claim validation
//!
//! Checks run against a single reading of the injected [`Clock`]:
//!
//! 1. `nbf`, `exp` and `iat` must all be present as integral epoch seconds.
//! 2. At most one temporal error is reported, first match wins:
//!    not-before in the future, `iat + max_lifetime` in the past, then `exp`
//!    in the past.
//! 3. The custom check contributes its own errors according to the
//!    [`ValidationPolicy`].

use jwtgate_config::ValidationPolicy;

use crate::{
    claims::{Claims, EXPIRES_AT, ISSUED_AT, NOT_BEFORE},
    clock::Clock,
    duration::format_duration,
    hooks::CustomCheck,
};

/// Check presence and time window of the required time claims.
///
/// Returns the single error found, if any.
pub fn check_time_claims(claims: &Claims, max_lifetime_seconds: i64, now: i64) -> Option<String> {
    let missing = claims.missing_time_claims();
    if !missing.is_empty() {
        return Some(format!("JWT is missing required claims: {{{}}}", missing.join(", ")));
    }

    // Presence was checked above; the defaults are unreachable.
    let nbf = claims.epoch_seconds(NOT_BEFORE).unwrap_or_default();
    let exp = claims.epoch_seconds(EXPIRES_AT).unwrap_or_default();
    let iat = claims.epoch_seconds(ISSUED_AT).unwrap_or_default();

    let before_secs = nbf.saturating_sub(now);
    let lifetime_expired_secs = now.saturating_sub(iat.saturating_add(max_lifetime_seconds));
    let expired_secs = now.saturating_sub(exp);

    if before_secs > 0 {
        Some(format!("This JWT will be valid in {}", as_elapsed(before_secs)))
    } else if lifetime_expired_secs > 0 {
        Some(format!(
            "This JWT max lifetime has expired since {}",
            as_elapsed(lifetime_expired_secs)
        ))
    } else if expired_secs > 0 {
        Some(format!("This JWT has expired since {}", as_elapsed(expired_secs)))
    } else {
        None
    }
}

fn as_elapsed(seconds: i64) -> String {
    format_duration(seconds.saturating_mul(1000))
}

fn run_custom_check(custom_check: Option<&dyn CustomCheck>, claims: &Claims) -> Vec<String> {
    custom_check
        .map(|check| check.check(claims))
        .unwrap_or_default()
        .into_iter()
        .filter(|e| !e.trim().is_empty())
        .collect()
}

/// Validate claims, returning every error found in reporting order.
///
/// An empty result means the claims are valid. Under
/// [`ValidationPolicy::TemporalFirst`] the custom check is only consulted
/// when the time checks pass; under [`ValidationPolicy::Aggregate`] it always
/// runs and its errors precede the time error.
pub fn validate_claims(
    claims: &Claims,
    max_lifetime_seconds: i64,
    custom_check: Option<&dyn CustomCheck>,
    policy: ValidationPolicy,
    clock: &dyn Clock,
) -> Vec<String> {
    let time_error = check_time_claims(claims, max_lifetime_seconds, clock.now());

    match policy {
        ValidationPolicy::TemporalFirst => match time_error {
            Some(error) => vec![error],
            None => run_custom_check(custom_check, claims),
        },
        ValidationPolicy::Aggregate => {
            let mut errors = run_custom_check(custom_check, claims);
            errors.extend(time_error);
            errors
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::{Value, json};

    use super::*;
    use crate::clock::FixedClock;

    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    fn claims(value: Value) -> Claims {
        Claims::try_from(value).unwrap()
    }

    fn valid_claims() -> Claims {
        claims(json!({"sub": "alice", "nbf": NOW - 60, "iat": NOW - 60, "exp": NOW + 3600}))
    }

    #[test]
    fn test_valid_claims_have_no_errors() {
        let clock = FixedClock::new(NOW);
        let errors =
            validate_claims(&valid_claims(), DAY, None, ValidationPolicy::TemporalFirst, &clock);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        // nbf == now, exp == now, iat + max == now are all still valid
        let c = claims(json!({"nbf": NOW, "exp": NOW, "iat": NOW - DAY}));
        assert_eq!(check_time_claims(&c, DAY, NOW), None);
    }

    #[test]
    fn test_missing_fields_single_error() {
        let c = claims(json!({"sub": "alice", "exp": 0}));
        let clock = FixedClock::new(NOW);
        let errors = validate_claims(&c, DAY, None, ValidationPolicy::TemporalFirst, &clock);
        assert_eq!(errors, vec!["JWT is missing required claims: {nbf, iat}".to_string()]);

        let errors = validate_claims(&Claims::default(), DAY, None, ValidationPolicy::Aggregate, &clock);
        assert_eq!(errors, vec!["JWT is missing required claims: {nbf, exp, iat}".to_string()]);
    }

    #[test]
    fn test_not_yet_valid() {
        let c = claims(json!({"nbf": NOW + 90, "iat": NOW, "exp": NOW + 3600}));
        assert_eq!(
            check_time_claims(&c, DAY, NOW).as_deref(),
            Some("This JWT will be valid in 1min 30s")
        );
    }

    #[test]
    fn test_expired() {
        let c = claims(json!({"nbf": NOW - 7200, "iat": NOW - 7200, "exp": NOW - 3600}));
        assert_eq!(check_time_claims(&c, DAY, NOW).as_deref(), Some("This JWT has expired since 1h"));
    }

    #[test]
    fn test_max_lifetime_exceeded() {
        let c = claims(json!({"nbf": NOW - 2 * DAY, "iat": NOW - DAY - 1, "exp": NOW + DAY}));
        assert_eq!(
            check_time_claims(&c, DAY, NOW).as_deref(),
            Some("This JWT max lifetime has expired since 1s")
        );
    }

    #[test]
    fn test_precedence_not_before_wins() {
        // Every window is violated; only the not-before error is reported
        let c = claims(json!({"nbf": NOW + 5, "iat": NOW - 3 * DAY, "exp": NOW - DAY}));
        let clock = FixedClock::new(NOW);
        let errors = validate_claims(&c, DAY, None, ValidationPolicy::Aggregate, &clock);
        assert_eq!(errors, vec!["This JWT will be valid in 5s".to_string()]);
    }

    #[test]
    fn test_precedence_lifetime_before_expiry() {
        // Both windows are exceeded by different amounts; the lifetime one is reported
        let c = claims(json!({"nbf": NOW - 3 * DAY, "iat": NOW - 3 * DAY, "exp": NOW - DAY}));
        assert_eq!(
            check_time_claims(&c, DAY, NOW).as_deref(),
            Some("This JWT max lifetime has expired since 2 days")
        );
    }

    #[test]
    fn test_short_lifetime_reported_over_expiry() {
        // Lifetime exceeded by 30min, exp by 1h
        let c = claims(json!({"nbf": NOW - 7200, "iat": NOW - 7200, "exp": NOW - 3600}));
        assert_eq!(
            check_time_claims(&c, 5400, NOW).as_deref(),
            Some("This JWT max lifetime has expired since 30min")
        );
    }

    #[test]
    fn test_aggregate_keeps_custom_errors_when_fields_missing() {
        let check = |_: &Claims| {
            vec!["tenant claim required".to_string(), "role claim required".to_string()]
        };
        let clock = FixedClock::new(NOW);
        let errors = validate_claims(
            &Claims::default(),
            DAY,
            Some(&check),
            ValidationPolicy::Aggregate,
            &clock,
        );
        assert_eq!(
            errors,
            vec![
                "tenant claim required".to_string(),
                "role claim required".to_string(),
                "JWT is missing required claims: {nbf, exp, iat}".to_string(),
            ]
        );
    }

    #[test]
    fn test_temporal_first_skips_custom_check_when_fields_missing() {
        let calls = AtomicUsize::new(0);
        let check = |_: &Claims| {
            calls.fetch_add(1, Ordering::SeqCst);
            vec!["custom".to_string()]
        };
        let clock = FixedClock::new(NOW);
        let errors = validate_claims(
            &Claims::default(),
            DAY,
            Some(&check),
            ValidationPolicy::TemporalFirst,
            &clock,
        );
        assert_eq!(errors, vec!["JWT is missing required claims: {nbf, exp, iat}".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_custom_errors_returned_when_time_passes() {
        let check = |_: &Claims| vec!["tenant claim required".to_string(), String::new()];
        let clock = FixedClock::new(NOW);
        let errors = validate_claims(
            &valid_claims(),
            DAY,
            Some(&check),
            ValidationPolicy::TemporalFirst,
            &clock,
        );
        assert_eq!(errors, vec!["tenant claim required".to_string()]);
    }

    #[test]
    fn test_temporal_first_skips_custom_check_on_time_error() {
        let calls = AtomicUsize::new(0);
        let check = |_: &Claims| {
            calls.fetch_add(1, Ordering::SeqCst);
            vec!["custom".to_string()]
        };
        let clock = FixedClock::new(NOW + 2 * DAY);
        let errors = validate_claims(
            &valid_claims(),
            DAY,
            Some(&check),
            ValidationPolicy::TemporalFirst,
            &clock,
        );
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("This JWT max lifetime has expired since"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_aggregate_puts_custom_errors_first() {
        let check = |_: &Claims| vec!["first".to_string(), "second".to_string()];
        let clock = FixedClock::new(NOW + 2 * DAY);
        let errors =
            validate_claims(&valid_claims(), DAY, Some(&check), ValidationPolicy::Aggregate, &clock);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], "first");
        assert_eq!(errors[1], "second");
        assert!(errors[2].starts_with("This JWT max lifetime has expired since"));
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let c = claims(json!({"nbf": i64::MIN, "iat": i64::MAX, "exp": i64::MAX}));
        assert_eq!(check_time_claims(&c, i64::MAX, NOW), None);

        let c = claims(json!({"nbf": i64::MAX, "iat": 0, "exp": 0}));
        assert!(check_time_claims(&c, DAY, NOW).unwrap().starts_with("This JWT will be valid in"));
    }
}
