//! Attribute filters for individual routes
//!
//! A filter is a set of templates. A template matches when every one of its
//! keys appears in the claims with an equal value; the filter passes when any
//! template matches. An empty filter lets everything through.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    audit::{AuditEvent, log_audit_event},
    claims::Claims,
    error::AuthError,
};

/// Claim attributes a single template requires
pub type AttributeTemplate = Map<String, Value>;

/// OR-of-AND set of required claim attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeFilter(Vec<AttributeTemplate>);

impl AttributeFilter {
    /// Build a filter from templates
    pub fn new(templates: impl IntoIterator<Item = AttributeTemplate>) -> Self {
        Self(templates.into_iter().collect())
    }

    /// Parse a JSON array of objects, e.g. `[{"role": "admin"}, {"role": "ops"}]`
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The templates of this filter
    pub fn templates(&self) -> &[AttributeTemplate] {
        &self.0
    }

    /// Whether the filter has no templates
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `claims` satisfy the filter
    pub fn matches(&self, claims: &Claims) -> bool {
        self.is_empty() || self.0.iter().any(|template| template_matches(template, claims))
    }

    /// Fail with [`AuthError::FilterMismatch`] unless `claims` satisfy the filter
    pub fn enforce(&self, claims: &Claims) -> Result<(), AuthError> {
        if self.matches(claims) {
            return Ok(());
        }

        let required = serde_json::to_string(&self.0).unwrap_or_default();
        debug!(required = %required, claims = %claims.dump(), "Attribute filter mismatch (diagnostic)");
        log_audit_event(AuditEvent::AttributeFilterMismatch { required, timestamp: Utc::now() });

        Err(AuthError::FilterMismatch)
    }
}

impl FromIterator<AttributeTemplate> for AttributeFilter {
    fn from_iter<I: IntoIterator<Item = AttributeTemplate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Every key of `template` is present in `claims` with an equal value
pub fn template_matches(template: &AttributeTemplate, claims: &Claims) -> bool {
    template.iter().all(|(name, expected)| claims.get(name) == Some(expected))
}

/// Check an optional filter; an absent filter always matches
pub fn matches(filter: Option<&AttributeFilter>, claims: &Claims) -> bool {
    filter.is_none_or(|f| f.matches(claims))
}

/// Enforce an optional filter; an absent filter always passes
pub fn enforce(filter: Option<&AttributeFilter>, claims: &Claims) -> Result<(), AuthError> {
    match filter {
        Some(f) => f.enforce(claims),
        None => Ok(()),
    }
}
