//! Audit Logging
//!
//! Structured audit events for authorization decisions, serialized to JSON
//! and emitted through `tracing`.
//!
//! ## Event Types
//!
//! - **AuthenticationSuccess**: a request was authorized
//! - **AuthenticationFailure**: a request was denied by the pipeline
//! - **AttributeFilterMismatch**: an authorized request failed a route's attribute filter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit event types for authorization decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum AuditEvent {
    /// Successful authorization
    AuthenticationSuccess {
        /// Identity taken from the token
        identity: String,
        /// Timestamp of the event
        timestamp: DateTime<Utc>,
    },

    /// Denied request
    AuthenticationFailure {
        /// Identity if the token got far enough to carry one
        #[serde(skip_serializing_if = "Option::is_none")]
        identity: Option<String>,
        /// Denial kind, see [`crate::error::DenialKind`]
        kind: String,
        /// Structured reason
        reason: String,
        /// Timestamp of the event
        timestamp: DateTime<Utc>,
    },

    /// No template of a route's attribute filter matched
    AttributeFilterMismatch {
        /// The required templates, as JSON
        required: String,
        /// Timestamp of the event
        timestamp: DateTime<Utc>,
    },
}

/// Log an audit event
///
/// - Success events are logged at INFO level
/// - Failure and mismatch events are logged at ERROR level
pub fn log_audit_event(event: AuditEvent) {
    let json = match serde_json::to_string(&event) {
        Ok(j) => j,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize audit event");
            return;
        },
    };

    match &event {
        AuditEvent::AuthenticationSuccess { identity, timestamp } => {
            tracing::info!(
                audit_event = %json,
                identity = %identity,
                timestamp = %timestamp,
                "Authorization succeeded"
            );
        },
        AuditEvent::AuthenticationFailure { identity, kind, reason, timestamp } => {
            tracing::error!(
                audit_event = %json,
                identity = ?identity,
                kind = %kind,
                reason = %reason,
                timestamp = %timestamp,
                "Authorization denied"
            );
        },
        AuditEvent::AttributeFilterMismatch { required, timestamp } => {
            tracing::error!(
                audit_event = %json,
                required = %required,
                timestamp = %timestamp,
                "Attribute filter mismatch"
            );
        },
    }
}
