//! # jwtgate Observe - Logging Layer
//!
//! Centralized structured logging built on `tracing`.

pub mod logging;

pub use logging::{init_logging, request_span, LogConfig, LogFormat};
