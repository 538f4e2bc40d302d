//! Utility modules.

/// Log sanitization utilities to keep response bodies out of logs.
pub mod log_sanitizer;
