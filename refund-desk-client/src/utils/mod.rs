//! Utility module

pub mod log_sanitizer;
