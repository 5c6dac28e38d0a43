//! Utility functions.

pub mod sanitize;

pub use sanitize::{decode_url_escapes, sanitize_url, SanitizeError};
