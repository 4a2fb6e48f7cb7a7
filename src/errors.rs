//! Error types.
//!
//! Two distinct failure domains live here:
//!
//! - [`HookError`] is what a host hook (repr, len, iteration, ...) reports.
//!   The renderer never surfaces it to its caller; it either takes a fallback
//!   path or folds it into the top-level diagnostic string.
//! - [`Error`] covers the crate's genuinely fallible surfaces: loading
//!   render limits and converting JSON input into values.

use std::fmt;

// ── Hook error kinds ─────────────────────────────────────────
// Named after the exception classes a debugger user would recognize.

pub const RUNTIME_ERROR: &str = "RuntimeError";
pub const TYPE_ERROR: &str = "TypeError";
pub const VALUE_ERROR: &str = "ValueError";
pub const KEY_ERROR: &str = "KeyError";

/// Failure raised by a host hook.
///
/// `kind` names the failure class and `message` carries context.  Displayed
/// as `Kind('message')`, which is what ends up in the top-level diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    pub kind: String,
    pub message: String,
}

impl HookError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(RUNTIME_ERROR, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(TYPE_ERROR, message)
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(VALUE_ERROR, message)
    }

    pub fn key_error(message: impl Into<String>) -> Self {
        Self::new(KEY_ERROR, message)
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.kind, self.message)
    }
}

impl std::error::Error for HookError {}

/// Errors from configuration and input conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid UTF-8 in JSON input")]
    Utf8,

    #[error("invalid render limits: {0}")]
    Limits(String),
}
