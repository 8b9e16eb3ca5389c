//! # Domain Errors
//!
//! Typed failures raised by the pipeline stages. Validation problems and unsupported
//! actions never become errors here: the dispatcher folds them into
//! `ResolvedAction::Error` so they reach the user as ordinary results.

use thiserror::Error;

/// The translator's output did not contain a usable intent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no structured payload found in model output")]
    NoPayload,

    #[error("malformed payload in model output: {0}")]
    Malformed(String),

    #[error("payload has no action")]
    MissingAction,
}

/// A lookup table (registry, filesystem) raised something other than "not found".
#[derive(Debug, Error)]
#[error("error while accessing {source_name}: {reason}")]
pub struct AccessError {
    pub source_name: String,
    pub reason: String,
}

impl AccessError {
    pub fn new(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// The translator could not produce output.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to start model command `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    #[error("model exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("model timed out after {0}s")]
    TimedOut(u64),

    #[error("model produced no output")]
    Empty,
}
