//! # Domain Traits
//!
//! Seams between the pipeline and the operating system or model service.
//! Each has a real implementation in the infrastructure layer and a recording stub
//! in tests.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::error::AccessError;
use crate::domain::types::Resolution;

/// Abstract interface for the language model that turns free text into an intent.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the full prompt.
    async fn completion(&self, prompt: &str) -> Result<String, String>;
}

/// Installed-application registry keyed by executable file name (e.g. `WINWORD.EXE`).
pub trait AppRegistry: Send + Sync {
    /// `Ok(None)` when the key is absent. `Err` only for unexpected access failures.
    fn lookup(&self, executable: &str) -> Result<Option<PathBuf>, AccessError>;
}

/// Turns a logical program name into something launchable.
pub trait ProgramResolver: Send + Sync {
    fn resolve(&self, logical_name: &str) -> Resolution;
}

/// The OS generic "open" association (file, URL or registered app).
pub trait Opener: Send + Sync {
    fn open_detached(&self, target: &str) -> std::io::Result<()>;
}
