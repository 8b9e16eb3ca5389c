//! # LLM Client
//!
//! Talks to a local model through its CLI (`ollama run <model>` by default): the
//! prompt goes in on stdin, the completion comes back on stdout.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::domain::config::ModelConfig;
use crate::domain::error::ModelError;
use crate::domain::traits::LlmProvider;

/// CLI-backed model client
pub struct Client {
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl Client {
    /// Create a new client from the model configuration
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: vec!["run".to_string(), config.name.clone()],
            timeout: config.timeout.map(Duration::from_secs),
        }
    }

    /// Create a client for an arbitrary command line
    #[cfg(test)]
    pub fn with_command(command: &str, args: &[&str], timeout: Option<Duration>) -> Self {
        Self {
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout,
        }
    }

    /// Send a prompt and return the trimmed completion
    pub async fn prompt(&self, prompt: &str) -> Result<String, ModelError> {
        let mut cmd = tokio::process::Command::new(&self.command);
        cmd.args(&self.args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| ModelError::Spawn {
            command: self.command.clone(),
            reason: e.to_string(),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A model that exits early closes the pipe; its exit status tells the story.
            if let Err(e) = stdin.write_all(prompt.as_bytes()).await {
                tracing::debug!("Could not write prompt to model stdin: {}", e);
            }
        }

        let waited = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ModelError::TimedOut(limit.as_secs()))?,
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|e| ModelError::Spawn {
            command: self.command.clone(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(ModelError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(ModelError::Empty);
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmProvider for Client {
    async fn completion(&self, prompt: &str) -> Result<String, String> {
        self.prompt(prompt).await.map_err(|e| e.to_string())
    }
}
