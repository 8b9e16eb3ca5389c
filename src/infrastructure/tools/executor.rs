//! # Command Executor
//!
//! Runs the concrete operations the dispatcher produces. Launches and captured
//! commands have different blocking contracts and are separate methods:
//! [`CommandExecutor::launch_detached`] never waits on the child, while
//! [`CommandExecutor::run_captured`] waits for exit and fully drained pipes.

use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::traits::Opener;
use crate::domain::types::{ExecutionResult, Platform, ResolvedAction};
use crate::strings::{logs, messages};

pub struct CommandExecutor {
    opener: Arc<dyn Opener>,
    /// Upper bound for captured commands. `None` waits forever.
    timeout: Option<Duration>,
}

impl CommandExecutor {
    pub fn new(opener: Arc<dyn Opener>, timeout: Option<Duration>) -> Self {
        Self { opener, timeout }
    }

    pub async fn execute(&self, action: &ResolvedAction) -> ExecutionResult {
        match action {
            ResolvedAction::Error(msg) => ExecutionResult::failure(msg.clone()),
            ResolvedAction::Launch(target) => self.launch_detached(target),
            ResolvedAction::ShellCommand(command) => self.run_captured(command).await,
        }
    }

    /// Starts `target` without waiting for it.
    ///
    /// Tries a direct spawn first. Only a "not found" failure falls through to the
    /// system opener, which also knows file and URL associations. The opener blocks
    /// only until its helper exits. Must be called from within a tokio runtime.
    pub fn launch_detached(&self, target: &str) -> ExecutionResult {
        match spawn_detached(target) {
            Ok(pid) => {
                tracing::info!("{}", logs::launched(target, pid));
                ExecutionResult::success(messages::LAUNCHED)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{}", logs::direct_launch_missing(target));
                match self.opener.open_detached(target) {
                    Ok(()) => {
                        tracing::info!("{}", logs::opened(target));
                        ExecutionResult::success(messages::LAUNCHED)
                    }
                    Err(e) => {
                        tracing::warn!("{}", logs::open_failed(target, &e));
                        ExecutionResult::failure(messages::PROGRAM_NOT_FOUND)
                    }
                }
            }
            Err(e) => ExecutionResult::failure(messages::launch_failed(&e)),
        }
    }

    /// Runs `command` through the platform shell and waits for it.
    ///
    /// stdout becomes the output on exit 0. Otherwise stderr becomes the diagnostic,
    /// or the exit status when stderr is empty.
    pub async fn run_captured(&self, command: &str) -> ExecutionResult {
        let mut cmd = shell_command(Platform::current(), command);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // A timed-out wait drops the child, which then gets killed.
        cmd.kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => return ExecutionResult::failure(messages::spawn_failed(&e)),
        };

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(waited) => waited,
                Err(_) => {
                    tracing::warn!("{}", logs::command_timed_out(command, limit.as_secs_f64()));
                    return ExecutionResult::failure(messages::timed_out(limit));
                }
            },
            None => child.wait_with_output().await,
        };

        let output = match waited {
            Ok(output) => output,
            Err(e) => return ExecutionResult::failure(messages::wait_failed(&e)),
        };
        tracing::info!("{}", logs::command_finished(command, &output.status));

        if output.status.success() {
            return ExecutionResult::success(String::from_utf8_lossy(&output.stdout));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.trim().is_empty() {
            ExecutionResult::failure(messages::exited_with(&output.status))
        } else {
            ExecutionResult::failure(stderr)
        }
    }
}

fn shell_command(platform: Platform, command: &str) -> tokio::process::Command {
    match platform {
        Platform::Windows => {
            let mut c = tokio::process::Command::new("cmd");
            c.arg("/C");
            // cmd does not understand `\"`, so the already-quoted text goes in as is.
            #[cfg(windows)]
            c.raw_arg(command);
            #[cfg(not(windows))]
            c.arg(command);
            c
        }
        Platform::Unix => {
            let mut c = tokio::process::Command::new("sh");
            c.args(["-c", command]);
            c
        }
    }
}

/// Spawns `target` with no stdio and its own process group, then lets it go.
/// The child handle is dropped immediately; tokio reaps it once it exits.
fn spawn_detached(target: &str) -> std::io::Result<Option<u32>> {
    let mut cmd = tokio::process::Command::new(target);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::null());
    cmd.kill_on_drop(false);

    #[cfg(unix)]
    cmd.process_group(0);
    #[cfg(windows)]
    {
        const DETACHED_PROCESS: u32 = 0x0000_0008;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    let child = cmd.spawn()?;
    Ok(child.id())
}
