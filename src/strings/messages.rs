//! # Messages
//!
//! Constant strings and format functions for everything the user sees: REPL chrome,
//! request diagnostics, and result rendering.

use std::fmt::Display;
use std::process::ExitStatus;
use std::time::Duration;

use crate::domain::types::ExecutionResult;

pub const GREETING: &str =
    "Welcome! Describe what you want to do (open a program, list a folder, show where you are). Type 'exit' to quit.";
pub const FAREWELL: &str = "Goodbye!";
pub const PROMPT: &str = "\nrequest> ";
pub const QUERYING_MODEL: &str = "Asking the model...";

pub const EXIT_WORDS: &[&str] = &["exit", "quit"];

pub const LAUNCHED: &str = "launched";
pub const PROGRAM_NOT_FOUND: &str = "program not found";
pub const NO_PROGRAM_SPECIFIED: &str = "no program specified";
pub const UNSUPPORTED_ACTION: &str = "unsupported action";

pub fn launch_failed(err: &impl Display) -> String {
    format!("failed to launch program: {err}")
}

pub fn spawn_failed(err: &impl Display) -> String {
    format!("failed to start command: {err}")
}

pub fn wait_failed(err: &impl Display) -> String {
    format!("failed while waiting for command: {err}")
}

pub fn timed_out(limit: Duration) -> String {
    format!("timed out after {}s", limit.as_secs_f64())
}

pub fn exited_with(status: &ExitStatus) -> String {
    format!("command {status}")
}

pub fn model_error(err: &str) -> String {
    format!("model error: {err}")
}

pub fn dispatched(action: &impl Display) -> String {
    format!("Resolved: {action}")
}

/// What the REPL prints for a finished request.
pub fn render_result(result: &ExecutionResult) -> String {
    if result.succeeded {
        result.output.trim_end().to_string()
    } else {
        format!("Error: {}", result.diagnostic.trim_end())
    }
}
