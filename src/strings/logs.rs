use std::fmt::Display;
use std::path::Path;

pub fn session_start(timestamp: &str) -> String {
    format!("--- [{timestamp}] Session started ---")
}

pub fn config_source(source: &str) -> String {
    format!("Loaded configuration from {source}")
}

pub const DEFAULT_CONFIG: &str = "No configuration file found, using defaults";
pub const CONFIG_READ_ERROR: &str = "Failed to load configuration";
pub const SESSION_END: &str = "Session ended";

pub fn request_received(text: &str) -> String {
    format!("Request: {text}")
}

pub fn model_output(raw: &str) -> String {
    format!("Model output:\n{raw}")
}

pub fn model_failed(err: &str) -> String {
    format!("Model query failed: {err}")
}

pub fn parse_failed(err: &impl Display) -> String {
    format!("Could not extract intent: {err}")
}

pub fn intent_parsed(action: &str, param_count: usize) -> String {
    format!("Intent: action={action} params={param_count}")
}

pub fn action_resolved(action: &impl Display) -> String {
    format!("Dispatching {action}")
}

pub fn resolved(name: &str, strategy: &str, path: &Path) -> String {
    format!("Resolved '{name}' via {strategy}: {}", path.display())
}

pub fn strategy_miss(name: &str, strategy: &str) -> String {
    format!("Strategy {strategy} has no match for '{name}'")
}

pub fn strategy_failed(name: &str, strategy: &str, err: &impl Display) -> String {
    format!("Strategy {strategy} failed for '{name}': {err}")
}

pub fn resolution_fallback(name: &str) -> String {
    format!("No strategy resolved '{name}', launching the raw name")
}

pub fn unsupported_action(raw: &str) -> String {
    format!("Unsupported action '{raw}'")
}

pub fn launched(target: &str, pid: Option<u32>) -> String {
    match pid {
        Some(pid) => format!("Launched '{target}' (pid {pid})"),
        None => format!("Launched '{target}'"),
    }
}

pub fn direct_launch_missing(target: &str) -> String {
    format!("'{target}' is not directly runnable, trying the system opener")
}

pub fn opened(target: &str) -> String {
    format!("Opened '{target}' via the system opener")
}

pub fn open_failed(target: &str, err: &impl Display) -> String {
    format!("System opener failed for '{target}': {err}")
}

pub fn command_finished(command: &str, status: &impl Display) -> String {
    format!("`{command}` finished: {status}")
}

pub fn command_timed_out(command: &str, secs: f64) -> String {
    format!("`{command}` killed after {secs}s")
}
