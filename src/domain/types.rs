//! # Domain Types
//!
//! Data that flows through the request pipeline: the parsed [`Intent`], the concrete
//! [`ResolvedAction`] the dispatcher produces, and the [`ExecutionResult`] handed back
//! to the user.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// What the user asked for, as named by the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenProgram,
    ListDirectory,
    ShowPath,
    /// Anything else. Keeps the raw action text for diagnostics.
    Unsupported(String),
}

impl Action {
    /// Classifies a raw action name. Never fails: unknown names become `Unsupported`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "open_program" => Action::OpenProgram,
            "list_directory" => Action::ListDirectory,
            "show_path" => Action::ShowPath,
            _ => Action::Unsupported(name.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Action::OpenProgram => "open_program",
            Action::ListDirectory => "list_directory",
            Action::ShowPath => "show_path",
            Action::Unsupported(raw) => raw,
        }
    }
}

/// A validated request. Built once by the parser and consumed by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    action: Action,
    parameters: BTreeMap<String, String>,
}

impl Intent {
    pub fn new(action: Action, parameters: BTreeMap<String, String>) -> Self {
        Self { action, parameters }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Returns a parameter value, treating blank strings as absent.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A concrete operation ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Start a program detached. Holds a resolved path or the raw logical name.
    Launch(String),
    /// Run through the platform command interpreter and capture its output.
    ShellCommand(String),
    /// Abort the request with this message.
    Error(String),
}

impl fmt::Display for ResolvedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedAction::Launch(target) => write!(f, "launch {target}"),
            ResolvedAction::ShellCommand(text) => write!(f, "$ {text}"),
            ResolvedAction::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub succeeded: bool,
    pub output: String,
    pub diagnostic: String,
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            output: output.into(),
            diagnostic: String::new(),
        }
    }

    pub fn failure(diagnostic: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: String::new(),
            diagnostic: diagnostic.into(),
        }
    }
}

/// Outcome of one request, with the action it resolved to when parsing succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub action: Option<ResolvedAction>,
    pub result: ExecutionResult,
}

impl Reply {
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            action: None,
            result: ExecutionResult::failure(diagnostic),
        }
    }
}

/// Where a logical program name ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramLocation {
    /// Found on disk by one of the resolution strategies.
    Path(PathBuf),
    /// Nothing found; launch falls back to the name the user gave.
    LogicalName(String),
}

impl ProgramLocation {
    pub fn into_target(self) -> String {
        match self {
            ProgramLocation::Path(path) => path.to_string_lossy().into_owned(),
            ProgramLocation::LogicalName(name) => name,
        }
    }
}

/// Result of running the resolution chain over one name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub location: Option<ProgramLocation>,
    /// Access failures hit along the way. They never abort the chain.
    pub diagnostics: Vec<String>,
}

/// Host flavour that decides command syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}
