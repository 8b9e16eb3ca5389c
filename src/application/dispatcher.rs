//! # Action Dispatch
//!
//! Maps a validated [`Intent`] to the concrete [`ResolvedAction`] the executor will
//! run. Builds descriptions only: nothing is started here.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::domain::traits::ProgramResolver;
use crate::domain::types::{Action, Intent, Platform, ProgramLocation, ResolvedAction};
use crate::strings::{logs, messages};

pub const PROGRAM_PARAM: &str = "program";
pub const PATH_PARAM: &str = "path";
const DEFAULT_PATH: &str = ".";

/// Arguments made only of these characters go to the shell unquoted.
static SAFE_ARGUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_./:~+=@%,\\-]+$").unwrap());

pub struct Dispatcher {
    resolver: Arc<dyn ProgramResolver>,
    platform: Platform,
}

impl Dispatcher {
    pub fn new(resolver: Arc<dyn ProgramResolver>) -> Self {
        Self::for_platform(resolver, Platform::current())
    }

    pub fn for_platform(resolver: Arc<dyn ProgramResolver>, platform: Platform) -> Self {
        Self { resolver, platform }
    }

    pub fn dispatch(&self, intent: &Intent) -> ResolvedAction {
        match intent.action() {
            Action::OpenProgram => self.open_program(intent),
            Action::ListDirectory => {
                let path = intent.parameter(PATH_PARAM).unwrap_or(DEFAULT_PATH);
                ResolvedAction::ShellCommand(list_directory_command(self.platform, path))
            }
            Action::ShowPath => ResolvedAction::ShellCommand(show_path_command(self.platform)),
            Action::Unsupported(raw) => {
                tracing::warn!("{}", logs::unsupported_action(raw));
                ResolvedAction::Error(messages::UNSUPPORTED_ACTION.to_string())
            }
        }
    }

    fn open_program(&self, intent: &Intent) -> ResolvedAction {
        let Some(program) = intent.parameter(PROGRAM_PARAM) else {
            return ResolvedAction::Error(messages::NO_PROGRAM_SPECIFIED.to_string());
        };

        let resolution = self.resolver.resolve(program);
        for diagnostic in &resolution.diagnostics {
            tracing::warn!("{}", diagnostic);
        }

        let location = resolution.location.unwrap_or_else(|| {
            tracing::info!("{}", logs::resolution_fallback(program));
            ProgramLocation::LogicalName(program.to_string())
        });
        ResolvedAction::Launch(location.into_target())
    }
}

pub fn list_directory_command(platform: Platform, path: &str) -> String {
    let path = quote_argument(platform, path);
    match platform {
        Platform::Windows => format!("dir {path}"),
        Platform::Unix => format!("ls {path}"),
    }
}

pub fn show_path_command(platform: Platform) -> String {
    match platform {
        Platform::Windows => "echo %cd%".to_string(),
        Platform::Unix => "pwd".to_string(),
    }
}

/// Quotes `arg` for the platform shell unless it is plainly safe.
pub fn quote_argument(platform: Platform, arg: &str) -> String {
    if SAFE_ARGUMENT.is_match(arg) {
        return arg.to_string();
    }
    match platform {
        Platform::Unix => format!("'{}'", arg.replace('\'', r"'\''")),
        // cmd has no escape for a double quote inside quotes.
        Platform::Windows => format!("\"{}\"", arg.replace('"', "")),
    }
}
