//! # Program Resolution
//!
//! Turns a logical program name ("notepad", "Word", "chrome") into a launchable path.
//! Strategies run in a fixed order and the first hit wins:
//!
//! 1. the executable search path (what the user's shell would run),
//! 2. office friendly names mapped to their registered executables,
//! 3. any other name looked up as a registered executable.
//!
//! The search path goes first because it reflects the user's real environment and
//! is cheap to query. Nothing is cached: every request resolves afresh.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::error::AccessError;
use crate::domain::traits::{AppRegistry, ProgramResolver};
use crate::domain::types::{ProgramLocation, Resolution};
use crate::strings::logs;

/// Friendly office names and the executable each one is registered under.
pub const OFFICE_EXECUTABLES: &[(&str, &str)] = &[
    ("word", "WINWORD.EXE"),
    ("excel", "EXCEL.EXE"),
    ("powerpoint", "POWERPNT.EXE"),
    ("outlook", "OUTLOOK.EXE"),
    ("access", "MSACCESS.EXE"),
    ("publisher", "MSPUB.EXE"),
];

/// Case-insensitive lookup in [`OFFICE_EXECUTABLES`].
pub fn office_executable(name: &str) -> Option<&'static str> {
    let key = name.trim();
    OFFICE_EXECUTABLES
        .iter()
        .find(|(friendly, _)| friendly.eq_ignore_ascii_case(key))
        .map(|(_, exe)| *exe)
}

/// One way of turning a name into a path.
pub trait ResolutionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means "not mine, try the next one".
    fn try_resolve(&self, logical_name: &str) -> Result<Option<PathBuf>, AccessError>;
}

/// Looks the name up like a shell would, on `PATH` or an explicit path list.
#[derive(Debug, Default)]
pub struct SearchPathStrategy {
    search_path: Option<OsString>,
}

impl SearchPathStrategy {
    pub fn new(search_path: Option<OsString>) -> Self {
        Self { search_path }
    }

    fn lookup(&self, candidate: &str) -> Option<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(candidate, Some(paths), cwd)
            }
            None => which::which(candidate),
        };
        found.ok()
    }
}

impl ResolutionStrategy for SearchPathStrategy {
    fn name(&self) -> &'static str {
        "search-path"
    }

    fn try_resolve(&self, logical_name: &str) -> Result<Option<PathBuf>, AccessError> {
        let literal = logical_name.trim();
        if literal.is_empty() {
            return Ok(None);
        }
        if let Some(path) = self.lookup(literal) {
            return Ok(Some(path));
        }

        // Translators like to capitalise ("Firefox"); binaries rarely are.
        let lower = literal.to_lowercase();
        if lower != literal {
            return Ok(self.lookup(&lower));
        }
        Ok(None)
    }
}

/// Maps office friendly names to their canonical executable and asks the registry.
pub struct OfficeAliasStrategy {
    registry: Arc<dyn AppRegistry>,
}

impl OfficeAliasStrategy {
    pub fn new(registry: Arc<dyn AppRegistry>) -> Self {
        Self { registry }
    }
}

impl ResolutionStrategy for OfficeAliasStrategy {
    fn name(&self) -> &'static str {
        "office-alias"
    }

    fn try_resolve(&self, logical_name: &str) -> Result<Option<PathBuf>, AccessError> {
        match office_executable(logical_name) {
            Some(executable) => self.registry.lookup(executable),
            None => Ok(None),
        }
    }
}

/// Looks any non-office name up as a registered executable (`chrome` -> `chrome.exe`).
pub struct AppPathsStrategy {
    registry: Arc<dyn AppRegistry>,
}

impl AppPathsStrategy {
    pub fn new(registry: Arc<dyn AppRegistry>) -> Self {
        Self { registry }
    }

    fn executable_name(logical_name: &str) -> String {
        if Path::new(logical_name).extension().is_some() {
            logical_name.to_string()
        } else {
            format!("{logical_name}.exe")
        }
    }
}

impl ResolutionStrategy for AppPathsStrategy {
    fn name(&self) -> &'static str {
        "app-paths"
    }

    fn try_resolve(&self, logical_name: &str) -> Result<Option<PathBuf>, AccessError> {
        let name = logical_name.trim();
        if name.is_empty() || office_executable(name).is_some() {
            return Ok(None);
        }
        if name.contains(['/', '\\']) {
            return Ok(None);
        }
        self.registry.lookup(&Self::executable_name(name))
    }
}

/// Runs strategies in order and stops at the first hit.
pub struct ChainResolver {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl ChainResolver {
    pub fn new(strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Search path first, then the registry strategies when a registry exists.
    pub fn standard(search_path: Option<OsString>, registry: Option<Arc<dyn AppRegistry>>) -> Self {
        let mut strategies: Vec<Box<dyn ResolutionStrategy>> =
            vec![Box::new(SearchPathStrategy::new(search_path))];
        if let Some(registry) = registry {
            strategies.push(Box::new(OfficeAliasStrategy::new(registry.clone())));
            strategies.push(Box::new(AppPathsStrategy::new(registry)));
        }
        Self::new(strategies)
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

impl ProgramResolver for ChainResolver {
    fn resolve(&self, logical_name: &str) -> Resolution {
        let mut diagnostics = Vec::new();

        for strategy in &self.strategies {
            match strategy.try_resolve(logical_name) {
                Ok(Some(path)) => {
                    tracing::info!("{}", logs::resolved(logical_name, strategy.name(), &path));
                    return Resolution {
                        location: Some(ProgramLocation::Path(path)),
                        diagnostics,
                    };
                }
                Ok(None) => {
                    tracing::debug!("{}", logs::strategy_miss(logical_name, strategy.name()));
                }
                Err(e) => {
                    tracing::warn!("{}", logs::strategy_failed(logical_name, strategy.name(), &e));
                    diagnostics.push(e.to_string());
                }
            }
        }

        Resolution {
            location: None,
            diagnostics,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Registry stub that records every key it is asked for.
    #[derive(Default)]
    pub(crate) struct RecordingRegistry {
        pub calls: Mutex<Vec<String>>,
        pub entries: HashMap<String, PathBuf>,
        pub fail_on: Option<String>,
    }

    impl RecordingRegistry {
        pub fn with_entry(executable: &str, path: &str) -> Self {
            let mut entries = HashMap::new();
            entries.insert(executable.to_string(), PathBuf::from(path));
            Self {
                entries,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AppRegistry for RecordingRegistry {
        fn lookup(&self, executable: &str) -> Result<Option<PathBuf>, AccessError> {
            self.calls.lock().unwrap().push(executable.to_string());
            if self.fail_on.as_deref() == Some(executable) {
                return Err(AccessError::new("registry", "access is denied"));
            }
            Ok(self.entries.get(executable).cloned())
        }
    }

    #[cfg(unix)]
    pub(crate) fn fake_executable(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn resolver_with(dir: &Path, registry: Arc<RecordingRegistry>) -> ChainResolver {
        ChainResolver::standard(Some(dir.as_os_str().to_owned()), Some(registry))
    }

    fn found_path(resolution: &Resolution) -> PathBuf {
        match &resolution.location {
            Some(ProgramLocation::Path(p)) => p.clone(),
            other => panic!("expected a path, got {:?}", other),
        }
    }

    #[test]
    fn test_office_executable_case_insensitive() {
        assert_eq!(office_executable("word"), Some("WINWORD.EXE"));
        assert_eq!(office_executable("Word"), Some("WINWORD.EXE"));
        assert_eq!(office_executable("WORD"), Some("WINWORD.EXE"));
        assert_eq!(office_executable("PowerPoint"), Some("POWERPNT.EXE"));
        assert_eq!(office_executable("notepad"), None);
    }

    #[test]
    fn test_standard_chain_order() {
        let registry = Arc::new(RecordingRegistry::default());
        let with_registry = ChainResolver::standard(None, Some(registry));
        assert_eq!(
            with_registry.strategy_names(),
            vec!["search-path", "office-alias", "app-paths"]
        );

        let without = ChainResolver::standard(None, None);
        assert_eq!(without.strategy_names(), vec!["search-path"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_search_path_wins_without_registry_calls() {
        let dir = tempfile::tempdir().unwrap();
        let expected = fake_executable(dir.path(), "notepad");
        let registry = Arc::new(RecordingRegistry::with_entry("notepad.exe", "C:\\x\\notepad.exe"));

        let resolution = resolver_with(dir.path(), registry.clone()).resolve("notepad");

        assert_eq!(
            std::fs::canonicalize(found_path(&resolution)).unwrap(),
            std::fs::canonicalize(expected).unwrap()
        );
        assert!(registry.calls().is_empty());
        assert!(resolution.diagnostics.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_search_path_retries_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        let expected = fake_executable(dir.path(), "gedit");
        let registry = Arc::new(RecordingRegistry::default());

        let resolution = resolver_with(dir.path(), registry.clone()).resolve("Gedit");

        assert_eq!(
            std::fs::canonicalize(found_path(&resolution)).unwrap(),
            std::fs::canonicalize(expected).unwrap()
        );
        assert!(registry.calls().is_empty());
    }

    #[test]
    fn test_word_maps_to_winword_in_any_case() {
        let empty = tempfile::tempdir().unwrap();
        for input in ["word", "Word", "WORD"] {
            let registry = Arc::new(RecordingRegistry::with_entry(
                "WINWORD.EXE",
                "C:\\Office\\WINWORD.EXE",
            ));
            let resolution = resolver_with(empty.path(), registry.clone()).resolve(input);

            assert_eq!(registry.calls(), vec!["WINWORD.EXE".to_string()], "input {input}");
            assert_eq!(found_path(&resolution), PathBuf::from("C:\\Office\\WINWORD.EXE"));
        }
    }

    #[test]
    fn test_office_miss_does_not_fall_into_app_paths() {
        let empty = tempfile::tempdir().unwrap();
        let registry = Arc::new(RecordingRegistry::default());

        let resolution = resolver_with(empty.path(), registry.clone()).resolve("excel");

        assert_eq!(registry.calls(), vec!["EXCEL.EXE".to_string()]);
        assert_eq!(resolution.location, None);
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_app_paths_lookup_for_other_names() {
        let empty = tempfile::tempdir().unwrap();
        let registry = Arc::new(RecordingRegistry::with_entry(
            "chrome.exe",
            "C:\\Google\\chrome.exe",
        ));

        let resolution = resolver_with(empty.path(), registry.clone()).resolve("chrome");
        assert_eq!(registry.calls(), vec!["chrome.exe".to_string()]);
        assert_eq!(found_path(&resolution), PathBuf::from("C:\\Google\\chrome.exe"));

        let registry = Arc::new(RecordingRegistry::default());
        resolver_with(empty.path(), registry.clone()).resolve("code.exe");
        assert_eq!(registry.calls(), vec!["code.exe".to_string()]);
    }

    #[test]
    fn test_access_failure_is_recorded_not_fatal() {
        let empty = tempfile::tempdir().unwrap();
        let registry = Arc::new(RecordingRegistry {
            fail_on: Some("WINWORD.EXE".to_string()),
            ..Default::default()
        });

        let resolution = resolver_with(empty.path(), registry.clone()).resolve("word");

        assert_eq!(resolution.location, None);
        assert_eq!(resolution.diagnostics.len(), 1);
        assert!(resolution.diagnostics[0].contains("access is denied"));
    }

    #[test]
    fn test_nothing_found_is_absence() {
        let empty = tempfile::tempdir().unwrap();
        let resolver = ChainResolver::standard(Some(empty.path().as_os_str().to_owned()), None);
        let resolution = resolver.resolve("definitely-not-installed-anywhere");
        assert_eq!(resolution, Resolution::default());
    }
}
