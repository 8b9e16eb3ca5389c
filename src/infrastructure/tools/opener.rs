use crate::domain::traits::Opener;

/// The desktop's default handler (`xdg-open`, `open`, `start`), via the `open` crate.
///
/// Blocks until the short-lived helper exits and fails when it exits non-zero. The
/// program the helper starts is not waited on.
#[derive(Debug, Default, Clone)]
pub struct SystemOpener {
    /// Helper used instead of the platform default.
    helper: Option<String>,
}

impl SystemOpener {
    pub fn new(helper: Option<String>) -> Self {
        Self { helper }
    }
}

impl Opener for SystemOpener {
    fn open_detached(&self, target: &str) -> std::io::Result<()> {
        match &self.helper {
            Some(helper) => open::with(target, helper.as_str()),
            None => open::that(target),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::types::{ExecutionResult, ResolvedAction};
    use crate::infrastructure::tools::executor::CommandExecutor;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    fn helper_script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-open");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn opener(helper: &Path) -> SystemOpener {
        SystemOpener::new(Some(helper.to_string_lossy().into_owned()))
    }

    #[test]
    fn test_failing_helper_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let helper = helper_script(dir.path(), "exit 4");

        assert!(opener(&helper).open_detached("Notepad").is_err());
    }

    #[test]
    fn test_succeeding_helper_gets_target() {
        let dir = tempfile::tempdir().unwrap();
        let seen = dir.path().join("seen");
        let helper = helper_script(dir.path(), &format!("printf '%s' \"$1\" > '{}'", seen.display()));

        opener(&helper).open_detached("Notepad").unwrap();
        assert_eq!(std::fs::read_to_string(seen).unwrap(), "Notepad");
    }

    #[tokio::test]
    async fn test_launch_with_failing_helper_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let helper = helper_script(dir.path(), "exit 4");
        let executor = CommandExecutor::new(Arc::new(opener(&helper)), None);

        let result = executor
            .execute(&ResolvedAction::Launch("no-such-program-zz9".to_string()))
            .await;
        assert_eq!(result, ExecutionResult::failure("program not found"));
    }
}
