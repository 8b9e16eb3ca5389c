//! # Execution Engine
//!
//! The request pipeline: raw model text is parsed into an intent, dispatched to a
//! concrete action, and executed. Stateless between requests.

use std::ffi::OsString;
use std::sync::Arc;
use std::time::Duration;

use crate::application::dispatcher::Dispatcher;
use crate::application::parsing::parse_intent;
use crate::application::resolver::ChainResolver;
use crate::domain::config::AppConfig;
use crate::domain::error::ParseError;
use crate::domain::types::{ExecutionResult, Reply, ResolvedAction};
use crate::infrastructure::registry::host_registry;
use crate::infrastructure::tools::executor::CommandExecutor;
use crate::infrastructure::tools::opener::SystemOpener;
use crate::strings::logs;

pub struct Pipeline {
    dispatcher: Dispatcher,
    executor: CommandExecutor,
}

impl Pipeline {
    pub fn new(dispatcher: Dispatcher, executor: CommandExecutor) -> Self {
        Self {
            dispatcher,
            executor,
        }
    }

    /// Wires the host's search path, registry and opener.
    pub fn from_config(config: &AppConfig) -> Self {
        let search_path = config.commands.search_path.as_ref().map(OsString::from);
        let resolver = ChainResolver::standard(search_path, host_registry());
        tracing::debug!("Resolution strategies: {:?}", resolver.strategy_names());
        let executor = CommandExecutor::new(
            Arc::new(SystemOpener::new(config.commands.opener.clone())),
            config.commands.timeout.map(Duration::from_secs),
        );
        Self::new(Dispatcher::new(Arc::new(resolver)), executor)
    }

    /// Parses and dispatches without running anything.
    pub fn plan(&self, raw: &str) -> Result<ResolvedAction, ParseError> {
        let intent = parse_intent(raw)?;
        tracing::info!(
            "{}",
            logs::intent_parsed(intent.action().as_str(), intent.parameters().len())
        );

        let action = self.dispatcher.dispatch(&intent);
        tracing::info!("{}", logs::action_resolved(&action));
        Ok(action)
    }

    pub async fn execute(&self, action: &ResolvedAction) -> ExecutionResult {
        self.executor.execute(action).await
    }

    /// Full pipeline. Parse failures become a failed reply; nothing is run.
    pub async fn process(&self, raw: &str) -> Reply {
        match self.plan(raw) {
            Ok(action) => {
                let result = self.execute(&action).await;
                Reply {
                    action: Some(action),
                    result,
                }
            }
            Err(e) => {
                tracing::warn!("{}", logs::parse_failed(&e));
                Reply::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::resolver::tests::RecordingRegistry;
    use crate::domain::traits::AppRegistry;
    use crate::domain::types::Platform;
    use crate::infrastructure::tools::executor::tests::RecordingOpener;

    /// Pipeline whose search path is `dir`, with stub registry and opener.
    pub(crate) fn pipeline_in(
        dir: &std::path::Path,
        registry: Arc<RecordingRegistry>,
        opener: Arc<RecordingOpener>,
    ) -> Pipeline {
        let registry: Arc<dyn AppRegistry> = registry;
        let resolver = ChainResolver::standard(Some(dir.as_os_str().to_owned()), Some(registry));
        Pipeline::new(
            Dispatcher::for_platform(Arc::new(resolver), Platform::current()),
            CommandExecutor::new(opener, None),
        )
    }

    #[tokio::test]
    async fn test_open_program_not_found_anywhere() {
        let empty = tempfile::tempdir().unwrap();
        let registry = Arc::new(RecordingRegistry::default());
        let opener = Arc::new(RecordingOpener::default());
        let pipeline = pipeline_in(empty.path(), registry.clone(), opener.clone());
        let raw = r#"{"action":"open_program","program":"Notepad"}"#;

        assert_eq!(
            pipeline.plan(raw).unwrap(),
            ResolvedAction::Launch("Notepad".to_string())
        );

        let result = pipeline.process(raw).await.result;
        assert_eq!(result, ExecutionResult::failure("program not found"));
        assert_eq!(opener.calls(), vec!["Notepad".to_string()]);
        // Non-office name: only the app-paths lookup hits the registry, once per run.
        assert_eq!(
            registry.calls(),
            vec!["Notepad.exe".to_string(), "Notepad.exe".to_string()]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_directory_in_noise() {
        let empty = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(
            empty.path(),
            Arc::new(RecordingRegistry::default()),
            Arc::new(RecordingOpener::default()),
        );
        let raw = r#"Hello! {"action":"list_directory","path":"/tmp"} thanks"#;

        assert_eq!(
            pipeline.plan(raw).unwrap(),
            ResolvedAction::ShellCommand("ls /tmp".to_string())
        );
        let result = pipeline.process(raw).await.result;
        assert!(result.succeeded, "{}", result.diagnostic);
        assert!(result.diagnostic.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_show_path_prints_cwd() {
        let empty = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(
            empty.path(),
            Arc::new(RecordingRegistry::default()),
            Arc::new(RecordingOpener::default()),
        );

        let result = pipeline.process(r#"{"action":"show_path"}"#).await.result;
        let cwd = std::env::current_dir().unwrap();
        assert!(result.succeeded);
        assert_eq!(
            std::fs::canonicalize(result.output.trim()).unwrap(),
            std::fs::canonicalize(cwd).unwrap()
        );
    }

    #[tokio::test]
    async fn test_parse_failure_runs_nothing() {
        let empty = tempfile::tempdir().unwrap();
        let opener = Arc::new(RecordingOpener::default());
        let pipeline = pipeline_in(empty.path(), Arc::new(RecordingRegistry::default()), opener.clone());

        let result = pipeline.process("Sorry, I can't help with that.").await.result;
        assert!(!result.succeeded);
        assert_eq!(result.diagnostic, ParseError::NoPayload.to_string());
        assert!(opener.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reply_carries_resolved_action() {
        let empty = tempfile::tempdir().unwrap();
        let opener = Arc::new(RecordingOpener::succeeding());
        let pipeline = pipeline_in(empty.path(), Arc::new(RecordingRegistry::default()), opener);

        let reply = pipeline
            .process(r#"{"action":"open_program","program":"Notepad"}"#)
            .await;
        assert_eq!(reply.action, Some(ResolvedAction::Launch("Notepad".to_string())));
        assert_eq!(reply.result, ExecutionResult::success("launched"));

        let reply = pipeline.process("{not json}").await;
        assert_eq!(reply.action, None);
        assert!(!reply.result.succeeded);
    }

    #[tokio::test]
    async fn test_validation_and_unsupported_are_reported() {
        let empty = tempfile::tempdir().unwrap();
        let registry = Arc::new(RecordingRegistry::default());
        let pipeline = pipeline_in(empty.path(), registry.clone(), Arc::new(RecordingOpener::default()));

        let result = pipeline.process(r#"{"action":"open_program"}"#).await.result;
        assert_eq!(result, ExecutionResult::failure("no program specified"));

        let result = pipeline.process(r#"{"action":"delete_everything"}"#).await.result;
        assert_eq!(result, ExecutionResult::failure("unsupported action"));

        assert!(registry.calls().is_empty());
    }
}
