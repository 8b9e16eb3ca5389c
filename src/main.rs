//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration and Types
//! - Infrastructure: Model client, Executor, Registry, Logging
//! - Application: Parser, Resolver, Dispatcher, Engine
//! - Interface: REPL
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::application::engine::Pipeline;
use crate::domain::config::AppConfig;
use crate::infrastructure::llm::Client as LlmClient;
use crate::interface::repl::{Session, print_reply};
use crate::strings::logs;

#[derive(Debug, Parser)]
#[command(name = "errand", version, about = "Describe what you want done; errand does it")]
struct Cli {
    /// Configuration file (defaults to data/config.yaml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Handle a single request and exit
    #[arg(short, long, value_name = "TEXT")]
    exec: Option<String>,

    /// Treat input as model output (a JSON intent) and skip the model
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let source = AppConfig::locate(cli.config.as_deref());
    let config = AppConfig::load(source.as_deref()).context(logs::CONFIG_READ_ERROR)?;

    // 2. Logging Setup
    let _guard = infrastructure::logging::init(&config.logging)?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    tracing::info!("{}", logs::session_start(&timestamp));
    match &source {
        Some(path) => tracing::info!("{}", logs::config_source(&path.display().to_string())),
        None => tracing::info!("{}", logs::DEFAULT_CONFIG),
    }

    // 3. Wire the pipeline and the model
    let pipeline = Pipeline::from_config(&config);
    let llm = Arc::new(LlmClient::new(&config.model));
    let session = Session::new(llm, pipeline).raw(cli.raw);

    // 4. One-shot or interactive
    if let Some(request) = cli.exec {
        let reply = session.respond(&request).await;
        print_reply(&mut std::io::stdout(), &reply)?;
        return Ok(if reply.result.succeeded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin, &mut std::io::stdout()).await?;
    Ok(ExitCode::SUCCESS)
}
