//! # REPL
//!
//! Reads requests line by line, asks the model to translate each one, runs the
//! pipeline, and prints the outcome. A failed request never ends the session.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::application::engine::Pipeline;
use crate::domain::traits::LlmProvider;
use crate::domain::types::{Platform, Reply};
use crate::strings::{logs, messages, prompts};

pub struct Session {
    llm: Arc<dyn LlmProvider>,
    pipeline: Pipeline,
    /// Treat input as model output and skip the model.
    raw: bool,
}

impl Session {
    pub fn new(llm: Arc<dyn LlmProvider>, pipeline: Pipeline) -> Self {
        Self {
            llm,
            pipeline,
            raw: false,
        }
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub async fn respond(&self, request: &str) -> Reply {
        tracing::info!("{}", logs::request_received(request));

        let model_output = if self.raw {
            request.to_string()
        } else {
            let prompt = prompts::translator_prompt(request, Platform::current());
            match self.llm.completion(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("{}", logs::model_failed(&e));
                    return Reply::failed(messages::model_error(&e));
                }
            }
        };
        tracing::debug!("{}", logs::model_output(&model_output));

        self.pipeline.process(&model_output).await
    }

    /// Runs until an exit word or end of input.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", messages::GREETING)?;
        let mut lines = input.lines();

        loop {
            write!(out, "{}", messages::PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };
            let request = line.trim();
            if request.is_empty() {
                continue;
            }
            if is_exit_word(request) {
                writeln!(out, "{}", messages::FAREWELL)?;
                break;
            }

            if !self.raw {
                writeln!(out, "{}", messages::QUERYING_MODEL)?;
            }
            let reply = self.respond(request).await;
            print_reply(out, &reply)?;
        }

        tracing::info!("{}", logs::SESSION_END);
        Ok(())
    }
}

pub fn print_reply<W: Write>(out: &mut W, reply: &Reply) -> std::io::Result<()> {
    if let Some(action) = &reply.action {
        writeln!(out, "{}", messages::dispatched(action))?;
    }
    writeln!(out, "{}", messages::render_result(&reply.result))
}

fn is_exit_word(request: &str) -> bool {
    messages::EXIT_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(request))
}
