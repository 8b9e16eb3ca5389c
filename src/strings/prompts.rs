//! # Prompts
//!
//! The translator prompt and the small renderer that fills its placeholders.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::types::Platform;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{[A-Z_]+\}\}").unwrap());

pub struct PromptRenderer<'a> {
    template: &'a str,
    replacements: Vec<(&'a str, String)>,
}

impl<'a> PromptRenderer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            replacements: Vec::new(),
        }
    }

    pub fn set(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.replacements.push((key, value.into()));
        self
    }

    pub fn render(self) -> String {
        // Only the template's own placeholders are checked, so user text that
        // happens to contain `{{...}}` is never flagged.
        for placeholder in PLACEHOLDER.find_iter(self.template) {
            let key = placeholder.as_str();
            if !self.replacements.iter().any(|(k, _)| *k == key) {
                tracing::error!("[PROMPT RENDER ERROR] Unreplaced placeholder: {}", key);
            }
        }

        let mut result = self.template.to_string();
        for (key, value) in self.replacements {
            result = result.replace(key, &value);
        }
        result
    }
}

pub const TRANSLATOR_TEMPLATE: &str = include_str!("../../prompts/translator.md");

/// Full prompt sent to the model for one user request.
pub fn translator_prompt(request: &str, platform: Platform) -> String {
    let platform = match platform {
        Platform::Windows => "Windows",
        Platform::Unix => "Unix-like",
    };
    PromptRenderer::new(TRANSLATOR_TEMPLATE)
        .set("{{PLATFORM}}", platform)
        .set("{{REQUEST}}", request)
        .render()
}
